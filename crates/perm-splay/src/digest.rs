//! Digest maintenance: lazy tag application, `push_down` and `pull_up`.
//!
//! A tag is applied to a node's own fields the moment it is attached, and
//! remembered as pending for the children. [`push_down`] forwards pending
//! tags one level; [`pull_up`] recomputes a node from its children and must
//! only run once both children are up to date.

use crate::node::NodeArena;

/// Overwrites every value in the subtree at `idx` with `value`.
pub fn apply_assign(arena: &mut NodeArena, idx: u32, value: i64) {
    let node = &mut arena[idx];
    let size = node.size;
    node.value = value;
    node.sum = value.wrapping_mul(size as i64);
    node.min = value;
    node.max = value;
    node.leftmost = value;
    node.rightmost = value;
    node.nondecr_prefix = size;
    node.nonincr_prefix = size;
    node.nondecr_suffix = size;
    node.nonincr_suffix = size;
    node.pending_assign = Some(value);
    node.pending_add = 0;
}

/// Adds `delta` to every value in the subtree at `idx`.
///
/// Run lengths are unaffected: a uniform shift keeps every pairwise
/// comparison.
pub fn apply_add(arena: &mut NodeArena, idx: u32, delta: i64) {
    let node = &mut arena[idx];
    node.value = node.value.wrapping_add(delta);
    node.sum = node.sum.wrapping_add(delta.wrapping_mul(node.size as i64));
    node.min = node.min.wrapping_add(delta);
    node.max = node.max.wrapping_add(delta);
    node.leftmost = node.leftmost.wrapping_add(delta);
    node.rightmost = node.rightmost.wrapping_add(delta);
    match node.pending_assign {
        Some(v) => node.pending_assign = Some(v.wrapping_add(delta)),
        None => node.pending_add = node.pending_add.wrapping_add(delta),
    }
}

/// Reverses the in-order sequence of the subtree at `idx`.
///
/// The children links are swapped lazily by [`push_down`].
pub fn apply_reverse(arena: &mut NodeArena, idx: u32) {
    let node = &mut arena[idx];
    std::mem::swap(&mut node.nondecr_prefix, &mut node.nonincr_suffix);
    std::mem::swap(&mut node.nonincr_prefix, &mut node.nondecr_suffix);
    std::mem::swap(&mut node.leftmost, &mut node.rightmost);
    node.pending_reverse ^= true;
}

/// Forwards the pending tags of `idx` to its children and clears them.
pub fn push_down(arena: &mut NodeArena, idx: u32) {
    let node = &mut arena[idx];
    if !node.has_pending() {
        return;
    }
    let assign = node.pending_assign.take();
    let add = std::mem::take(&mut node.pending_add);
    let reverse = std::mem::take(&mut node.pending_reverse);
    if reverse {
        std::mem::swap(&mut node.l, &mut node.r);
    }
    let children = [node.l, node.r];
    for child in children.into_iter().flatten() {
        if let Some(value) = assign {
            apply_assign(arena, child, value);
        }
        if add != 0 {
            apply_add(arena, child, add);
        }
        if reverse {
            apply_reverse(arena, child);
        }
    }
}

/// Length of the run ending at the last element of `[left] value [right]`,
/// where `ok(a, b)` holds for every adjacent pair `a, b` inside the run.
#[inline]
fn suffix_run(
    value: i64,
    left: Option<(usize, usize, i64)>,
    right: Option<(usize, usize, i64)>,
    ok: fn(i64, i64) -> bool,
) -> usize {
    // (size, run, boundary value facing `value`)
    let mut run = match right {
        Some((size, run, first)) => {
            if run < size || !ok(value, first) {
                return run;
            }
            size + 1
        }
        None => 1,
    };
    if let Some((_, l_run, last)) = left {
        if ok(last, value) {
            run += l_run;
        }
    }
    run
}

/// Mirror image of [`suffix_run`] for the run starting at the first element.
#[inline]
fn prefix_run(
    value: i64,
    left: Option<(usize, usize, i64)>,
    right: Option<(usize, usize, i64)>,
    ok: fn(i64, i64) -> bool,
) -> usize {
    let mut run = match left {
        Some((size, run, last)) => {
            if run < size || !ok(last, value) {
                return run;
            }
            size + 1
        }
        None => 1,
    };
    if let Some((_, r_run, first)) = right {
        if ok(value, first) {
            run += r_run;
        }
    }
    run
}

fn nondecr(a: i64, b: i64) -> bool {
    a <= b
}

fn nonincr(a: i64, b: i64) -> bool {
    a >= b
}

/// Recomputes the digest of `idx` from its value and its children.
pub fn pull_up(arena: &mut NodeArena, idx: u32) {
    let (l, r, value) = {
        let node = &arena[idx];
        (node.l, node.r, node.value)
    };

    let mut size = 1;
    let mut sum = value;
    let mut min = value;
    let mut max = value;
    let mut leftmost = value;
    let mut rightmost = value;

    if let Some(l) = l {
        let c = &arena[l];
        size += c.size;
        sum = sum.wrapping_add(c.sum);
        min = min.min(c.min);
        max = max.max(c.max);
        leftmost = c.leftmost;
    }
    if let Some(r) = r {
        let c = &arena[r];
        size += c.size;
        sum = sum.wrapping_add(c.sum);
        min = min.min(c.min);
        max = max.max(c.max);
        rightmost = c.rightmost;
    }

    let side = |c: Option<u32>, prefix: bool, up: bool, facing_last: bool| {
        c.map(|c| {
            let n = &arena[c];
            let run = match (prefix, up) {
                (true, true) => n.nondecr_prefix,
                (true, false) => n.nonincr_prefix,
                (false, true) => n.nondecr_suffix,
                (false, false) => n.nonincr_suffix,
            };
            let boundary = if facing_last { n.rightmost } else { n.leftmost };
            (n.size, run, boundary)
        })
    };

    let nondecr_suffix = suffix_run(value, side(l, false, true, true), side(r, false, true, false), nondecr);
    let nonincr_suffix = suffix_run(value, side(l, false, false, true), side(r, false, false, false), nonincr);
    let nondecr_prefix = prefix_run(value, side(l, true, true, true), side(r, true, true, false), nondecr);
    let nonincr_prefix = prefix_run(value, side(l, true, false, true), side(r, true, false, false), nonincr);

    let node = &mut arena[idx];
    node.size = size;
    node.sum = sum;
    node.min = min;
    node.max = max;
    node.leftmost = leftmost;
    node.rightmost = rightmost;
    node.nondecr_suffix = nondecr_suffix;
    node.nonincr_suffix = nonincr_suffix;
    node.nondecr_prefix = nondecr_prefix;
    node.nonincr_prefix = nonincr_prefix;
}
