//! Rotations and bottom-up splaying.
//!
//! Pending tags on the path are forwarded before any link moves, so a lazy
//! reversal can never flip a node's side in the middle of a rotation.

use crate::digest::{pull_up, push_down};
use crate::node::NodeArena;

// ── single-level rotations ────────────────────────────────────────────────

/// Promote `c2` over its parent `c1` (c2 was left child of c1).
///
/// ```text
///     c1           c2
///    /      →        \
///   c2               c1
///     \             /
///      b           b
/// ```
pub fn rotate_right(arena: &mut NodeArena, c2: u32, c1: u32) {
    let p = arena.p(c1);
    let b = arena.r(c2);
    arena.set_l(c1, b);
    arena.set_r(c2, Some(c1));
    relink_parent(arena, p, c1, c2);
    pull_up(arena, c1);
    pull_up(arena, c2);
}

/// Promote `c2` over its parent `c1` (c2 was right child of c1).
pub fn rotate_left(arena: &mut NodeArena, c2: u32, c1: u32) {
    let p = arena.p(c1);
    let b = arena.l(c2);
    arena.set_r(c1, b);
    arena.set_l(c2, Some(c1));
    relink_parent(arena, p, c1, c2);
    pull_up(arena, c1);
    pull_up(arena, c2);
}

/// Rotates `x` one level up over its parent. No-op on a root.
pub fn rotate(arena: &mut NodeArena, x: u32) {
    let Some(p) = arena.p(x) else {
        return;
    };
    push_down(arena, p);
    push_down(arena, x);
    if arena.l(p) == Some(x) {
        rotate_right(arena, x, p);
    } else {
        rotate_left(arena, x, p);
    }
}

/// After a rotation moved `c2` into the slot previously held by `c1`, wire
/// `c2` into c1's old parent `p`.
fn relink_parent(arena: &mut NodeArena, p: Option<u32>, c1: u32, c2: u32) {
    match p {
        Some(p) => {
            if arena.l(p) == Some(c1) {
                arena.set_l(p, Some(c2));
            } else {
                arena.set_r(p, Some(c2));
            }
        }
        None => arena.set_p(c2, None),
    }
}

// ── splay ─────────────────────────────────────────────────────────────────

#[inline]
fn is_left(arena: &NodeArena, x: u32, p: u32) -> bool {
    arena.l(p) == Some(x)
}

/// Forwards every pending tag on the path from the tree root down to `x`.
fn push_path(arena: &mut NodeArena, x: u32) {
    let mut path = vec![x];
    let mut curr = x;
    while let Some(p) = arena.p(curr) {
        path.push(p);
        curr = p;
    }
    for &idx in path.iter().rev() {
        push_down(arena, idx);
    }
}

/// Splays `x` to the root of its tree and returns it.
///
/// Uses zig when the parent is the root, zig-zig when `x` and its parent
/// hang on the same side, zig-zag otherwise.
pub fn splay(arena: &mut NodeArena, x: u32) -> u32 {
    push_path(arena, x);
    while let Some(p) = arena.p(x) {
        match arena.p(p) {
            None => {
                // zig
                rotate(arena, x);
            }
            Some(g) => {
                if is_left(arena, x, p) == is_left(arena, p, g) {
                    // zig-zig
                    rotate(arena, p);
                    rotate(arena, x);
                } else {
                    // zig-zag
                    rotate(arena, x);
                    rotate(arena, x);
                }
            }
        }
    }
    x
}
