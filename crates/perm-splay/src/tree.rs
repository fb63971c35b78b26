//! [`SeqTree`]: the public sequence type.
//!
//! Every range operation follows one shape: cut out `[begin, end]` with two
//! splits, work on the isolated middle tree, glue the three parts back. The
//! tree is never left cut across a call.

use std::fmt;

use log::{debug, log_enabled, trace, Level};

use crate::digest::{apply_add, apply_assign, apply_reverse, pull_up, push_down};
use crate::error::{check_position, check_range, SeqError};
use crate::iter::Iter;
use crate::navigate::find;
use crate::node::NodeArena;
use crate::print::print_node;
use crate::splay::splay;
use crate::split::{isolate, merge, restore, split};

/// A mutable sequence of `i64` backed by an implicit splay tree.
///
/// Indices are 0-based; ranges are inclusive on both ends.
#[derive(Clone, Default)]
pub struct SeqTree {
    arena: NodeArena,
    root: Option<u32>,
}

/// Which way a permutation step goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Next,
    Prev,
}

impl SeqTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a perfectly balanced tree over `values` in O(n).
    pub fn from_slice(values: &[i64]) -> Self {
        let mut arena = NodeArena::with_capacity(values.len());
        let root = build(&mut arena, values);
        Self { arena, root }
    }

    pub fn len(&self) -> usize {
        self.arena.size(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// First element, read from the root digest.
    pub fn front(&self) -> Option<i64> {
        self.root.map(|r| self.arena[r].leftmost)
    }

    /// Last element, read from the root digest.
    pub fn back(&self) -> Option<i64> {
        self.root.map(|r| self.arena[r].rightmost)
    }

    /// Value at `pos`. Splays the node to the root.
    pub fn get(&mut self, pos: usize) -> Result<i64, SeqError> {
        let root = self.splay_at(pos)?;
        Ok(self.arena[root].value)
    }

    /// Overwrites the value at `pos`.
    pub fn set(&mut self, pos: usize, value: i64) -> Result<(), SeqError> {
        debug!("set({pos}, {value})");
        let root = self.splay_at(pos)?;
        self.arena[root].value = value;
        pull_up(&mut self.arena, root);
        Ok(())
    }

    fn splay_at(&mut self, pos: usize) -> Result<u32, SeqError> {
        check_position(pos, self.len())?;
        let root = self.root.ok_or(SeqError::EmptyRangeOnEmptyTree)?;
        let root = find(&mut self.arena, root, pos);
        self.root = Some(root);
        Ok(root)
    }

    /// Inserts `value` so that it ends up at index `pos`; `pos == len`
    /// appends.
    pub fn insert(&mut self, value: i64, pos: usize) -> Result<(), SeqError> {
        let len = self.len();
        if pos > len {
            return Err(SeqError::IndexOutOfRange { index: pos, len });
        }
        debug!("insert({value}, {pos})");
        let node = self.arena.alloc(value);
        let (left, right) = split(&mut self.arena, self.root.take(), pos);
        let left = merge(&mut self.arena, left, Some(node));
        self.root = merge(&mut self.arena, left, right);
        Ok(())
    }

    pub fn push_back(&mut self, value: i64) {
        let node = self.arena.alloc(value);
        self.root = merge(&mut self.arena, self.root.take(), Some(node));
    }

    /// Removes the element at `pos` and returns its value.
    pub fn delete(&mut self, pos: usize) -> Result<i64, SeqError> {
        check_position(pos, self.len())?;
        debug!("delete({pos})");
        let root = self.root.take().ok_or(SeqError::EmptyRangeOnEmptyTree)?;
        let parts = isolate(&mut self.arena, root, pos, pos);
        let value = self.arena[parts.mid].value;
        self.arena.release(parts.mid);
        self.root = merge(&mut self.arena, parts.left, parts.right);
        Ok(value)
    }

    /// Runs `op` on the isolated middle tree of `[begin, end]`. `op` returns
    /// the (possibly new) root of the middle tree.
    fn with_range<R>(
        &mut self,
        begin: usize,
        end: usize,
        op: impl FnOnce(&mut NodeArena, u32) -> (u32, R),
    ) -> Result<R, SeqError> {
        check_range(begin, end, self.len())?;
        let root = self.root.take().ok_or(SeqError::EmptyRangeOnEmptyTree)?;
        let mut parts = isolate(&mut self.arena, root, begin, end);
        let (mid, out) = op(&mut self.arena, parts.mid);
        parts.mid = mid;
        self.root = Some(restore(&mut self.arena, parts));
        if log_enabled!(Level::Trace) {
            trace!("after [{begin}, {end}]:\n{}", self.dump_tree());
        }
        Ok(out)
    }

    pub fn sum(&mut self, begin: usize, end: usize) -> Result<i64, SeqError> {
        debug!("sum({begin}, {end})");
        self.with_range(begin, end, |arena, mid| (mid, arena[mid].sum))
    }

    pub fn min(&mut self, begin: usize, end: usize) -> Result<i64, SeqError> {
        debug!("min({begin}, {end})");
        self.with_range(begin, end, |arena, mid| (mid, arena[mid].min))
    }

    pub fn max(&mut self, begin: usize, end: usize) -> Result<i64, SeqError> {
        debug!("max({begin}, {end})");
        self.with_range(begin, end, |arena, mid| (mid, arena[mid].max))
    }

    /// Sets every element of `[begin, end]` to `value`.
    pub fn assign(&mut self, value: i64, begin: usize, end: usize) -> Result<(), SeqError> {
        debug!("assign({value}, {begin}, {end})");
        self.with_range(begin, end, |arena, mid| {
            apply_assign(arena, mid, value);
            (mid, ())
        })
    }

    /// Adds `delta` to every element of `[begin, end]`.
    pub fn add(&mut self, delta: i64, begin: usize, end: usize) -> Result<(), SeqError> {
        debug!("add({delta}, {begin}, {end})");
        self.with_range(begin, end, |arena, mid| {
            apply_add(arena, mid, delta);
            (mid, ())
        })
    }

    pub fn reverse(&mut self, begin: usize, end: usize) -> Result<(), SeqError> {
        debug!("reverse({begin}, {end})");
        self.with_range(begin, end, |arena, mid| {
            apply_reverse(arena, mid);
            (mid, ())
        })
    }

    /// Rearranges `[begin, end]` into its lexicographically next permutation.
    ///
    /// Returns `false` if the range was already the largest arrangement, in
    /// which case it wraps around to the smallest (sorted ascending).
    pub fn next_permutation(&mut self, begin: usize, end: usize) -> Result<bool, SeqError> {
        debug!("next_permutation({begin}, {end})");
        self.with_range(begin, end, |arena, mid| permute(arena, mid, Step::Next))
    }

    /// Rearranges `[begin, end]` into its lexicographically previous
    /// permutation.
    ///
    /// Returns `false` if the range was already the smallest arrangement, in
    /// which case it wraps around to the largest (sorted descending).
    pub fn prev_permutation(&mut self, begin: usize, end: usize) -> Result<bool, SeqError> {
        debug!("prev_permutation({begin}, {end})");
        self.with_range(begin, end, |arena, mid| permute(arena, mid, Step::Prev))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.arena, self.root)
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }

    /// Renders the current tree shape, including pending tags.
    pub fn dump_tree(&self) -> String {
        print_node(&self.arena, self.root, "")
    }

    /// Checks every structural and digest invariant, panicking on the first
    /// violation. Forwards all pending tags as a side effect.
    pub fn validate(&mut self) {
        let Some(root) = self.root else {
            assert_eq!(self.arena.live(), 0, "empty tree still owns nodes");
            return;
        };
        assert_eq!(self.arena.p(root), None, "root has a parent");

        let mut order = Vec::with_capacity(self.len());
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            push_down(&mut self.arena, idx);
            order.push(idx);
            for child in [self.arena.l(idx), self.arena.r(idx)].into_iter().flatten() {
                assert_eq!(self.arena.p(child), Some(idx), "broken parent link at {child}");
                stack.push(child);
            }
        }
        assert_eq!(order.len(), self.arena.live(), "unreachable nodes in arena");

        for &idx in order.iter().rev() {
            let stored = self.arena[idx].clone();
            pull_up(&mut self.arena, idx);
            assert_eq!(stored, self.arena[idx], "stale digest at node {idx}");
        }

        let values = self.to_vec();
        let node = &self.arena[root];
        assert_eq!(node.nondecr_prefix, prefix_len(&values, |a, b| a <= b));
        assert_eq!(node.nonincr_prefix, prefix_len(&values, |a, b| a >= b));
        assert_eq!(node.nondecr_suffix, suffix_len(&values, |a, b| a <= b));
        assert_eq!(node.nonincr_suffix, suffix_len(&values, |a, b| a >= b));
    }
}

fn build(arena: &mut NodeArena, values: &[i64]) -> Option<u32> {
    if values.is_empty() {
        return None;
    }
    let mid = values.len() / 2;
    let node = arena.alloc(values[mid]);
    let left = build(arena, &values[..mid]);
    let right = build(arena, &values[mid + 1..]);
    arena.set_l(node, left);
    arena.set_r(node, right);
    pull_up(arena, node);
    Some(node)
}

fn prefix_len(values: &[i64], ok: fn(i64, i64) -> bool) -> usize {
    if values.is_empty() {
        return 0;
    }
    1 + values.windows(2).take_while(|w| ok(w[0], w[1])).count()
}

fn suffix_len(values: &[i64], ok: fn(i64, i64) -> bool) -> usize {
    if values.is_empty() {
        return 0;
    }
    1 + values.windows(2).rev().take_while(|w| ok(w[0], w[1])).count()
}

/// One permutation step on the whole tree at `sub`. Returns the new root and
/// whether a strict successor/predecessor existed.
fn permute(arena: &mut NodeArena, sub: u32, step: Step) -> (u32, bool) {
    let size = arena[sub].size;
    // Longest suffix that already admits no further step on its own.
    let run = match step {
        Step::Next => arena[sub].nonincr_suffix,
        Step::Prev => arena[sub].nondecr_suffix,
    };
    if run == size {
        trace!("{step:?}: range of {size} is extremal, wrapping around");
        apply_reverse(arena, sub);
        return (sub, false);
    }

    let (head, tail) = split(arena, Some(sub), size - run);
    let (prefix, pivot) = split(arena, head, size - run - 1);
    let (Some(pivot), Some(tail)) = (pivot, tail) else {
        unreachable!("pivot and tail are non-empty when run < size");
    };
    let pivot_value = arena[pivot].value;
    trace!("{step:?}: pivot {pivot_value} at {}, tail of {run}", size - run - 1);

    let partner = swap_partner(arena, tail, pivot_value, step);
    let tail = splay(arena, partner);
    let partner_value = arena[tail].value;
    arena[pivot].value = partner_value;
    arena[tail].value = pivot_value;
    pull_up(arena, pivot);
    pull_up(arena, tail);
    apply_reverse(arena, tail);

    let head = merge(arena, prefix, Some(pivot));
    match merge(arena, head, Some(tail)) {
        Some(root) => (root, true),
        None => unreachable!("merge of non-empty trees is non-empty"),
    }
}

/// Finds, in a monotonic tail, the rightmost element strictly beyond the
/// pivot: the smallest value above it for [`Step::Next`] (tail
/// non-increasing), the largest value below it for [`Step::Prev`] (tail
/// non-decreasing). Elements beyond the pivot form a prefix of the tail, so
/// the descent prunes with the right child's `max`/`min`.
fn swap_partner(arena: &mut NodeArena, tail: u32, pivot: i64, step: Step) -> u32 {
    let beyond = |v: i64| match step {
        Step::Next => v > pivot,
        Step::Prev => v < pivot,
    };
    let mut curr = tail;
    loop {
        push_down(arena, curr);
        let node = &arena[curr];
        if beyond(node.value) {
            let right_has_more = node.r.is_some_and(|r| match step {
                Step::Next => arena[r].max > pivot,
                Step::Prev => arena[r].min < pivot,
            });
            match node.r {
                Some(r) if right_has_more => curr = r,
                _ => return curr,
            }
        } else {
            match node.l {
                Some(l) => curr = l,
                None => {
                    debug_assert!(false, "tail holds no element beyond the pivot");
                    return curr;
                }
            }
        }
    }
}

impl fmt::Debug for SeqTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl From<&[i64]> for SeqTree {
    fn from(values: &[i64]) -> Self {
        Self::from_slice(values)
    }
}

impl FromIterator<i64> for SeqTree {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let values: Vec<i64> = iter.into_iter().collect();
        Self::from_slice(&values)
    }
}

impl Extend<i64> for SeqTree {
    /// Appends a balanced subtree built from `iter`.
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        let values: Vec<i64> = iter.into_iter().collect();
        let tail = build(&mut self.arena, &values);
        self.root = merge(&mut self.arena, self.root.take(), tail);
    }
}

impl<'a> IntoIterator for &'a SeqTree {
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_sum_and_step() {
        let mut tree = SeqTree::new();
        for (pos, v) in [5, 3, 3, 1].into_iter().enumerate() {
            tree.insert(v, pos).unwrap();
        }
        assert_eq!(tree.sum(0, 3), Ok(12));
        // Fully non-increasing: wraps to ascending order.
        assert_eq!(tree.next_permutation(0, 3), Ok(false));
        assert_eq!(tree.to_vec(), vec![1, 3, 3, 5]);
        assert_eq!(tree.next_permutation(0, 3), Ok(true));
        assert_eq!(tree.to_vec(), vec![1, 3, 5, 3]);
        assert_eq!(tree.next_permutation(1, 3), Ok(true));
        assert_eq!(tree.to_vec(), vec![1, 5, 3, 3]);
        assert_eq!(tree.prev_permutation(0, 3), Ok(true));
        assert_eq!(tree.to_vec(), vec![1, 3, 5, 3]);
        tree.validate();
    }

    #[test]
    fn wrap_around() {
        let mut tree = SeqTree::from_slice(&[9, 4, 4, 1]);
        assert_eq!(tree.next_permutation(0, 3), Ok(false));
        assert_eq!(tree.to_vec(), vec![1, 4, 4, 9]);
        assert_eq!(tree.prev_permutation(0, 3), Ok(false));
        assert_eq!(tree.to_vec(), vec![9, 4, 4, 1]);
        tree.validate();
    }

    #[test]
    fn single_element_range() {
        let mut tree = SeqTree::from_slice(&[1, 2, 3]);
        assert_eq!(tree.next_permutation(1, 1), Ok(false));
        assert_eq!(tree.prev_permutation(2, 2), Ok(false));
        tree.reverse(0, 0).unwrap();
        assert_eq!(tree.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn errors_leave_tree_untouched() {
        let mut tree = SeqTree::new();
        assert_eq!(tree.sum(0, 0), Err(SeqError::EmptyRangeOnEmptyTree));
        assert_eq!(tree.delete(0), Err(SeqError::EmptyRangeOnEmptyTree));
        assert_eq!(tree.get(0), Err(SeqError::EmptyRangeOnEmptyTree));
        assert_eq!(
            tree.insert(1, 1),
            Err(SeqError::IndexOutOfRange { index: 1, len: 0 })
        );

        tree.extend([1, 2, 3]);
        assert_eq!(tree.add(1, 2, 3), Err(SeqError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(tree.reverse(2, 1), Err(SeqError::InvertedRange { begin: 2, end: 1 }));
        assert_eq!(tree.to_vec(), vec![1, 2, 3]);
        tree.validate();
    }

    #[test]
    fn point_access() {
        let mut tree: SeqTree = (0..10).collect();
        assert_eq!(tree.get(7), Ok(7));
        tree.set(7, -1).unwrap();
        assert_eq!(tree.sum(0, 9), Ok(45 - 8));
        assert_eq!(tree.front(), Some(0));
        assert_eq!(tree.back(), Some(9));
        assert_eq!(tree.delete(0), Ok(0));
        assert_eq!(tree.front(), Some(1));
        assert_eq!(tree.min(0, 8), Ok(-1));
        assert_eq!(tree.max(0, 5), Ok(6));
        tree.validate();
    }

    #[test]
    fn debug_prints_sequence() {
        let mut tree = SeqTree::from_slice(&[3, 1, 2]);
        tree.reverse(0, 2).unwrap();
        assert_eq!(format!("{tree:?}"), "[2, 1, 3]");
        assert!(tree.dump_tree().starts_with("Node["));
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.dump_tree(), "∅");
    }
}
