//! Split / merge, the only primitives that change which nodes share a tree.
//!
//! Both consume their input roots: after a split the old root id belongs to
//! exactly one of the returned halves, after a merge neither input is a root
//! any more.

use crate::digest::pull_up;
use crate::navigate::find;
use crate::node::NodeArena;

/// Splits the tree at `root` into the first `k` elements and the rest.
pub fn split(arena: &mut NodeArena, root: Option<u32>, k: usize) -> (Option<u32>, Option<u32>) {
    let Some(root) = root else {
        return (None, None);
    };
    if k >= arena[root].size {
        return (Some(root), None);
    }
    let root = find(arena, root, k);
    let left = arena.l(root);
    arena[root].l = None;
    if let Some(l) = left {
        arena.set_p(l, None);
    }
    pull_up(arena, root);
    (left, Some(root))
}

/// Concatenates two trees, `left` first.
pub fn merge(arena: &mut NodeArena, left: Option<u32>, right: Option<u32>) -> Option<u32> {
    let Some(left) = left else {
        return right;
    };
    let Some(right) = right else {
        return Some(left);
    };
    let size = arena[left].size;
    let root = find(arena, left, size - 1);
    debug_assert!(arena.r(root).is_none());
    arena.set_r(root, Some(right));
    pull_up(arena, root);
    Some(root)
}

/// A tree cut into `[0, begin)`, `[begin, end]` and `(end, len)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Isolated {
    pub left: Option<u32>,
    pub mid: u32,
    pub right: Option<u32>,
}

/// Cuts out the inclusive range `[begin, end]`. The range must be valid and
/// non-empty for the tree at `root`.
pub fn isolate(arena: &mut NodeArena, root: u32, begin: usize, end: usize) -> Isolated {
    let (rest, right) = split(arena, Some(root), end + 1);
    let (left, mid) = split(arena, rest, begin);
    match mid {
        Some(mid) => Isolated { left, mid, right },
        None => unreachable!("isolate called with an empty range"),
    }
}

/// Glues the three parts of an [`Isolated`] back in order.
pub fn restore(arena: &mut NodeArena, parts: Isolated) -> u32 {
    let rest = merge(arena, parts.left, Some(parts.mid));
    match merge(arena, rest, parts.right) {
        Some(root) => root,
        None => unreachable!("merge of a non-empty middle is non-empty"),
    }
}
