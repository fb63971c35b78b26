//! Node store: per-position payload plus the subtree digest.
//!
//! Nodes live in a [`NodeArena`]; every link (`p`, `l`, `r`) is an
//! `Option<u32>` index into it. The parent link is a back-reference only,
//! ownership flows strictly from parent to child.

use std::ops::{Index, IndexMut};

/// One sequence element and the digest of the subtree rooted at it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeqNode {
    pub value: i64,

    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,

    /// Number of nodes in this subtree.
    pub size: usize,
    pub sum: i64,
    pub min: i64,
    pub max: i64,
    /// Value of the in-order first node of the subtree.
    pub leftmost: i64,
    /// Value of the in-order last node of the subtree.
    pub rightmost: i64,

    pub nondecr_prefix: usize,
    pub nonincr_prefix: usize,
    pub nondecr_suffix: usize,
    pub nonincr_suffix: usize,

    /// Pending tags. Already reflected in this node's own fields, not yet
    /// forwarded to the children.
    pub pending_assign: Option<i64>,
    pub pending_add: i64,
    pub pending_reverse: bool,
}

impl SeqNode {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            p: None,
            l: None,
            r: None,
            size: 1,
            sum: value,
            min: value,
            max: value,
            leftmost: value,
            rightmost: value,
            nondecr_prefix: 1,
            nonincr_prefix: 1,
            nondecr_suffix: 1,
            nonincr_suffix: 1,
            pending_assign: None,
            pending_add: 0,
            pending_reverse: false,
        }
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending_assign.is_some() || self.pending_add != 0 || self.pending_reverse
    }
}

/// Slot vector with a free list. Released slots are reused by the next
/// allocation.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SeqNode>,
    free: Vec<u32>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Allocates a detached single-node tree holding `value`.
    pub fn alloc(&mut self, value: i64) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx as usize] = SeqNode::new(value);
                idx
            }
            None => {
                self.nodes.push(SeqNode::new(value));
                (self.nodes.len() - 1) as u32
            }
        }
    }

    /// Returns a detached node's slot to the free list.
    pub fn release(&mut self, idx: u32) {
        debug_assert!(self.nodes[idx as usize].p.is_none());
        debug_assert!(self.nodes[idx as usize].l.is_none());
        debug_assert!(self.nodes[idx as usize].r.is_none());
        self.nodes[idx as usize] = SeqNode::new(0);
        self.free.push(idx);
    }

    /// Number of live nodes.
    pub fn live(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
    }

    #[inline]
    pub fn p(&self, idx: u32) -> Option<u32> {
        self.nodes[idx as usize].p
    }

    #[inline]
    pub fn l(&self, idx: u32) -> Option<u32> {
        self.nodes[idx as usize].l
    }

    #[inline]
    pub fn r(&self, idx: u32) -> Option<u32> {
        self.nodes[idx as usize].r
    }

    #[inline]
    pub fn set_p(&mut self, idx: u32, v: Option<u32>) {
        self.nodes[idx as usize].p = v;
    }

    /// Sets the left child of `idx` and points the child back at `idx`.
    #[inline]
    pub fn set_l(&mut self, idx: u32, v: Option<u32>) {
        self.nodes[idx as usize].l = v;
        if let Some(c) = v {
            self.nodes[c as usize].p = Some(idx);
        }
    }

    /// Sets the right child of `idx` and points the child back at `idx`.
    #[inline]
    pub fn set_r(&mut self, idx: u32, v: Option<u32>) {
        self.nodes[idx as usize].r = v;
        if let Some(c) = v {
            self.nodes[c as usize].p = Some(idx);
        }
    }

    /// Subtree size, `0` for an absent subtree.
    #[inline]
    pub fn size(&self, idx: Option<u32>) -> usize {
        idx.map_or(0, |i| self.nodes[i as usize].size)
    }
}

impl Index<u32> for NodeArena {
    type Output = SeqNode;

    #[inline]
    fn index(&self, idx: u32) -> &SeqNode {
        &self.nodes[idx as usize]
    }
}

impl IndexMut<u32> for NodeArena {
    #[inline]
    fn index_mut(&mut self, idx: u32) -> &mut SeqNode {
        &mut self.nodes[idx as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_reuses_released_slots() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        assert_eq!(arena.live(), 2);
        arena.release(a);
        assert_eq!(arena.live(), 1);
        let c = arena.alloc(3);
        assert_eq!(c, a);
        assert_eq!(arena[c].value, 3);
        assert_eq!(arena[b].value, 2);
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn linking_sets_parent() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        arena.set_l(a, Some(b));
        assert_eq!(arena.l(a), Some(b));
        assert_eq!(arena.p(b), Some(a));
        assert_eq!(arena.size(None), 0);
        assert_eq!(arena.size(Some(a)), 1);
    }
}
