//! Borrowing in-order iteration.
//!
//! Walking a tree with pending tags normally requires pushing them down,
//! which needs `&mut`. [`Iter`] instead carries the composition of every
//! ancestor's pending tags along the descent and applies it on the fly.

use std::iter::FusedIterator;

use crate::node::{NodeArena, SeqNode};

/// Composition of pending tags not yet applied to a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Lazy {
    assign: Option<i64>,
    add: i64,
    reverse: bool,
}

impl Lazy {
    fn of(node: &SeqNode) -> Self {
        Self {
            assign: node.pending_assign,
            add: node.pending_add,
            reverse: node.pending_reverse,
        }
    }

    /// `self` followed by `outer`.
    fn then(self, outer: Lazy) -> Lazy {
        let reverse = self.reverse ^ outer.reverse;
        match (outer.assign, self.assign) {
            (Some(a), _) => Lazy { assign: Some(a), add: 0, reverse },
            (None, Some(a)) => Lazy {
                assign: Some(a.wrapping_add(outer.add)),
                add: 0,
                reverse,
            },
            (None, None) => Lazy {
                assign: None,
                add: self.add.wrapping_add(outer.add),
                reverse,
            },
        }
    }

    fn apply(&self, value: i64) -> i64 {
        match self.assign {
            Some(a) => a,
            None => value.wrapping_add(self.add),
        }
    }
}

/// In-order iterator over the values of a tree.
pub struct Iter<'a> {
    arena: &'a NodeArena,
    /// Nodes whose left side is exhausted, with the tags still owed to them.
    stack: Vec<(u32, Lazy)>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub fn new(arena: &'a NodeArena, root: Option<u32>) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::new(),
            remaining: arena.size(root),
        };
        iter.descend(root, Lazy::default());
        iter
    }

    /// Children of `idx` in effective order, and the tags they inherit.
    fn children(&self, idx: u32, owed: Lazy) -> (Option<u32>, Option<u32>, Lazy) {
        let node = &self.arena[idx];
        let own = Lazy::of(node);
        let inherited = own.then(owed);
        if inherited.reverse {
            (node.r, node.l, inherited)
        } else {
            (node.l, node.r, inherited)
        }
    }

    fn descend(&mut self, mut curr: Option<u32>, mut owed: Lazy) {
        while let Some(idx) = curr {
            self.stack.push((idx, owed));
            let (first, _, inherited) = self.children(idx, owed);
            curr = first;
            owed = inherited;
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let (idx, owed) = self.stack.pop()?;
        let value = owed.apply(self.arena[idx].value);
        let (_, second, inherited) = self.children(idx, owed);
        self.descend(second, inherited);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
