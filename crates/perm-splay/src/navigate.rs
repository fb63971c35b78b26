//! Positional navigation: descend by subtree sizes.

use crate::digest::push_down;
use crate::node::NodeArena;
use crate::splay::splay;

/// Finds the node at in-order index `k` under `root` and splays it to the
/// root. Returns the new root.
///
/// `k` must be below the subtree size; callers check this.
pub fn find(arena: &mut NodeArena, root: u32, mut k: usize) -> u32 {
    debug_assert!(k < arena[root].size);
    let mut curr = root;
    loop {
        push_down(arena, curr);
        let left = arena.size(arena.l(curr));
        if k == left {
            break;
        }
        if k < left {
            match arena.l(curr) {
                Some(l) => curr = l,
                None => break,
            }
        } else {
            match arena.r(curr) {
                Some(r) => {
                    k -= left + 1;
                    curr = r;
                }
                None => break,
            }
        }
    }
    splay(arena, curr)
}
