//! Arena-based implicit splay tree over `i64` sequences.
//!
//! A [`SeqTree`] is keyed by position rather than by value: its in-order
//! traversal *is* the sequence. Each node carries a digest of its subtree
//! (size, sum, min, max, boundary values and four monotonic run lengths)
//! plus lazy assign / add / reverse tags, which makes these amortised
//! O(log n):
//!
//! - positional insert / delete / get / set,
//! - range sum, min and max,
//! - range assign, add and reverse,
//! - lexicographic next / previous permutation of any subrange.
//!
//! All "pointers" are `Option<u32>` indices into a tree-owned
//! [`NodeArena`](node::NodeArena).
//!
//! ```
//! use perm_splay::SeqTree;
//!
//! let mut seq = SeqTree::from_slice(&[1, 2, 3]);
//! seq.next_permutation(0, 2).unwrap();
//! assert_eq!(seq.to_vec(), vec![1, 3, 2]);
//! assert_eq!(seq.sum(1, 2), Ok(5));
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`node`] | [`SeqNode`](node::SeqNode) and the slot arena |
//! [`digest`] | lazy tag application, `push_down`, `pull_up` |
//! [`splay`] | rotations and bottom-up splay |
//! [`navigate`] | find the k-th node |
//! [`split`] | split, merge, three-way isolate / restore |
//! [`tree`] | [`SeqTree`] range operations |
//! [`iter`] | borrowing in-order iterator |
//! [`print`] | debug tree dump |
//! [`command`] | text command language driving a [`SeqTree`] |

pub mod command;
pub mod digest;
pub mod error;
pub mod iter;
pub mod navigate;
pub mod node;
pub mod print;
pub mod splay;
pub mod split;
pub mod tree;

pub use error::SeqError;
pub use iter::Iter;
pub use tree::SeqTree;
