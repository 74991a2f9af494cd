//! Arena-backed binary search tree.
//!
//! This module provides the plain, non-rebalancing tree that
//! [`AvlTree`](crate::AvlTree) is layered on:
//!
//! - [`BinarySearchTree`]: ordered map with parent links, lookup, plain
//!   insert/remove, in-order iteration and a structural
//!   [`swap_nodes`](BinarySearchTree::swap_nodes) primitive
//! - [`NodeId`] / [`NodeRef`]: handles and read-only views of single nodes
//! - rotations ([`rotate_left`](BinarySearchTree::rotate_left),
//!   [`rotate_right`](BinarySearchTree::rotate_right)) and structural checks
//!   ([`validate`](BinarySearchTree::validate))
//!
//! # Examples
//!
//! ```rust
//! use avlbst::BinarySearchTree;
//!
//! let mut tree: BinarySearchTree<i32, &str> =
//!     [(2, "two"), (1, "one"), (3, "three")].into_iter().collect();
//!
//! let one = tree.find(&1).unwrap().id();
//! let three = tree.find(&3).unwrap().id();
//! tree.swap_nodes(one, three);
//!
//! // Entries stay with their nodes; only positions moved
//! assert_eq!(tree.root().unwrap().left().unwrap().key(), &3);
//! assert!(tree.validate().is_err());
//! ```

mod arena;
mod iter;
mod node;
mod rotation;
mod tree;
mod validate;

pub use iter::{IntoIter, Iter};
pub(crate) use node::Side;
pub use node::{NodeId, NodeRef};
pub(crate) use tree::{Position, Search};
pub use tree::BinarySearchTree;
