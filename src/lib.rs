//! # avlbst
//!
//! An ordered map built as an AVL tree on top of an explicit binary search
//! tree, plus a leaf-depth checker for arbitrary binary trees.
//!
//! ## Overview
//!
//! - **Binary search tree**: [`BinarySearchTree`], an arena-backed tree with
//!   parent links, plain insert/remove, rotations and a structural
//!   [`swap_nodes`](BinarySearchTree::swap_nodes) primitive
//! - **AVL tree**: [`AvlTree`], which keeps every balance factor within
//!   `[-1, 1]` through single and double rotations
//! - **Leaf depths**: [`equal_paths`], which reports whether all leaves of a
//!   binary tree sit at the same depth
//!
//! ## Feature Flags
//!
//! - `bst`: Base binary search tree
//! - `avl`: AVL tree (enables `bst`)
//! - `paths`: Leaf-depth checker
//! - `serde`: `Serialize`/`Deserialize` for both trees, as maps
//! - `tracing`: Rotation and rebalancing events through `tracing`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use avlbst::prelude::*;
//!
//! let mut tree = AvlTree::new();
//! for key in [5, 3, 8, 1, 4] {
//!     tree.insert(key, key * 10);
//! }
//!
//! assert_eq!(tree.get(&4), Some(&40));
//! assert_eq!(tree.at(&7), Err(KeyNotFoundError));
//! assert!(tree.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

#[macro_use]
mod tracing_helpers;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use avlbst::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::*;

    #[cfg(feature = "bst")]
    pub use crate::bst::{BinarySearchTree, NodeId, NodeRef};

    #[cfg(feature = "avl")]
    pub use crate::avl::AvlTree;

    #[cfg(feature = "paths")]
    pub use crate::paths::{BinaryNode, ChildLinks, equal_paths};
}

pub mod error;

#[cfg(feature = "bst")]
pub mod bst;

#[cfg(feature = "avl")]
pub mod avl;

#[cfg(feature = "paths")]
pub mod paths;

pub use error::{InvariantViolation, KeyNotFoundError};

#[cfg(feature = "bst")]
pub use bst::{BinarySearchTree, Iter, NodeId, NodeRef};

#[cfg(feature = "avl")]
pub use avl::AvlTree;

#[cfg(feature = "paths")]
pub use paths::{BinaryNode, ChildLinks, equal_paths};
