//! Leaf-depth equality for binary trees.
//!
//! [`equal_paths`] reports whether every leaf of a binary tree sits at the
//! same depth. It works on any handle implementing [`ChildLinks`]: the plain
//! owned [`BinaryNode`] defined here, and [`NodeRef`](crate::NodeRef) views
//! into the trees of this crate.
//!
//! # Examples
//!
//! ```rust
//! use avlbst::{BinaryNode, equal_paths};
//!
//! //     1
//! //    / \
//! //   2   3
//! let even = BinaryNode::new(1, Some(BinaryNode::leaf(2)), Some(BinaryNode::leaf(3)));
//! assert!(equal_paths(Some(&even)));
//!
//! //     1
//! //    /
//! //   2
//! //  /
//! // 3      plus a leaf 4 on the right of the root
//! let uneven = BinaryNode::leaf(1)
//!     .with_left(BinaryNode::leaf(2).with_left(BinaryNode::leaf(3)))
//!     .with_right(BinaryNode::leaf(4));
//! assert!(!equal_paths(Some(&uneven)));
//! ```

/// A handle to a binary tree node that can step to its children.
pub trait ChildLinks: Sized {
    /// Returns the left child, if any.
    fn left(&self) -> Option<Self>;

    /// Returns the right child, if any.
    fn right(&self) -> Option<Self>;

    /// Returns `true` if the node has no children.
    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }
}

/// Returns `true` if every leaf reachable from `root` has the same depth.
///
/// An empty tree and a single node both count as having equal paths. A node
/// with exactly one child is not a leaf; only the leaves below it matter.
pub fn equal_paths<N: ChildLinks>(root: Option<N>) -> bool {
    let mut leaf_depth = None;
    // Right is pushed before left so leaves are met left to right.
    let mut stack: Vec<(N, usize)> = root.map(|root| (root, 0)).into_iter().collect();
    while let Some((node, depth)) = stack.pop() {
        if node.is_leaf() {
            match leaf_depth {
                Some(expected) if expected != depth => return false,
                Some(_) => {}
                None => leaf_depth = Some(depth),
            }
            continue;
        }
        stack.extend(node.right().map(|right| (right, depth + 1)));
        stack.extend(node.left().map(|left| (left, depth + 1)));
    }
    true
}

/// A plain owned binary tree node.
///
/// Dropping a tree releases its nodes with an explicit stack, so arbitrarily
/// deep trees can be dropped. The derived `Clone`, `PartialEq`, `Hash` and
/// `Debug` impls recurse once per level and are meant for shallow trees.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryNode<T> {
    /// Payload of this node.
    pub value: T,
    /// Left subtree.
    pub left: Option<Box<Self>>,
    /// Right subtree.
    pub right: Option<Box<Self>>,
}

impl<T> BinaryNode<T> {
    /// Creates a node without children.
    pub const fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// Creates a node with the given subtrees.
    pub fn new(value: T, left: Option<Self>, right: Option<Self>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// Replaces the left subtree.
    #[must_use]
    pub fn with_left(mut self, left: Self) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    /// Replaces the right subtree.
    #[must_use]
    pub fn with_right(mut self, right: Self) -> Self {
        self.right = Some(Box::new(right));
        self
    }
}

impl<T> Drop for BinaryNode<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Self>> = self.left.take().into_iter().chain(self.right.take()).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<'a, T> ChildLinks for &'a BinaryNode<T> {
    fn left(&self) -> Option<Self> {
        let node: &'a BinaryNode<T> = *self;
        node.left.as_deref()
    }

    fn right(&self) -> Option<Self> {
        let node: &'a BinaryNode<T> = *self;
        node.right.as_deref()
    }
}

#[cfg(feature = "bst")]
mod tree_support {
    use super::{ChildLinks, equal_paths};
    use crate::bst::{BinarySearchTree, NodeRef};

    impl<K, V> ChildLinks for NodeRef<'_, K, V> {
        fn left(&self) -> Option<Self> {
            Self::left(self)
        }

        fn right(&self) -> Option<Self> {
            Self::right(self)
        }

        fn is_leaf(&self) -> bool {
            Self::is_leaf(self)
        }
    }

    impl<K, V> BinarySearchTree<K, V> {
        /// Returns `true` if every leaf sits at the same depth.
        pub fn has_equal_leaf_depths(&self) -> bool {
            equal_paths(self.root())
        }
    }

    #[cfg(feature = "avl")]
    impl<K, V> crate::avl::AvlTree<K, V> {
        /// Returns `true` if every leaf sits at the same depth.
        ///
        /// ```rust
        /// use avlbst::AvlTree;
        ///
        /// let tree: AvlTree<i32, ()> = (1..=7).map(|key| (key, ())).collect();
        /// assert!(tree.has_equal_leaf_depths());
        /// ```
        pub fn has_equal_leaf_depths(&self) -> bool {
            equal_paths(self.root())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn perfect(depth: usize) -> BinaryNode<usize> {
        if depth == 0 {
            BinaryNode::leaf(0)
        } else {
            BinaryNode::new(depth, Some(perfect(depth - 1)), Some(perfect(depth - 1)))
        }
    }

    #[rstest]
    fn test_empty_tree_has_equal_paths() {
        assert!(equal_paths::<&BinaryNode<i32>>(None));
    }

    #[rstest]
    fn test_single_node_has_equal_paths() {
        let root = BinaryNode::leaf(1);
        assert!(equal_paths(Some(&root)));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    fn test_perfect_tree_has_equal_paths(#[case] depth: usize) {
        let root = perfect(depth);
        assert!(equal_paths(Some(&root)));
    }

    #[rstest]
    fn test_leaves_at_depths_one_and_three() {
        let root = BinaryNode::leaf(1)
            .with_left(BinaryNode::leaf(2).with_left(BinaryNode::leaf(3).with_right(BinaryNode::leaf(4))))
            .with_right(BinaryNode::leaf(5));
        assert!(!equal_paths(Some(&root)));
    }

    #[rstest]
    fn test_chain_has_single_leaf() {
        let root = BinaryNode::leaf(1).with_right(BinaryNode::leaf(2).with_left(BinaryNode::leaf(3)));
        assert!(equal_paths(Some(&root)));
    }

    #[rstest]
    fn test_one_child_node_is_not_a_leaf() {
        //     1
        //    / \
        //   2   3
        //  /
        // 4
        let root = BinaryNode::new(
            1,
            Some(BinaryNode::leaf(2).with_left(BinaryNode::leaf(4))),
            Some(BinaryNode::leaf(3)),
        );
        assert!(!equal_paths(Some(&root)));
    }

    fn deep_chain(depth: u32) -> BinaryNode<u32> {
        (1..depth).fold(BinaryNode::leaf(0), |child, value| BinaryNode::leaf(value).with_left(child))
    }

    #[rstest]
    fn test_deep_chain_is_walked_without_recursion() {
        let root = deep_chain(200_000);
        assert!(equal_paths(Some(&root)));

        let lopsided = deep_chain(200_000).with_right(BinaryNode::leaf(0));
        assert!(!equal_paths(Some(&lopsided)));
    }

    #[rstest]
    fn test_deep_chain_drops() {
        let root = deep_chain(200_000);
        drop(root);
    }

    #[rstest]
    fn test_first_mismatch_ends_walk() {
        //     1
        //    / \
        //   2   5
        //  / \
        // 3   4
        let root = BinaryNode::new(
            1,
            Some(BinaryNode::new(2, Some(BinaryNode::leaf(3)), Some(BinaryNode::leaf(4)))),
            Some(BinaryNode::leaf(5)),
        );
        assert!(!equal_paths(Some(&root)));
    }

    #[cfg(feature = "bst")]
    #[rstest]
    fn test_base_tree_leaf_depths() {
        use crate::BinarySearchTree;

        let full: BinarySearchTree<i32, ()> = [2, 1, 3].into_iter().map(|key| (key, ())).collect();
        assert!(full.has_equal_leaf_depths());

        let lopsided: BinarySearchTree<i32, ()> = [2, 1, 3, 4].into_iter().map(|key| (key, ())).collect();
        assert!(!lopsided.has_equal_leaf_depths());
    }

    #[cfg(feature = "bst")]
    #[rstest]
    fn test_sorted_base_tree_chain_leaf_depths() {
        use crate::BinarySearchTree;

        let mut chain: BinarySearchTree<i32, ()> = (1..40_000).map(|key| (key, ())).collect();
        assert_eq!(chain.height(), 39_999);
        assert!(chain.has_equal_leaf_depths());

        chain.insert(0, ());
        assert!(!chain.has_equal_leaf_depths());
    }
}
