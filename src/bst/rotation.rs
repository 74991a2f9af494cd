//! Single rotations.
//!
//! A rotation re-links three nodes around a pivot in O(1) and keeps search
//! order. Balance factors are left untouched; the AVL layer assigns them
//! after each rotation according to the case it is resolving.

use super::node::{NodeId, Side};
use super::tree::BinarySearchTree;

impl<K, V> BinarySearchTree<K, V> {
    /// Promotes the right child of `node` into its position.
    ///
    /// ```text
    ///     node                 pivot
    ///    /    \               /     \
    ///   a    pivot    =>    node     c
    ///       /     \        /    \
    ///      b       c      a      b
    /// ```
    ///
    /// Returns `false` and leaves the tree unchanged if `node` has no right
    /// child.
    ///
    /// # Panics
    ///
    /// Panics if `node` names a removed node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlbst::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<i32, ()> = [(1, ()), (2, ()), (3, ())].into_iter().collect();
    /// let root = tree.root().unwrap().id();
    /// assert!(tree.rotate_left(root));
    /// assert_eq!(tree.root().map(|node| *node.key()), Some(2));
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn rotate_left(&mut self, node: NodeId) -> bool {
        self.rotate(node, Side::Left)
    }

    /// Promotes the left child of `node` into its position. Mirror of
    /// [`rotate_left`](Self::rotate_left).
    ///
    /// Returns `false` and leaves the tree unchanged if `node` has no left
    /// child.
    ///
    /// # Panics
    ///
    /// Panics if `node` names a removed node.
    pub fn rotate_right(&mut self, node: NodeId) -> bool {
        self.rotate(node, Side::Right)
    }

    /// Moves `node` down to its `side`, lifting its child on the other side.
    pub(crate) fn rotate(&mut self, node: NodeId, side: Side) -> bool {
        let Some(pivot) = self.nodes[node].child(side.opposite()) else {
            warn_log!(?node, ?side, "rotation skipped: pivot child missing");
            return false;
        };
        trace_log!(?node, ?pivot, ?side, "rotate");

        let position = self.position(node);
        let inner = self.nodes[pivot].child(side);

        self.nodes[node].set_child(side.opposite(), inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(node);
        }

        self.nodes[pivot].parent = self.nodes[node].parent;
        self.set_at(position, Some(pivot));

        self.nodes[pivot].set_child(side, Some(node));
        self.nodes[node].parent = Some(pivot);
        true
    }
}
