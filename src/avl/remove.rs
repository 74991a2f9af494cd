//! Removal and the upward fixup that follows it.
//!
//! Unlike insertion, a removal can shorten every subtree on the path to the
//! root, so the fixup may rotate at several levels before it stops.

use std::borrow::Borrow;

use super::AvlTree;
use crate::bst::{NodeId, Position, Side};

impl<K: Ord, V> AvlTree<K, V> {
    /// Removes `key` and returns its value, rebalancing as needed.
    ///
    /// Removing an absent key returns `None` and leaves the tree exactly as
    /// it was.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlbst::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, i32> = (1..=7).map(|key| (key, key * key)).collect();
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// assert_eq!(tree.root().map(|node| *node.key()), Some(4));
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.tree.find_id(key)?;
        self.remove_node(id)
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.tree.leftmost(self.tree.root?);
        self.remove_node(first)
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.tree.rightmost(self.tree.root?);
        self.remove_node(last)
    }

    /// Unlinks `id`, swapping it with its in-order predecessor first when it
    /// has two children, then rebalances from the node's former parent.
    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<(K, V)> {
        if let Some(predecessor) = self.tree.two_child_predecessor(id) {
            self.swap_nodes(id, predecessor);
        }
        let (node, position) = self.tree.splice_out(id)?;
        if let Position::Child { parent, side } = position {
            // The side that lost a level pushes the balance the other way.
            self.remove_fix(parent, -side.sign());
        }
        Some((node.key, node.value))
    }

    /// Walks up from `start`, whose balance must move by `diff` because one
    /// of its subtrees lost a level.
    fn remove_fix(&mut self, start: NodeId, diff: i8) {
        let mut current = Some(start);
        let mut diff = diff;
        while let Some(node) = current {
            // Read before any rotation; the rotated subtree keeps this slot.
            let (next, next_diff) = match self.tree.position(node) {
                Position::Root => (None, 0),
                Position::Child { parent, side } => (Some(parent), -side.sign()),
            };

            let balance = self.tree.nodes[node].balance + diff;
            match balance {
                -2 => {
                    if !self.rotate_after_remove(node, Side::Left) {
                        return;
                    }
                }
                2 => {
                    if !self.rotate_after_remove(node, Side::Right) {
                        return;
                    }
                }
                -1 | 1 => {
                    self.tree.nodes[node].balance = balance;
                    return;
                }
                _ => self.tree.nodes[node].balance = 0,
            }

            current = next;
            diff = next_diff;
        }
    }

    /// Resolves a ±2 at `node`, which is too tall on `heavy`.
    ///
    /// Returns `true` when the rotated subtree came out one level shorter,
    /// in which case the caller keeps walking up.
    fn rotate_after_remove(&mut self, node: NodeId, heavy: Side) -> bool {
        let Some(child) = self.tree.nodes[node].child(heavy) else {
            warn_log!(?node, ?heavy, "remove: heavy side has no child");
            return false;
        };
        let sign = heavy.sign();
        let child_balance = self.tree.nodes[child].balance;

        if child_balance != -sign {
            debug_log!(?node, ?heavy, child_balance, "remove: single rotation");
            self.tree.rotate(node, heavy.opposite());
            if child_balance == 0 {
                self.tree.nodes[node].balance = sign;
                self.tree.nodes[child].balance = -sign;
                return false;
            }
            self.tree.nodes[node].balance = 0;
            self.tree.nodes[child].balance = 0;
            return true;
        }

        let Some(grandchild) = self.tree.nodes[child].child(heavy.opposite()) else {
            warn_log!(?child, ?heavy, "remove: inner grandchild missing");
            return false;
        };
        debug_log!(?node, ?heavy, "remove: double rotation");
        let grandchild_balance = self.tree.nodes[grandchild].balance;
        self.tree.rotate(child, heavy);
        self.tree.rotate(node, heavy.opposite());
        let (node_balance, child_balance) = if grandchild_balance == sign {
            (-sign, 0)
        } else if grandchild_balance == 0 {
            (0, 0)
        } else {
            (0, sign)
        };
        self.tree.nodes[node].balance = node_balance;
        self.tree.nodes[child].balance = child_balance;
        self.tree.nodes[grandchild].balance = 0;
        true
    }
}
