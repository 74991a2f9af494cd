//! Height measurement and structural self-checks.
//!
//! All walks use an explicit stack, so degenerate (chain-shaped) base trees
//! can be measured without deep recursion.

use super::node::NodeId;
use super::tree::BinarySearchTree;
use crate::error::InvariantViolation;

impl<K, V> BinarySearchTree<K, V> {
    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty tree has height 0 and a single node has height 1.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[id];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Returns `true` if, at every node, the heights of the two subtrees
    /// differ by at most one.
    ///
    /// Heights are measured, not read from stored balance factors, so this
    /// works on base trees as well.
    pub fn is_height_balanced(&self) -> bool {
        let heights = self.subtree_heights();
        let height_of = |link: Option<NodeId>| link.map_or(0, |id| heights[id.index()]);
        self.preorder_with_depth()
            .into_iter()
            .all(|(id, _)| height_of(self.nodes[id].right).abs_diff(height_of(self.nodes[id].left)) <= 1)
    }

    /// Heights of every live subtree, indexed by arena slot.
    pub(crate) fn subtree_heights(&self) -> Vec<usize> {
        let order = self.preorder_with_depth();
        let slots = order.iter().map(|(id, _)| id.index() + 1).max().unwrap_or(0);
        let mut heights = vec![0; slots];
        // Children precede their parents in reversed preorder.
        for &(id, _) in order.iter().rev() {
            let node = &self.nodes[id];
            let left = node.left.map_or(0, |child| heights[child.index()]);
            let right = node.right.map_or(0, |child| heights[child.index()]);
            heights[id.index()] = left.max(right) + 1;
        }
        heights
    }

    /// Nodes reachable from the root in preorder, paired with their depth.
    ///
    /// Stops early once more nodes were seen than the arena holds, which
    /// bounds the walk if links ever form a cycle.
    fn preorder_with_depth(&self) -> Vec<(NodeId, usize)> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 0)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            if order.len() > self.len() {
                break;
            }
            order.push((id, depth));
            let node = &self.nodes[id];
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
        }
        order
    }

    /// Checks parent links and the node count.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation::BrokenParentLink`] or
    /// [`InvariantViolation::LengthMismatch`] found.
    pub fn validate_links(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.root
            && self.nodes[root].parent.is_some()
        {
            return Err(InvariantViolation::BrokenParentLink { depth: 0 });
        }
        let order = self.preorder_with_depth();
        for &(id, depth) in &order {
            let node = &self.nodes[id];
            for child in [node.left, node.right].into_iter().flatten() {
                if self.nodes[child].parent != Some(id) {
                    return Err(InvariantViolation::BrokenParentLink { depth: depth + 1 });
                }
            }
        }
        if order.len() == self.len() {
            Ok(())
        } else {
            Err(InvariantViolation::LengthMismatch {
                counted: order.len(),
                recorded: self.len(),
            })
        }
    }

    /// Checks that every stored balance factor equals the measured height
    /// difference and lies in `[-1, 1]`.
    pub(crate) fn validate_balance_factors(&self) -> Result<(), InvariantViolation> {
        let heights = self.subtree_heights();
        let height_of = |link: Option<NodeId>| link.map_or(0, |id| heights[id.index()]);
        for (id, depth) in self.preorder_with_depth() {
            let node = &self.nodes[id];
            let actual = height_difference(height_of(node.right), height_of(node.left));
            if !(-1..=1).contains(&actual) {
                return Err(InvariantViolation::Unbalanced {
                    depth,
                    balance: actual,
                });
            }
            if isize::from(node.balance) != actual {
                return Err(InvariantViolation::BalanceMismatch {
                    depth,
                    stored: node.balance,
                    actual,
                });
            }
        }
        Ok(())
    }
}

impl<K: Ord, V> BinarySearchTree<K, V> {
    /// Checks parent links, node count and search order.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.validate_links()?;
        let mut previous: Option<&K> = None;
        for (id, depth) in self.inorder_with_depth() {
            let key = &self.nodes[id].key;
            if previous.is_some_and(|previous| previous >= key) {
                return Err(InvariantViolation::OutOfOrder { depth });
            }
            previous = Some(key);
        }
        Ok(())
    }

    /// Nodes in symmetric order, paired with their depth. Uses child links
    /// only, so it is safe to run before parent links are trusted.
    fn inorder_with_depth(&self) -> Vec<(NodeId, usize)> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.root.map(|root| (root, 0));
        while current.is_some() || !stack.is_empty() {
            while let Some((id, depth)) = current {
                stack.push((id, depth));
                current = self.nodes[id].left.map(|left| (left, depth + 1));
            }
            if let Some((id, depth)) = stack.pop() {
                order.push((id, depth));
                current = self.nodes[id].right.map(|right| (right, depth + 1));
            }
        }
        order
    }
}

#[allow(clippy::cast_possible_wrap)]
const fn height_difference(right: usize, left: usize) -> isize {
    right as isize - left as isize
}
