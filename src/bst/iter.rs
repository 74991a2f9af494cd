//! In-order iteration driven by parent links.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::arena::NodeArena;
use super::node::NodeId;
use super::tree::BinarySearchTree;

/// An iterator over the entries of a tree in ascending key order.
///
/// Steps from node to node with [`successor`](BinarySearchTree::successor)
/// and [`predecessor`](BinarySearchTree::predecessor), so it needs no
/// auxiliary stack.
pub struct Iter<'a, K, V> {
    tree: &'a BinarySearchTree<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a BinarySearchTree<K, V>) -> Self {
        Self {
            tree,
            front: tree.root.map(|root| tree.leftmost(root)),
            back: tree.root.map(|root| tree.rightmost(root)),
            remaining: tree.len(),
        }
    }

    fn entry(&self, id: NodeId) -> (&'a K, &'a V) {
        let tree: &'a BinarySearchTree<K, V> = self.tree;
        let node = &tree.nodes[id];
        (&node.key, &node.value)
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(id);
        Some(self.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(id);
        Some(self.entry(id))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// An owning iterator over the entries of a tree in ascending key order.
///
/// The key order is captured once up front; each step then releases one
/// node from the arena without relinking or rebalancing the rest.
pub struct IntoIter<K, V> {
    nodes: NodeArena<K, V>,
    order: VecDeque<NodeId>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(tree: BinarySearchTree<K, V>) -> Self {
        let mut order = VecDeque::with_capacity(tree.len());
        let mut current = tree.root.map(|root| tree.leftmost(root));
        while let Some(id) = current {
            order.push_back(id);
            current = tree.successor(id);
        }
        Self {
            nodes: tree.nodes,
            order,
        }
    }

    fn take(&mut self, id: NodeId) -> Option<(K, V)> {
        self.nodes.release(id).map(|node| (node.key, node.value))
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.order.pop_front()?;
        self.take(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.order.len(), Some(self.order.len()))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.order.pop_back()?;
        self.take(id)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.order.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}
