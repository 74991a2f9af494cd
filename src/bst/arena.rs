//! Slot arena that owns every node of a tree.
//!
//! Nodes link to each other by [`NodeId`], so ownership lives in exactly one
//! place and a node is released exactly once, when its slot is vacated.
//! Vacated slots form a free list and are reused by later insertions.

use std::ops::{Index, IndexMut};

use super::node::{Node, NodeId};

#[derive(Clone)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: Option<usize> },
}

/// Owning storage for tree nodes.
#[derive(Clone)]
pub(crate) struct NodeArena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Option<usize>,
    length: usize,
}

impl<K, V> NodeArena<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            length: 0,
        }
    }

    /// Number of live nodes.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    /// Stores `node` and returns its handle, reusing a vacant slot if any.
    pub(crate) fn allocate(&mut self, node: Node<K, V>) -> NodeId {
        self.length += 1;
        match self.free_head {
            Some(index) => {
                let previous = std::mem::replace(&mut self.slots[index], Slot::Occupied(node));
                self.free_head = match previous {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at a live node"),
                };
                NodeId::new(index)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    /// Vacates the slot behind `id` and hands back the node it held.
    ///
    /// Returns `None` if the slot is already vacant.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<Node<K, V>> {
        let slot = self.slots.get_mut(id.index())?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let previous = std::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id.index());
        self.length -= 1;
        match previous {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        match self.slots.get(id.index()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K, V>> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Drops every node and forgets the free list.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.length = 0;
    }
}

impl<K, V> Default for NodeArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Indexing a vacant slot is a broken link inside the tree and panics.
impl<K, V> Index<NodeId> for NodeArena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(node) => node,
            None => panic!("dangling node link: {id:?}"),
        }
    }
}

impl<K, V> IndexMut<NodeId> for NodeArena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("dangling node link: {id:?}"),
        }
    }
}
