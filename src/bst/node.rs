//! Tree nodes and node handles.

use std::fmt;

use super::arena::NodeArena;

/// Opaque handle to a node stored in a tree's arena.
///
/// A handle stays valid until its node is removed. Handles are never reused
/// while the node they name is alive, but the slot behind a removed node's
/// handle may later hold a different node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "NodeId({})", self.0)
    }
}

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Balance change when the subtree on this side grows by one level.
    pub(crate) const fn sign(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Internal node structure.
///
/// `left` and `right` name nodes owned by the same arena; `parent` is a
/// back-reference used for upward traversal only.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// `height(right) - height(left)`; only the AVL layer maintains it.
    pub(crate) balance: i8,
}

impl<K, V> Node<K, V> {
    /// Creates a detached node with balance 0.
    pub(crate) const fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
            balance: 0,
        }
    }

    pub(crate) const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) const fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A borrowed, read-only view of one node and its links.
///
/// Returned by `find`, `root` and `node` on both trees. The view can walk to
/// the node's parent and children, which makes it usable with
/// [`equal_paths`](crate::paths::equal_paths) when the `paths` feature is on.
///
/// # Examples
///
/// ```rust
/// use avlbst::AvlTree;
///
/// let tree: AvlTree<i32, &str> = [(1, "one"), (2, "two"), (3, "three")]
///     .into_iter()
///     .collect();
///
/// let root = tree.root().unwrap();
/// assert_eq!(root.key(), &2);
/// assert_eq!(root.left().map(|node| *node.key()), Some(1));
/// assert_eq!(root.right().map(|node| *node.value()), Some("three"));
/// assert!(root.parent().is_none());
/// ```
pub struct NodeRef<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    id: NodeId,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) const fn new(arena: &'a NodeArena<K, V>, id: NodeId) -> Self {
        Self { arena, id }
    }

    fn node(&self) -> &'a Node<K, V> {
        let arena: &'a NodeArena<K, V> = self.arena;
        &arena[self.id]
    }

    /// Returns the handle of this node.
    #[inline]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's key.
    #[inline]
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    /// Returns the node's value.
    #[inline]
    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    /// Returns the stored balance factor, `height(right) - height(left)`.
    ///
    /// Only meaningful for nodes of an [`AvlTree`](crate::AvlTree); the base
    /// tree leaves every balance at 0.
    #[inline]
    pub fn balance(&self) -> i8 {
        self.node().balance
    }

    /// Returns the parent node, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| Self::new(self.arena, id))
    }

    /// Returns the left child.
    pub fn left(&self) -> Option<Self> {
        self.node().left.map(|id| Self::new(self.arena, id))
    }

    /// Returns the right child.
    pub fn right(&self) -> Option<Self> {
        self.node().right.map(|id| Self::new(self.arena, id))
    }

    /// Returns `true` when the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("balance", &self.balance())
            .finish()
    }
}
