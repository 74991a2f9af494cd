//! The unbalanced binary search tree the AVL layer is built on.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use super::arena::NodeArena;
use super::iter::{IntoIter, Iter};
use super::node::{Node, NodeId, NodeRef, Side};
use crate::error::KeyNotFoundError;

/// Where a node hangs in the tree.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Position {
    Root,
    Child { parent: NodeId, side: Side },
}

/// Outcome of an ordered descent for a key.
pub(crate) enum Search {
    Found(NodeId),
    Vacant(Position),
}

/// An ordered map stored as a plain binary search tree.
///
/// Insertions and removals keep search order but never rebalance, so the
/// height depends on the insertion order. [`AvlTree`](crate::AvlTree) wraps
/// this tree and adds rebalancing.
///
/// Nodes live in an arena and are linked by [`NodeId`]; every node also
/// records its parent, which makes in-order stepping and
/// [`swap_nodes`](Self::swap_nodes) O(1) in links touched.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `new`          | O(1)       |
/// | `get`          | O(h)       |
/// | `insert`       | O(h)       |
/// | `remove`       | O(h)       |
/// | `swap_nodes`   | O(1)       |
/// | `len`          | O(1)       |
///
/// where `h` is the current height.
///
/// # Examples
///
/// ```rust
/// use avlbst::BinarySearchTree;
///
/// let mut tree = BinarySearchTree::new();
/// for key in [1, 2, 3] {
///     tree.insert(key, key * 10);
/// }
///
/// // Sorted input degenerates into a chain
/// assert_eq!(tree.height(), 3);
/// assert_eq!(tree.get(&2), Some(&20));
/// ```
#[derive(Clone)]
pub struct BinarySearchTree<K, V> {
    pub(crate) nodes: NodeArena<K, V>,
    pub(crate) root: Option<NodeId>,
}

impl<K, V> BinarySearchTree<K, V> {
    /// Creates a new empty tree.
    #[inline]
    pub const fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            root: None,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no entries.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns a view of the root node.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Returns a view of the node behind `id`, or `None` if its slot is empty.
    ///
    /// Slots are reused, so a handle kept past its node's removal may name a
    /// node inserted later instead.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, V>> {
        self.nodes.get(id).map(|_| NodeRef::new(&self.nodes, id))
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        let node = &self.nodes[self.leftmost(self.root?)];
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        let node = &self.nodes[self.rightmost(self.root?)];
        Some((&node.key, &node.value))
    }

    /// Returns an iterator over entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in ascending key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Returns the in-order predecessor of `id`.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.nodes.get(id)?.left {
            return Some(self.rightmost(left));
        }
        self.climb_while_on(id, Side::Left)
    }

    /// Returns the in-order successor of `id`.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.nodes.get(id)?.right {
            return Some(self.leftmost(right));
        }
        self.climb_while_on(id, Side::Right)
    }

    /// Exchanges the tree positions of two nodes.
    ///
    /// Each node takes over the other's parent, children and root status.
    /// Keys, values and balance factors stay with their nodes, so handles
    /// keep naming the same entries. Adjacent nodes (one the parent of the
    /// other) and siblings are handled.
    ///
    /// Swapping two arbitrary nodes generally breaks search order; callers
    /// are expected to restore it, as removal does when it swaps a node with
    /// its in-order predecessor.
    ///
    /// # Panics
    ///
    /// Panics if either handle names a removed node.
    pub fn swap_nodes(&mut self, first: NodeId, second: NodeId) {
        if first == second {
            return;
        }

        let first_position = self.position(first);
        let second_position = self.position(second);
        let (first_parent, first_left, first_right) = self.links(first);
        let (second_parent, second_left, second_right) = self.links(second);

        // A link to one of the pair must point at the other after the swap.
        let exchange = |link: Option<NodeId>| {
            link.map(|id| {
                if id == first {
                    second
                } else if id == second {
                    first
                } else {
                    id
                }
            })
        };

        let node = &mut self.nodes[first];
        node.parent = exchange(second_parent);
        node.left = exchange(second_left);
        node.right = exchange(second_right);

        let node = &mut self.nodes[second];
        node.parent = exchange(first_parent);
        node.left = exchange(first_left);
        node.right = exchange(first_right);

        if first_parent != Some(second) {
            self.set_at(first_position, Some(second));
        }
        if second_parent != Some(first) {
            self.set_at(second_position, Some(first));
        }

        self.adopt_children(first, second);
        self.adopt_children(second, first);
    }

    /// Returns a node's parent and children.
    pub(crate) fn links(&self, id: NodeId) -> (Option<NodeId>, Option<NodeId>, Option<NodeId>) {
        let node = &self.nodes[id];
        (node.parent, node.left, node.right)
    }

    pub(crate) fn position(&self, id: NodeId) -> Position {
        match self.nodes[id].parent {
            None => Position::Root,
            Some(parent) => {
                let side = if self.nodes[parent].left == Some(id) {
                    Side::Left
                } else {
                    Side::Right
                };
                Position::Child { parent, side }
            }
        }
    }

    /// Points the link at `position` to `id`. Does not touch `id`'s own
    /// parent link.
    pub(crate) fn set_at(&mut self, position: Position, id: Option<NodeId>) {
        match position {
            Position::Root => self.root = id,
            Position::Child { parent, side } => self.nodes[parent].set_child(side, id),
        }
    }

    /// Unlinks a node with at most one child, lifting the child into its
    /// place, and releases the node.
    ///
    /// Returns the node together with the position it occupied.
    pub(crate) fn splice_out(&mut self, id: NodeId) -> Option<(Node<K, V>, Position)> {
        let node = self.nodes.get(id)?;
        debug_assert!(
            node.left.is_none() || node.right.is_none(),
            "splice_out requires at most one child"
        );
        let child = node.left.or(node.right);
        let parent = node.parent;
        let position = self.position(id);

        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }
        self.set_at(position, child);
        self.nodes.release(id).map(|node| (node, position))
    }

    /// Returns the in-order predecessor of a node that has two children.
    pub(crate) fn two_child_predecessor(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id];
        match (node.left, node.right) {
            (Some(left), Some(_)) => Some(self.rightmost(left)),
            _ => None,
        }
    }

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    /// Climbs while `id` is a `side` child and returns the first ancestor
    /// reached from the other side.
    fn climb_while_on(&self, mut id: NodeId, side: Side) -> Option<NodeId> {
        while let Some(parent) = self.nodes[id].parent {
            if self.nodes[parent].child(side) != Some(id) {
                return Some(parent);
            }
            id = parent;
        }
        None
    }

    /// Points the parent links of `id`'s children at `id`, skipping `other`.
    fn adopt_children(&mut self, id: NodeId, other: NodeId) {
        let (_, left, right) = self.links(id);
        for child in [left, right].into_iter().flatten() {
            if child != other {
                self.nodes[child].parent = Some(id);
            }
        }
    }
}

impl<K: Ord, V> BinarySearchTree<K, V> {
    /// Descends from the root comparing with `<` and `>` until the key is
    /// found or a free child slot is reached.
    pub(crate) fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(mut current) = self.root else {
            return Search::Vacant(Position::Root);
        };
        loop {
            let node = &self.nodes[current];
            let side = match key.cmp(node.key.borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Search::Found(current),
            };
            match node.child(side) {
                Some(child) => current = child,
                None => {
                    return Search::Vacant(Position::Child {
                        parent: current,
                        side,
                    });
                }
            }
        }
    }

    pub(crate) fn find_id<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => Some(id),
            Search::Vacant(_) => None,
        }
    }

    /// Returns a view of the node holding `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlbst::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<i32, &str> = [(2, "two"), (1, "one")].into_iter().collect();
    /// let node = tree.find(&1).unwrap();
    /// assert_eq!(node.value(), &"one");
    /// assert_eq!(node.parent().map(|parent| *parent.key()), Some(2));
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Returns a reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).map(|id| &self.nodes[id].value)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).map(|id| &mut self.nodes[id].value)
    }

    /// Returns `true` if `key` is stored.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).is_some()
    }

    /// Returns the value for `key`, or [`KeyNotFoundError`] when absent.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFoundError`] if no node holds `key`.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, KeyNotFoundError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(KeyNotFoundError)
    }

    /// Inserts without rebalancing.
    ///
    /// If `key` is already present its value is replaced in place and the
    /// old value returned; the tree shape does not change.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Search::Found(id) => Some(std::mem::replace(&mut self.nodes[id].value, value)),
            Search::Vacant(position) => {
                self.attach(position, key, value);
                None
            }
        }
    }

    /// Removes `key` without rebalancing and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` without rebalancing and returns the stored entry.
    ///
    /// A node with two children first swaps positions with its in-order
    /// predecessor, so the node actually unlinked has at most one child.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_id(key)?;
        if let Some(predecessor) = self.two_child_predecessor(id) {
            self.swap_nodes(id, predecessor);
        }
        let (node, _) = self.splice_out(id)?;
        Some((node.key, node.value))
    }

    /// Creates a node at a vacant position found by [`search`](Self::search).
    pub(crate) fn attach(&mut self, position: Position, key: K, value: V) -> NodeId {
        let parent = match position {
            Position::Root => None,
            Position::Child { parent, .. } => Some(parent),
        };
        let id = self.nodes.allocate(Node::new(key, value, parent));
        self.set_at(position, Some(id));
        id
    }
}

impl<K, V> Default for BinarySearchTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BinarySearchTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for BinarySearchTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for BinarySearchTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, K, V> IntoIterator for &'a BinarySearchTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Q, V> Index<&Q> for BinarySearchTree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        match self.at(key) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BinarySearchTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for BinarySearchTree<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct BinarySearchTreeVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for BinarySearchTreeVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = BinarySearchTree<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut tree = BinarySearchTree::new();
        while let Some((key, value)) = access.next_entry()? {
            tree.insert(key, value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for BinarySearchTree<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(BinarySearchTreeVisitor {
            marker: std::marker::PhantomData,
        })
    }
}
