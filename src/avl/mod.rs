//! Self-balancing AVL tree map.
//!
//! This module provides [`AvlTree`], an ordered map that keeps every node's
//! balance factor, `height(right) - height(left)`, within `[-1, 1]`.
//!
//! # Overview
//!
//! - O(log N) get
//! - O(log N) insert (at most one single or double rotation)
//! - O(log N) remove (rotations may cascade up to the root)
//! - O(1) len and `is_empty`
//!
//! The height of a tree with N entries never exceeds about
//! `1.44 * log2(N + 2)`.
//!
//! # Examples
//!
//! ```rust
//! use avlbst::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in 1..=7 {
//!     tree.insert(key, key.to_string());
//! }
//!
//! // Ascending input still yields a perfect tree
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.root().map(|node| *node.key()), Some(4));
//!
//! tree.remove(&1);
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&2, &3, &4, &5, &6, &7]);
//! ```
//!
//! # Internal Structure
//!
//! The map wraps a [`BinarySearchTree`]: nodes live in an arena, carry a
//! non-owning parent link, and store their balance factor directly. The
//! AVL layer adds the rebalancing walks on top of the base tree's descent,
//! splice and rotation primitives.

mod insert;
mod remove;

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use crate::bst::{BinarySearchTree, IntoIter, Iter, NodeId, NodeRef};
use crate::error::{InvariantViolation, KeyNotFoundError};

/// An ordered map based on an AVL tree.
///
/// Keys must implement `Ord`. Entries are kept in ascending key order and
/// every completed operation leaves the tree height-balanced.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `new`          | O(1)       |
/// | `get`          | O(log N)   |
/// | `insert`       | O(log N)   |
/// | `remove`       | O(log N)   |
/// | `first`/`last` | O(log N)   |
/// | `len`          | O(1)       |
/// | `is_empty`     | O(1)       |
///
/// # Examples
///
/// ```rust
/// use avlbst::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert("b", 2);
/// tree.insert("a", 1);
/// tree.insert("c", 3);
///
/// assert_eq!(tree.get("a"), Some(&1));
/// assert_eq!(tree.first(), Some((&"a", &1)));
/// assert_eq!(tree.to_string(), "{a: 1, b: 2, c: 3}");
/// ```
#[derive(Clone)]
pub struct AvlTree<K, V> {
    tree: BinarySearchTree<K, V>,
}

impl<K, V> AvlTree<K, V> {
    /// Creates a new empty tree.
    #[inline]
    pub const fn new() -> Self {
        Self {
            tree: BinarySearchTree::new(),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the tree holds no entries.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a view of the root node.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.tree.root()
    }

    /// Returns a view of the node behind `id`, or `None` if its slot is empty.
    ///
    /// Slots are reused, so a handle kept past its node's removal may name a
    /// node inserted later instead.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, V>> {
        self.tree.node(id)
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first()
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last()
    }

    /// Returns an iterator over entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.tree.keys()
    }

    /// Returns an iterator over values in ascending key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.tree.values()
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the underlying search tree for read-only inspection.
    pub const fn as_binary_search_tree(&self) -> &BinarySearchTree<K, V> {
        &self.tree
    }

    /// Exchanges the positions of two nodes and their balance factors.
    ///
    /// Each balance factor describes a position, not an entry, so it has to
    /// travel with the position.
    pub(crate) fn swap_nodes(&mut self, first: NodeId, second: NodeId) {
        self.tree.swap_nodes(first, second);
        let first_balance = self.tree.nodes[first].balance;
        self.tree.nodes[first].balance = self.tree.nodes[second].balance;
        self.tree.nodes[second].balance = first_balance;
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    /// Returns a view of the node holding `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key)
    }

    /// Returns a reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_mut(key)
    }

    /// Returns `true` if `key` is stored.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
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
        self.tree.at(key)
    }

    /// Checks every structural invariant of the tree.
    ///
    /// Verifies parent links, the node count, search order, that each
    /// stored balance factor matches the measured height difference, and
    /// that no height difference leaves `[-1, 1]`.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.tree.validate()?;
        self.tree.validate_balance_factors()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for AvlTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for AvlTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Q, V> Index<&Q> for AvlTree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        &self.tree[key]
    }
}

/// Two trees are equal when they hold the same entries, whatever their shape.
impl<K: PartialEq, V: PartialEq> PartialEq for AvlTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for AvlTree<K, V> {}

/// Hashes the length followed by every entry in key order, so equal maps
/// hash equally regardless of insertion order.
impl<K: Hash, V: Hash> Hash for AvlTree<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for AvlTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for AvlTree<K, V>
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
struct AvlTreeVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for AvlTreeVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = AvlTree<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // Later duplicates overwrite earlier ones, as with repeated inserts.
        let mut tree = AvlTree::new();
        while let Some((key, value)) = access.next_entry()? {
            tree.insert(key, value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for AvlTree<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(AvlTreeVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
