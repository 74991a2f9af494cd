//! Error types for the tree collections.
//!
//! Lookups that must produce a value report [`KeyNotFoundError`] when the
//! key is absent. Structural self-checks report [`InvariantViolation`].

use std::fmt;

/// Represents a lookup of a key that is not stored in the tree.
///
/// This is distinct from a key that is present with any value: `at`
/// returns `Ok(&value)` for every stored key and this error otherwise.
///
/// # Examples
///
/// ```rust
/// use avlbst::{AvlTree, KeyNotFoundError};
///
/// let mut tree = AvlTree::new();
/// tree.insert(1, "one");
/// assert_eq!(tree.at(&1), Ok(&"one"));
/// assert_eq!(tree.at(&2), Err(KeyNotFoundError));
/// assert_eq!(format!("{}", KeyNotFoundError), "key not found in tree");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyNotFoundError;

impl fmt::Display for KeyNotFoundError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("key not found in tree")
    }
}

impl std::error::Error for KeyNotFoundError {}

/// The first structural invariant found broken while validating a tree.
///
/// Depths are counted from the root, which has depth 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A key is not strictly between the bounds set by its ancestors.
    OutOfOrder {
        /// Depth of the offending node.
        depth: usize,
    },
    /// A child's parent link does not point back at its parent, or the
    /// root has a parent.
    BrokenParentLink {
        /// Depth of the child whose link is wrong.
        depth: usize,
    },
    /// The stored balance factor differs from the measured height difference.
    BalanceMismatch {
        /// Depth of the offending node.
        depth: usize,
        /// Balance factor stored on the node.
        stored: i8,
        /// `height(right) - height(left)` as measured.
        actual: isize,
    },
    /// The subtree heights of a node differ by more than one.
    Unbalanced {
        /// Depth of the offending node.
        depth: usize,
        /// `height(right) - height(left)` as measured.
        balance: isize,
    },
    /// The number of reachable nodes differs from the recorded length.
    LengthMismatch {
        /// Nodes reachable from the root.
        counted: usize,
        /// Nodes the tree believes it holds.
        recorded: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfOrder { depth } => {
                write!(formatter, "key at depth {depth} violates search order")
            }
            Self::BrokenParentLink { depth } => {
                write!(formatter, "parent link at depth {depth} is inconsistent")
            }
            Self::BalanceMismatch {
                depth,
                stored,
                actual,
            } => write!(
                formatter,
                "node at depth {depth} stores balance {stored} but measures {actual}"
            ),
            Self::Unbalanced { depth, balance } => write!(
                formatter,
                "node at depth {depth} has balance {balance} outside [-1, 1]"
            ),
            Self::LengthMismatch { counted, recorded } => write!(
                formatter,
                "{counted} nodes reachable but length is {recorded}"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_key_not_found_error_display() {
        assert_eq!(format!("{KeyNotFoundError}"), "key not found in tree");
    }

    #[rstest]
    fn test_key_not_found_error_source() {
        use std::error::Error;

        assert!(KeyNotFoundError.source().is_none());
    }

    #[rstest]
    #[case(InvariantViolation::OutOfOrder { depth: 2 }, "key at depth 2 violates search order")]
    #[case(
        InvariantViolation::BrokenParentLink { depth: 1 },
        "parent link at depth 1 is inconsistent"
    )]
    #[case(
        InvariantViolation::BalanceMismatch { depth: 0, stored: 1, actual: -1 },
        "node at depth 0 stores balance 1 but measures -1"
    )]
    #[case(
        InvariantViolation::Unbalanced { depth: 3, balance: 2 },
        "node at depth 3 has balance 2 outside [-1, 1]"
    )]
    #[case(
        InvariantViolation::LengthMismatch { counted: 4, recorded: 5 },
        "4 nodes reachable but length is 5"
    )]
    fn test_invariant_violation_display(
        #[case] violation: InvariantViolation,
        #[case] expected: &str,
    ) {
        assert_eq!(violation.to_string(), expected);
    }

    #[rstest]
    fn test_invariant_violation_is_error() {
        let violation = InvariantViolation::OutOfOrder { depth: 0 };
        let _: &dyn std::error::Error = &violation;
    }
}
