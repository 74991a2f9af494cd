#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! Both trees serialize as maps in ascending key order.

use avlbst::{AvlTree, BinarySearchTree};
use rstest::rstest;

// =============================================================================
// AvlTree Integration Tests
// =============================================================================

#[rstest]
fn test_avl_tree_serializes_as_sorted_map() {
    let tree: AvlTree<String, i32> = [("b".to_string(), 2), ("a".to_string(), 1)].into_iter().collect();
    let json = serde_json::to_string(&tree).unwrap();
    assert_eq!(json, r#"{"a":1,"b":2}"#);
}

#[rstest]
fn test_avl_tree_json_roundtrip() {
    let tree: AvlTree<i32, String> = (0..50).map(|key| (key, key.to_string())).collect();
    let json = serde_json::to_string(&tree).unwrap();
    let restored: AvlTree<i32, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(tree, restored);
    assert_eq!(restored.validate(), Ok(()));
}

#[rstest]
fn test_avl_tree_deserialize_empty() {
    let restored: AvlTree<String, i32> = serde_json::from_str("{}").unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn test_avl_tree_deserialize_rejects_sequence() {
    let result: Result<AvlTree<String, i32>, _> = serde_json::from_str("[1, 2]");
    assert!(result.is_err());
}

// =============================================================================
// BinarySearchTree Integration Tests
// =============================================================================

#[rstest]
fn test_binary_search_tree_json_roundtrip() {
    let tree: BinarySearchTree<String, i32> =
        [("m".to_string(), 1), ("c".to_string(), 2), ("x".to_string(), 3)].into_iter().collect();
    let json = serde_json::to_string(&tree).unwrap();
    assert_eq!(json, r#"{"c":2,"m":1,"x":3}"#);

    let restored: BinarySearchTree<String, i32> = serde_json::from_str(&json).unwrap();
    let entries: Vec<(&String, &i32)> = restored.iter().collect();
    assert_eq!(entries.len(), 3);
    assert_eq!(restored.get("m"), Some(&1));
    assert_eq!(restored.validate(), Ok(()));
}
