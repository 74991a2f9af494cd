#![cfg(feature = "bst")]
//! Integration tests for the unbalanced BinarySearchTree.

use avlbst::{BinarySearchTree, InvariantViolation, NodeId};
use rstest::rstest;

fn tree_of(keys: &[i32]) -> BinarySearchTree<i32, i32> {
    keys.iter().map(|&key| (key, key)).collect()
}

fn id_of(tree: &BinarySearchTree<i32, i32>, key: i32) -> NodeId {
    tree.find(&key).map(|node| node.id()).unwrap()
}

/// Keys reached by following only child links, in symmetric order.
fn inorder(tree: &BinarySearchTree<i32, i32>) -> Vec<i32> {
    fn walk(node: Option<avlbst::NodeRef<'_, i32, i32>>, out: &mut Vec<i32>) {
        if let Some(node) = node {
            walk(node.left(), out);
            out.push(*node.key());
            walk(node.right(), out);
        }
    }
    let mut out = Vec::new();
    walk(tree.root(), &mut out);
    out
}

// =============================================================================
// Insert and Remove Tests
// =============================================================================

#[rstest]
fn test_sorted_inserts_form_a_chain() {
    let tree = tree_of(&[1, 2, 3, 4, 5]);
    assert_eq!(tree.height(), 5);
    assert!(!tree.is_height_balanced());
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_insert_replaces_existing_value() {
    let mut tree = tree_of(&[2, 1]);
    assert_eq!(tree.insert(1, 10), Some(1));
    assert_eq!(tree.get(&1), Some(&10));
    assert_eq!(tree.len(), 2);
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(6)]
#[case(7)]
fn test_remove_keeps_order(#[case] key: i32) {
    let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
    assert_eq!(tree.remove(&key), Some(key));
    assert_eq!(tree.validate(), Ok(()));
    let expected: Vec<i32> = (1..=7).filter(|&other| other != key).collect();
    assert_eq!(inorder(&tree), expected);
}

#[rstest]
fn test_predecessor_and_successor() {
    let tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
    let four = id_of(&tree, 4);
    let key_of = |id: Option<NodeId>| id.and_then(|id| tree.node(id)).map(|node| *node.key());
    assert_eq!(key_of(tree.predecessor(four)), Some(3));
    assert_eq!(key_of(tree.successor(four)), Some(5));
    assert_eq!(key_of(tree.predecessor(id_of(&tree, 1))), None);
    assert_eq!(key_of(tree.successor(id_of(&tree, 7))), None);
}

// =============================================================================
// swap_nodes Tests
// =============================================================================

#[rstest]
fn test_swap_root_with_adjacent_left_child() {
    let mut tree = tree_of(&[2, 1, 3]);
    let two = id_of(&tree, 2);
    let one = id_of(&tree, 1);
    tree.swap_nodes(two, one);

    assert_eq!(tree.validate_links(), Ok(()));
    assert_eq!(tree.root().map(|node| node.id()), Some(one));
    assert_eq!(inorder(&tree), vec![2, 1, 3]);
    assert!(matches!(tree.validate(), Err(InvariantViolation::OutOfOrder { .. })));
}

#[rstest]
fn test_swap_siblings() {
    let mut tree = tree_of(&[2, 1, 3]);
    let one = id_of(&tree, 1);
    let three = id_of(&tree, 3);
    tree.swap_nodes(one, three);

    assert_eq!(tree.validate_links(), Ok(()));
    assert_eq!(inorder(&tree), vec![3, 2, 1]);
}

#[rstest]
fn test_swap_unrelated_nodes_in_different_subtrees() {
    let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
    let two = id_of(&tree, 2);
    let seven = id_of(&tree, 7);
    tree.swap_nodes(two, seven);

    assert_eq!(tree.validate_links(), Ok(()));
    assert_eq!(inorder(&tree), vec![1, 7, 3, 4, 5, 6, 2]);
}

#[rstest]
fn test_swap_twice_restores_tree() {
    let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
    let four = id_of(&tree, 4);
    let three = id_of(&tree, 3);
    tree.swap_nodes(four, three);
    tree.swap_nodes(four, three);

    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(inorder(&tree), (1..=7).collect::<Vec<_>>());
    assert_eq!(tree.root().map(|node| *node.key()), Some(4));
}

#[rstest]
fn test_swap_with_itself_is_noop() {
    let mut tree = tree_of(&[2, 1, 3]);
    let two = id_of(&tree, 2);
    tree.swap_nodes(two, two);
    assert_eq!(tree.validate(), Ok(()));
}

// =============================================================================
// Rotation Tests
// =============================================================================

#[rstest]
fn test_rotations_rebalance_a_chain() {
    let mut tree = tree_of(&[1, 2, 3]);
    let one = id_of(&tree, 1);
    assert!(tree.rotate_left(one));
    assert!(tree.is_height_balanced());
    assert_eq!(tree.validate(), Ok(()));

    let two = id_of(&tree, 2);
    assert!(tree.rotate_right(two));
    assert_eq!(tree.root().map(|node| *node.key()), Some(1));
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn test_rotate_without_child_reports_false() {
    let mut tree = tree_of(&[1]);
    let one = id_of(&tree, 1);
    assert!(!tree.rotate_left(one));
    assert!(!tree.rotate_right(one));
    assert_eq!(tree.height(), 1);
}

// =============================================================================
// Trait Tests
// =============================================================================

#[rstest]
fn test_debug_renders_map() {
    let tree = tree_of(&[2, 1]);
    assert_eq!(format!("{tree:?}"), "{1: 1, 2: 2}");
}
