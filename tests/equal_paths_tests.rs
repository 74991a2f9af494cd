#![cfg(feature = "paths")]
//! Integration tests for the leaf-depth checker.

use avlbst::{BinaryNode, ChildLinks, equal_paths};
use rstest::rstest;

/// Builds a tree whose root-to-leaf paths have the given lengths, left to
/// right, by hanging a chain of `depth` nodes off each root child.
fn comb(depths: &[usize]) -> BinaryNode<usize> {
    fn chain(depth: usize) -> BinaryNode<usize> {
        (1..depth).fold(BinaryNode::leaf(depth), |child, value| {
            BinaryNode::leaf(value).with_left(child)
        })
    }
    match depths {
        [] => BinaryNode::leaf(0),
        [only] => BinaryNode::leaf(0).with_left(chain(*only)),
        [left, right] => BinaryNode::new(0, Some(chain(*left)), Some(chain(*right))),
        _ => panic!("comb supports at most two leaves"),
    }
}

#[rstest]
fn test_empty_tree() {
    assert!(equal_paths::<&BinaryNode<()>>(None));
}

#[rstest]
fn test_single_node() {
    assert!(equal_paths(Some(&BinaryNode::leaf("root"))));
}

#[rstest]
fn test_perfect_tree_of_depth_two() {
    let root = BinaryNode::new(
        4,
        Some(BinaryNode::new(2, Some(BinaryNode::leaf(1)), Some(BinaryNode::leaf(3)))),
        Some(BinaryNode::new(6, Some(BinaryNode::leaf(5)), Some(BinaryNode::leaf(7)))),
    );
    assert!(equal_paths(Some(&root)));
}

#[rstest]
#[case(&[1, 1], true)]
#[case(&[3, 3], true)]
#[case(&[1, 3], false)]
#[case(&[3, 1], false)]
#[case(&[2], true)]
fn test_leaf_depth_combinations(#[case] depths: &[usize], #[case] expected: bool) {
    let root = comb(depths);
    assert_eq!(equal_paths(Some(&root)), expected);
}

#[rstest]
fn test_default_is_leaf_uses_children() {
    let root = BinaryNode::leaf(1).with_right(BinaryNode::leaf(2));
    assert!(!(&root).is_leaf());
    assert!((&root).right().is_some_and(|child| child.is_leaf()));
}

#[cfg(feature = "avl")]
#[rstest]
fn test_works_on_avl_nodes() {
    use avlbst::AvlTree;

    let perfect: AvlTree<i32, ()> = (1..=15).map(|key| (key, ())).collect();
    assert!(equal_paths(perfect.root()));

    let uneven: AvlTree<i32, ()> = (1..=5).map(|key| (key, ())).collect();
    assert!(!equal_paths(uneven.root()));
}
