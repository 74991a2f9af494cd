//! Insertion and the upward fixup that follows it.

use std::mem;

use super::AvlTree;
use crate::bst::{NodeId, Position, Search, Side};

impl<K: Ord, V> AvlTree<K, V> {
    /// Inserts a key-value pair and rebalances.
    ///
    /// If the key is already present its value is replaced in place and the
    /// previous value returned; the tree shape and all balance factors stay
    /// as they were. Otherwise a new leaf is attached and at most one single
    /// or double rotation restores the balance invariant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlbst::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.insert(1, "one"), None);
    /// assert_eq!(tree.insert(2, "two"), None);
    /// assert_eq!(tree.insert(3, "three"), None);
    ///
    /// // Ascending input triggers a left rotation at the root
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.key(), &2);
    /// assert_eq!(root.balance(), 0);
    ///
    /// assert_eq!(tree.insert(2, "TWO"), Some("two"));
    /// assert_eq!(tree.get(&2), Some(&"TWO"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let position = match self.tree.search(&key) {
            Search::Found(id) => {
                return Some(mem::replace(&mut self.tree.nodes[id].value, value));
            }
            Search::Vacant(position) => position,
        };

        let node = self.tree.attach(position, key, value);
        let Position::Child { parent, side } = position else {
            return None;
        };

        let parent_node = &mut self.tree.nodes[parent];
        if parent_node.balance == 0 {
            parent_node.balance = side.sign();
            self.insert_fix(parent, node);
        } else {
            // The new leaf filled the parent's only empty side.
            parent_node.balance = 0;
        }
        None
    }

    /// Walks up from `parent`, whose subtree just grew by one level through
    /// `child`, until the growth is absorbed or a rotation removes it.
    fn insert_fix(&mut self, mut parent: NodeId, mut child: NodeId) {
        while let Position::Child {
            parent: grandparent,
            side,
        } = self.tree.position(parent)
        {
            let balance = self.tree.nodes[grandparent].balance + side.sign();
            self.tree.nodes[grandparent].balance = balance;
            match balance {
                0 => return,
                -1 | 1 => {
                    child = parent;
                    parent = grandparent;
                }
                _ => {
                    self.rotate_after_insert(grandparent, parent, child, side);
                    return;
                }
            }
        }
    }

    /// Resolves a ±2 at `grandparent`, which is heavy on `side` where
    /// `parent` hangs; `child` is the next node on the insertion path.
    ///
    /// The rotated subtree ends up as tall as it was before the insertion,
    /// so no ancestor needs revisiting.
    fn rotate_after_insert(&mut self, grandparent: NodeId, parent: NodeId, child: NodeId, side: Side) {
        let sign = side.sign();
        if self.tree.nodes[parent].child(side) == Some(child) {
            debug_log!(?grandparent, ?side, "insert: single rotation");
            self.tree.rotate(grandparent, side.opposite());
            self.tree.nodes[parent].balance = 0;
            self.tree.nodes[grandparent].balance = 0;
        } else {
            debug_log!(?grandparent, ?side, "insert: double rotation");
            let child_balance = self.tree.nodes[child].balance;
            self.tree.rotate(parent, side);
            self.tree.rotate(grandparent, side.opposite());
            let (parent_balance, grandparent_balance) = if child_balance == sign {
                (0, -sign)
            } else if child_balance == 0 {
                (0, 0)
            } else {
                (sign, 0)
            };
            self.tree.nodes[parent].balance = parent_balance;
            self.tree.nodes[grandparent].balance = grandparent_balance;
            self.tree.nodes[child].balance = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tree_of(keys: &[i32]) -> AvlTree<i32, i32> {
        keys.iter().map(|&key| (key, key)).collect()
    }

    /// Renders `key:balance` nodes as `root(left right)`.
    fn shape(tree: &AvlTree<i32, i32>) -> String {
        fn render(node: Option<crate::NodeRef<'_, i32, i32>>) -> String {
            match node {
                None => ".".to_string(),
                Some(node) if node.is_leaf() => format!("{}:{}", node.key(), node.balance()),
                Some(node) => format!(
                    "{}:{}({} {})",
                    node.key(),
                    node.balance(),
                    render(node.left()),
                    render(node.right())
                ),
            }
        }
        render(tree.root())
    }

    #[rstest]
    fn test_insert_into_empty_tree_creates_root() {
        let tree = tree_of(&[7]);
        assert_eq!(shape(&tree), "7:0");
    }

    #[rstest]
    fn test_insert_sets_parent_balance() {
        assert_eq!(shape(&tree_of(&[2, 1])), "2:-1(1:0 .)");
        assert_eq!(shape(&tree_of(&[2, 3])), "2:1(. 3:0)");
    }

    #[rstest]
    fn test_insert_into_shorter_side_equalizes_parent() {
        assert_eq!(shape(&tree_of(&[2, 1, 3])), "2:0(1:0 3:0)");
    }

    #[rstest]
    #[case(&[1, 2, 3])]
    #[case(&[3, 2, 1])]
    #[case(&[1, 3, 2])]
    #[case(&[3, 1, 2])]
    fn test_three_keys_rotate_to_perfect_tree(#[case] keys: &[i32]) {
        assert_eq!(shape(&tree_of(keys)), "2:0(1:0 3:0)");
    }

    #[rstest]
    fn test_growth_propagates_without_rotation() {
        // 3 goes under 2, which leans the root right without breaking it
        assert_eq!(shape(&tree_of(&[1, 0, 2, 3])), "1:1(0:0 2:1(. 3:0))");
    }

    #[rstest]
    fn test_single_rotation_below_root() {
        assert_eq!(
            shape(&tree_of(&[2, 1, 3, 4, 5])),
            "2:1(1:0 4:0(3:0 5:0))"
        );
    }

    #[rstest]
    #[case(&[5, 2, 8, 1, 4, 3], "4:0(2:0(1:0 3:0) 5:1(. 8:0))")]
    #[case(&[5, 2, 8, 1, 3, 4], "3:0(2:-1(1:0 .) 5:0(4:0 8:0))")]
    #[case(&[9, 5, 10, 3, 4], "9:-1(4:0(3:0 5:0) 10:0)")]
    fn test_left_right_double_rotation_cases(#[case] keys: &[i32], #[case] expected: &str) {
        assert_eq!(shape(&tree_of(keys)), expected);
    }

    #[rstest]
    #[case(&[3, 1, 7, 9, 5, 6], "5:0(3:-1(1:0 .) 7:0(6:0 9:0))")]
    #[case(&[3, 1, 7, 9, 6, 5], "6:0(3:0(1:0 5:0) 7:1(. 9:0))")]
    #[case(&[9, 5, 10, 7, 6], "9:-1(6:0(5:0 7:0) 10:0)")]
    fn test_right_left_double_rotation_cases(#[case] keys: &[i32], #[case] expected: &str) {
        assert_eq!(shape(&tree_of(keys)), expected);
    }

    #[rstest]
    fn test_duplicate_insert_keeps_shape() {
        let mut tree = tree_of(&[4, 2, 6, 1]);
        let before = shape(&tree);
        assert_eq!(tree.insert(1, 100), Some(1));
        assert_eq!(shape(&tree), before);
        assert_eq!(tree.get(&1), Some(&100));
        assert_eq!(tree.len(), 4);
    }

    #[rstest]
    fn test_ascending_inserts_stay_balanced() {
        let tree: AvlTree<i32, i32> = (0..1023).map(|key| (key, key)).collect();
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.height(), 10);
    }
}
