mod arena;
mod inspect;
mod internal;
mod leaf;
mod node;
mod router;
mod split;

pub use arena::NodeArena;
pub use inspect::{LeafChain, NodeSnapshot};
pub use internal::InternalNode;
pub use leaf::LeafNode;
pub use node::{Node, NodeId};

use crate::config::TreeConfig;
use crate::error::{Error, Result};
use tracing::trace;

/// An in-memory B+Tree mapping unique keys to values.
///
/// Every node lives in an arena owned by the tree. Internal nodes refer to
/// their children by [`NodeId`]; parent and sibling links are ids as well and
/// never decide what stays alive.
pub struct BPlusTree<K, V> {
    arena: NodeArena<K, V>,
    root: Option<NodeId>,
    order: usize,
    len: usize,
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    pub fn new() -> Self {
        BPlusTree::from_valid_config(TreeConfig::default())
    }

    pub fn with_order(order: usize) -> Result<Self> {
        Self::with_config(TreeConfig::new(order))
    }

    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TreeConfig) -> Self {
        BPlusTree {
            arena: NodeArena::new(),
            root: None,
            order: config.order,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of levels: 0 when empty, 1 while the root is a leaf.
    pub fn height(&self) -> usize {
        match self.root {
            Some(root) => router::leftmost_leaf(&self.arena, root).1,
            None => 0,
        }
    }

    /// Number of nodes allocated so far. Nodes are never freed.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn locate_leaf(&self, key: &K) -> Option<NodeId> {
        let root = self.root?;
        Some(router::locate_leaf(&self.arena, root, key))
    }

    pub fn find(&self, key: &K) -> Option<&V> {
        let leaf = self.locate_leaf(key)?;
        self.arena.leaf(leaf).get(key)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let leaf = self.locate_leaf(key)?;
        self.arena.leaf_mut(leaf).get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Inserts `key`, returning the previous value if the key was already
    /// present. An existing key is updated in place and never split.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            let root = self.arena.alloc(Node::Leaf(LeafNode::with_entry(key, value)));
            self.root = Some(root);
            self.len = 1;
            trace!(root = %root, "created root leaf");
            return None;
        };

        let leaf_id = router::locate_leaf(&self.arena, root, &key);
        let leaf = self.arena.leaf_mut(leaf_id);
        let full = match leaf.position(&key) {
            Ok(idx) => return Some(std::mem::replace(&mut leaf.values[idx], value)),
            Err(idx) => {
                leaf.insert_at(idx, key, value);
                leaf.len() >= self.order - 1
            }
        };
        self.len += 1;
        trace!(leaf = %leaf_id, full, "inserted entry");

        if full {
            self.split_leaf(leaf_id);
        }
        None
    }

    /// Inserts `key` only if it is absent; an existing entry is left as is.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<()> {
        if self.contains_key(&key) {
            return Err(Error::DuplicateKey);
        }
        self.insert(key, value);
        Ok(())
    }
}

impl<K: Ord + Clone, V> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let tree: BPlusTree<i32, i32> = BPlusTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.order(), 4);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_invalid_order() {
        assert!(matches!(
            BPlusTree::<i32, i32>::with_order(2),
            Err(Error::InvalidOrder { order: 2, min: 3 })
        ));
        assert!(BPlusTree::<i32, i32>::with_order(3).is_ok());
    }

    #[test]
    fn test_find_on_empty_tree() {
        let tree: BPlusTree<i32, i32> = BPlusTree::new();
        assert_eq!(tree.find(&1), None);
        assert_eq!(tree.locate_leaf(&1), None);
    }

    #[test]
    fn test_insert_and_find() {
        let mut tree = BPlusTree::new();
        tree.insert(1, "one");
        tree.insert(2, "two");

        assert_eq!(tree.find(&1), Some(&"one"));
        assert_eq!(tree.find(&2), Some(&"two"));
        assert_eq!(tree.find(&4), None);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_update() {
        let mut tree = BPlusTree::new();
        assert_eq!(tree.insert(1, "one"), None);
        assert_eq!(tree.insert(1, "ONE"), Some("one"));

        assert_eq!(tree.find(&1), Some(&"ONE"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_update_does_not_split() {
        let mut tree = BPlusTree::with_order(4).unwrap();
        tree.insert(1, 1);
        tree.insert(2, 2);
        for _ in 0..10 {
            tree.insert(2, 20);
        }
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.find(&2), Some(&20));
    }

    #[test]
    fn test_try_insert_rejects_duplicate() {
        let mut tree = BPlusTree::new();
        assert!(tree.try_insert(7, "seven").is_ok());
        assert_eq!(tree.try_insert(7, "SEVEN"), Err(Error::DuplicateKey));
        assert_eq!(tree.find(&7), Some(&"seven"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_find_mut() {
        let mut tree = BPlusTree::new();
        for i in 0..20 {
            tree.insert(i, i);
        }
        *tree.find_mut(&13).unwrap() += 100;
        assert_eq!(tree.find(&13), Some(&113));
        assert!(tree.find_mut(&99).is_none());
    }

    #[test]
    fn test_find_separator_keys() {
        let mut tree = BPlusTree::with_order(4).unwrap();
        for i in 0..30 {
            tree.insert(i, i * 10);
        }
        assert!(tree.height() > 2);
        for i in 0..30 {
            assert_eq!(tree.find(&i), Some(&(i * 10)), "key {}", i);
        }
    }

    #[test]
    fn test_canonical_scenario() {
        let mut tree = BPlusTree::with_order(4).unwrap();
        for (k, v) in [(5, "five"), (3, "three"), (7, "seven"), (1, "one"), (9, "nine")] {
            tree.insert(k, v);
        }

        assert_eq!(
            tree.snapshot(),
            Some(NodeSnapshot::Internal {
                keys: vec![5, 7],
                children: vec![
                    NodeSnapshot::Leaf(vec![1, 3]),
                    NodeSnapshot::Leaf(vec![5]),
                    NodeSnapshot::Leaf(vec![7, 9]),
                ],
            })
        );
        assert_eq!(tree.find(&1), Some(&"one"));
        assert_eq!(tree.find(&2), None);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_string_keys() {
        let mut tree = BPlusTree::with_order(5).unwrap();
        for word in ["pear", "apple", "fig", "kiwi", "banana", "cherry", "date"] {
            tree.insert(word.to_string(), word.len());
        }
        assert_eq!(tree.find(&"banana".to_string()), Some(&6));
        assert_eq!(tree.find(&"grape".to_string()), None);
        assert_eq!(
            tree.leaf_keys().concat(),
            vec!["apple", "banana", "cherry", "date", "fig", "kiwi", "pear"]
        );
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeMap;

        proptest! {
            #[test]
            fn prop_insert_and_find(
                order in 3usize..9,
                keys in prop::collection::vec(0i32..10000, 0..600),
            ) {
                let mut tree = BPlusTree::with_order(order).unwrap();
                let mut expected = BTreeMap::new();

                for key in keys.iter() {
                    let value = key * 2;
                    tree.insert(*key, value);
                    expected.insert(*key, value);
                }

                for (key, expected_value) in expected.iter() {
                    prop_assert_eq!(tree.find(key), Some(expected_value));
                }

                prop_assert_eq!(tree.find(&10001), None);
                prop_assert_eq!(tree.len(), expected.len());
            }

            #[test]
            fn prop_leaf_chain_is_sorted(
                order in 3usize..9,
                keys in prop::collection::vec(0i32..1000, 0..500),
            ) {
                let mut tree = BPlusTree::with_order(order).unwrap();
                let mut expected = BTreeMap::new();

                for key in keys {
                    tree.insert(key, key);
                    expected.insert(key, key);
                }

                let chained = tree.leaf_keys().concat();
                let sorted: Vec<_> = expected.keys().copied().collect();
                prop_assert_eq!(chained, sorted);
            }

            #[test]
            fn prop_invariants_hold(
                order in 3usize..7,
                keys in prop::collection::vec(any::<u16>(), 0..400),
            ) {
                let mut tree = BPlusTree::with_order(order).unwrap();
                for key in keys {
                    tree.insert(key, ());
                }
                prop_assert_eq!(tree.check_invariants(), Ok(()));
            }

            #[test]
            fn prop_last_write_wins(
                pairs in prop::collection::vec((0u8..50, any::<i64>()), 0..300),
            ) {
                let mut tree = BPlusTree::new();
                let mut expected = BTreeMap::new();

                for (key, value) in pairs {
                    prop_assert_eq!(tree.insert(key, value), expected.insert(key, value));
                }

                for (key, value) in expected.iter() {
                    prop_assert_eq!(tree.find(key), Some(value));
                }
            }
        }
    }
}
