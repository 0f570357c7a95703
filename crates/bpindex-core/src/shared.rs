//! A clonable handle that serializes access to one tree behind a
//! single-writer, multiple-reader lock.

use crate::bptree::BPlusTree;
use crate::config::TreeConfig;
use crate::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct SharedBPlusTree<K, V> {
    inner: Arc<RwLock<BPlusTree<K, V>>>,
}

impl<K: Ord + Clone, V> SharedBPlusTree<K, V> {
    pub fn new() -> Self {
        SharedBPlusTree::from_tree(BPlusTree::new())
    }

    pub fn with_config(config: TreeConfig) -> Result<Self> {
        Ok(SharedBPlusTree::from_tree(BPlusTree::with_config(config)?))
    }

    pub fn from_tree(tree: BPlusTree<K, V>) -> Self {
        SharedBPlusTree {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    pub fn try_insert(&self, key: K, value: V) -> Result<()> {
        self.inner.write().try_insert(key, value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn read<R>(&self, f: impl FnOnce(&BPlusTree<K, V>) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut BPlusTree<K, V>) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl<K: Ord + Clone, V: Clone> SharedBPlusTree<K, V> {
    pub fn find(&self, key: &K) -> Option<V> {
        self.inner.read().find(key).cloned()
    }
}

impl<K, V> Clone for SharedBPlusTree<K, V> {
    fn clone(&self) -> Self {
        SharedBPlusTree {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Ord + Clone, V> Default for SharedBPlusTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
