use super::NodeId;

pub struct LeafNode<K, V> {
    pub(super) keys: Vec<K>,
    pub(super) values: Vec<V>,
    pub(super) next: Option<NodeId>,
    pub(super) parent: Option<NodeId>,
}

impl<K, V> LeafNode<K, V> {
    pub fn new() -> Self {
        LeafNode {
            keys: Vec::new(),
            values: Vec::new(),
            next: None,
            parent: None,
        }
    }

    pub fn with_entry(key: K, value: V) -> Self {
        LeafNode {
            keys: vec![key],
            values: vec![value],
            next: None,
            parent: None,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys.iter().zip(self.values.iter())
    }

    pub(super) fn insert_at(&mut self, idx: usize, key: K, value: V) {
        self.keys.insert(idx, key);
        self.values.insert(idx, value);
    }

    /// Moves entries `[mid, len)` into a new leaf that takes over this leaf's
    /// forward link. The caller must point `self.next` at the new leaf once it
    /// has an id.
    pub(super) fn split_off(&mut self, mid: usize) -> LeafNode<K, V> {
        LeafNode {
            keys: self.keys.split_off(mid),
            values: self.values.split_off(mid),
            next: self.next.take(),
            parent: self.parent,
        }
    }
}

impl<K: Ord, V> LeafNode<K, V> {
    /// Lower bound: `Ok` with the slot holding `key`, or `Err` with the slot
    /// where it would be inserted.
    pub fn position(&self, key: &K) -> Result<usize, usize> {
        let idx = self.keys.partition_point(|k| k < key);
        match self.keys.get(idx) {
            Some(k) if k == key => Ok(idx),
            _ => Err(idx),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).ok().map(|idx| &self.values[idx])
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.position(key) {
            Ok(idx) => Some(&mut self.values[idx]),
            Err(_) => None,
        }
    }
}

impl<K, V> Default for LeafNode<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
