use super::NodeId;

pub struct InternalNode<K> {
    pub(super) keys: Vec<K>,
    pub(super) children: Vec<NodeId>,
    pub(super) parent: Option<NodeId>,
}

impl<K> InternalNode<K> {
    pub fn new_root(key: K, left: NodeId, right: NodeId) -> Self {
        InternalNode {
            keys: vec![key],
            children: vec![left, right],
            parent: None,
        }
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Removes the middle separator and moves everything to its right into a
    /// new node. Returns the removed separator and the new node; the moved
    /// children still point at `self` as their parent.
    pub(super) fn split(&mut self) -> (K, InternalNode<K>) {
        let mid = self.keys.len() / 2;
        let separator = self.keys.remove(mid);
        let right_keys = self.keys.split_off(mid);
        let right_children = self.children.split_off(mid + 1);

        let sibling = InternalNode {
            keys: right_keys,
            children: right_children,
            parent: self.parent,
        };
        (separator, sibling)
    }
}

impl<K: Ord> InternalNode<K> {
    /// Index of the child whose subtree must hold `key`: the number of
    /// separators `<= key`.
    pub fn child_index(&self, key: &K) -> usize {
        self.keys.partition_point(|sep| sep <= key)
    }

    pub fn child_for(&self, key: &K) -> NodeId {
        self.children[self.child_index(key)]
    }

    /// Adds `key` and its right-hand child `right`, placing `right` directly
    /// after `left`.
    pub(super) fn insert_separator(&mut self, left: NodeId, key: K, right: NodeId) {
        let idx = self.keys.partition_point(|sep| sep < &key);
        debug_assert_eq!(
            self.children.get(idx),
            Some(&left),
            "separator slot does not sit to the right of the split node"
        );
        self.keys.insert(idx, key);
        self.children.insert(idx + 1, right);
    }
}
