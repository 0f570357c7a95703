use super::{BPlusTree, InternalNode, Node, NodeId};
use tracing::debug;

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Splits a full leaf in half and hands the right half's smallest key to
    /// the parent. The separator stays in the right leaf.
    pub(super) fn split_leaf(&mut self, leaf_id: NodeId) {
        let right = {
            let leaf = self.arena.leaf_mut(leaf_id);
            let mid = leaf.len() / 2;
            leaf.split_off(mid)
        };
        let separator = right.keys[0].clone();
        let right_len = right.len();

        let right_id = self.arena.alloc(Node::Leaf(right));
        self.arena.leaf_mut(leaf_id).next = Some(right_id);

        debug!(
            left = %leaf_id,
            right = %right_id,
            left_len = self.arena.leaf(leaf_id).len(),
            right_len,
            "split leaf"
        );
        self.insert_into_parent(leaf_id, separator, right_id);
    }

    /// Splits a full internal node around its middle separator, which moves
    /// up into the parent and is kept by neither half.
    fn split_internal(&mut self, node_id: NodeId) {
        let (separator, sibling) = self.arena.internal_mut(node_id).split();
        let moved = sibling.children.clone();

        let sibling_id = self.arena.alloc(Node::Internal(sibling));
        for child in moved {
            self.arena.set_parent(child, Some(sibling_id));
        }

        debug!(
            left = %node_id,
            right = %sibling_id,
            left_keys = self.arena.internal(node_id).keys.len(),
            right_keys = self.arena.internal(sibling_id).keys.len(),
            "split internal node"
        );
        self.insert_into_parent(node_id, separator, sibling_id);
    }

    fn insert_into_parent(&mut self, old: NodeId, key: K, new: NodeId) {
        if self.root == Some(old) {
            let root_id = self
                .arena
                .alloc(Node::Internal(InternalNode::new_root(key, old, new)));
            self.arena.set_parent(old, Some(root_id));
            self.arena.set_parent(new, Some(root_id));
            self.root = Some(root_id);
            debug!(root = %root_id, height = self.height(), "tree grew a level");
            return;
        }

        let Some(parent_id) = self.arena.get(old).parent() else {
            unreachable!("non-root node {} has no parent", old);
        };

        let full = {
            let parent = self.arena.internal_mut(parent_id);
            parent.insert_separator(old, key, new);
            parent.keys.len() >= self.order - 1
        };
        self.arena.set_parent(new, Some(parent_id));

        if full {
            self.split_internal(parent_id);
        }
    }
}
