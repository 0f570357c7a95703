use super::{Node, NodeArena, NodeId};

/// Walks from `root` down to the leaf whose key range covers `key`.
pub fn locate_leaf<K: Ord, V>(arena: &NodeArena<K, V>, root: NodeId, key: &K) -> NodeId {
    let mut current = root;
    loop {
        match arena.get(current) {
            Node::Leaf(_) => return current,
            Node::Internal(internal) => current = internal.child_for(key),
        }
    }
}

/// Walks the first child of every level down to the leftmost leaf, returning
/// it with its depth (the root sits at depth 1).
pub fn leftmost_leaf<K, V>(arena: &NodeArena<K, V>, root: NodeId) -> (NodeId, usize) {
    let mut current = root;
    let mut depth = 1;
    loop {
        match arena.get(current) {
            Node::Leaf(_) => return (current, depth),
            Node::Internal(internal) => {
                current = internal.children[0];
                depth += 1;
            }
        }
    }
}
