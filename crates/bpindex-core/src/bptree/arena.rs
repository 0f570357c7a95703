//! Owning storage for every node of a tree.
//!
//! Nodes are appended and never freed, so a `NodeId` handed out by an arena
//! stays valid for the arena's whole life.

use super::{InternalNode, LeafNode, Node, NodeId};

pub struct NodeArena<K, V> {
    nodes: Vec<Node<K, V>>,
}

impl<K, V> NodeArena<K, V> {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }

    pub fn leaf(&self, id: NodeId) -> &LeafNode<K, V> {
        match self.get(id) {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("node {} is not a leaf", id),
        }
    }

    pub fn leaf_mut(&mut self, id: NodeId) -> &mut LeafNode<K, V> {
        match self.get_mut(id) {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("node {} is not a leaf", id),
        }
    }

    pub fn internal(&self, id: NodeId) -> &InternalNode<K> {
        match self.get(id) {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => unreachable!("node {} is not internal", id),
        }
    }

    pub fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode<K> {
        match self.get_mut(id) {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => unreachable!("node {} is not internal", id),
        }
    }

    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.get_mut(id).set_parent(parent);
    }
}

impl<K, V> Default for NodeArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
