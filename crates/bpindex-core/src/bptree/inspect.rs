//! Read-only views of a tree's shape: a textual dump, a structural
//! snapshot, a walk along the leaf sibling chain, and a full invariant check.
//! None of these take part in `insert` or `find`.

use super::{router, BPlusTree, LeafNode, Node, NodeArena, NodeId};
use crate::error::{Error, Result};
use std::fmt;

/// Owned copy of a subtree's keys, used to compare tree shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSnapshot<K> {
    Leaf(Vec<K>),
    Internal {
        keys: Vec<K>,
        children: Vec<NodeSnapshot<K>>,
    },
}

/// Follows `next` links from a starting leaf.
pub struct LeafChain<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    current: Option<NodeId>,
}

impl<'a, K, V> LeafChain<'a, K, V> {
    fn new(arena: &'a NodeArena<K, V>, start: Option<NodeId>) -> Self {
        LeafChain {
            arena,
            current: start,
        }
    }
}

impl<'a, K, V> Iterator for LeafChain<'a, K, V> {
    type Item = (NodeId, &'a LeafNode<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let arena = self.arena;
        let leaf = arena.leaf(id);
        self.current = leaf.next;
        Some((id, leaf))
    }
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Leaves in sibling-chain order, starting from the leftmost one.
    pub fn leaf_chain(&self) -> LeafChain<'_, K, V> {
        let start = self
            .root
            .map(|root| router::leftmost_leaf(&self.arena, root).0);
        LeafChain::new(&self.arena, start)
    }

    pub fn leaf_keys(&self) -> Vec<Vec<K>> {
        self.leaf_chain()
            .map(|(_, leaf)| leaf.keys.clone())
            .collect()
    }

    pub fn snapshot(&self) -> Option<NodeSnapshot<K>> {
        self.root.map(|root| self.snapshot_node(root))
    }

    fn snapshot_node(&self, id: NodeId) -> NodeSnapshot<K> {
        match self.arena.get(id) {
            Node::Leaf(leaf) => NodeSnapshot::Leaf(leaf.keys.clone()),
            Node::Internal(internal) => NodeSnapshot::Internal {
                keys: internal.keys.clone(),
                children: internal
                    .children
                    .iter()
                    .map(|&child| self.snapshot_node(child))
                    .collect(),
            },
        }
    }

    /// Verifies every structural invariant of the tree, reporting the first
    /// violation found.
    pub fn check_invariants(&self) -> Result<()> {
        let Some(root) = self.root else {
            if self.len != 0 {
                return Err(Error::corruption(format!(
                    "empty tree reports {} entries",
                    self.len
                )));
            }
            return Ok(());
        };

        if let Some(parent) = self.arena.get(root).parent() {
            return Err(Error::corruption(format!(
                "root {} has parent {}",
                root, parent
            )));
        }

        let mut walk = Walk {
            leaf_depth: None,
            leaves: Vec::new(),
            entries: 0,
        };
        self.check_node(root, None, None, None, 1, &mut walk)?;

        if walk.entries != self.len {
            return Err(Error::corruption(format!(
                "leaves hold {} entries but len is {}",
                walk.entries, self.len
            )));
        }

        let chained: Vec<NodeId> = self.leaf_chain().map(|(id, _)| id).collect();
        if chained != walk.leaves {
            return Err(Error::corruption(format!(
                "sibling chain {:?} does not match leaf order {:?}",
                chained, walk.leaves
            )));
        }
        Ok(())
    }

    fn check_node(
        &self,
        id: NodeId,
        parent: Option<NodeId>,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<()> {
        let node = self.arena.get(id);
        if node.parent() != parent {
            return Err(Error::corruption(format!(
                "node {} points at parent {:?}, expected {:?}",
                id,
                node.parent(),
                parent
            )));
        }

        let keys = node.keys();
        if keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::corruption(format!("keys of node {} are not ascending", id)));
        }
        if node.is_full(self.order) {
            return Err(Error::corruption(format!(
                "node {} holds {} keys, order {} splits at {}",
                id,
                keys.len(),
                self.order,
                self.order - 1
            )));
        }
        if let (Some(lower), Some(first)) = (lower, keys.first()) {
            if first < lower {
                return Err(Error::corruption(format!(
                    "node {} holds a key below its separator",
                    id
                )));
            }
        }
        if let (Some(upper), Some(last)) = (upper, keys.last()) {
            if last >= upper {
                return Err(Error::corruption(format!(
                    "node {} holds a key at or above its separator",
                    id
                )));
            }
        }

        match node {
            Node::Leaf(leaf) => {
                if leaf.keys.len() != leaf.values.len() {
                    return Err(Error::corruption(format!(
                        "leaf {} has {} keys and {} values",
                        id,
                        leaf.keys.len(),
                        leaf.values.len()
                    )));
                }
                if leaf.is_empty() {
                    return Err(Error::corruption(format!("leaf {} is empty", id)));
                }
                match walk.leaf_depth {
                    Some(expected) if expected != depth => {
                        return Err(Error::corruption(format!(
                            "leaf {} sits at depth {}, other leaves at {}",
                            id, depth, expected
                        )));
                    }
                    Some(_) => {}
                    None => walk.leaf_depth = Some(depth),
                }
                walk.leaves.push(id);
                walk.entries += leaf.len();
            }
            Node::Internal(internal) => {
                if internal.children.len() != internal.keys.len() + 1 {
                    return Err(Error::corruption(format!(
                        "internal node {} has {} keys and {} children",
                        id,
                        internal.keys.len(),
                        internal.children.len()
                    )));
                }
                for (i, &child) in internal.children.iter().enumerate() {
                    let child_lower = if i == 0 { lower } else { internal.keys.get(i - 1) };
                    let child_upper = internal.keys.get(i).or(upper);
                    self.check_node(child, Some(id), child_lower, child_upper, depth + 1, walk)?;
                }
            }
        }
        Ok(())
    }
}

struct Walk {
    leaf_depth: Option<usize>,
    leaves: Vec<NodeId>,
    entries: usize,
}

impl<K: Ord + Clone + fmt::Debug, V: fmt::Debug> BPlusTree<K, V> {
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self.arena.get(id) {
            Node::Leaf(leaf) => {
                write!(f, "{}leaf:", indent)?;
                for (key, value) in leaf.entries() {
                    write!(f, " {:?}({:?})", key, value)?;
                }
                writeln!(f)
            }
            Node::Internal(internal) => {
                write!(f, "{}internal:", indent)?;
                for key in &internal.keys {
                    write!(f, " {:?}", key)?;
                }
                writeln!(f)?;
                for &child in &internal.children {
                    self.fmt_node(f, child, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl<K: Ord + Clone + fmt::Debug, V: fmt::Debug> fmt::Display for BPlusTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.fmt_node(f, root, 0),
            None => writeln!(f, "empty tree"),
        }
    }
}
