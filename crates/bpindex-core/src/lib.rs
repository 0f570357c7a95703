pub mod error;
pub mod config;

pub mod bptree;
pub mod shared;

pub use error::{Error, Result};
pub use config::{TreeConfig, DEFAULT_ORDER, MIN_ORDER};
pub use bptree::{BPlusTree, LeafChain, NodeId, NodeSnapshot};
pub use shared::SharedBPlusTree;
