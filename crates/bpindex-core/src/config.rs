use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ORDER: usize = 4;
pub const MIN_ORDER: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// A node holding `order - 1` keys is split.
    pub order: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            order: DEFAULT_ORDER,
        }
    }
}

impl TreeConfig {
    pub fn new(order: usize) -> Self {
        TreeConfig { order }
    }

    pub fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(Error::InvalidOrder {
                order: self.order,
                min: MIN_ORDER,
            });
        }
        Ok(())
    }

    pub fn split_threshold(&self) -> usize {
        self.order - 1
    }
}
