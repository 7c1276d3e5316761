// src/model/common.rs

use super::Block;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Fields shared by every block variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: BlockId,
    /// Whether the source tree reports children, set at simplification time
    /// and independent of whether they have been fetched yet.
    pub has_children: bool,
    /// Fetched children. Invariant: `Some` iff retrieval requested recursion
    /// and `has_children` was true; `None` otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            has_children: false,
            children: None,
        }
    }

    pub fn with_children_flag(id: BlockId, has_children: bool) -> Self {
        Self {
            id,
            has_children,
            children: None,
        }
    }
}

impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(BlockId::new_v4())
    }
}
