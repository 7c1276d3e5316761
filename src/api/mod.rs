// src/api/mod.rs
//! Remote block retrieval — the ability to list a block's children.
//!
//! The retrieval pipeline depends on the `BlockSource` trait, never on HTTP
//! details; `NotionHttpClient` is the production implementation.

pub mod client;
mod pagination;
mod retriever;
pub mod simplify;

pub use client::NotionHttpClient;
pub use pagination::fetch_all_pages;
pub use retriever::TreeRetriever;
pub use simplify::{file_infos_from_property, SimplifyContext};

use crate::error::ConvertError;
use crate::types::BlockId;
use serde_json::Value;

/// One page of a block's children: raw block objects plus the cursor that
/// requests the next page.
#[derive(Debug, Clone)]
pub struct ChildrenPage {
    pub results: Vec<Value>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// The consumed collaborator: cursor-based listing of a block's children.
///
/// Callers must thread `next_cursor` from one response into the next call
/// until `has_more` is false.
#[async_trait::async_trait]
pub trait BlockSource: Send + Sync {
    async fn list_children(
        &self,
        block_id: &BlockId,
        cursor: Option<String>,
    ) -> Result<ChildrenPage, ConvertError>;
}
