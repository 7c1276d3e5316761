// src/api/retriever.rs
//! Recursive, paginated retrieval of a block tree.
//!
//! Sibling subtrees are fetched concurrently through a bounded fan-out, then
//! reassembled by index so output order always matches source order. A page
//! failure anywhere aborts the whole call — a silently truncated document is
//! worse than a failed one.

use super::simplify::{simplify, SimplifyContext};
use super::BlockSource;
use crate::config::{RetrieveOptions, RetrieverConfig};
use crate::constants::{RETRY_INITIAL_DELAY_MS, RETRY_MAX_ATTEMPTS, RETRY_MAX_DELAY_MS};
use crate::error::ConvertError;
use crate::error_recovery::retry_with_backoff;
use crate::files::FileResolver;
use crate::model::Block;
use crate::types::{BlockId, PageId};
use futures::future::{BoxFuture, FutureExt};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

/// Fetches and simplifies a full block tree from a `BlockSource`.
pub struct TreeRetriever {
    source: Arc<dyn BlockSource>,
    resolver: Arc<FileResolver>,
    config: RetrieverConfig,
}

impl TreeRetriever {
    pub fn new(source: Arc<dyn BlockSource>, resolver: Arc<FileResolver>) -> Self {
        Self::with_config(source, resolver, RetrieverConfig::default())
    }

    pub fn with_config(
        source: Arc<dyn BlockSource>,
        resolver: Arc<FileResolver>,
        config: RetrieverConfig,
    ) -> Self {
        Self {
            source,
            resolver,
            config,
        }
    }

    /// Retrieves the content of a page: its top-level blocks, recursively
    /// populated when `recursive` is set.
    ///
    /// A page's ID doubles as the ID of its root block in the listing API.
    pub async fn get_page_content(
        &self,
        page_id: &PageId,
        recursive: bool,
        opts: &RetrieveOptions,
    ) -> Result<Vec<Block>, ConvertError> {
        let root = BlockId::parse(page_id.as_str())?;
        log::info!(
            "Fetching page content for {} (recursive: {}, process_files: {})",
            root,
            recursive,
            opts.process_files
        );
        self.fetch_tree(root, 0, recursive, opts).await
    }

    /// Retrieves the children of one block, recursively when requested.
    pub async fn fetch_children(
        &self,
        block_id: &BlockId,
        recursive: bool,
        opts: &RetrieveOptions,
    ) -> Result<Vec<Block>, ConvertError> {
        self.fetch_tree(block_id.clone(), 0, recursive, opts).await
    }

    fn fetch_tree<'a>(
        &'a self,
        parent: BlockId,
        depth: u8,
        recursive: bool,
        opts: &'a RetrieveOptions,
    ) -> BoxFuture<'a, Result<Vec<Block>, ConvertError>> {
        async move {
            let raw_blocks = super::fetch_all_pages(|cursor| {
                let parent = &parent;
                async move {
                    retry_with_backoff(
                        || self.source.list_children(parent, cursor.clone()),
                        RETRY_MAX_ATTEMPTS,
                        Duration::from_millis(RETRY_INITIAL_DELAY_MS),
                        Duration::from_millis(RETRY_MAX_DELAY_MS),
                    )
                    .await
                }
            })
            .await
            .map_err(|(cursor, source)| ConvertError::Retrieval {
                block_id: parent.to_string(),
                cursor,
                source: Box::new(source),
            })?;

            let ctx = SimplifyContext::new(&self.resolver, opts.process_files);
            let mut blocks = Vec::with_capacity(raw_blocks.len());
            for raw in &raw_blocks {
                blocks.push(simplify(raw, &ctx).await);
            }

            if recursive {
                if depth >= self.config.max_depth {
                    log::warn!(
                        "Recursion depth cap ({}) reached under block {}, leaving deeper children unfetched",
                        self.config.max_depth,
                        parent
                    );
                    return Ok(blocks);
                }
                self.fetch_subtrees(&mut blocks, depth, opts).await?;
            }

            Ok(blocks)
        }
        .boxed()
    }

    /// Fans out over the blocks that report children, bounded by the
    /// configured concurrency, and reassembles results by sibling index.
    /// The first failure propagates; in-flight siblings are dropped so no
    /// partial tree escapes.
    async fn fetch_subtrees(
        &self,
        blocks: &mut [Block],
        depth: u8,
        opts: &RetrieveOptions,
    ) -> Result<(), ConvertError> {
        let jobs: Vec<(usize, BlockId)> = blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.has_children())
            .map(|(index, block)| (index, block.id().clone()))
            .collect();

        if jobs.is_empty() {
            return Ok(());
        }

        let mut subtree_stream = futures::stream::iter(jobs.into_iter().map(|(index, id)| {
            async move {
                self.fetch_tree(id, depth + 1, true, opts)
                    .await
                    .map(|children| (index, children))
            }
        }))
        .buffer_unordered(self.config.concurrency);

        while let Some(result) = subtree_stream.next().await {
            let (index, children) = result?;
            blocks[index].set_children(children);
        }

        Ok(())
    }
}
