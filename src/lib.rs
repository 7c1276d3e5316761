// src/lib.rs
//! notion2markup library — converts Notion block trees into Markdown or HTML.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `ConvertError`, `ResolveError`, `ValidationError`
//! - **Configuration** — `FilesConfig`, `RetrieveOptions`, `RetrieverConfig`
//! - **Domain model** — `Block`, `BlockCommon`, the per-variant payloads
//! - **Domain types** — `BlockId`, `PageId`, `ApiKey`, `RichTextRun`, etc.
//! - **API client** — `BlockSource`, `NotionHttpClient`, `TreeRetriever`
//! - **File resolution** — `FileResolver`, `ResolveStrategy` and strategies
//! - **Formatting** — `blocks_to_markdown`, `blocks_to_html`

#[cfg(feature = "bench")]
pub mod api;
#[cfg(not(feature = "bench"))]
mod api;

mod config;
mod constants;
mod error;
mod error_recovery;
mod files;

#[cfg(feature = "bench")]
pub mod formatting;
#[cfg(not(feature = "bench"))]
mod formatting;

#[cfg(feature = "bench")]
pub mod model;
#[cfg(not(feature = "bench"))]
mod model;

#[cfg(feature = "bench")]
pub mod types;
#[cfg(not(feature = "bench"))]
mod types;

// --- Error Handling ---
pub use crate::error::{ApiErrorCode, ConvertError, ResolveError, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    CommandLineInput, FileStrategy, FilesConfig, OutputFormat, RetrieveOptions, RetrieverConfig,
    StorageConfig,
};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon};

// --- Block Types ---
pub use crate::model::blocks::{
    BookmarkBlock, BulletedListItemBlock, CalloutBlock, CodeBlock, ColumnBlock, ColumnListBlock,
    DividerBlock, EmbedBlock, EquationBlock, HeadingBlock, LinkPreviewBlock, MediaBlock,
    NumberedListItemBlock, ParagraphBlock, QuoteBlock, TableBlock, TableOfContentsBlock,
    TableRowBlock, TextContent, ToDoBlock, ToggleBlock, UnknownBlock,
};

// --- Domain Types ---
pub use crate::types::{
    plain_text, Annotations, ApiKey, BlockId, FileInfo, FileKind, PageId, RichTextRun,
    ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    simplify::{file_infos_from_property, simplify, SimplifyContext},
    BlockSource, ChildrenPage, NotionHttpClient, TreeRetriever,
};

// --- File Resolution ---
pub use crate::files::{
    Downloader, FileResolver, HttpDownloader, LocalStore, PassThrough, RemoteStore,
    ResolveStrategy,
};

// --- Formatting ---
pub use crate::formatting::{
    annotate_depth, blocks_to_html, blocks_to_markdown, format_rich_text, group_list_items,
    FormatTarget, ListKind, RenderNode,
};

// --- Retry Support ---
pub use crate::error_recovery::retry_with_backoff;
