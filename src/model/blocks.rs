// src/model/blocks.rs
//! Per-variant content payloads, one struct per block type.

use super::common::BlockCommon;
use crate::types::{FileInfo, RichTextRun};
use serde::{Deserialize, Serialize};

/// Content shared by every text-bearing block type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextContent {
    pub rich_text: Vec<RichTextRun>,
}

impl TextContent {
    pub fn plain_text(&self) -> String {
        crate::types::plain_text(&self.rich_text)
    }
}

/// Paragraph block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: TextContent,
}

/// Heading block, levels 1-3. One struct; the `Block` variant fixes the level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub common: BlockCommon,
    pub content: TextContent,
}

/// Bulleted list item block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BulletedListItemBlock {
    pub common: BlockCommon,
    pub content: TextContent,
}

/// Numbered list item block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberedListItemBlock {
    pub common: BlockCommon,
    pub content: TextContent,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextContent,
    pub checked: bool,
}

/// Toggle block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: TextContent,
}

/// Quote block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteBlock {
    pub common: BlockCommon,
    pub content: TextContent,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub content: TextContent,
    /// Emoji icon if the callout carries one; file icons are not mirrored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub content: TextContent,
    pub caption: Vec<RichTextRun>,
}

/// Media block: image, video, audio, pdf, or plain file attachment.
///
/// All five wire types carry the same payload shape, so one struct serves
/// them; the `Block` variant keeps the distinction for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaBlock {
    pub common: BlockCommon,
    pub file: FileInfo,
    pub caption: Vec<RichTextRun>,
}

/// Bookmark block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookmarkBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: Vec<RichTextRun>,
}

/// Embed block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmbedBlock {
    pub common: BlockCommon,
    pub url: String,
}

/// Link preview block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkPreviewBlock {
    pub common: BlockCommon,
    pub url: String,
}

/// Divider block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DividerBlock {
    pub common: BlockCommon,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// Table of contents block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableOfContentsBlock {
    pub common: BlockCommon,
}

/// Table block; rows arrive as `TableRow` children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    /// One rich-text sequence per cell, index-aligned with source order.
    pub cells: Vec<Vec<RichTextRun>>,
}

/// Column list block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnListBlock {
    pub common: BlockCommon,
}

/// Column block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnBlock {
    pub common: BlockCommon,
}

/// Explicit fallback for wire types this crate does not model.
///
/// Holds whatever plain text could be salvaged so rendering degrades
/// gracefully rather than dropping content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnknownBlock {
    pub common: BlockCommon,
    /// The wire type tag, preserved for logging and diagnostics.
    pub block_type: String,
    /// Best-effort plain text found anywhere in the raw payload.
    pub text: String,
}
