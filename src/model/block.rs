// src/model/block.rs

use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextRun};
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::Audio($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::LinkPreview($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::TableOfContents($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Unknown($pattern) => $result,
        }
    };
}

/// Block represents every content type this crate models, plus an explicit
/// `Unknown` fallback. The closed enum makes consumption exhaustive: a new
/// variant breaks every renderer until handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Image(MediaBlock),
    File(MediaBlock),
    Pdf(MediaBlock),
    Video(MediaBlock),
    Audio(MediaBlock),
    Bookmark(BookmarkBlock),
    Embed(EmbedBlock),
    LinkPreview(LinkPreviewBlock),
    Divider(DividerBlock),
    Equation(EquationBlock),
    TableOfContents(TableOfContentsBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(ColumnListBlock),
    Column(ColumnBlock),
    Unknown(UnknownBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get mutable common block data
    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    /// Whether the source tree reports children for this block.
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Fetched children, if retrieval recursed into this block.
    pub fn children(&self) -> Option<&[Block]> {
        self.common().children.as_deref()
    }

    /// Assigns fetched children.
    pub fn set_children(&mut self, children: Vec<Block>) {
        self.common_mut().children = Some(children);
    }

    /// The wire type tag for this block.
    pub fn block_type(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Image(_) => "image",
            Block::File(_) => "file",
            Block::Pdf(_) => "pdf",
            Block::Video(_) => "video",
            Block::Audio(_) => "audio",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::LinkPreview(_) => "link_preview",
            Block::Divider(_) => "divider",
            Block::Equation(_) => "equation",
            Block::TableOfContents(_) => "table_of_contents",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Unknown(_) => "unknown",
        }
    }

    /// The block's primary rich text, for types that carry one.
    pub fn rich_text(&self) -> Option<&[RichTextRun]> {
        match self {
            Block::Paragraph(b) => Some(&b.content.rich_text),
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => {
                Some(&b.content.rich_text)
            }
            Block::BulletedListItem(b) => Some(&b.content.rich_text),
            Block::NumberedListItem(b) => Some(&b.content.rich_text),
            Block::ToDo(b) => Some(&b.content.rich_text),
            Block::Toggle(b) => Some(&b.content.rich_text),
            Block::Quote(b) => Some(&b.content.rich_text),
            Block::Callout(b) => Some(&b.content.rich_text),
            Block::Code(b) => Some(&b.content.rich_text),
            _ => None,
        }
    }

    /// Flattened plain text of the block's own content (not its children).
    pub fn plain_text(&self) -> String {
        match self {
            Block::Equation(b) => b.expression.clone(),
            Block::Bookmark(b) => {
                let caption = crate::types::plain_text(&b.caption);
                if caption.is_empty() {
                    b.url.clone()
                } else {
                    caption
                }
            }
            Block::Embed(b) => b.url.clone(),
            Block::LinkPreview(b) => b.url.clone(),
            Block::Image(b) | Block::File(b) | Block::Pdf(b) | Block::Video(b)
            | Block::Audio(b) => b.file.name.clone(),
            Block::TableRow(b) => b
                .cells
                .iter()
                .map(|cell| crate::types::plain_text(cell))
                .collect::<Vec<_>>()
                .join(" "),
            Block::Unknown(b) => b.text.clone(),
            _ => self
                .rich_text()
                .map(crate::types::plain_text)
                .unwrap_or_default(),
        }
    }

    /// Whether this block is a bulleted or numbered list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::BulletedListItem(_) | Block::NumberedListItem(_))
    }
}
