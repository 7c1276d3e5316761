// src/formatting/markdown.rs
//! Markdown rendering of a block tree.
//!
//! Siblings are grouped (4.3) before rendering. Two consecutive non-group
//! blocks are separated by exactly one blank line; items of one rendered
//! list sit on adjacent lines with nested content indented beneath their
//! item.

use super::rich_text::{format_rich_text, FormatTarget};
use super::traverse::{group_list_items, ListKind, RenderNode};
use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, INDENT_SPACES};
use crate::model::{Block, MediaBlock, TableBlock, TableRowBlock};

/// Renders blocks to a Markdown document.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    let mut out = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    out.push_str(&render_siblings(blocks).join("\n\n"));
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Renders a sibling list into blank-line-separated chunks.
fn render_siblings(siblings: &[Block]) -> Vec<String> {
    group_list_items(siblings)
        .iter()
        .filter_map(|node| match node {
            RenderNode::Block(block) => render_block(block),
            RenderNode::ListGroup { kind, items } => Some(render_list_group(*kind, items, 0)),
        })
        .collect()
}

/// Renders one non-group block, `None` when it contributes no output.
fn render_block(block: &Block) -> Option<String> {
    let md = |runs| format_rich_text(runs, FormatTarget::Markdown);

    let rendered = match block {
        Block::Paragraph(b) => with_children(md(&b.content.rich_text), block),
        Block::Heading1(b) => format!("# {}", md(&b.content.rich_text)),
        Block::Heading2(b) => format!("## {}", md(&b.content.rich_text)),
        Block::Heading3(b) => format!("### {}", md(&b.content.rich_text)),
        Block::ToDo(b) => {
            let box_mark = if b.checked { "[x]" } else { "[ ]" };
            with_children(format!("- {} {}", box_mark, md(&b.content.rich_text)), block)
        }
        Block::Toggle(b) => with_children(md(&b.content.rich_text), block),
        Block::Quote(b) => {
            let mut body = md(&b.content.rich_text);
            for chunk in child_chunks(block) {
                body.push_str("\n\n");
                body.push_str(&chunk);
            }
            quote_lines(&body)
        }
        Block::Callout(b) => {
            let text = md(&b.content.rich_text);
            let mut body = match &b.icon {
                Some(icon) => format!("{} {}", icon, text),
                None => text,
            };
            for chunk in child_chunks(block) {
                body.push_str("\n\n");
                body.push_str(&chunk);
            }
            quote_lines(&body)
        }
        Block::Code(b) => format!(
            "```{}\n{}\n```",
            b.language,
            b.content.plain_text()
        ),
        Block::Image(b) => format!("![{}]({})", image_alt(b), b.file.url),
        Block::File(b) | Block::Pdf(b) | Block::Video(b) | Block::Audio(b) => {
            format!("[{}]({})", b.file.name, b.file.url)
        }
        Block::Bookmark(b) => {
            let caption = format_rich_text(&b.caption, FormatTarget::Markdown);
            let label = if caption.is_empty() { &b.url } else { &caption };
            format!("[{}]({})", label, b.url)
        }
        Block::Embed(b) => format!("[{}]({})", b.url, b.url),
        Block::LinkPreview(b) => format!("[{}]({})", b.url, b.url),
        Block::Divider(_) => "---".to_string(),
        Block::Equation(b) => format!("$$\n{}\n$$", b.expression),
        Block::TableOfContents(_) => return None,
        Block::Table(b) => render_table(b, block.children().unwrap_or(&[]))?,
        // A row outside its table still renders as one grid line.
        Block::TableRow(b) => table_row_line(b),
        Block::ColumnList(_) | Block::Column(_) => {
            let chunks = child_chunks(block);
            if chunks.is_empty() {
                return None;
            }
            chunks.join("\n\n")
        }
        Block::BulletedListItem(_) | Block::NumberedListItem(_) => {
            // Grouping turns list items into groups before rendering; a bare
            // item reaching here renders as a one-item group.
            let kind = super::traverse::list_kind(block).unwrap_or(ListKind::Bulleted);
            render_list_group(kind, &[block], 0)
        }
        Block::Unknown(b) => {
            if b.text.trim().is_empty() {
                return None;
            }
            b.text.clone()
        }
    };

    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}

/// Appends a block's child chunks below its own text, blank-line separated.
fn with_children(base: String, block: &Block) -> String {
    let chunks = child_chunks(block);
    if chunks.is_empty() {
        return base;
    }
    let mut out = base;
    for chunk in chunks {
        out.push_str("\n\n");
        out.push_str(&chunk);
    }
    out
}

fn child_chunks(block: &Block) -> Vec<String> {
    block
        .children()
        .map(render_siblings)
        .unwrap_or_default()
}

/// Renders one list group. `depth` indents nested lists by
/// `INDENT_SPACES` per level; items within a group sit on adjacent lines
/// (the blank-line rule is suppressed inside a list).
fn render_list_group(kind: ListKind, items: &[&Block], depth: usize) -> String {
    let indent = " ".repeat(depth * INDENT_SPACES);
    let mut lines: Vec<String> = Vec::new();

    for (position, item) in items.iter().enumerate() {
        let marker = match kind {
            ListKind::Bulleted => "-".to_string(),
            ListKind::Numbered => format!("{}.", position + 1),
        };
        let text = format_rich_text(item.rich_text().unwrap_or(&[]), FormatTarget::Markdown);
        lines.push(format!("{}{} {}", indent, marker, text));

        if let Some(children) = item.children() {
            for node in group_list_items(children) {
                match node {
                    RenderNode::ListGroup { kind, items } => {
                        lines.push(render_list_group(kind, &items, depth + 1));
                    }
                    RenderNode::Block(child) => {
                        if let Some(chunk) = render_block(child) {
                            lines.push(indent_lines(&chunk, depth + 1));
                        }
                    }
                }
            }
        }
    }

    lines.join("\n")
}

fn indent_lines(chunk: &str, depth: usize) -> String {
    let indent = " ".repeat(depth * INDENT_SPACES);
    chunk
        .lines()
        .map(|line| format!("{}{}", indent, line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote_lines(body: &str) -> String {
    body.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn image_alt(media: &MediaBlock) -> String {
    let caption = format_rich_text(&media.caption, FormatTarget::Plain);
    if caption.trim().is_empty() {
        media.file.name.clone()
    } else {
        caption
    }
}

/// Renders a table as a row-major Markdown grid. Rows come from the table's
/// `table_row` children; a missing column header gets a synthesized empty
/// header row so the grid stays valid Markdown.
fn render_table(table: &TableBlock, children: &[Block]) -> Option<String> {
    let rows: Vec<&TableRowBlock> = children
        .iter()
        .filter_map(|child| match child {
            Block::TableRow(row) => Some(row),
            _ => None,
        })
        .collect();
    if rows.is_empty() {
        return None;
    }

    let width = rows
        .iter()
        .map(|row| row.cells.len())
        .max()
        .unwrap_or(table.table_width)
        .max(1);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let mut body_rows = rows.as_slice();

    if table.has_column_header {
        lines.push(grid_line(&rows[0].cells, width));
        body_rows = &rows[1..];
    } else {
        lines.push(grid_line(&[], width));
    }
    lines.push(separator_line(width));
    for row in body_rows {
        lines.push(grid_line(&row.cells, width));
    }

    Some(lines.join("\n"))
}

fn table_row_line(row: &TableRowBlock) -> String {
    grid_line(&row.cells, row.cells.len().max(1))
}

fn grid_line(cells: &[Vec<crate::types::RichTextRun>], width: usize) -> String {
    let mut rendered: Vec<String> = cells.iter().map(|cell| table_cell(cell)).collect();
    rendered.resize(width, String::new());
    format!("| {} |", rendered.join(" | "))
}

fn separator_line(width: usize) -> String {
    format!("| {} |", vec!["---"; width].join(" | "))
}

/// Cell text with grid-breaking characters neutralized.
fn table_cell(runs: &[crate::types::RichTextRun]) -> String {
    format_rich_text(runs, FormatTarget::Markdown)
        .replace('\n', " ")
        .replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BlockCommon, BulletedListItemBlock, CodeBlock, DividerBlock, HeadingBlock,
        NumberedListItemBlock, ParagraphBlock, QuoteBlock, TableOfContentsBlock, TextContent,
        ToDoBlock,
    };
    use crate::types::RichTextRun;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> TextContent {
        TextContent {
            rich_text: vec![RichTextRun::plain(s)],
        }
    }

    fn paragraph(s: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: text(s),
        })
    }

    fn bullet(s: &str) -> Block {
        Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::default(),
            content: text(s),
        })
    }

    fn numbered(s: &str) -> Block {
        Block::NumberedListItem(NumberedListItemBlock {
            common: BlockCommon::default(),
            content: text(s),
        })
    }

    #[test]
    fn adjacent_list_items_share_lines_and_blocks_get_blank_lines() {
        let blocks = vec![
            paragraph("intro"),
            bullet("first"),
            bullet("second"),
            paragraph("outro"),
        ];
        assert_eq!(
            blocks_to_markdown(&blocks),
            "intro\n\n- first\n- second\n\noutro\n"
        );
    }

    #[test]
    fn numbered_groups_restart_numbering() {
        let blocks = vec![
            numbered("a"),
            numbered("b"),
            Block::Divider(DividerBlock::default()),
            numbered("c"),
        ];
        assert_eq!(
            blocks_to_markdown(&blocks),
            "1. a\n2. b\n\n---\n\n1. c\n"
        );
    }

    #[test]
    fn nested_list_indents_under_parent_item() {
        let mut parent = BulletedListItemBlock {
            common: BlockCommon::default(),
            content: text("parent"),
        };
        parent.common.has_children = true;
        parent.common.children = Some(vec![bullet("child")]);
        let blocks = vec![Block::BulletedListItem(parent)];

        assert_eq!(blocks_to_markdown(&blocks), "- parent\n  - child\n");
    }

    #[test]
    fn non_list_child_of_list_item_is_indented() {
        let mut parent = BulletedListItemBlock {
            common: BlockCommon::default(),
            content: text("item"),
        };
        parent.common.has_children = true;
        parent.common.children = Some(vec![paragraph("detail")]);
        let blocks = vec![Block::BulletedListItem(parent)];

        assert_eq!(blocks_to_markdown(&blocks), "- item\n  detail\n");
    }

    #[test]
    fn headings_and_code_render_with_their_markers() {
        let blocks = vec![
            Block::Heading1(HeadingBlock {
                common: BlockCommon::default(),
                content: text("Title"),
            }),
            Block::Code(CodeBlock {
                common: BlockCommon::default(),
                language: "rust".to_string(),
                content: text("fn main() {}"),
                caption: Vec::new(),
            }),
        ];
        assert_eq!(
            blocks_to_markdown(&blocks),
            "# Title\n\n```rust\nfn main() {}\n```\n"
        );
    }

    #[test]
    fn todo_renders_checkbox_state() {
        let blocks = vec![
            Block::ToDo(ToDoBlock {
                common: BlockCommon::default(),
                content: text("done"),
                checked: true,
            }),
            Block::ToDo(ToDoBlock {
                common: BlockCommon::default(),
                content: text("open"),
                checked: false,
            }),
        ];
        assert_eq!(blocks_to_markdown(&blocks), "- [x] done\n\n- [ ] open\n");
    }

    #[test]
    fn quote_prefixes_every_line() {
        let mut quote = QuoteBlock {
            common: BlockCommon::default(),
            content: text("first line"),
        };
        quote.common.has_children = true;
        quote.common.children = Some(vec![paragraph("second line")]);

        assert_eq!(
            blocks_to_markdown(&[Block::Quote(quote)]),
            "> first line\n>\n> second line\n"
        );
    }

    #[test]
    fn table_without_column_header_synthesizes_one() {
        let mut table = TableBlock {
            common: BlockCommon::default(),
            table_width: 2,
            has_column_header: false,
            has_row_header: false,
        };
        table.common.has_children = true;
        table.common.children = Some(vec![Block::TableRow(TableRowBlock {
            common: BlockCommon::default(),
            cells: vec![vec![RichTextRun::plain("a")], vec![RichTextRun::plain("b")]],
        })]);

        assert_eq!(
            blocks_to_markdown(&[Block::Table(table)]),
            "|  |  |\n| --- | --- |\n| a | b |\n"
        );
    }

    #[test]
    fn table_with_column_header_uses_first_row() {
        let mut table = TableBlock {
            common: BlockCommon::default(),
            table_width: 2,
            has_column_header: true,
            has_row_header: false,
        };
        table.common.has_children = true;
        table.common.children = Some(vec![
            Block::TableRow(TableRowBlock {
                common: BlockCommon::default(),
                cells: vec![vec![RichTextRun::plain("h1")], vec![RichTextRun::plain("h2")]],
            }),
            Block::TableRow(TableRowBlock {
                common: BlockCommon::default(),
                cells: vec![
                    vec![RichTextRun::plain("a|b")],
                    vec![RichTextRun::plain("c")],
                ],
            }),
        ]);

        assert_eq!(
            blocks_to_markdown(&[Block::Table(table)]),
            "| h1 | h2 |\n| --- | --- |\n| a\\|b | c |\n"
        );
    }

    #[test]
    fn table_of_contents_renders_nothing() {
        let blocks = vec![
            Block::TableOfContents(TableOfContentsBlock::default()),
            paragraph("after"),
        ];
        assert_eq!(blocks_to_markdown(&blocks), "after\n");
    }

    #[test]
    fn empty_input_renders_empty_document() {
        assert_eq!(blocks_to_markdown(&[]), "");
    }
}
