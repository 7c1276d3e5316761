// src/formatting/html.rs
//! HTML rendering of a block tree.
//!
//! Nesting is structural rather than indentation-based: a list item's
//! children render inside its `<li>`, table rows inside `<table>`, and
//! toggles become native `<details>` disclosure elements.

use super::rich_text::{escape_html, format_rich_text, FormatTarget};
use super::traverse::{group_list_items, ListKind, RenderNode};
use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::model::{Block, MediaBlock, TableBlock, TableRowBlock};

/// Renders blocks to an HTML fragment, one element per line.
pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    out.push_str(&render_siblings(blocks).join("\n"));
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn render_siblings(siblings: &[Block]) -> Vec<String> {
    group_list_items(siblings)
        .iter()
        .filter_map(|node| match node {
            RenderNode::Block(block) => render_block(block),
            RenderNode::ListGroup { kind, items } => Some(render_list_group(*kind, items)),
        })
        .collect()
}

fn render_block(block: &Block) -> Option<String> {
    let html = |runs| format_rich_text(runs, FormatTarget::Html);

    let rendered = match block {
        Block::Paragraph(b) => {
            with_children(format!("<p>{}</p>", html(&b.content.rich_text)), block)
        }
        Block::Heading1(b) => format!("<h1>{}</h1>", html(&b.content.rich_text)),
        Block::Heading2(b) => format!("<h2>{}</h2>", html(&b.content.rich_text)),
        Block::Heading3(b) => format!("<h3>{}</h3>", html(&b.content.rich_text)),
        Block::ToDo(b) => {
            let checked = if b.checked { " checked" } else { "" };
            let line = format!(
                "<p><input type=\"checkbox\" disabled{} /> {}</p>",
                checked,
                html(&b.content.rich_text)
            );
            with_children(line, block)
        }
        Block::Toggle(b) => {
            let mut out = format!(
                "<details><summary>{}</summary>",
                html(&b.content.rich_text)
            );
            for chunk in child_chunks(block) {
                out.push('\n');
                out.push_str(&chunk);
            }
            out.push_str("\n</details>");
            out
        }
        Block::Quote(b) => wrap_with_children(
            "blockquote",
            format!("<p>{}</p>", html(&b.content.rich_text)),
            block,
        ),
        Block::Callout(b) => {
            let text = html(&b.content.rich_text);
            let body = match &b.icon {
                Some(icon) => format!("<p>{} {}</p>", escape_html(icon), text),
                None => format!("<p>{}</p>", text),
            };
            wrap_with_children("blockquote", body, block)
        }
        Block::Code(b) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            escape_html(&b.language),
            escape_html(&b.content.plain_text())
        ),
        Block::Image(b) => format!(
            "<img src=\"{}\" alt=\"{}\" />",
            escape_html(&b.file.url),
            escape_html(&image_alt(b))
        ),
        Block::File(b) | Block::Pdf(b) | Block::Video(b) | Block::Audio(b) => format!(
            "<p><a href=\"{}\">{}</a></p>",
            escape_html(&b.file.url),
            escape_html(&b.file.name)
        ),
        Block::Bookmark(b) => {
            let caption = format_rich_text(&b.caption, FormatTarget::Plain);
            let label = if caption.trim().is_empty() {
                &b.url
            } else {
                &caption
            };
            format!(
                "<p><a href=\"{}\">{}</a></p>",
                escape_html(&b.url),
                escape_html(label)
            )
        }
        Block::Embed(b) => anchor_paragraph(&b.url),
        Block::LinkPreview(b) => anchor_paragraph(&b.url),
        Block::Divider(_) => "<hr />".to_string(),
        Block::Equation(b) => format!("<p>$${}$$</p>", escape_html(&b.expression)),
        Block::TableOfContents(_) => return None,
        Block::Table(b) => render_table(b, block.children().unwrap_or(&[]))?,
        Block::TableRow(b) => format!("<tr>{}</tr>", row_cells(b, false)),
        Block::ColumnList(_) | Block::Column(_) => {
            let chunks = child_chunks(block);
            if chunks.is_empty() {
                return None;
            }
            format!("<div>\n{}\n</div>", chunks.join("\n"))
        }
        Block::BulletedListItem(_) | Block::NumberedListItem(_) => {
            let kind = super::traverse::list_kind(block).unwrap_or(ListKind::Bulleted);
            render_list_group(kind, &[block])
        }
        Block::Unknown(b) => {
            if b.text.trim().is_empty() {
                return None;
            }
            format!("<p>{}</p>", escape_html(&b.text))
        }
    };

    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}

fn anchor_paragraph(url: &str) -> String {
    let escaped = escape_html(url);
    format!("<p><a href=\"{0}\">{0}</a></p>", escaped)
}

fn child_chunks(block: &Block) -> Vec<String> {
    block.children().map(render_siblings).unwrap_or_default()
}

fn with_children(base: String, block: &Block) -> String {
    let chunks = child_chunks(block);
    if chunks.is_empty() {
        return base;
    }
    let mut out = base;
    for chunk in chunks {
        out.push('\n');
        out.push_str(&chunk);
    }
    out
}

fn wrap_with_children(tag: &str, body: String, block: &Block) -> String {
    let mut inner = body;
    for chunk in child_chunks(block) {
        inner.push('\n');
        inner.push_str(&chunk);
    }
    format!("<{0}>\n{1}\n</{0}>", tag, inner)
}

/// One `<ul>`/`<ol>` per group; each item's children render inside its
/// `<li>` so nesting is carried by the markup itself.
fn render_list_group(kind: ListKind, items: &[&Block]) -> String {
    let tag = match kind {
        ListKind::Bulleted => "ul",
        ListKind::Numbered => "ol",
    };
    let mut out = format!("<{}>", tag);

    for item in items {
        let text = format_rich_text(item.rich_text().unwrap_or(&[]), FormatTarget::Html);
        out.push_str(&format!("\n<li>{}", text));
        for chunk in child_chunks(item) {
            out.push('\n');
            out.push_str(&chunk);
        }
        out.push_str("</li>");
    }

    out.push_str(&format!("\n</{}>", tag));
    out
}

fn image_alt(media: &MediaBlock) -> String {
    let caption = format_rich_text(&media.caption, FormatTarget::Plain);
    if caption.trim().is_empty() {
        media.file.name.clone()
    } else {
        caption
    }
}

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

    let mut lines = vec!["<table>".to_string()];
    for (index, row) in rows.iter().enumerate() {
        let header_row = table.has_column_header && index == 0;
        lines.push(format!("<tr>{}</tr>", row_cells(row, header_row)));
    }
    lines.push("</table>".to_string());
    Some(lines.join("\n"))
}

fn row_cells(row: &TableRowBlock, header: bool) -> String {
    let tag = if header { "th" } else { "td" };
    row.cells
        .iter()
        .map(|cell| {
            format!(
                "<{0}>{1}</{0}>",
                tag,
                format_rich_text(cell, FormatTarget::Html)
            )
        })
        .collect()
}
