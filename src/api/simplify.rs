// src/api/simplify.rs
//! Simplification of raw API block objects into the uniform `Block` model.
//!
//! The wire format is duck-typed JSON keyed by a `type` tag; this module is
//! the single place that shape is interpreted. Everything downstream works
//! with the closed sum type. Unrecognized tags degrade to `Block::Unknown`
//! with whatever plain text could be salvaged — content is never dropped.

use crate::files::FileResolver;
use crate::model::*;
use crate::types::{plain_text, Annotations, BlockId, FileInfo, FileKind, RichTextRun, ValidatedUrl};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// What one simplification pass needs: the resolver and whether to use it.
pub struct SimplifyContext<'a> {
    pub resolver: &'a FileResolver,
    /// When false, asset URLs are kept as-is and the resolver is never
    /// consulted.
    pub process_files: bool,
}

impl<'a> SimplifyContext<'a> {
    pub fn new(resolver: &'a FileResolver, process_files: bool) -> Self {
        Self {
            resolver,
            process_files,
        }
    }
}

/// Maps one raw block object into a `Block`.
///
/// Never fails: a malformed block becomes `Block::Unknown` carrying its
/// salvageable text, and a resolver failure inside keeps the original URL.
pub async fn simplify(raw: &Value, ctx: &SimplifyContext<'_>) -> Block {
    let common = extract_common(raw);
    let type_tag = raw["type"].as_str().unwrap_or("");
    let payload = &raw[type_tag];

    match type_tag {
        "paragraph" => Block::Paragraph(ParagraphBlock {
            common,
            content: text_content(payload),
        }),
        "heading_1" => Block::Heading1(heading(common, payload)),
        "heading_2" => Block::Heading2(heading(common, payload)),
        "heading_3" => Block::Heading3(heading(common, payload)),
        "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock {
            common,
            content: text_content(payload),
        }),
        "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock {
            common,
            content: text_content(payload),
        }),
        "to_do" => Block::ToDo(ToDoBlock {
            common,
            content: text_content(payload),
            checked: payload["checked"].as_bool().unwrap_or(false),
        }),
        "toggle" => Block::Toggle(ToggleBlock {
            common,
            content: text_content(payload),
        }),
        "quote" => Block::Quote(QuoteBlock {
            common,
            content: text_content(payload),
        }),
        "callout" => Block::Callout(CalloutBlock {
            common,
            content: text_content(payload),
            icon: payload["icon"]["emoji"].as_str().map(String::from),
        }),
        "code" => Block::Code(CodeBlock {
            common,
            language: payload["language"].as_str().unwrap_or("plain text").to_string(),
            content: text_content(payload),
            caption: runs_from(&payload["caption"]),
        }),
        "image" => Block::Image(media(common, payload, "image", ctx).await),
        "file" => Block::File(media(common, payload, "file", ctx).await),
        "pdf" => Block::Pdf(media(common, payload, "pdf", ctx).await),
        "video" => Block::Video(media(common, payload, "video", ctx).await),
        "audio" => Block::Audio(media(common, payload, "audio", ctx).await),
        "bookmark" => Block::Bookmark(BookmarkBlock {
            common,
            url: payload["url"].as_str().unwrap_or_default().to_string(),
            caption: runs_from(&payload["caption"]),
        }),
        "embed" => Block::Embed(EmbedBlock {
            common,
            url: payload["url"].as_str().unwrap_or_default().to_string(),
        }),
        "link_preview" => Block::LinkPreview(LinkPreviewBlock {
            common,
            url: payload["url"].as_str().unwrap_or_default().to_string(),
        }),
        "divider" => Block::Divider(DividerBlock { common }),
        "equation" => Block::Equation(EquationBlock {
            common,
            expression: payload["expression"].as_str().unwrap_or_default().to_string(),
        }),
        "table_of_contents" => Block::TableOfContents(TableOfContentsBlock { common }),
        "table" => Block::Table(TableBlock {
            common,
            table_width: payload["table_width"].as_u64().unwrap_or(0) as usize,
            has_column_header: payload["has_column_header"].as_bool().unwrap_or(false),
            has_row_header: payload["has_row_header"].as_bool().unwrap_or(false),
        }),
        "table_row" => Block::TableRow(TableRowBlock {
            common,
            cells: payload["cells"]
                .as_array()
                .map(|cells| cells.iter().map(runs_from).collect())
                .unwrap_or_default(),
        }),
        "column_list" => Block::ColumnList(ColumnListBlock { common }),
        "column" => Block::Column(ColumnBlock { common }),
        other => {
            log::debug!(
                "Unrecognized block type '{}' (id: {}), degrading to text salvage",
                other,
                common.id
            );
            Block::Unknown(UnknownBlock {
                common,
                block_type: other.to_string(),
                text: salvage_plain_text(raw),
            })
        }
    }
}

fn extract_common(raw: &Value) -> BlockCommon {
    let id = raw["id"]
        .as_str()
        .and_then(|s| BlockId::parse(s).ok())
        .unwrap_or_else(BlockId::new_v4);
    BlockCommon::with_children_flag(id, raw["has_children"].as_bool().unwrap_or(false))
}

fn heading(common: BlockCommon, payload: &Value) -> HeadingBlock {
    HeadingBlock {
        common,
        content: text_content(payload),
    }
}

fn text_content(payload: &Value) -> TextContent {
    TextContent {
        rich_text: runs_from(&payload["rich_text"]),
    }
}

/// Extracts a rich-text run sequence from a raw array.
///
/// A malformed item contributes an empty run rather than aborting the whole
/// block's extraction.
pub fn runs_from(value: &Value) -> Vec<RichTextRun> {
    value
        .as_array()
        .map(|items| items.iter().map(run_from_item).collect())
        .unwrap_or_default()
}

fn run_from_item(item: &Value) -> RichTextRun {
    // Prefer the editable text content; `plain_text` covers mentions,
    // equations, and anything else that flattens to text.
    let text = item["text"]["content"]
        .as_str()
        .or_else(|| item["plain_text"].as_str())
        .unwrap_or_default()
        .to_string();

    let ann = &item["annotations"];
    let annotations = Annotations {
        bold: ann["bold"].as_bool().unwrap_or(false),
        italic: ann["italic"].as_bool().unwrap_or(false),
        strikethrough: ann["strikethrough"].as_bool().unwrap_or(false),
        underline: ann["underline"].as_bool().unwrap_or(false),
        code: ann["code"].as_bool().unwrap_or(false),
    };

    let link = item["text"]["link"]["url"]
        .as_str()
        .or_else(|| item["href"].as_str())
        .and_then(|href| ValidatedUrl::parse(href).ok());

    RichTextRun {
        text,
        annotations,
        link,
    }
}

async fn media(
    common: BlockCommon,
    payload: &Value,
    type_tag: &str,
    ctx: &SimplifyContext<'_>,
) -> MediaBlock {
    let caption = runs_from(&payload["caption"]);
    let mut file = file_info_from_object(payload, &caption, type_tag);
    if ctx.process_files {
        ctx.resolver.resolve_file_info(&mut file).await;
    }
    MediaBlock {
        common,
        file,
        caption,
    }
}

/// Builds a `FileInfo` from a raw file object, selecting the external or
/// hosted variant the payload carries.
fn file_info_from_object(payload: &Value, caption: &[RichTextRun], fallback: &str) -> FileInfo {
    let (url, kind) = match payload["type"].as_str() {
        Some("external") => (
            payload["external"]["url"].as_str().unwrap_or_default(),
            FileKind::External,
        ),
        _ => (
            payload["file"]["url"].as_str().unwrap_or_default(),
            FileKind::Hosted {
                expiry_time: parse_expiry(&payload["file"]["expiry_time"]),
            },
        ),
    };
    FileInfo {
        name: logical_name(url, caption, fallback),
        url: url.to_string(),
        kind,
    }
}

fn parse_expiry(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Picks the logical file name: caption text, else the URL's last path
/// segment, else the block type tag.
fn logical_name(url: &str, caption: &[RichTextRun], fallback: &str) -> String {
    let caption_text = plain_text(caption);
    if !caption_text.trim().is_empty() {
        return caption_text;
    }
    url.split('?')
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .unwrap_or_else(|| fallback.to_string())
}

/// Walks arbitrary raw JSON and concatenates every `plain_text` field found.
/// `rich_text` arrays are visited before sibling fields so the main content
/// comes first. The graceful-degradation path for unknown block types.
fn salvage_plain_text(value: &Value) -> String {
    fn walk(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(text)) = map.get("plain_text") {
                    out.push(text.clone());
                    return;
                }
                if let Some(runs) = map.get("rich_text") {
                    walk(runs, out);
                }
                for (key, nested) in map.iter() {
                    if key != "rich_text" {
                        walk(nested, out);
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    walk(item, out);
                }
            }
            _ => {}
        }
    }
    let mut pieces = Vec::new();
    walk(value, &mut pieces);
    pieces.concat()
}

/// Extracts `FileInfo`s from a raw file-typed database property value.
///
/// The same raw file-object shape used by content blocks appears inside
/// property values; this is the shared entry point for both (the resulting
/// batch goes through [`FileResolver::resolve_file_infos`]).
pub fn file_infos_from_property(raw: &Value) -> Vec<FileInfo> {
    let Some(files) = raw["files"].as_array() else {
        return Vec::new();
    };
    files
        .iter()
        .map(|file| {
            let mut info = file_info_from_object(file, &[], "file");
            if let Some(name) = file["name"].as_str() {
                if !name.is_empty() {
                    info.name = name.to_string();
                }
            }
            info
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx_direct() -> FileResolver {
        FileResolver::direct()
    }

    fn raw_paragraph(text: &str) -> Value {
        json!({
            "object": "block",
            "id": "11111111-2222-4333-8444-555555555555",
            "type": "paragraph",
            "has_children": false,
            "paragraph": {
                "rich_text": [{
                    "type": "text",
                    "text": {"content": text, "link": null},
                    "annotations": {"bold": false, "italic": false, "strikethrough": false,
                                     "underline": false, "code": false, "color": "default"},
                    "plain_text": text,
                    "href": null
                }],
                "color": "default"
            }
        })
    }

    #[tokio::test]
    async fn paragraph_extracts_rich_text_and_flags() {
        let resolver = ctx_direct();
        let ctx = SimplifyContext::new(&resolver, true);
        let block = simplify(&raw_paragraph("hello"), &ctx).await;
        assert_eq!(block.plain_text(), "hello");
        assert!(!block.has_children());
        assert!(block.children().is_none());
    }

    #[tokio::test]
    async fn annotations_and_links_survive_extraction() {
        let raw = json!({
            "id": "x", "type": "paragraph", "has_children": false,
            "paragraph": {"rich_text": [{
                "type": "text",
                "text": {"content": "docs", "link": {"url": "https://example.com/docs"}},
                "annotations": {"bold": true, "code": true},
                "plain_text": "docs"
            }]}
        });
        let resolver = ctx_direct();
        let ctx = SimplifyContext::new(&resolver, true);
        let block = simplify(&raw, &ctx).await;
        let runs = block.rich_text().unwrap();
        assert!(runs[0].annotations.bold);
        assert!(runs[0].annotations.code);
        assert_eq!(runs[0].link.as_ref().unwrap().as_str(), "https://example.com/docs");
    }

    #[tokio::test]
    async fn hosted_image_carries_expiry_and_name_from_url() {
        let raw = json!({
            "id": "img1", "type": "image", "has_children": false,
            "image": {
                "type": "file",
                "file": {
                    "url": "https://files.example.com/abc/chart.png?sig=1",
                    "expiry_time": "2030-01-01T00:00:00.000Z"
                },
                "caption": []
            }
        });
        let resolver = ctx_direct();
        let ctx = SimplifyContext::new(&resolver, true);
        let block = simplify(&raw, &ctx).await;
        match block {
            Block::Image(media) => {
                assert_eq!(media.file.name, "chart.png");
                assert!(matches!(
                    media.file.kind,
                    FileKind::Hosted { expiry_time: Some(_) }
                ));
            }
            other => panic!("expected image, got {:?}", other.block_type()),
        }
    }

    #[tokio::test]
    async fn table_row_cells_stay_index_aligned() {
        let raw = json!({
            "id": "row1", "type": "table_row", "has_children": false,
            "table_row": {"cells": [
                [{"plain_text": "a", "text": {"content": "a"}}],
                [],
                [{"plain_text": "c", "text": {"content": "c"}}]
            ]}
        });
        let resolver = ctx_direct();
        let ctx = SimplifyContext::new(&resolver, true);
        let block = simplify(&raw, &ctx).await;
        match block {
            Block::TableRow(row) => {
                assert_eq!(row.cells.len(), 3);
                assert_eq!(plain_text(&row.cells[0]), "a");
                assert!(row.cells[1].is_empty());
                assert_eq!(plain_text(&row.cells[2]), "c");
            }
            other => panic!("expected table_row, got {:?}", other.block_type()),
        }
    }

    #[tokio::test]
    async fn unknown_type_salvages_nested_plain_text() {
        let raw = json!({
            "id": "odd1", "type": "template_button", "has_children": false,
            "template_button": {
                "rich_text": [{"plain_text": "Press ", "text": {"content": "Press "}},
                               {"plain_text": "me"}],
                "extra": {"nested": [{"plain_text": "!"}]}
            }
        });
        let resolver = ctx_direct();
        let ctx = SimplifyContext::new(&resolver, true);
        let block = simplify(&raw, &ctx).await;
        match &block {
            Block::Unknown(unknown) => {
                assert_eq!(unknown.block_type, "template_button");
                assert_eq!(unknown.text, "Press me!");
            }
            other => panic!("expected unknown, got {:?}", other.block_type()),
        }
    }

    #[tokio::test]
    async fn malformed_run_degrades_to_empty_text() {
        let raw = json!({
            "id": "m1", "type": "paragraph", "has_children": false,
            "paragraph": {"rich_text": [
                {"type": "text"},
                {"plain_text": "ok", "text": {"content": "ok"}}
            ]}
        });
        let resolver = ctx_direct();
        let ctx = SimplifyContext::new(&resolver, true);
        let block = simplify(&raw, &ctx).await;
        assert_eq!(block.plain_text(), "ok");
    }

    #[test]
    fn property_files_share_the_block_extraction() {
        let raw = json!({
            "type": "files",
            "files": [
                {"name": "deck.pdf", "type": "external",
                 "external": {"url": "https://example.com/deck.pdf"}},
                {"name": "photo.png", "type": "file",
                 "file": {"url": "https://files.example.com/p/photo.png",
                           "expiry_time": "2030-01-01T00:00:00.000Z"}}
            ]
        });
        let infos = file_infos_from_property(&raw);
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].name, "deck.pdf");
        assert_eq!(infos[0].kind, FileKind::External);
        assert!(matches!(infos[1].kind, FileKind::Hosted { .. }));
    }
}
