// src/formatting/mod.rs
//! Rendering of simplified block trees into output documents.
//!
//! `traverse` turns a flat sibling slice into render nodes (grouping
//! adjacent list items), `rich_text` composes inline marks per output
//! target, and `markdown`/`html` walk the tree into the final text.

pub mod html;
pub mod markdown;
pub mod rich_text;
pub mod traverse;

pub use html::blocks_to_html;
pub use markdown::blocks_to_markdown;
pub use rich_text::{format_rich_text, FormatTarget};
pub use traverse::{annotate_depth, group_list_items, ListKind, RenderNode};
