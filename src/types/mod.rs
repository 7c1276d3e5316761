// src/types/mod.rs
//! Domain primitives shared across the crate: typed identifiers, validated
//! URLs, rich-text runs, and file references.

use thiserror::Error;

mod files;
mod ids;
mod rich_text;
mod urls;

pub use files::*;
pub use ids::*;
pub use rich_text::*;
pub use urls::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },
}
