// src/types/rich_text.rs
//! Rich-text runs: contiguous spans of text sharing one annotation set.

use super::ValidatedUrl;
use serde::{Deserialize, Serialize};

/// Inline formatting marks carried by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

impl Annotations {
    /// Whether any mark is set at all.
    pub fn any(&self) -> bool {
        self.bold || self.italic || self.strikethrough || self.underline || self.code
    }
}

/// One contiguous span of text with one annotation set and an optional link.
///
/// Invariant: concatenating `text` across a block's runs yields the block's
/// flattened plain text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RichTextRun {
    pub text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<ValidatedUrl>,
}

impl RichTextRun {
    /// A run with no marks and no link.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Concatenates the plain text of a run sequence.
pub fn plain_text(runs: &[RichTextRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
