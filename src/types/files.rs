// src/types/files.rs
//! File references extracted from asset-bearing blocks and file-typed
//! database properties.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the asset lives from the API's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileKind {
    /// A user-provided link; stable, never expires.
    External,
    /// Hosted by Notion behind a signed URL that expires.
    Hosted {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expiry_time: Option<DateTime<Utc>>,
    },
}

/// A resolvable reference to a binary asset.
///
/// Created per file/image block or per file-typed property at read time and
/// embedded in the owning block's content; never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Logical name, used to pick a storage extension and for link text.
    pub name: String,
    /// Source URL; replaced in place when the file resolver mirrors it.
    pub url: String,
    pub kind: FileKind,
}

impl FileInfo {
    pub fn external(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            kind: FileKind::External,
        }
    }

    pub fn hosted(
        name: impl Into<String>,
        url: impl Into<String>,
        expiry_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            kind: FileKind::Hosted { expiry_time },
        }
    }
}
