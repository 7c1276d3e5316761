// src/files/keys.rs
//! Deterministic storage keys derived from source URLs.
//!
//! Hosted asset URLs embed a content-identifying UUID token; that token is
//! the preferred key because it survives re-signing of the ephemeral URL.
//! URLs without one fall back to a hash of the full URL string.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

static UUID_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .expect("UUID token pattern is valid")
});

/// Derives the stable storage key for a source URL.
///
/// The key ignores the query string, so a re-signed hosted URL (same path,
/// fresh signature) maps to the same entry.
pub fn storage_key(url: &str) -> String {
    let path = url.split('?').next().unwrap_or(url);
    if let Some(token) = UUID_TOKEN.find(path) {
        return token.as_str().to_lowercase().replace('-', "");
    }
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// File extension taken from the logical name, lowercased.
pub fn file_extension(logical_name: &str) -> Option<String> {
    Path::new(logical_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// The stored object's file name: key plus the logical name's extension.
pub fn object_name(url: &str, logical_name: &str) -> String {
    match file_extension(logical_name) {
        Some(ext) => format!("{}.{}", storage_key(url), ext),
        None => storage_key(url),
    }
}
