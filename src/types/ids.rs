// src/types/ids.rs
//! Strongly-typed identifiers with phantom markers.
//!
//! Block and page IDs are both UUID-shaped strings on the wire, but mixing
//! them up is a real bug class. Phantom types make the mix-up a compile
//! error while sharing one normalization path.

use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMarker;

pub type PageId = Id<PageMarker>;
pub type BlockId = Id<BlockMarker>;

/// A UUID embedded in an ID string or Notion URL, dashed or compact.
static EMBEDDED_UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9a-fA-F]{8})-?([0-9a-fA-F]{4})-?([0-9a-fA-F]{4})-?([0-9a-fA-F]{4})-?([0-9a-fA-F]{12})")
        .expect("embedded UUID pattern is valid")
});

impl<T> Id<T> {
    /// Parses an ID from any of its common spellings: a compact or dashed
    /// UUID, or a Notion URL with the UUID embedded at the end.
    ///
    /// IDs without a recognizable UUID are kept verbatim — the identifier is
    /// opaque to this crate, so an unfamiliar shape is not an error as long
    /// as it is non-empty.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::InvalidId("empty ID".to_string()));
        }
        let normalized = match EMBEDDED_UUID.captures_iter(input).last() {
            Some(caps) => format!(
                "{}{}{}{}{}",
                &caps[1], &caps[2], &caps[3], &caps[4], &caps[5]
            )
            .to_lowercase(),
            None if input.starts_with("http://") || input.starts_with("https://") => {
                return Err(ValidationError::InvalidId(format!(
                    "URL contains no object ID: {}",
                    input
                )))
            }
            None => input.to_string(),
        };
        Ok(Self::from_normalized(normalized))
    }

    pub(crate) fn from_normalized(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Creates a new random v4 UUID ID.
    pub fn new_v4() -> Self {
        Self::from_normalized(Uuid::new_v4().as_simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The ID with dashes restored, as the API expects in request paths.
    pub fn to_dashed(&self) -> String {
        if self.value.len() == 32 && self.value.chars().all(|c| c.is_ascii_hexdigit()) {
            format!(
                "{}-{}-{}-{}-{}",
                &self.value[0..8],
                &self.value[8..12],
                &self.value[12..16],
                &self.value[16..20],
                &self.value[20..32]
            )
        } else {
            self.value.clone()
        }
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::from_normalized(String::deserialize(deserializer)?))
    }
}

/// Notion integration token. Never logged or displayed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "key is empty".to_string(),
            });
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dashed_and_compact_uuids_to_one_form() {
        let dashed = BlockId::parse("12345678-1234-1234-1234-123456789abc").unwrap();
        let compact = BlockId::parse("12345678123412341234123456789abc").unwrap();
        assert_eq!(dashed, compact);
        assert_eq!(dashed.as_str(), "12345678123412341234123456789abc");
    }

    #[test]
    fn extracts_id_from_notion_url() {
        let id =
            PageId::parse("https://www.notion.so/acme/My-Page-12345678123412341234123456789abc")
                .unwrap();
        assert_eq!(id.as_str(), "12345678123412341234123456789abc");
    }

    #[test]
    fn keeps_opaque_ids_verbatim() {
        let id = BlockId::parse("local-fixture-1").unwrap();
        assert_eq!(id.as_str(), "local-fixture-1");
        assert_eq!(id.to_dashed(), "local-fixture-1");
    }

    #[test]
    fn rejects_empty_and_idless_urls() {
        assert!(BlockId::parse("   ").is_err());
        assert!(BlockId::parse("https://www.notion.so/acme").is_err());
    }

    #[test]
    fn dashed_form_round_trips() {
        let id = BlockId::parse("12345678123412341234123456789abc").unwrap();
        assert_eq!(id.to_dashed(), "12345678-1234-1234-1234-123456789abc");
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("secret_abc123").unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }
}
