// src/types/urls.rs
//! URL newtype that guarantees the wrapped string parsed as an absolute URL.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// An absolute URL that has been validated at the boundary.
///
/// Link hrefs arriving from the API are untrusted strings; wrapping them here
/// means every downstream consumer (formatters, resolvers) can embed them
/// without re-checking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValidatedUrl(String);

impl ValidatedUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        Url::parse(trimmed).map_err(|e| ValidationError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ValidatedUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ValidatedUrl::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        let url = ValidatedUrl::parse("https://example.com/a/b?c=1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a/b?c=1");
    }

    #[test]
    fn rejects_relative_paths() {
        assert!(ValidatedUrl::parse("/just/a/path").is_err());
        assert!(ValidatedUrl::parse("not a url").is_err());
    }
}
