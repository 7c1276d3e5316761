// src/files/direct.rs

use super::ResolveStrategy;
use crate::error::ResolveError;
use async_trait::async_trait;

/// The default strategy: return the source URL unchanged.
///
/// Performs no network or filesystem work, so zero configuration has no
/// side effects beyond the original retrieval.
pub struct PassThrough;

#[async_trait]
impl ResolveStrategy for PassThrough {
    async fn resolve(&self, url: &str, _logical_name: &str) -> Result<String, ResolveError> {
        Ok(url.to_string())
    }

    fn is_pass_through(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_url_verbatim() {
        let url = "https://example.com/a.png?sig=1";
        let resolved = PassThrough.resolve(url, "a.png").await.unwrap();
        assert_eq!(resolved, url);
    }
}
