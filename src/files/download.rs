// src/files/download.rs
//! The ability to fetch an asset's bytes from its source URL.
//!
//! Strategies depend on this seam, never on HTTP details, so tests can
//! substitute a scripted downloader and count invocations.

use crate::error::ResolveError;
use async_trait::async_trait;

#[async_trait]
pub trait Downloader: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ResolveError>;
}

/// Production downloader backed by reqwest.
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ResolveError> {
        log::debug!("Downloading asset from {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ResolveError::Download {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::DownloadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ResolveError::Download {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }
}
