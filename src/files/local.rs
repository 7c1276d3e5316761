// src/files/local.rs
//! Local-disk caching strategy.
//!
//! Assets are stored under `{root}/{key}.{ext}` and served under a
//! locally-rooted public prefix. The store is write-once: an existing entry
//! short-circuits the download entirely.

use super::download::Downloader;
use super::keys::object_name;
use super::ResolveStrategy;
use crate::error::ResolveError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub struct LocalStore {
    root: PathBuf,
    public_prefix: String,
    downloader: Arc<dyn Downloader>,
}

impl LocalStore {
    pub fn new(
        root: PathBuf,
        public_prefix: impl Into<String>,
        downloader: Arc<dyn Downloader>,
    ) -> Self {
        Self {
            root,
            public_prefix: public_prefix.into(),
            downloader,
        }
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), name)
    }
}

#[async_trait]
impl ResolveStrategy for LocalStore {
    async fn resolve(&self, url: &str, logical_name: &str) -> Result<String, ResolveError> {
        let name = object_name(url, logical_name);
        let path = self.root.join(&name);

        if tokio::fs::try_exists(&path).await? {
            log::debug!("Local store hit for {}", name);
            return Ok(self.public_url(&name));
        }

        let bytes = self.downloader.fetch(url).await?;

        tokio::fs::create_dir_all(&self.root).await?;

        // Write to a scratch name, then rename into place. The rename is the
        // atomic create-if-absent step: a concurrent writer that lost the
        // race overwrites the entry with equivalent bytes, never with a
        // half-written file.
        let scratch = self.root.join(format!(".{}.part-{}", name, std::process::id()));
        tokio::fs::write(&scratch, &bytes).await?;
        tokio::fs::rename(&scratch, &path).await?;

        log::debug!("Stored {} byte(s) under {}", bytes.len(), path.display());
        Ok(self.public_url(&name))
    }
}
