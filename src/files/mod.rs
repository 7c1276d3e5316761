// src/files/mod.rs
//! File resolution — turning ephemeral remote asset URLs into stable ones.
//!
//! A strategy selected at construction time decides what "stable" means:
//! pass-through (the default), a local-disk mirror, or a remote object
//! store. Resolution is never fatal: any strategy failure is logged once
//! with context and the original URL is substituted.

mod direct;
mod download;
mod keys;
mod local;
mod remote;

pub use direct::PassThrough;
pub use download::{Downloader, HttpDownloader};
pub use keys::{file_extension, object_name, storage_key};
pub use local::LocalStore;
pub use remote::RemoteStore;

use crate::config::{FileStrategy, FilesConfig};
use crate::constants::RESOLUTION_MEMO_CAPACITY;
use crate::error::{ConvertError, ResolveError};
use crate::types::FileInfo;
use async_trait::async_trait;
use dashmap::DashMap;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// A pluggable policy for turning a source asset URL into a possibly-cached,
/// stable URL.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    async fn resolve(&self, url: &str, logical_name: &str) -> Result<String, ResolveError>;

    /// Pass-through strategies skip the memo and per-key serialization.
    fn is_pass_through(&self) -> bool {
        false
    }
}

/// The file resolver the simplifier depends on.
///
/// Process-wide and keyed by content: the in-memory memo and the durable
/// store both use the URL-derived storage key, never request identity.
/// Concurrent resolutions of one key are serialized so an entry is
/// downloaded at most once.
pub struct FileResolver {
    strategy: Arc<dyn ResolveStrategy>,
    memo: Mutex<LruCache<String, String>>,
    in_flight: DashMap<String, Arc<tokio::sync::Mutex<()>>>,
}

impl FileResolver {
    pub fn new(strategy: Arc<dyn ResolveStrategy>) -> Self {
        Self {
            strategy,
            memo: Mutex::new(LruCache::new(
                NonZeroUsize::new(RESOLUTION_MEMO_CAPACITY).expect("memo capacity is non-zero"),
            )),
            in_flight: DashMap::new(),
        }
    }

    /// The zero-configuration resolver: pass-through.
    pub fn direct() -> Self {
        Self::new(Arc::new(PassThrough))
    }

    /// Builds the strategy the configuration selects.
    pub fn from_config(config: &FilesConfig) -> Result<Self, ConvertError> {
        let strategy: Arc<dyn ResolveStrategy> = match config.strategy {
            FileStrategy::Direct => Arc::new(PassThrough),
            FileStrategy::Local => {
                let root = config.storage.path.clone().ok_or_else(|| {
                    ConvertError::MissingConfiguration(
                        "files.storage.path is required for the local strategy".to_string(),
                    )
                })?;
                let prefix = config
                    .storage
                    .public_prefix
                    .clone()
                    .unwrap_or_else(|| "/files".to_string());
                Arc::new(LocalStore::new(
                    root,
                    prefix,
                    Arc::new(HttpDownloader::new()),
                ))
            }
            FileStrategy::Remote => {
                let endpoint = config.storage.endpoint.clone().ok_or_else(|| {
                    ConvertError::MissingConfiguration(
                        "files.storage.endpoint is required for the remote strategy".to_string(),
                    )
                })?;
                let bucket = config.storage.bucket.clone().ok_or_else(|| {
                    ConvertError::MissingConfiguration(
                        "files.storage.bucket is required for the remote strategy".to_string(),
                    )
                })?;
                Arc::new(RemoteStore::new(
                    endpoint,
                    bucket,
                    config.storage.prefix.clone(),
                    config.storage.access_key.clone(),
                    config.storage.secret_key.clone(),
                    Arc::new(HttpDownloader::new()),
                ))
            }
        };
        Ok(Self::new(strategy))
    }

    /// Resolves one asset URL. Infallible by design: a strategy failure is
    /// logged with its context and the original URL comes back.
    pub async fn resolve(&self, url: &str, logical_name: &str) -> String {
        if self.strategy.is_pass_through() {
            return url.to_string();
        }

        let key = storage_key(url);

        if let Some(resolved) = self.memo.lock().get(&key).cloned() {
            return resolved;
        }

        // Serialize per key so concurrent resolutions of the same asset
        // cannot race to double-download. The guard stays in the map; entries
        // are as numerous as distinct assets, which is small.
        let guard = self
            .in_flight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone();
        let _held = guard.lock().await;

        // A racer may have resolved the key while we waited on the guard.
        if let Some(resolved) = self.memo.lock().get(&key).cloned() {
            return resolved;
        }

        match self.strategy.resolve(url, logical_name).await {
            Ok(resolved) => {
                self.memo.lock().put(key, resolved.clone());
                resolved
            }
            Err(error) => {
                log::warn!(
                    "File resolution failed, keeping source URL (name: {}, url: {}, error: {})",
                    logical_name,
                    url,
                    error
                );
                url.to_string()
            }
        }
    }

    /// Resolves a `FileInfo` in place, replacing its URL.
    pub async fn resolve_file_info(&self, info: &mut FileInfo) {
        info.url = self.resolve(&info.url, &info.name).await;
    }

    /// Resolves a batch of file references, e.g. the files of a file-typed
    /// database property. Shared entry point for blocks and properties.
    pub async fn resolve_file_infos(&self, infos: &mut [FileInfo]) {
        for info in infos.iter_mut() {
            self.resolve_file_info(info).await;
        }
    }
}
