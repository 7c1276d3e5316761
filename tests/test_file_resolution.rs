//! File-resolution strategies against a stub downloader: local-store
//! idempotence, single-download guarantees under concurrency, and the
//! never-fatal fallback.

use async_trait::async_trait;
use notion2markup::{Downloader, FileResolver, LocalStore, ResolveError};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

struct CountingDownloader {
    calls: AtomicUsize,
}

impl CountingDownloader {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Downloader for CountingDownloader {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent resolutions of the same key overlap.
        tokio::task::yield_now().await;
        Ok(b"asset bytes".to_vec())
    }
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("notion2markup-test-{}", Uuid::new_v4()))
}

const HOSTED_URL: &str = "https://files.example.com/secure/12345678-abcd-4ef0-9876-1234567890ab/photo.png?X-Sig=aaa";

#[tokio::test]
async fn local_store_downloads_once_and_serves_the_public_path() {
    let root = scratch_dir();
    let downloader = CountingDownloader::new();
    let resolver = FileResolver::new(Arc::new(LocalStore::new(
        root.clone(),
        "/assets",
        downloader.clone(),
    )));

    let first = resolver.resolve(HOSTED_URL, "photo.png").await;
    assert_eq!(first, "/assets/12345678abcd4ef098761234567890ab.png");
    assert!(root
        .join("12345678abcd4ef098761234567890ab.png")
        .exists());

    // A re-signed URL for the same asset hits the stored entry.
    let resigned = HOSTED_URL.replace("X-Sig=aaa", "X-Sig=bbb");
    let second = resolver.resolve(&resigned, "photo.png").await;
    assert_eq!(second, first);
    assert_eq!(downloader.calls.load(Ordering::SeqCst), 1);

    tokio::fs::remove_dir_all(&root).await.unwrap();
}

#[tokio::test]
async fn existing_entry_short_circuits_a_fresh_resolver() {
    let root = scratch_dir();
    let downloader = CountingDownloader::new();

    {
        let resolver = FileResolver::new(Arc::new(LocalStore::new(
            root.clone(),
            "/assets",
            downloader.clone(),
        )));
        resolver.resolve(HOSTED_URL, "photo.png").await;
    }

    // A new resolver has an empty memo; the on-disk entry still wins.
    let resolver = FileResolver::new(Arc::new(LocalStore::new(
        root.clone(),
        "/assets",
        downloader.clone(),
    )));
    let resolved = resolver.resolve(HOSTED_URL, "photo.png").await;
    assert_eq!(resolved, "/assets/12345678abcd4ef098761234567890ab.png");
    assert_eq!(downloader.calls.load(Ordering::SeqCst), 1);

    tokio::fs::remove_dir_all(&root).await.unwrap();
}

#[tokio::test]
async fn concurrent_resolutions_of_one_asset_download_once() {
    let root = scratch_dir();
    let downloader = CountingDownloader::new();
    let resolver = Arc::new(FileResolver::new(Arc::new(LocalStore::new(
        root.clone(),
        "/assets",
        downloader.clone(),
    ))));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let resolver = resolver.clone();
            tokio::spawn(async move { resolver.resolve(HOSTED_URL, "photo.png").await })
        })
        .collect();

    let mut resolved = Vec::new();
    for task in tasks {
        resolved.push(task.await.unwrap());
    }

    assert!(resolved
        .iter()
        .all(|url| url == "/assets/12345678abcd4ef098761234567890ab.png"));
    assert_eq!(downloader.calls.load(Ordering::SeqCst), 1);

    tokio::fs::remove_dir_all(&root).await.unwrap();
}

struct BrokenDownloader;

#[async_trait]
impl Downloader for BrokenDownloader {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ResolveError> {
        Err(ResolveError::DownloadStatus {
            url: url.to_string(),
            status: 403,
        })
    }
}

#[tokio::test]
async fn download_failure_keeps_the_source_url() {
    let root = scratch_dir();
    let resolver = FileResolver::new(Arc::new(LocalStore::new(
        root,
        "/assets",
        Arc::new(BrokenDownloader),
    )));

    let resolved = resolver.resolve(HOSTED_URL, "photo.png").await;
    assert_eq!(resolved, HOSTED_URL);
}

#[tokio::test]
async fn default_resolver_passes_urls_through() {
    let resolver = FileResolver::direct();
    let resolved = resolver.resolve(HOSTED_URL, "photo.png").await;
    assert_eq!(resolved, HOSTED_URL);
}
