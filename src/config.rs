// src/config.rs
//! Configuration surfaces: file-resolution strategy selection, retrieval
//! options, and the command-line input for the thin binary.

use crate::constants::{MAX_FETCH_CONCURRENCY, MAX_FETCH_DEPTH, MIN_FETCH_CONCURRENCY};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// Which file-resolution strategy to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileStrategy {
    /// Pass source URLs through unchanged. The zero-configuration default:
    /// no network side effects beyond the original retrieval.
    #[default]
    Direct,
    /// Mirror assets into a local directory, serving a locally-rooted path.
    Local,
    /// Mirror assets into a remote object store.
    Remote,
}

/// Storage backend settings consumed by the non-direct strategies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Local strategy: directory the mirrored files are written into.
    pub path: Option<PathBuf>,
    /// Local strategy: public URL prefix the stored files are served under.
    pub public_prefix: Option<String>,
    /// Remote strategy: object store endpoint, e.g. `https://store.example.com`.
    pub endpoint: Option<String>,
    /// Remote strategy: bucket name.
    pub bucket: Option<String>,
    /// Remote strategy: optional key prefix inside the bucket.
    pub prefix: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Accepted for endpoint-construction parity with S3-compatible stores;
    /// takes no part in requests.
    pub region: Option<String>,
}

/// File-resolution configuration. `Default` reproduces pass-through.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub strategy: FileStrategy,
    pub storage: StorageConfig,
}

/// Per-request retrieval options.
#[derive(Debug, Clone)]
pub struct RetrieveOptions {
    /// Pass asset URLs through the file resolver during simplification.
    /// A no-op under the default `Direct` strategy.
    pub process_files: bool,
}

impl Default for RetrieveOptions {
    fn default() -> Self {
        Self {
            process_files: true,
        }
    }
}

/// Retriever tuning.
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Sibling-subtree fetch fan-out.
    pub concurrency: usize,
    /// Recursion depth cap.
    pub max_depth: u8,
}

impl RetrieverConfig {
    /// Default fan-out: worker count sized to the host, clamped to the
    /// concurrency boundaries. Workers wait on I/O, so exceeding the core
    /// count is fine.
    pub fn with_default_concurrency() -> Self {
        Self {
            concurrency: num_cpus::get().clamp(MIN_FETCH_CONCURRENCY, MAX_FETCH_CONCURRENCY),
            max_depth: MAX_FETCH_DEPTH,
        }
    }
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self::with_default_concurrency()
    }
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Html,
}

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion page URL or ID (e.g., "https://www.notion.so/...")
    pub notion_input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Output file for the rendered document (defaults to stdout)
    #[arg(short, long)]
    pub output_file: Option<String>,

    /// Do not recurse into child blocks
    #[arg(long, default_value_t = false)]
    pub no_recursive: bool,

    /// Skip file-URL resolution even when a caching strategy is configured
    #[arg(long, default_value_t = false)]
    pub no_files: bool,

    /// File-resolution strategy
    #[arg(long, value_enum, default_value_t = FileStrategy::Direct)]
    pub files: FileStrategy,

    /// Local strategy: directory to mirror assets into
    #[arg(long)]
    pub files_path: Option<PathBuf>,

    /// Local strategy: public URL prefix for mirrored assets
    #[arg(long)]
    pub files_prefix: Option<String>,

    /// Remote strategy: object store endpoint
    #[arg(long)]
    pub store_endpoint: Option<String>,

    /// Remote strategy: bucket name
    #[arg(long)]
    pub store_bucket: Option<String>,

    /// Remote strategy: key prefix inside the bucket
    #[arg(long)]
    pub store_prefix: Option<String>,

    /// Number of concurrent fetch workers (default: auto)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CommandLineInput {
    /// Assembles the file-resolution config from the CLI flags. Credentials
    /// come from the environment, never from argv.
    pub fn files_config(&self) -> FilesConfig {
        FilesConfig {
            strategy: self.files,
            storage: StorageConfig {
                path: self.files_path.clone(),
                public_prefix: self.files_prefix.clone(),
                endpoint: self.store_endpoint.clone(),
                bucket: self.store_bucket.clone(),
                prefix: self.store_prefix.clone(),
                access_key: std::env::var("NOTION2MARKUP_STORE_ACCESS_KEY").ok(),
                secret_key: std::env::var("NOTION2MARKUP_STORE_SECRET_KEY").ok(),
                region: std::env::var("NOTION2MARKUP_STORE_REGION").ok(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_files_config_is_pass_through() {
        let cfg = FilesConfig::default();
        assert_eq!(cfg.strategy, FileStrategy::Direct);
        assert!(cfg.storage.path.is_none());
    }

    #[test]
    fn files_config_deserializes_strategy_names() {
        let cfg: FilesConfig =
            serde_json::from_str(r#"{"strategy": "local", "storage": {"path": "/tmp/assets"}}"#)
                .unwrap();
        assert_eq!(cfg.strategy, FileStrategy::Local);
        assert_eq!(cfg.storage.path.unwrap(), PathBuf::from("/tmp/assets"));
    }

    #[test]
    fn retriever_concurrency_stays_within_bounds() {
        let cfg = RetrieverConfig::default();
        assert!(cfg.concurrency >= MIN_FETCH_CONCURRENCY);
        assert!(cfg.concurrency <= MAX_FETCH_CONCURRENCY);
    }
}
