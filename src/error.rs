// src/error.rs
//! Error types with structured failure semantics.
//!
//! Only retrieval failures cross the public API boundary as hard errors.
//! File-resolution failures degrade to warnings, unknown block types degrade
//! to best-effort text, and malformed rich-text runs degrade to empty runs —
//! a legible partial document beats an aborted render.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`, the
/// domain vocabulary is encoded in the type system, enabling pattern-based
/// retry decisions without stringly-typed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// API rate limit exceeded — back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request parameters failed the API's validation
    ValidationFailed,
    /// Remote internal server error
    InternalError,
    /// The service is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl ApiErrorCode {
    /// Parse an API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "validation_error" => Self::ValidationFailed,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        ) || matches!(self, Self::HttpStatus(code) if *code == 429 || *code >= 500)
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main error type for retrieval and conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API returned an error ({code}): {message}")]
    Api { code: ApiErrorCode, message: String },

    /// The only failure that crosses the retrieval boundary as fatal: a
    /// children-listing call failed after retries. Carries the parent block
    /// and the page cursor in flight; the partial subtree is discarded.
    #[error("Listing children of block '{block_id}' failed at cursor {cursor:?}: {source}")]
    Retrieval {
        block_id: String,
        cursor: Option<String>,
        #[source]
        source: Box<ConvertError>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl ConvertError {
    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api { code, .. } => code.is_retryable(),
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::MalformedResponse(err.to_string())
    }
}

impl From<anyhow::Error> for ConvertError {
    fn from(err: anyhow::Error) -> Self {
        ConvertError::Internal {
            message: err.to_string(),
            source: None,
        }
    }
}

/// Failure inside a non-pass-through file-resolution strategy.
///
/// Never fatal to callers: the resolver logs one structured warning and the
/// original URL is substituted.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Strategy is missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Downloading {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download of {url} returned HTTP {status}")]
    DownloadStatus { url: String, status: u16 },

    #[error("Local store IO error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Object store request failed: {0}")]
    StoreTransport(#[from] reqwest::Error),

    #[error("Object store returned HTTP {status} for {object}")]
    StoreStatus { object: String, status: u16 },
}

/// Result type alias for convenience
pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
