// src/api/client.rs
//! Thin HTTP client for the Notion block-listing endpoint.
//!
//! Handles authentication and request/response plumbing without business
//! logic. Error bodies are mapped into the typed `ApiErrorCode` vocabulary.

use super::{BlockSource, ChildrenPage};
use crate::constants::API_PAGE_SIZE;
use crate::error::{ApiErrorCode, ConvertError};
use crate::types::{ApiKey, BlockId};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around a reqwest `Client` with Notion API headers baked in.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ListChildrenResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, ConvertError> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Creates a client against a non-default base URL (test servers,
    /// proxies).
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, ConvertError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, ConvertError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                ConvertError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn parse_error(status: StatusCode, body: String, url: &str) -> ConvertError {
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => ConvertError::Api {
                code: ApiErrorCode::from_api_response(&parsed.code),
                message: parsed.message,
            },
            Err(_) => ConvertError::Api {
                code: ApiErrorCode::from_http_status(status.as_u16()),
                message: format!("HTTP {} from {}", status, url),
            },
        }
    }
}

#[async_trait::async_trait]
impl BlockSource for NotionHttpClient {
    async fn list_children(
        &self,
        block_id: &BlockId,
        cursor: Option<String>,
    ) -> Result<ChildrenPage, ConvertError> {
        let mut url = format!(
            "{}/blocks/{}/children?page_size={}",
            self.base_url,
            block_id.to_dashed(),
            API_PAGE_SIZE
        );
        if let Some(cursor) = &cursor {
            url.push_str("&start_cursor=");
            url.push_str(cursor);
        }

        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::parse_error(status, body, &url));
        }

        let parsed: ListChildrenResponse = serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to parse listing response from {}: {}", url, e);
            ConvertError::MalformedResponse(format!("children listing from {}: {}", url, e))
        })?;

        Ok(ChildrenPage {
            results: parsed.results,
            next_cursor: parsed.next_cursor,
            has_more: parsed.has_more,
        })
    }
}
