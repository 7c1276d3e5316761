// src/files/remote.rs
//! Remote object-store caching strategy.
//!
//! Speaks a generic S3-compatible path layout over plain HTTP:
//! `HEAD {endpoint}/{bucket}/{prefix}{key}` to probe for an entry and
//! `PUT` to create one, with basic-auth credentials when configured.
//! The object URL doubles as the public URL the converter embeds.

use super::download::Downloader;
use super::keys::object_name;
use super::ResolveStrategy;
use crate::error::ResolveError;
use async_trait::async_trait;
use std::sync::Arc;

pub struct RemoteStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    prefix: String,
    access_key: Option<String>,
    secret_key: Option<String>,
    downloader: Arc<dyn Downloader>,
}

impl RemoteStore {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        prefix: Option<String>,
        access_key: Option<String>,
        secret_key: Option<String>,
        downloader: Arc<dyn Downloader>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            prefix: prefix.unwrap_or_default(),
            access_key,
            secret_key,
            downloader,
        }
    }

    fn object_url(&self, name: &str) -> String {
        format!(
            "{}/{}/{}{}",
            self.endpoint.trim_end_matches('/'),
            self.bucket,
            self.prefix,
            name
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_key {
            Some(access) => request.basic_auth(access, self.secret_key.as_deref()),
            None => request,
        }
    }

    async fn object_exists(&self, object: &str) -> Result<bool, ResolveError> {
        let response = self.authorized(self.client.head(object)).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Err(ResolveError::StoreStatus {
            object: object.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ResolveStrategy for RemoteStore {
    async fn resolve(&self, url: &str, logical_name: &str) -> Result<String, ResolveError> {
        let name = object_name(url, logical_name);
        let object = self.object_url(&name);

        if self.object_exists(&object).await? {
            log::debug!("Remote store hit for {}", name);
            return Ok(object);
        }

        let bytes = self.downloader.fetch(url).await?;
        let response = self
            .authorized(self.client.put(&object).body(bytes))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::StoreStatus {
                object,
                status: status.as_u16(),
            });
        }

        log::debug!("Uploaded {} to the object store", name);
        Ok(object)
    }
}
