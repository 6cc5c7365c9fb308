//! Catalog API client
//!
//! `CatalogSource` is the boundary to the remote catalog: a paginated list
//! endpoint and a per-item detail endpoint, both read-only. The loader and
//! resolver only ever talk to this trait; `HttpCatalogClient` is the
//! production implementation.

use super::types::{DetailResponse, IndexEntry, IndexPage};
use crate::config::CatalogConfig;
use crate::error::FetchError;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the first page of the index
    async fn fetch_index(&self, limit: usize) -> Result<Vec<IndexEntry>, FetchError>;

    /// Fetch one detail document by the locator an index entry carries
    async fn fetch_detail(&self, url: &str) -> Result<DetailResponse, FetchError>;

    /// Fetch one detail document by record id (detail view)
    async fn fetch_detail_by_id(&self, id: i64) -> Result<DetailResponse, FetchError>;
}

/// reqwest-backed catalog client. One attempt per request, no timeout.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: Client,
    api_base: Url,
}

impl HttpCatalogClient {
    pub fn new(api_base: Url) -> anyhow::Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http, api_base })
    }

    pub fn from_config(config: &CatalogConfig) -> anyhow::Result<Self> {
        Self::new(config.api_base.clone())
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.api_base
            .join(path)
            .map_err(|source| FetchError::InvalidUrl {
                url: format!("{}{}", self.api_base, path),
                source,
            })
    }

    fn index_url(&self, limit: usize) -> Result<Url, FetchError> {
        let mut url = self.endpoint("pokemon")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// GET and decode a JSON body, classifying every failure
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        serde_json::from_str(&body).map_err(|e| FetchError::parse(url, e))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_index(&self, limit: usize) -> Result<Vec<IndexEntry>, FetchError> {
        let url = self.index_url(limit)?;
        let page: IndexPage = self.get_json(url.as_str()).await?;
        Ok(page.results)
    }

    async fn fetch_detail(&self, url: &str) -> Result<DetailResponse, FetchError> {
        let url = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        self.get_json(url.as_str()).await
    }

    async fn fetch_detail_by_id(&self, id: i64) -> Result<DetailResponse, FetchError> {
        let url = self.endpoint(&format!("pokemon/{}", id))?;
        self.get_json(url.as_str()).await
    }
}
