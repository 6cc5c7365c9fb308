//! In-memory `CatalogSource` for unit tests

use super::client::CatalogSource;
use super::types::{DetailResponse, IndexEntry};
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

enum Outcome {
    Body(serde_json::Value),
    Status(u16),
}

pub(crate) struct FakeSource {
    index: Result<Vec<IndexEntry>, u16>,
    details: HashMap<String, Outcome>,
    delays: HashMap<String, Duration>,
    limits: Mutex<Vec<usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            index: Ok(Vec::new()),
            details: HashMap::new(),
            delays: HashMap::new(),
            limits: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_index<N: Into<String>>(mut self, entries: Vec<(N, String)>) -> Self {
        self.index = Ok(entries
            .into_iter()
            .map(|(name, url)| IndexEntry {
                name: name.into(),
                url,
            })
            .collect());
        self
    }

    pub fn with_empty_index(mut self) -> Self {
        self.index = Ok(Vec::new());
        self
    }

    pub fn with_index_status(mut self, status: u16) -> Self {
        self.index = Err(status);
        self
    }

    pub fn with_detail(mut self, url: &str, body: serde_json::Value) -> Self {
        self.details.insert(url.to_string(), Outcome::Body(body));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.details.insert(url.to_string(), Outcome::Status(status));
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn requested_limits(&self) -> Vec<usize> {
        self.limits.lock().unwrap().clone()
    }

    /// Highest number of detail requests observed in flight at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn fetch_index(&self, limit: usize) -> Result<Vec<IndexEntry>, FetchError> {
        self.limits.lock().unwrap().push(limit);
        match &self.index {
            Ok(entries) => Ok(entries.iter().take(limit).cloned().collect()),
            Err(status) => Err(FetchError::HttpStatus {
                status: *status,
                url: "http://fake/pokemon".to_string(),
            }),
        }
    }

    async fn fetch_detail(&self, url: &str) -> Result<DetailResponse, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.details.get(url) {
            Some(Outcome::Body(body)) => {
                serde_json::from_value(body.clone()).map_err(|e| FetchError::parse(url, e))
            }
            Some(Outcome::Status(status)) => Err(FetchError::HttpStatus {
                status: *status,
                url: url.to_string(),
            }),
            None => Err(FetchError::transport(url, "connection refused")),
        }
    }

    async fn fetch_detail_by_id(&self, id: i64) -> Result<DetailResponse, FetchError> {
        self.fetch_detail(&format!("http://fake/pokemon/{}/", id)).await
    }
}
