use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use thiserror::Error;
use crate::core::snapshot::EventSnapshot;

/// Errors that can occur when reading from the event store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read side of the event database
///
/// One call returns the whole collection as a key-to-record snapshot,
/// shared so cached copies are handed out without cloning.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Arc<EventSnapshot>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Realtime database REST client
///
/// Reads `{base_url}/{collection}.json`, which returns the collection as an
/// object keyed by record key, or `null` when the collection is empty.
pub struct RealtimeDbClient {
    base_url: String,
    collection: String,
    client: Client,
}

impl RealtimeDbClient {
    /// Create a new store client
    pub fn new(base_url: String, collection: String, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            collection,
            client,
        })
    }

    fn collection_url(&self) -> String {
        let path = self
            .collection
            .trim_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!("{}/{}.json", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl EventStore for RealtimeDbClient {
    async fn fetch_all(&self) -> Result<Arc<EventSnapshot>, StoreError> {
        let url = self.collection_url();

        tracing::debug!("Fetching events from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch events: {} - {}", status, body);
            return Err(StoreError::ApiError(format!("Failed to fetch events: {}", status)));
        }

        let json: Value = response.json().await?;

        match json {
            Value::Null => Ok(Arc::default()),
            Value::Object(records) => {
                tracing::debug!("Fetched {} event records", records.len());
                Ok(Arc::new(records))
            }
            other => Err(StoreError::InvalidResponse(format!(
                "Expected an object of events, got {}",
                json_kind(&other)
            ))),
        }
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let response = self
            .client
            .get(self.collection_url())
            .query(&[("shallow", "true")])
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Event store held in memory, for local runs and tests
#[derive(Default)]
pub struct InMemoryEventStore {
    records: RwLock<EventSnapshot>,
}

impl InMemoryEventStore {
    pub fn new(records: EventSnapshot) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Insert or replace the record stored under `key`
    pub fn insert(&self, key: impl Into<String>, record: Value) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), record);
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn fetch_all(&self) -> Result<Arc<EventSnapshot>, StoreError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::new(records.clone()))
    }
}
