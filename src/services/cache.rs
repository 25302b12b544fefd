use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use crate::core::snapshot::EventSnapshot;
use crate::services::event_store::{EventStore, StoreError};

const SNAPSHOT_KEY: &str = "events:snapshot";

/// Snapshot cache in front of an event store
///
/// Searches arriving within the TTL reuse the last fetched snapshot instead
/// of reading the whole collection again. Failed fetches are not cached.
pub struct CachedEventStore {
    inner: Arc<dyn EventStore>,
    snapshots: moka::future::Cache<String, Arc<EventSnapshot>>,
    ttl_secs: u64,
}

impl CachedEventStore {
    /// Wrap `inner`; `ttl_secs` must be non-zero
    pub fn new(inner: Arc<dyn EventStore>, ttl_secs: u64) -> Self {
        let snapshots = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            inner,
            snapshots,
            ttl_secs,
        }
    }

    /// Drop the cached snapshot so the next fetch reads the store
    pub async fn invalidate(&self) {
        self.snapshots.invalidate(SNAPSHOT_KEY).await;
        tracing::debug!("Invalidated cached event snapshot");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.snapshots.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

#[async_trait]
impl EventStore for CachedEventStore {
    async fn fetch_all(&self) -> Result<Arc<EventSnapshot>, StoreError> {
        // Concurrent misses wait on a single store read
        self.snapshots
            .try_get_with(SNAPSHOT_KEY.to_string(), async {
                tracing::trace!("Snapshot cache miss");
                self.inner.fetch_all().await
            })
            .await
            .map_err(unshare_error)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        self.inner.health_check().await
    }
}

/// Recover an owned error from one shared between waiting searches
///
/// Waiters other than the caller that ran the fetch get a copy; transport
/// errors keep only their message.
fn unshare_error(err: Arc<StoreError>) -> StoreError {
    Arc::try_unwrap(err).unwrap_or_else(|shared| match shared.as_ref() {
        StoreError::ApiError(msg) => StoreError::ApiError(msg.clone()),
        StoreError::InvalidResponse(msg) => StoreError::InvalidResponse(msg.clone()),
        StoreError::RequestError(e) => StoreError::ApiError(format!("Request failed: {}", e)),
    })
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}
