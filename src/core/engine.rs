use std::sync::Arc;
use crate::core::error::SearchError;
use crate::core::pipeline::filter_and_sort;
use crate::core::snapshot::decode_snapshot;
use crate::models::{RankedEvent, SearchCriteria};
use crate::services::EventStore;

/// Result of one search
#[derive(Debug)]
pub struct SearchResult {
    pub events: Vec<RankedEvent>,
    /// Records decoded from the store snapshot
    pub total_candidates: usize,
    /// Records dropped as malformed
    pub skipped_records: usize,
}

/// Search orchestrator: fetch, decode, filter, rank
///
/// # Pipeline Stages
/// 1. Criteria validation (before any I/O)
/// 2. Snapshot fetch from the injected store
/// 3. Record decoding, malformed records skipped
/// 4. Filtering: party size, cost, category, distance
/// 5. Distance annotation and ordering
#[derive(Clone)]
pub struct SearchEngine {
    store: Arc<dyn EventStore>,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// Run a search against a fresh snapshot of the store
    ///
    /// Store failures are returned as [`SearchError::Store`]; an empty
    /// result is a successful search.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult, SearchError> {
        criteria.validate()?;

        let snapshot = self.store.fetch_all().await?;
        let decoded = decode_snapshot(&snapshot);
        let total_candidates = decoded.events.len();

        let events = filter_and_sort(&decoded.events, criteria)?;

        tracing::debug!(
            "Search matched {} of {} events ({} skipped)",
            events.len(),
            total_candidates,
            decoded.skipped
        );

        Ok(SearchResult {
            events,
            total_candidates,
            skipped_records: decoded.skipped,
        })
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine").finish_non_exhaustive()
    }
}
