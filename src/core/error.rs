use thiserror::Error;
use crate::services::StoreError;

/// Errors returned by the search pipeline
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    #[error("Event store unavailable: {0}")]
    Store(#[from] StoreError),
}

/// Reason a single stored record could not be turned into an event
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid details: {0}")]
    InvalidDetails(#[from] validator::ValidationErrors),
}
