use serde::{Deserialize, Serialize};
use crate::models::domain::RankedEvent;

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEventsResponse {
    pub events: Vec<RankedEvent>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "skippedRecords")]
    pub skipped_records: usize,
    #[serde(rename = "nextOffset")]
    pub next_offset: Option<usize>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
