//! Event Finder - search service for the event discovery app
//!
//! This library provides the event search pipeline: events fetched from the
//! event store are filtered by party size, cost, category and distance, then
//! ranked by distance or cost.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{filter_and_sort, haversine_distance, SearchEngine, SearchError, SearchResult};
pub use models::{Event, EventDetails, GeoPoint, RankedEvent, SearchCriteria, SortStrategy};
pub use services::{EventStore, StoreError};
