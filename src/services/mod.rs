// Service exports
pub mod cache;
pub mod event_store;

pub use cache::{CachedEventStore, CacheStats};
pub use event_store::{EventStore, InMemoryEventStore, RealtimeDbClient, StoreError};
