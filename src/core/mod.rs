// Core algorithm exports
pub mod distance;
pub mod engine;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod snapshot;
pub mod sorting;

pub use distance::{haversine_distance, calculate_bounding_box, is_within_bounding_box};
pub use engine::{SearchEngine, SearchResult};
pub use error::{RecordError, SearchError};
pub use filters::{filter_by_category, filter_by_cost, filter_by_distance, filter_by_party_size};
pub use pipeline::{filter_and_sort, filter_events, rank_events};
pub use snapshot::{decode_snapshot, DecodedSnapshot, EventSnapshot};
pub use sorting::{annotate_distances, sort_ranked};
