// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, Event, EventDetails, GeoPoint, RankedEvent, SearchCriteria, SortStrategy};
pub use requests::SearchEventsRequest;
pub use responses::{ErrorResponse, HealthResponse, SearchEventsResponse};
