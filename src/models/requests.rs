use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;
use crate::models::domain::{GeoPoint, SearchCriteria, SortStrategy};

/// Request to search events
///
/// Every filter field is optional; an absent field disables that filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchEventsRequest {
    #[serde(alias = "party_size", rename = "partySize", default)]
    pub party_size: Option<u32>,
    #[serde(alias = "max_cost", rename = "maxCost", default)]
    pub max_cost: Option<f64>,
    #[serde(default)]
    pub categories: Option<BTreeSet<String>>,
    #[serde(alias = "max_distance_km", rename = "maxDistanceKm", default)]
    pub max_distance_km: Option<f64>,
    #[serde(alias = "user_location", rename = "userLocation", default)]
    pub user_location: Option<GeoPoint>,
    #[serde(default)]
    pub sort: SortStrategy,
    #[serde(default)]
    pub descending: bool,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default)]
    pub offset: usize,
}

impl SearchEventsRequest {
    /// Split the request into pipeline criteria; paging stays with the caller
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            party_size: self.party_size,
            max_cost: self.max_cost,
            categories: self.categories.clone(),
            max_distance_km: self.max_distance_km,
            user_location: self.user_location,
            sort: self.sort,
            descending: self.descending,
        }
    }
}
