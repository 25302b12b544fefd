use std::collections::BTreeSet;
use crate::core::distance::{calculate_bounding_box, is_within_bounding_box};
use crate::models::{BoundingBox, Event, GeoPoint};

/// Check that an event still has room for `party_size` more attendees
#[inline]
pub fn matches_party_size(event: &Event, party_size: u32) -> bool {
    i64::from(party_size) <= event.available_capacity()
}

/// Check that an event costs at most `max_cost`
#[inline]
pub fn matches_cost(event: &Event, max_cost: f64) -> bool {
    event.details.cost <= max_cost
}

/// Check that an event carries at least one of the requested categories
#[inline]
pub fn matches_categories(event: &Event, categories: &BTreeSet<String>) -> bool {
    // Iterate the smaller side
    if event.details.categories.len() <= categories.len() {
        event.details.categories.iter().any(|c| categories.contains(c))
    } else {
        categories.iter().any(|c| event.details.categories.contains(c))
    }
}

/// Distance predicate with its bounding box computed once per search
#[derive(Debug, Clone, Copy)]
pub struct DistanceFilter {
    origin: GeoPoint,
    max_distance_km: f64,
    /// `None` when the origin longitude lies outside [-180, 180]
    bounding_box: Option<BoundingBox>,
}

#[inline]
fn is_normalized_longitude(longitude: f64) -> bool {
    (-180.0..=180.0).contains(&longitude)
}

impl DistanceFilter {
    pub fn new(origin: GeoPoint, max_distance_km: f64) -> Self {
        let bounding_box = is_normalized_longitude(origin.longitude)
            .then(|| calculate_bounding_box(&origin, max_distance_km));

        Self {
            origin,
            max_distance_km,
            bounding_box,
        }
    }

    #[inline]
    pub fn matches(&self, event: &Event) -> bool {
        let region = &event.details.region;

        // Stage 1: bounding box pre-filter, Stage 2: exact distance
        let in_box = match &self.bounding_box {
            Some(bbox) if is_normalized_longitude(region.longitude) => is_within_bounding_box(region, bbox),
            _ => true,
        };

        in_box && region.distance_to(&self.origin) <= self.max_distance_km
    }
}

/// Check that an event lies within `max_distance_km` of `origin`
#[inline]
pub fn matches_distance(event: &Event, origin: &GeoPoint, max_distance_km: f64) -> bool {
    event.details.region.distance_to(origin) <= max_distance_km
}

/// Keep events with enough free seats for the requested party
pub fn filter_by_party_size(events: &[Event], party_size: u32) -> Vec<Event> {
    events
        .iter()
        .filter(|event| matches_party_size(event, party_size))
        .cloned()
        .collect()
}

/// Keep events costing at most `max_cost`
pub fn filter_by_cost(events: &[Event], max_cost: f64) -> Vec<Event> {
    events
        .iter()
        .filter(|event| matches_cost(event, max_cost))
        .cloned()
        .collect()
}

/// Keep events sharing any category with `categories`
pub fn filter_by_category(events: &[Event], categories: &BTreeSet<String>) -> Vec<Event> {
    events
        .iter()
        .filter(|event| matches_categories(event, categories))
        .cloned()
        .collect()
}

/// Keep events within `max_distance_km` of `origin`
pub fn filter_by_distance(events: &[Event], origin: &GeoPoint, max_distance_km: f64) -> Vec<Event> {
    let filter = DistanceFilter::new(*origin, max_distance_km);

    events
        .iter()
        .filter(|event| filter.matches(event))
        .cloned()
        .collect()
}
