use crate::core::error::SearchError;
use crate::core::filters::{matches_categories, matches_cost, matches_party_size, DistanceFilter};
use crate::core::sorting::{annotate_distances, sort_ranked};
use crate::models::{Event, RankedEvent, SearchCriteria, SortStrategy};

impl SearchCriteria {
    /// Reject criteria the pipeline cannot evaluate meaningfully
    ///
    /// Bounds that no event can meet, such as a negative max cost, are
    /// valid and simply produce an empty result.
    pub fn validate(&self) -> Result<(), SearchError> {
        if let Some(cost) = self.max_cost {
            if !cost.is_finite() {
                return Err(SearchError::InvalidCriteria(format!(
                    "max cost must be a finite number, got {}",
                    cost
                )));
            }
        }

        if let Some(distance) = self.max_distance_km {
            if !distance.is_finite() {
                return Err(SearchError::InvalidCriteria(format!(
                    "max distance must be a finite number, got {}",
                    distance
                )));
            }
            if self.user_location.is_none() {
                return Err(SearchError::InvalidCriteria(
                    "distance filter requires a user location".to_string(),
                ));
            }
        }

        if self.sort == SortStrategy::ByDistance && self.user_location.is_none() {
            return Err(SearchError::InvalidCriteria(
                "sorting by distance requires a user location".to_string(),
            ));
        }

        if let Some(location) = &self.user_location {
            if !location.is_finite() {
                return Err(SearchError::InvalidCriteria(
                    "user location must have finite coordinates".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Apply every set criterion: party size, cost, category, then distance
///
/// Unset criteria are skipped. The source slice is left untouched.
pub fn filter_events(events: &[Event], criteria: &SearchCriteria) -> Result<Vec<Event>, SearchError> {
    criteria.validate()?;

    let distance = match (criteria.max_distance_km, criteria.user_location) {
        (Some(max), Some(origin)) => Some(DistanceFilter::new(origin, max)),
        _ => None,
    };

    let filtered: Vec<Event> = events
        .iter()
        .filter(|event| criteria.party_size.map_or(true, |n| matches_party_size(event, n)))
        .filter(|event| criteria.max_cost.map_or(true, |max| matches_cost(event, max)))
        .filter(|event| {
            criteria
                .categories
                .as_ref()
                .map_or(true, |wanted| matches_categories(event, wanted))
        })
        .filter(|event| distance.as_ref().map_or(true, |f| f.matches(event)))
        .cloned()
        .collect();

    tracing::debug!("Filtered {} events down to {}", events.len(), filtered.len());

    Ok(filtered)
}

/// Annotate events with their distance to the user and order them
pub fn rank_events(events: Vec<Event>, criteria: &SearchCriteria) -> Result<Vec<RankedEvent>, SearchError> {
    criteria.validate()?;

    let ranked = annotate_distances(events, criteria.user_location.as_ref());
    Ok(sort_ranked(ranked, criteria.sort, criteria.descending))
}

/// Filter then rank; the single entry point for in-memory event lists
pub fn filter_and_sort(events: &[Event], criteria: &SearchCriteria) -> Result<Vec<RankedEvent>, SearchError> {
    let filtered = filter_events(events, criteria)?;
    rank_events(filtered, criteria)
}
