use std::cmp::Ordering;
use crate::models::{Event, GeoPoint, RankedEvent, SortStrategy};

/// Attach the distance from `origin` to every event
///
/// Events pass through in their input order; without an origin the
/// distance stays `None`.
pub fn annotate_distances(events: Vec<Event>, origin: Option<&GeoPoint>) -> Vec<RankedEvent> {
    events
        .into_iter()
        .map(|event| {
            let distance_km = origin.map(|o| event.details.region.distance_to(o));
            RankedEvent { event, distance_km }
        })
        .collect()
}

/// Ascending comparison for a strategy
///
/// A missing distance sorts after every known one.
#[inline]
pub fn compare(a: &RankedEvent, b: &RankedEvent, strategy: SortStrategy) -> Ordering {
    match strategy {
        SortStrategy::ByDistance => a
            .distance_km
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY)),
        SortStrategy::ByCost => a.event.details.cost.total_cmp(&b.event.details.cost),
    }
}

/// Stable sort by `strategy`, reversed afterwards when `descending`
///
/// Descending order is the exact reverse of the ascending one, ties included.
pub fn sort_ranked(mut events: Vec<RankedEvent>, strategy: SortStrategy, descending: bool) -> Vec<RankedEvent> {
    events.sort_by(|a, b| compare(a, b, strategy));

    if descending {
        events.reverse();
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDetails;
    use std::collections::BTreeSet;

    fn create_event(id: &str, cost: f64, lat: f64, lon: f64) -> Event {
        Event {
            id: id.to_string(),
            attendees: vec![],
            details: EventDetails {
                cost,
                party_size: 4,
                categories: BTreeSet::new(),
                region: GeoPoint::new(lat, lon),
            },
        }
    }

    fn ids(events: &[RankedEvent]) -> Vec<&str> {
        events.iter().map(|e| e.event.id.as_str()).collect()
    }

    #[test]
    fn test_annotation_leaves_order_and_events_intact() {
        let origin = GeoPoint::new(0.0, 0.0);
        let events = vec![create_event("far", 1.0, 1.0, 1.0), create_event("here", 1.0, 0.0, 0.0)];

        let ranked = annotate_distances(events.clone(), Some(&origin));

        assert_eq!(ids(&ranked), vec!["far", "here"]);
        assert_eq!(ranked[1].distance_km, Some(0.0));
        assert_eq!(ranked[0].event, events[0]);
    }

    #[test]
    fn test_annotation_without_origin() {
        let ranked = annotate_distances(vec![create_event("a", 1.0, 0.0, 0.0)], None);
        assert_eq!(ranked[0].distance_km, None);
    }

    #[test]
    fn test_sort_by_distance_nearest_first() {
        let origin = GeoPoint::new(0.0, 0.0);
        let ranked = annotate_distances(
            vec![
                create_event("b", 1.0, 0.2, 0.0),
                create_event("c", 1.0, 0.3, 0.0),
                create_event("a", 1.0, 0.1, 0.0),
            ],
            Some(&origin),
        );

        let sorted = sort_ranked(ranked, SortStrategy::ByDistance, false);
        assert_eq!(ids(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_cost_is_stable() {
        let ranked = annotate_distances(
            vec![
                create_event("x1", 10.0, 0.0, 0.0),
                create_event("y", 5.0, 0.0, 0.0),
                create_event("x2", 10.0, 0.0, 0.0),
                create_event("x3", 10.0, 0.0, 0.0),
            ],
            None,
        );

        let sorted = sort_ranked(ranked, SortStrategy::ByCost, false);
        assert_eq!(ids(&sorted), vec!["y", "x1", "x2", "x3"]);
    }

    #[test]
    fn test_descending_is_reverse_of_ascending() {
        let events = vec![
            create_event("a", 3.0, 0.0, 0.0),
            create_event("b", 1.0, 0.0, 0.0),
            create_event("c", 3.0, 0.0, 0.0),
            create_event("d", 2.0, 0.0, 0.0),
        ];

        let mut ascending = sort_ranked(annotate_distances(events.clone(), None), SortStrategy::ByCost, false);
        ascending.reverse();
        let descending = sort_ranked(annotate_distances(events, None), SortStrategy::ByCost, true);

        assert_eq!(ascending, descending);
    }
}
