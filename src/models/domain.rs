use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use validator::Validate;

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Great-circle distance to `other` in kilometers
    #[inline]
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        crate::core::distance::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Bookable details of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EventDetails {
    #[validate(range(min = 0.0))]
    pub cost: f64,
    #[serde(rename = "partySize")]
    pub party_size: u32,
    #[serde(default, deserialize_with = "deserialize_categories")]
    pub categories: BTreeSet<String>,
    pub region: GeoPoint,
}

/// Event record as served to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_attendees")]
    pub attendees: Vec<Value>,
    pub details: EventDetails,
}

impl Event {
    /// Seats still free; negative when the event is overbooked
    #[inline]
    pub fn available_capacity(&self) -> i64 {
        i64::from(self.details.party_size) - self.attendees.len() as i64
    }

    #[inline]
    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }
}

/// Event record as stored, keyed externally by its store key
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StoredEvent {
    #[serde(default, deserialize_with = "deserialize_attendees")]
    pub attendees: Vec<Value>,
    pub details: EventDetails,
}

impl StoredEvent {
    pub(crate) fn into_event(self, id: String) -> Event {
        Event {
            id,
            attendees: self.attendees,
            details: self.details,
        }
    }
}

/// Event annotated with its distance from the searching user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEvent {
    #[serde(flatten)]
    pub event: Event,
    /// Kilometers from the user location, absent when the search had none
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// Ordering applied to search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortStrategy {
    #[default]
    ByDistance,
    ByCost,
}

/// Search criteria for one request; `None` means the filter is not applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub party_size: Option<u32>,
    pub max_cost: Option<f64>,
    pub categories: Option<BTreeSet<String>>,
    pub max_distance_km: Option<f64>,
    pub user_location: Option<GeoPoint>,
    pub sort: SortStrategy,
    pub descending: bool,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Realtime databases persist lists as arrays or as push-key objects.
fn deserialize_attendees<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(Value::Object(entries)) => Ok(entries.into_iter().map(|(_, v)| v).collect()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "attendees must be a list or an object, got {}",
            other
        ))),
    }
}

fn deserialize_categories<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(BTreeSet::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(serde::de::Error::custom(format!(
                    "category must be a string, got {}",
                    other
                ))),
            })
            .collect(),
        // { "music": true, "outdoor": false }
        Some(Value::Object(entries)) => Ok(entries
            .into_iter()
            .filter(|(_, flag)| flag.as_bool().unwrap_or(false))
            .map(|(name, _)| name)
            .collect()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "categories must be a list or an object, got {}",
            other
        ))),
    }
}
