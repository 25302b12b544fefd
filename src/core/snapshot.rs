use serde::Deserialize;
use serde_json::Value;
use validator::Validate;
use crate::core::error::RecordError;
use crate::models::domain::StoredEvent;
use crate::models::Event;

/// Raw store payload: store key to event record
pub type EventSnapshot = serde_json::Map<String, Value>;

/// Events decoded from a snapshot, plus how many records were dropped
#[derive(Debug, Default)]
pub struct DecodedSnapshot {
    pub events: Vec<Event>,
    pub skipped: usize,
}

/// Decode one stored record, attaching its store key as the event id
pub fn decode_record(key: &str, record: &Value) -> Result<Event, RecordError> {
    let stored = StoredEvent::deserialize(record)?;
    stored.details.validate()?;
    Ok(stored.into_event(key.to_string()))
}

/// Decode every record of a snapshot
///
/// Malformed records are logged and skipped; the rest keep store key order.
pub fn decode_snapshot(snapshot: &EventSnapshot) -> DecodedSnapshot {
    let mut decoded = DecodedSnapshot {
        events: Vec::with_capacity(snapshot.len()),
        skipped: 0,
    };

    for (key, record) in snapshot {
        match decode_record(key, record) {
            Ok(event) => decoded.events.push(event),
            Err(e) => {
                tracing::warn!("Skipping event record {}: {}", key, e);
                decoded.skipped += 1;
            }
        }
    }

    tracing::debug!(
        "Decoded {} events ({} skipped)",
        decoded.events.len(),
        decoded.skipped
    );

    decoded
}
