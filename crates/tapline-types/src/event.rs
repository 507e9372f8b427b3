//! Consumption event representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a barrel.
pub type BarrelId = Uuid;

/// Unique identifier for an event (party).
pub type EventId = Uuid;

/// A single recorded drink.
///
/// Events are immutable once created. Spilled drinks still count toward pace
/// computation (they drained barrel volume all the same); the flag only
/// matters for upstream summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionEvent {
    /// Timestamp of the drink (UTC).
    pub timestamp_utc: DateTime<Utc>,
    /// The barrel the drink was poured from, if it was tracked per barrel.
    pub barrel_id: Option<BarrelId>,
    /// The event (party) the drink belongs to.
    pub event_id: EventId,
    /// Whether the drink was spilled rather than consumed.
    #[serde(default)]
    pub spilled: bool,
}

impl ConsumptionEvent {
    /// Creates a new consumption event.
    #[must_use]
    pub const fn new(
        timestamp_utc: DateTime<Utc>,
        barrel_id: Option<BarrelId>,
        event_id: EventId,
        spilled: bool,
    ) -> Self {
        Self {
            timestamp_utc,
            barrel_id,
            event_id,
            spilled,
        }
    }

    /// Returns true if the drink was poured from the given barrel.
    #[must_use]
    pub fn is_from_barrel(&self, barrel_id: BarrelId) -> bool {
        self.barrel_id == Some(barrel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_from_barrel() {
        let barrel = Uuid::new_v4();
        let other = Uuid::new_v4();
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 14, 20, 0, 0).unwrap();
        let event = ConsumptionEvent::new(timestamp, Some(barrel), Uuid::new_v4(), false);

        assert!(event.is_from_barrel(barrel));
        assert!(!event.is_from_barrel(other));
    }

    #[test]
    fn test_untracked_barrel() {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 14, 20, 0, 0).unwrap();
        let event = ConsumptionEvent::new(timestamp, None, Uuid::new_v4(), false);

        assert!(!event.is_from_barrel(Uuid::new_v4()));
    }

    #[test]
    fn test_serde_field_names() {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 14, 20, 0, 0).unwrap();
        let event = ConsumptionEvent::new(timestamp, None, Uuid::new_v4(), true);

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"timestampUtc\""));
        assert!(json.contains("\"barrelId\""));
        assert!(json.contains("\"eventId\""));
        assert!(json.contains("\"spilled\":true"));
    }

    #[test]
    fn test_spilled_defaults_to_false() {
        let json = format!(
            "{{\"timestampUtc\":\"2025-06-14T20:00:00Z\",\"barrelId\":null,\"eventId\":\"{}\"}}",
            Uuid::new_v4()
        );
        let event: ConsumptionEvent = serde_json::from_str(&json).unwrap();

        assert!(!event.spilled);
    }
}
