//! WebEvent — a queued notification describing a state change, destined for
//! connected UI clients.
//!
//! Like an actuation [`Event`](crate::event::Event), a `WebEvent` has a
//! single owner: created by a producer, moved through the notification
//! queue, and consumed by the web notifier.

use serde::{Deserialize, Serialize};

use crate::room::RoomId;

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebEventKind {
    SwitchState,
    LightLevel,
    TemperatureReading,
    HumidityReading,
    DesiredTemperature,
    RelayState,
}

/// A single state-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebEvent {
    pub room_id: RoomId,
    pub kind: WebEventKind,
    pub value: i64,
}

impl WebEvent {
    #[must_use]
    pub fn new(room_id: RoomId, kind: WebEventKind, value: i64) -> Self {
        Self {
            room_id,
            kind,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_serde_json() {
        let event = WebEvent::new(RoomId(1), WebEventKind::LightLevel, 77);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: WebEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn should_serialize_kind_in_snake_case() {
        let json = serde_json::to_string(&WebEventKind::TemperatureReading).unwrap();
        assert_eq!(json, "\"temperature_reading\"");
    }
}
