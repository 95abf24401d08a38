//! Room registry — the single source of truth for per-room wiring and
//! last-known values.
//!
//! The registry is a passive store, not an actor: it hands out room handles
//! and status-LED pins, and all mutation happens through direct
//! [`Room::update_state`] writes by the owning poller or handler.

use roomhub_domain::error::{NotFoundError, RoomHubError, ValidationError};
use roomhub_domain::room::{LedRole, OutputPin, Room, RoomId, RoomSnapshot};

/// The fixed system-status outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLeds {
    pub power: OutputPin,
    pub info: OutputPin,
    pub error: OutputPin,
}

impl StatusLeds {
    /// Resolve the output pin for a role.
    #[must_use]
    pub fn get(&self, role: LedRole) -> OutputPin {
        match role {
            LedRole::Power => self.power,
            LedRole::Info => self.info,
            LedRole::Error => self.error,
        }
    }
}

/// Fixed table of rooms, built once at startup.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
    leds: StatusLeds,
}

impl RoomRegistry {
    /// Build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] when the table is empty or when
    /// a room id does not equal its table index (ids double as indexes for
    /// every lookup).
    pub fn new(rooms: Vec<Room>, leds: StatusLeds) -> Result<Self, RoomHubError> {
        if rooms.is_empty() {
            return Err(ValidationError::EmptyRoomTable.into());
        }
        for (index, room) in rooms.iter().enumerate() {
            if room.id.index() != index {
                return Err(ValidationError::RoomIdMismatch {
                    expected: u8::try_from(index).unwrap_or(u8::MAX),
                    found: room.id.0,
                }
                .into());
            }
        }
        Ok(Self { rooms, leds })
    }

    /// All rooms in stable id order (index = room id).
    #[must_use]
    pub fn get_all(&self) -> &[Room] {
        &self.rooms
    }

    /// Look up one room by id.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::NotFound`] for out-of-range ids.
    pub fn get_by_id(&self, id: RoomId) -> Result<&Room, RoomHubError> {
        self.rooms.get(id.index()).ok_or_else(|| {
            NotFoundError {
                entity: "Room",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Resolve a system-status output by role, independent of rooms.
    #[must_use]
    pub fn get_led_by_id(&self, role: LedRole) -> OutputPin {
        self.leds.get(role)
    }

    /// Serializable copies of every room, in id order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<RoomSnapshot> {
        self.rooms.iter().map(Room::snapshot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomhub_domain::room::{InputPin, PwmChannel};

    fn leds() -> StatusLeds {
        StatusLeds {
            power: OutputPin(0),
            info: OutputPin(1),
            error: OutputPin(2),
        }
    }

    fn room(id: u8, name: &str) -> Room {
        Room::builder()
            .id(RoomId(id))
            .name(name)
            .light_switch(InputPin(10 + id))
            .dimmable_output(PwmChannel {
                channel: id,
                period: 20_000,
            })
            .build()
            .unwrap()
    }

    #[test]
    fn should_keep_rooms_in_id_order() {
        let registry =
            RoomRegistry::new(vec![room(0, "Living Room"), room(1, "Kitchen")], leds()).unwrap();

        let all = registry.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, RoomId(0));
        assert_eq!(all[1].id, RoomId(1));
    }

    #[test]
    fn should_reject_empty_room_table() {
        let result = RoomRegistry::new(vec![], leds());
        assert!(matches!(
            result,
            Err(RoomHubError::Validation(ValidationError::EmptyRoomTable))
        ));
    }

    #[test]
    fn should_reject_id_not_matching_index() {
        let result = RoomRegistry::new(vec![room(1, "Living Room")], leds());
        assert!(matches!(
            result,
            Err(RoomHubError::Validation(
                ValidationError::RoomIdMismatch {
                    expected: 0,
                    found: 1,
                }
            ))
        ));
    }

    #[test]
    fn should_find_room_by_id() {
        let registry =
            RoomRegistry::new(vec![room(0, "Living Room"), room(1, "Kitchen")], leds()).unwrap();

        let found = registry.get_by_id(RoomId(1)).unwrap();
        assert_eq!(found.name, "Kitchen");
    }

    #[test]
    fn should_return_not_found_for_out_of_range_id() {
        let registry = RoomRegistry::new(vec![room(0, "Living Room")], leds()).unwrap();
        let result = registry.get_by_id(RoomId(9));
        assert!(matches!(result, Err(RoomHubError::NotFound(_))));
    }

    #[test]
    fn should_resolve_status_leds_by_role() {
        let registry = RoomRegistry::new(vec![room(0, "Living Room")], leds()).unwrap();
        assert_eq!(registry.get_led_by_id(LedRole::Power), OutputPin(0));
        assert_eq!(registry.get_led_by_id(LedRole::Info), OutputPin(1));
        assert_eq!(registry.get_led_by_id(LedRole::Error), OutputPin(2));
    }

    #[test]
    fn should_snapshot_rooms_in_id_order() {
        let registry =
            RoomRegistry::new(vec![room(0, "Living Room"), room(1, "Kitchen")], leds()).unwrap();

        let snapshots = registry.snapshots();
        assert_eq!(snapshots[0].name, "Living Room");
        assert_eq!(snapshots[1].name, "Kitchen");
    }
}
