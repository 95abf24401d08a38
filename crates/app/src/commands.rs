//! Command ingestion — the single path every user-triggered actuation takes.
//!
//! Handlers validate first and apply second: a command that fails validation
//! performs no state change and enqueues nothing. Accepted light and LED
//! commands travel the same Event/WebEvent route as the pollers, so the one
//! executor applies every actuation the system performs.

use std::sync::Arc;

use roomhub_domain::error::{NotFoundError, RoomHubError};
use roomhub_domain::event::Event;
use roomhub_domain::room::{LedRole, RoomId, RoomSnapshot};
use roomhub_domain::web_event::{WebEvent, WebEventKind};

use crate::ports::WebEventSink;
use crate::queue::QueueSender;
use crate::registry::RoomRegistry;

/// Application service behind the HTTP command surface.
pub struct CommandService<S> {
    registry: Arc<RoomRegistry>,
    actuations: QueueSender<Event>,
    sink: S,
}

impl<S: WebEventSink> CommandService<S> {
    pub fn new(registry: Arc<RoomRegistry>, actuations: QueueSender<Event>, sink: S) -> Self {
        Self {
            registry,
            actuations,
            sink,
        }
    }

    /// Set a system-status LED, routed through the actuation queue like
    /// every other output write.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::NotFound`] for an unknown LED number, or
    /// [`RoomHubError::QueueClosed`] when the executor is gone.
    pub fn set_status_led(&self, led_num: u8, on: bool) -> Result<(), RoomHubError> {
        let Some(role) = LedRole::from_number(led_num) else {
            return Err(NotFoundError {
                entity: "Led",
                id: led_num.to_string(),
            }
            .into());
        };
        let pin = self.registry.get_led_by_id(role);
        self.actuations.send(Event::binary(pin, on))?;
        Ok(())
    }

    /// Set a room's light to an absolute value.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::NotFound`] for an unknown room, or
    /// [`RoomHubError::QueueClosed`] when the executor is gone.
    pub fn set_room_light(&self, room_id: RoomId, value: u32) -> Result<(), RoomHubError> {
        let room = self.registry.get_by_id(room_id)?;
        self.actuations.send(Event::for_light(room, value))?;
        self.sink.notify(WebEvent::new(
            room.id,
            WebEventKind::LightLevel,
            i64::from(value),
        ));
        room.update_state(|state| state.light_value = value);
        Ok(())
    }

    /// Update a room's temperature setpoint. No actuation happens here; the
    /// thermostat poller reacts on its next tick.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::NotFound`] for an unknown room.
    pub fn set_desired_temperature(&self, room_id: RoomId, degrees: i32) -> Result<(), RoomHubError> {
        let room = self.registry.get_by_id(room_id)?;
        room.update_state(|state| state.desired_temperature = degrees);
        self.sink.notify(WebEvent::new(
            room.id,
            WebEventKind::DesiredTemperature,
            i64::from(degrees),
        ));
        Ok(())
    }

    /// Serializable snapshot of every room, in id order.
    #[must_use]
    pub fn room_snapshots(&self) -> Vec<RoomSnapshot> {
        self.registry.snapshots()
    }
}
