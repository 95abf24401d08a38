//! Switch/light poller — edge-triggered sampling of each room's light
//! switch.
//!
//! Each tick samples every room sequentially. A room only produces work when
//! the sampled switch level differs from the recorded one (edge-triggered,
//! not level-triggered), so a steady switch never floods the queue. One edge
//! yields exactly one actuation [`Event`] plus one mirrored
//! [`WebEvent`] of kind [`WebEventKind::LightLevel`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use roomhub_domain::error::DeviceError;
use roomhub_domain::event::Event;
use roomhub_domain::room::{LightOutput, Room};
use roomhub_domain::web_event::{WebEvent, WebEventKind};

use crate::ports::{SwitchInput, WebEventSink};
use crate::queue::QueueSender;
use crate::registry::RoomRegistry;

/// Periodic task turning switch edges into light actuation events.
pub struct SwitchPoller<I, S> {
    registry: Arc<RoomRegistry>,
    input: I,
    actuations: QueueSender<Event>,
    sink: S,
    interval: Duration,
}

impl<I: SwitchInput, S: WebEventSink> SwitchPoller<I, S> {
    pub fn new(
        registry: Arc<RoomRegistry>,
        input: I,
        actuations: QueueSender<Event>,
        sink: S,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            input,
            actuations,
            sink,
            interval,
        }
    }

    /// Run for the process lifetime, polling all rooms every tick.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            self.poll_once();
        }
    }

    /// One sequential pass over every room.
    pub fn poll_once(&self) {
        for room in self.registry.get_all() {
            if let Err(err) = self.poll_room(room) {
                warn!(room = %room.id, error = %err, "switch poll failed, keeping last state");
            }
        }
    }

    fn poll_room(&self, room: &Room) -> Result<(), DeviceError> {
        let pressed = self.input.read_digital(room.light_switch)?;
        if pressed == room.state().switch_on {
            return Ok(());
        }

        let value = light_value(room, pressed);
        if let Err(err) = self.actuations.send(Event::for_light(room, value)) {
            warn!(room = %room.id, error = %err, "light event dropped");
            return Ok(());
        }
        self.sink.notify(WebEvent::new(
            room.id,
            WebEventKind::LightLevel,
            i64::from(value),
        ));
        room.update_state(|state| {
            state.switch_on = pressed;
            state.light_value = value;
        });
        debug!(room = %room.id, on = pressed, value, "switch edge");
        Ok(())
    }
}

/// Commanded light value for a switch position.
///
/// Dimmable outputs get a fixed percentage of their PWM period when the
/// switch is on and exactly zero when it is off; binary outputs mirror the
/// switch level.
#[must_use]
pub fn light_value(room: &Room, switch_on: bool) -> u32 {
    match (room.light, switch_on) {
        (LightOutput::Dimmable(channel), true) => {
            let scaled = u64::from(channel.period) * u64::from(room.light_percent) / 100;
            u32::try_from(scaled).unwrap_or(u32::MAX)
        }
        (LightOutput::Dimmable(_), false) => 0,
        (LightOutput::Binary(_), on) => u32::from(on),
    }
}
