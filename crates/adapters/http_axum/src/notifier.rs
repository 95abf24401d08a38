//! Web notifier — the single consumer of the web notification queue.
//!
//! The loop polls with a short idle wait instead of blocking indefinitely,
//! so the same task can keep servicing connection bookkeeping even when no
//! events arrive. Events that show up while zero clients are connected are
//! discarded before any serialization work.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use roomhub_app::queue::QueueReceiver;
use roomhub_domain::room::RoomId;
use roomhub_domain::web_event::{WebEvent, WebEventKind};

use crate::clients::ClientSet;

/// `{"room_id": n, "light_value": v}` — switch and light updates.
#[derive(Debug, Serialize)]
struct LightFrame {
    room_id: RoomId,
    light_value: i64,
}

/// `{"room_id": n, "temp_value": t, "hum_value": h}` — climate updates.
///
/// Each climate event carries one fresh value; the companion field is filled
/// from the notifier's cache of the last readings it has seen. The
/// thermostat poller emits the pair together, so the companion is at most
/// one event stale.
#[derive(Debug, Serialize)]
struct ClimateFrame {
    room_id: RoomId,
    temp_value: i64,
    hum_value: i64,
}

/// `{"room_id": n, "desire_temp_value": v}` — setpoint updates.
#[derive(Debug, Serialize)]
struct SetpointFrame {
    room_id: RoomId,
    desire_temp_value: i64,
}

/// `{"room_id": n, "relay_state": v}` — heat relay transitions.
#[derive(Debug, Serialize)]
struct RelayFrame {
    room_id: RoomId,
    relay_state: i64,
}

/// Last climate readings seen per room.
#[derive(Debug, Default)]
struct ClimateCache {
    temperature: HashMap<RoomId, i64>,
    humidity: HashMap<RoomId, i64>,
}

/// Consumer task broadcasting serialized frames to connected clients.
pub struct WebNotifier {
    events: QueueReceiver<WebEvent>,
    clients: ClientSet,
    idle_wait: Duration,
    cache: ClimateCache,
}

impl WebNotifier {
    pub fn new(events: QueueReceiver<WebEvent>, clients: ClientSet, idle_wait: Duration) -> Self {
        Self {
            events,
            clients,
            idle_wait,
            cache: ClimateCache::default(),
        }
    }

    /// Run for the process lifetime.
    pub async fn run(mut self) {
        loop {
            match self.events.try_recv() {
                Some(event) => self.dispatch(&event),
                None => tokio::time::sleep(self.idle_wait).await,
            }
        }
    }

    /// Handle one event: update the climate cache, then broadcast unless
    /// nobody is listening.
    fn dispatch(&mut self, event: &WebEvent) {
        self.remember(event);
        if self.clients.is_empty() {
            return;
        }
        match self.serialize(event) {
            Ok(payload) => self.clients.broadcast(&payload),
            Err(err) => warn!(?event, error = %err, "frame serialization failed"),
        }
    }

    fn remember(&mut self, event: &WebEvent) {
        match event.kind {
            WebEventKind::TemperatureReading => {
                self.cache.temperature.insert(event.room_id, event.value);
            }
            WebEventKind::HumidityReading => {
                self.cache.humidity.insert(event.room_id, event.value);
            }
            _ => {}
        }
    }

    fn serialize(&self, event: &WebEvent) -> serde_json::Result<String> {
        let room_id = event.room_id;
        match event.kind {
            WebEventKind::SwitchState | WebEventKind::LightLevel => {
                serde_json::to_string(&LightFrame {
                    room_id,
                    light_value: event.value,
                })
            }
            WebEventKind::TemperatureReading => serde_json::to_string(&ClimateFrame {
                room_id,
                temp_value: event.value,
                hum_value: self.cached_humidity(room_id),
            }),
            WebEventKind::HumidityReading => serde_json::to_string(&ClimateFrame {
                room_id,
                temp_value: self.cached_temperature(room_id),
                hum_value: event.value,
            }),
            WebEventKind::DesiredTemperature => serde_json::to_string(&SetpointFrame {
                room_id,
                desire_temp_value: event.value,
            }),
            WebEventKind::RelayState => serde_json::to_string(&RelayFrame {
                room_id,
                relay_state: event.value,
            }),
        }
    }

    fn cached_temperature(&self, room_id: RoomId) -> i64 {
        self.cache.temperature.get(&room_id).copied().unwrap_or(0)
    }

    fn cached_humidity(&self, room_id: RoomId) -> i64 {
        self.cache.humidity.get(&room_id).copied().unwrap_or(0)
    }
}
