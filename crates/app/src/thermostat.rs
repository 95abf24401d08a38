//! Thermostat poller — slow climate sampling plus hysteresis relay control.
//!
//! Sensing and heating are decoupled: a drifted reading only produces web
//! notifications, never an actuation, while a relay transition only produces
//! an actuation (mirrored to the web channel so a live UI tracks the relay).
//! The hysteresis band keeps the relay still anywhere inside
//! `[current - deadband, current + deadband]`, so the setpoint boundary
//! cannot chatter.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use roomhub_domain::event::Event;
use roomhub_domain::room::{ClimateWiring, Room};
use roomhub_domain::web_event::{WebEvent, WebEventKind};

use crate::ports::{ClimateReading, ClimateSensor, WebEventSink};
use crate::queue::QueueSender;
use crate::registry::RoomRegistry;

/// Periodic task sampling climate sensors and driving heat relays.
pub struct ThermostatPoller<C, S> {
    registry: Arc<RoomRegistry>,
    sensor: C,
    actuations: QueueSender<Event>,
    sink: S,
    interval: Duration,
}

impl<C: ClimateSensor, S: WebEventSink> ThermostatPoller<C, S> {
    pub fn new(
        registry: Arc<RoomRegistry>,
        sensor: C,
        actuations: QueueSender<Event>,
        sink: S,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            sensor,
            actuations,
            sink,
            interval,
        }
    }

    /// Run for the process lifetime. Thermal drift is slow, so the interval
    /// is much longer than the switch poller's.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            self.poll_once();
        }
    }

    /// One pass over every room with climate wiring.
    pub fn poll_once(&self) {
        for room in self.registry.get_all() {
            let Some(climate) = room.climate else {
                continue;
            };
            match self.sensor.read_temp_humidity(climate.sensor) {
                Ok(reading) => {
                    self.publish_drift(room, reading);
                    self.drive_relay(room, climate, reading.temperature);
                }
                Err(err) => {
                    warn!(room = %room.id, error = %err, "sensor read failed, keeping last values");
                }
            }
        }
    }

    /// Emit the reading pair and store it when either value drifted.
    fn publish_drift(&self, room: &Room, reading: ClimateReading) {
        let state = room.state();
        if reading.temperature == state.temperature && reading.humidity == state.humidity {
            return;
        }

        self.sink.notify(WebEvent::new(
            room.id,
            WebEventKind::TemperatureReading,
            i64::from(reading.temperature),
        ));
        self.sink.notify(WebEvent::new(
            room.id,
            WebEventKind::HumidityReading,
            i64::from(reading.humidity),
        ));
        room.update_state(|state| {
            state.temperature = reading.temperature;
            state.humidity = reading.humidity;
        });
        debug!(
            room = %room.id,
            temperature = reading.temperature,
            humidity = reading.humidity,
            "climate drift"
        );
    }

    /// Apply hysteresis control and enqueue a relay command on transition.
    fn drive_relay(&self, room: &Room, climate: ClimateWiring, current: i32) {
        let state = room.state();
        let Some(on) = relay_transition(
            state.desired_temperature,
            current,
            room.deadband,
            state.heat_relay_on,
        ) else {
            return;
        };

        if let Err(err) = self.actuations.send(Event::binary(climate.heat_relay, on)) {
            warn!(room = %room.id, error = %err, "relay event dropped");
            return;
        }
        self.sink.notify(WebEvent::new(
            room.id,
            WebEventKind::RelayState,
            i64::from(on),
        ));
        room.update_state(|state| state.heat_relay_on = on);
        debug!(room = %room.id, on, "heat relay transition");
    }
}

/// Hysteresis decision: `Some(new_state)` on a transition, `None` when the
/// relay holds.
///
/// The relay turns on when the setpoint sits above the band around the
/// current temperature and off when it sits below; inside
/// `[current - deadband, current + deadband]` the previous state is kept.
#[must_use]
pub fn relay_transition(desired: i32, current: i32, deadband: i32, relay_on: bool) -> Option<bool> {
    if desired > current + deadband && !relay_on {
        Some(true)
    } else if desired < current - deadband && relay_on {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use roomhub_domain::error::DeviceError;
    use roomhub_domain::room::{InputPin, OutputPin, PwmChannel, RoomId, SensorId};

    use crate::queue::{QueueReceiver, channel};
    use crate::registry::StatusLeds;

    struct StubSensor {
        readings: Mutex<HashMap<SensorId, ClimateReading>>,
        fail: Mutex<bool>,
    }

    impl StubSensor {
        fn new() -> Self {
            Self {
                readings: Mutex::new(HashMap::new()),
                fail: Mutex::new(false),
            }
        }

        fn set(&self, sensor: SensorId, temperature: i32, humidity: i32) {
            self.readings.lock().unwrap().insert(
                sensor,
                ClimateReading {
                    temperature,
                    humidity,
                },
            );
        }

        fn fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }
    }

    impl ClimateSensor for StubSensor {
        fn read_temp_humidity(&self, sensor: SensorId) -> Result<ClimateReading, DeviceError> {
            if *self.fail.lock().unwrap() {
                return Err(DeviceError::ReadFailed {
                    device: format!("sensor {}", sensor.0),
                });
            }
            self.readings
                .lock()
                .unwrap()
                .get(&sensor)
                .copied()
                .ok_or(DeviceError::ReadFailed {
                    device: format!("sensor {}", sensor.0),
                })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<WebEvent>>,
    }

    impl WebEventSink for RecordingSink {
        fn notify(&self, event: WebEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn registry(desired: i32, deadband: i32) -> Arc<RoomRegistry> {
        let room = Room::builder()
            .id(RoomId(0))
            .name("Living Room")
            .light_switch(InputPin(4))
            .dimmable_output(PwmChannel {
                channel: 0,
                period: 20_000,
            })
            .climate(ClimateWiring {
                sensor: SensorId(0),
                heat_relay: OutputPin(7),
            })
            .desired_temperature(desired)
            .deadband(deadband)
            .build()
            .unwrap();
        let leds = StatusLeds {
            power: OutputPin(0),
            info: OutputPin(1),
            error: OutputPin(2),
        };
        Arc::new(RoomRegistry::new(vec![room], leds).unwrap())
    }

    #[allow(clippy::type_complexity)]
    fn poller(
        desired: i32,
        deadband: i32,
    ) -> (
        ThermostatPoller<Arc<StubSensor>, Arc<RecordingSink>>,
        Arc<StubSensor>,
        Arc<RecordingSink>,
        QueueReceiver<Event>,
    ) {
        let sensor = Arc::new(StubSensor::new());
        let sink = Arc::new(RecordingSink::default());
        let (tx, rx) = channel();
        let poller = ThermostatPoller::new(
            registry(desired, deadband),
            Arc::clone(&sensor),
            tx,
            Arc::clone(&sink),
            Duration::from_secs(10),
        );
        (poller, sensor, sink, rx)
    }

    #[tokio::test]
    async fn should_emit_reading_pair_on_drift() {
        let (poller, sensor, sink, _rx) = poller(0, 1);
        sensor.set(SensorId(0), 18, 40);

        poller.poll_once();

        let events = sink.events.lock().unwrap();
        assert_eq!(
            events[0],
            WebEvent::new(RoomId(0), WebEventKind::TemperatureReading, 18)
        );
        assert_eq!(
            events[1],
            WebEvent::new(RoomId(0), WebEventKind::HumidityReading, 40)
        );

        let state = poller.registry.get_by_id(RoomId(0)).unwrap().state();
        assert_eq!(state.temperature, 18);
        assert_eq!(state.humidity, 40);
    }

    #[tokio::test]
    async fn should_stay_quiet_without_drift() {
        let (poller, sensor, sink, _rx) = poller(0, 1);
        sensor.set(SensorId(0), 18, 40);
        poller.poll_once();
        sink.events.lock().unwrap().clear();

        poller.poll_once();

        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_keep_last_values_on_sensor_failure() {
        let (poller, sensor, sink, mut rx) = poller(25, 1);
        sensor.set(SensorId(0), 18, 40);
        poller.poll_once();
        rx.try_recv().unwrap();
        sink.events.lock().unwrap().clear();

        sensor.fail(true);
        poller.poll_once();

        assert!(sink.events.lock().unwrap().is_empty());
        assert_eq!(rx.try_recv(), None);
        let state = poller.registry.get_by_id(RoomId(0)).unwrap().state();
        assert_eq!(state.temperature, 18);
        assert_eq!(state.humidity, 40);
    }

    #[tokio::test]
    async fn should_switch_relay_on_when_setpoint_above_band() {
        let (poller, sensor, sink, mut rx) = poller(22, 1);
        sensor.set(SensorId(0), 18, 40);

        poller.poll_once();

        assert_eq!(
            rx.try_recv(),
            Some(Event::SetBinary {
                pin: OutputPin(7),
                on: true,
            })
        );
        assert!(
            sink.events
                .lock()
                .unwrap()
                .contains(&WebEvent::new(RoomId(0), WebEventKind::RelayState, 1))
        );
        assert!(poller.registry.get_by_id(RoomId(0)).unwrap().state().heat_relay_on);
    }

    #[tokio::test]
    async fn should_switch_relay_off_when_setpoint_below_band() {
        let (poller, sensor, _sink, mut rx) = poller(18, 1);
        poller
            .registry
            .get_by_id(RoomId(0))
            .unwrap()
            .update_state(|state| state.heat_relay_on = true);
        sensor.set(SensorId(0), 22, 40);

        poller.poll_once();

        assert_eq!(
            rx.try_recv(),
            Some(Event::SetBinary {
                pin: OutputPin(7),
                on: false,
            })
        );
    }

    #[tokio::test]
    async fn should_hold_relay_inside_dead_zone() {
        for initial in [false, true] {
            let (poller, sensor, _sink, mut rx) = poller(20, 2);
            poller
                .registry
                .get_by_id(RoomId(0))
                .unwrap()
                .update_state(|state| state.heat_relay_on = initial);

            // Setpoint stays within [current - deadband, current + deadband].
            for current in [18, 19, 20, 21, 22] {
                sensor.set(SensorId(0), current, 40);
                poller.poll_once();
                if let Some(event) = rx.try_recv() {
                    panic!("unexpected actuation {event:?} at current {current}");
                }
                let state = poller.registry.get_by_id(RoomId(0)).unwrap().state();
                assert_eq!(state.heat_relay_on, initial);
            }
        }
    }

    #[test]
    fn should_turn_on_only_above_the_band() {
        assert_eq!(relay_transition(22, 20, 1, false), Some(true));
        assert_eq!(relay_transition(21, 20, 1, false), None);
        assert_eq!(relay_transition(20, 20, 1, false), None);
    }

    #[test]
    fn should_turn_off_only_below_the_band() {
        assert_eq!(relay_transition(18, 20, 1, true), Some(false));
        assert_eq!(relay_transition(19, 20, 1, true), None);
        assert_eq!(relay_transition(20, 20, 1, true), None);
    }

    #[test]
    fn should_not_repeat_the_current_relay_state() {
        assert_eq!(relay_transition(25, 20, 1, true), None);
        assert_eq!(relay_transition(15, 20, 1, false), None);
    }
}
