//! Virtual board — simulated pins, PWM channels, and climate sensors.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use roomhub_app::ports::{ActuatorOutput, ClimateReading, ClimateSensor, SwitchInput};
use roomhub_app::registry::StatusLeds;
use roomhub_domain::error::DeviceError;
use roomhub_domain::room::{InputPin, LightOutput, OutputPin, PwmChannel, Room, SensorId};

/// In-memory stand-in for the controller board.
///
/// Every pin, channel, and sensor referenced by the room table is registered
/// at [`open`](VirtualBoard::open) time; touching anything unregistered
/// fails the same way absent hardware would.
pub struct VirtualBoard {
    inputs: Mutex<HashMap<InputPin, bool>>,
    outputs: Mutex<HashMap<OutputPin, bool>>,
    pwm: Mutex<HashMap<u8, u32>>,
    sensors: Mutex<HashMap<SensorId, ClimateReading>>,
    failing: Mutex<HashSet<SensorId>>,
}

impl VirtualBoard {
    /// Bring up the board for the given room table and status LEDs.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotReady`] when two rooms claim the same
    /// output pin or PWM channel — the virtual analog of a device that
    /// fails to initialize. Fatal to startup.
    pub fn open(rooms: &[Room], leds: &StatusLeds) -> Result<Self, DeviceError> {
        let mut inputs = HashMap::new();
        let mut outputs = HashMap::new();
        let mut pwm = HashMap::new();
        let mut sensors = HashMap::new();

        for pin in [leds.power, leds.info, leds.error] {
            if outputs.insert(pin, false).is_some() {
                return Err(not_ready(format!("output pin {}", pin.0)));
            }
        }

        for room in rooms {
            inputs.insert(room.light_switch, false);
            match room.light {
                LightOutput::Dimmable(channel) => {
                    if pwm.insert(channel.channel, 0).is_some() {
                        return Err(not_ready(format!("pwm channel {}", channel.channel)));
                    }
                }
                LightOutput::Binary(pin) => {
                    if outputs.insert(pin, false).is_some() {
                        return Err(not_ready(format!("output pin {}", pin.0)));
                    }
                }
            }
            if let Some(climate) = room.climate {
                if outputs.insert(climate.heat_relay, false).is_some() {
                    return Err(not_ready(format!("output pin {}", climate.heat_relay.0)));
                }
                sensors.insert(
                    climate.sensor,
                    ClimateReading {
                        temperature: 20,
                        humidity: 40,
                    },
                );
            }
        }

        Ok(Self {
            inputs: Mutex::new(inputs),
            outputs: Mutex::new(outputs),
            pwm: Mutex::new(pwm),
            sensors: Mutex::new(sensors),
            failing: Mutex::new(HashSet::new()),
        })
    }

    /// Drive a switch from test or demo code.
    pub fn set_switch(&self, pin: InputPin, on: bool) {
        lock(&self.inputs).insert(pin, on);
    }

    /// Override a sensor's next readings.
    pub fn set_climate(&self, sensor: SensorId, temperature: i32, humidity: i32) {
        lock(&self.sensors).insert(
            sensor,
            ClimateReading {
                temperature,
                humidity,
            },
        );
    }

    /// Force (or clear) read failures on a sensor.
    pub fn fail_sensor(&self, sensor: SensorId, failing: bool) {
        if failing {
            lock(&self.failing).insert(sensor);
        } else {
            lock(&self.failing).remove(&sensor);
        }
    }

    /// Last written level of a binary output.
    #[must_use]
    pub fn digital_level(&self, pin: OutputPin) -> Option<bool> {
        lock(&self.outputs).get(&pin).copied()
    }

    /// Last written level of a PWM channel.
    #[must_use]
    pub fn pwm_level(&self, channel: u8) -> Option<u32> {
        lock(&self.pwm).get(&channel).copied()
    }
}

impl SwitchInput for VirtualBoard {
    fn read_digital(&self, pin: InputPin) -> Result<bool, DeviceError> {
        lock(&self.inputs)
            .get(&pin)
            .copied()
            .ok_or_else(|| DeviceError::ReadFailed {
                device: format!("input pin {}", pin.0),
            })
    }
}

impl ActuatorOutput for VirtualBoard {
    fn write_digital(&self, pin: OutputPin, on: bool) -> Result<(), DeviceError> {
        let mut outputs = lock(&self.outputs);
        let Some(level) = outputs.get_mut(&pin) else {
            return Err(DeviceError::WriteFailed {
                device: format!("output pin {}", pin.0),
            });
        };
        *level = on;
        Ok(())
    }

    fn write_level(&self, channel: PwmChannel, level: u32) -> Result<(), DeviceError> {
        let mut pwm = lock(&self.pwm);
        let Some(slot) = pwm.get_mut(&channel.channel) else {
            return Err(DeviceError::WriteFailed {
                device: format!("pwm channel {}", channel.channel),
            });
        };
        *slot = level;
        Ok(())
    }
}

impl ClimateSensor for VirtualBoard {
    fn read_temp_humidity(&self, sensor: SensorId) -> Result<ClimateReading, DeviceError> {
        if lock(&self.failing).contains(&sensor) {
            return Err(DeviceError::ReadFailed {
                device: format!("sensor {}", sensor.0),
            });
        }
        lock(&self.sensors)
            .get(&sensor)
            .copied()
            .ok_or_else(|| DeviceError::ReadFailed {
                device: format!("sensor {}", sensor.0),
            })
    }
}

fn not_ready(device: String) -> DeviceError {
    DeviceError::NotReady { device }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
