//! Hardware ports — the abstract contracts the actuation core drives.
//!
//! Physical bus access (GPIO registers, PWM timers, sensor protocols) lives
//! behind these traits; the core only ever sees pin and channel handles.
//! Reads and writes are register-sized operations, so the ports are
//! synchronous and callable from any task.

use std::sync::Arc;

use roomhub_domain::error::DeviceError;
use roomhub_domain::room::{InputPin, OutputPin, PwmChannel, SensorId};

/// Reads digital inputs (light switches).
pub trait SwitchInput {
    /// Sample the current level of `pin`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::ReadFailed`] when the pin cannot be sampled;
    /// the caller keeps its last-known state for that tick.
    fn read_digital(&self, pin: InputPin) -> Result<bool, DeviceError>;
}

/// Drives digital and PWM outputs (lights, relays, status LEDs).
pub trait ActuatorOutput {
    /// Set a binary output.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::WriteFailed`] when the pin cannot be driven.
    fn write_digital(&self, pin: OutputPin, on: bool) -> Result<(), DeviceError>;

    /// Set a dimmable output to an absolute level within the channel period.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::WriteFailed`] when the channel cannot be driven.
    fn write_level(&self, channel: PwmChannel, level: u32) -> Result<(), DeviceError>;
}

/// Reads combined temperature/humidity sensors.
pub trait ClimateSensor {
    /// Read both values from `sensor`, or fail as a unit.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::ReadFailed`] when the sensor does not answer;
    /// the caller retains its last-known values for that tick.
    fn read_temp_humidity(&self, sensor: SensorId) -> Result<ClimateReading, DeviceError>;
}

/// One successful sensor read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateReading {
    pub temperature: i32,
    pub humidity: i32,
}

impl<T: SwitchInput> SwitchInput for Arc<T> {
    fn read_digital(&self, pin: InputPin) -> Result<bool, DeviceError> {
        (**self).read_digital(pin)
    }
}

impl<T: ActuatorOutput> ActuatorOutput for Arc<T> {
    fn write_digital(&self, pin: OutputPin, on: bool) -> Result<(), DeviceError> {
        (**self).write_digital(pin, on)
    }

    fn write_level(&self, channel: PwmChannel, level: u32) -> Result<(), DeviceError> {
        (**self).write_level(channel, level)
    }
}

impl<T: ClimateSensor> ClimateSensor for Arc<T> {
    fn read_temp_humidity(&self, sensor: SensorId) -> Result<ClimateReading, DeviceError> {
        (**self).read_temp_humidity(sensor)
    }
}
