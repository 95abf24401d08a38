//! Room — a logical zone with one light and optionally one thermostat/relay pair.
//!
//! A room's *wiring* (which pins and channels it owns) is fixed at startup;
//! its *state* (last-known values) is mutated in place by the pollers and
//! command handlers for the rest of the process lifetime.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{RoomHubError, ValidationError};

/// Stable numeric identifier for a room, equal to its index in the registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RoomId(pub u8);

impl RoomId {
    /// The registry index this id maps to.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Digital input pin handle (light switches).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputPin(pub u8);

/// Digital output pin handle (binary lights, relays, status LEDs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputPin(pub u8);

/// PWM channel handle for dimmable outputs, carrying its configured period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PwmChannel {
    pub channel: u8,
    pub period: u32,
}

/// Combined temperature/humidity sensor handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorId(pub u8);

/// Roles of the fixed system-status outputs, resolved independently of rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedRole {
    Power,
    Info,
    Error,
}

impl LedRole {
    /// Map a wire-level LED number onto its role.
    #[must_use]
    pub fn from_number(num: u8) -> Option<Self> {
        match num {
            0 => Some(Self::Power),
            1 => Some(Self::Info),
            2 => Some(Self::Error),
            _ => None,
        }
    }
}

/// The single light output of a room — PWM-dimmable or plain on/off.
///
/// Construction goes through [`Room::builder`], which rejects rooms wired
/// with both kinds or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightOutput {
    Dimmable(PwmChannel),
    Binary(OutputPin),
}

/// Optional thermostat wiring: a climate sensor paired with a heat relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimateWiring {
    pub sensor: SensorId,
    pub heat_relay: OutputPin,
}

/// Last-known values for a room.
///
/// Field ownership follows the polling design: `switch_on`/`light_value`
/// are written by the switch poller and the light command handler,
/// `temperature`/`humidity`/`heat_relay_on` by the thermostat poller, and
/// `desired_temperature` by the setpoint command handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomState {
    pub switch_on: bool,
    pub light_value: u32,
    pub temperature: i32,
    pub humidity: i32,
    pub desired_temperature: i32,
    pub heat_relay_on: bool,
}

/// One physical room: immutable wiring plus last-known state.
///
/// Built once at startup, mutated in place afterwards, never destroyed.
#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub light_switch: InputPin,
    pub light: LightOutput,
    pub climate: Option<ClimateWiring>,
    /// Hysteresis half-width around the temperature setpoint.
    pub deadband: i32,
    /// Percentage of the PWM period applied when a dimmable light turns on.
    pub light_percent: u32,
    state: RwLock<RoomState>,
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// Copy of the room's last-known values.
    #[must_use]
    pub fn state(&self) -> RoomState {
        *self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutate the room's state in place.
    pub fn update_state(&self, mutate: impl FnOnce(&mut RoomState)) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        mutate(&mut state);
    }

    /// Serializable copy of the room's identity and last-known values.
    #[must_use]
    pub fn snapshot(&self) -> RoomSnapshot {
        let state = self.state();
        RoomSnapshot {
            id: self.id,
            name: self.name.clone(),
            temperature: state.temperature,
            humidity: state.humidity,
            light_value: state.light_value,
            desired_temperature: state.desired_temperature,
            heat_relay_on: state.heat_relay_on,
        }
    }
}

/// Serializable per-room snapshot served by the rooms endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub name: String,
    pub temperature: i32,
    pub humidity: i32,
    pub light_value: u32,
    pub desired_temperature: i32,
    pub heat_relay_on: bool,
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    name: Option<String>,
    light_switch: Option<InputPin>,
    dimmable_output: Option<PwmChannel>,
    binary_output: Option<OutputPin>,
    climate: Option<ClimateWiring>,
    deadband: Option<i32>,
    light_percent: Option<u32>,
    desired_temperature: Option<i32>,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn light_switch(mut self, pin: InputPin) -> Self {
        self.light_switch = Some(pin);
        self
    }

    #[must_use]
    pub fn dimmable_output(mut self, channel: PwmChannel) -> Self {
        self.dimmable_output = Some(channel);
        self
    }

    #[must_use]
    pub fn binary_output(mut self, pin: OutputPin) -> Self {
        self.binary_output = Some(pin);
        self
    }

    #[must_use]
    pub fn climate(mut self, wiring: ClimateWiring) -> Self {
        self.climate = Some(wiring);
        self
    }

    #[must_use]
    pub fn deadband(mut self, deadband: i32) -> Self {
        self.deadband = Some(deadband);
        self
    }

    #[must_use]
    pub fn light_percent(mut self, percent: u32) -> Self {
        self.light_percent = Some(percent);
        self
    }

    #[must_use]
    pub fn desired_temperature(mut self, degrees: i32) -> Self {
        self.desired_temperature = Some(degrees);
        self
    }

    /// Consume the builder, validate, and return a [`Room`].
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] when the name is missing or
    /// empty, when no light switch is wired, when the room has both or
    /// neither kind of light output, or when the deadband or light
    /// percentage is out of range.
    pub fn build(self) -> Result<Room, RoomHubError> {
        let name = self.name.unwrap_or_default();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let light = match (self.dimmable_output, self.binary_output) {
            (Some(channel), None) => LightOutput::Dimmable(channel),
            (None, Some(pin)) => LightOutput::Binary(pin),
            (Some(_), Some(_)) => return Err(ValidationError::LightOutputConflict.into()),
            (None, None) => return Err(ValidationError::MissingLightOutput.into()),
        };

        let Some(light_switch) = self.light_switch else {
            return Err(ValidationError::MissingLightSwitch.into());
        };

        let deadband = self.deadband.unwrap_or(1);
        if deadband <= 0 {
            return Err(ValidationError::NonPositiveDeadband.into());
        }

        let light_percent = self.light_percent.unwrap_or(50);
        if light_percent > 100 {
            return Err(ValidationError::LightPercentOutOfRange.into());
        }

        Ok(Room {
            id: self.id.unwrap_or(RoomId(0)),
            name,
            light_switch,
            light,
            climate: self.climate,
            deadband,
            light_percent,
            state: RwLock::new(RoomState {
                desired_temperature: self.desired_temperature.unwrap_or_default(),
                ..RoomState::default()
            }),
        })
    }
}
