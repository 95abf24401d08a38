//! Event — a queued actuation command aimed at a physical output.
//!
//! Events are created by a producer (poller or command handler), transferred
//! through the actuation queue, and consumed exactly once by the executor.
//! They are never mutated after enqueue. The tagged representation keeps
//! every command inspectable in tests and logs.

use serde::Serialize;

use crate::room::{LightOutput, OutputPin, PwmChannel, Room};

/// A one-shot actuation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Event {
    /// Set a binary output (on/off light, relay, status LED).
    SetBinary { pin: OutputPin, on: bool },
    /// Set a PWM-dimmable output to an absolute level.
    SetDimmable { channel: PwmChannel, level: u32 },
}

impl Event {
    /// Build the output-appropriate light command for `room`.
    ///
    /// Dimmable outputs receive `value` as an absolute PWM level; binary
    /// outputs treat any non-zero value as "on".
    #[must_use]
    pub fn for_light(room: &Room, value: u32) -> Self {
        match room.light {
            LightOutput::Dimmable(channel) => Self::SetDimmable {
                channel,
                level: value,
            },
            LightOutput::Binary(pin) => Self::SetBinary {
                pin,
                on: value != 0,
            },
        }
    }

    /// Build a binary output command (relays and status LEDs).
    #[must_use]
    pub fn binary(pin: OutputPin, on: bool) -> Self {
        Self::SetBinary { pin, on }
    }
}
