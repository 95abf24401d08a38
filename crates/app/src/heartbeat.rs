//! Heartbeat — periodic liveness blink on the power status LED.
//!
//! The blink rides the actuation queue like every other output write, so a
//! stalled executor is immediately visible on the board.

use std::time::Duration;

use tracing::warn;

use roomhub_domain::event::Event;
use roomhub_domain::room::OutputPin;

use crate::queue::QueueSender;

/// Periodic task toggling the power LED.
pub struct Heartbeat {
    pin: OutputPin,
    actuations: QueueSender<Event>,
    interval: Duration,
    lit: bool,
}

impl Heartbeat {
    pub fn new(pin: OutputPin, actuations: QueueSender<Event>, interval: Duration) -> Self {
        Self {
            pin,
            actuations,
            interval,
            lit: false,
        }
    }

    /// Toggle once, producing the next blink command.
    pub fn beat(&mut self) -> Event {
        self.lit = !self.lit;
        Event::binary(self.pin, self.lit)
    }

    /// Run until the executor goes away.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            let blink = self.beat();
            if self.actuations.send(blink).is_err() {
                warn!("actuation queue closed, heartbeat stopped");
                return;
            }
        }
    }
}
