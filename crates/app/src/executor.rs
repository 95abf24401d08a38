//! Actuation executor — the single consumer of the actuation queue.
//!
//! Every actuation in the system, whether sensor-triggered or user-triggered,
//! arrives here and is applied in strict enqueue order. Later commands for
//! the same output must supersede earlier ones, so no reordering or
//! coalescing happens; a burst of edge events executes in full, which is
//! harmless because each write is idempotent on the physical output.

use tracing::{debug, warn};

use roomhub_domain::event::Event;

use crate::ports::ActuatorOutput;
use crate::queue::QueueReceiver;

/// Consumer task applying queued events to the output port.
pub struct ActuationExecutor<O> {
    outputs: O,
    events: QueueReceiver<Event>,
}

impl<O: ActuatorOutput> ActuationExecutor<O> {
    pub fn new(outputs: O, events: QueueReceiver<Event>) -> Self {
        Self { outputs, events }
    }

    /// Drain the queue in FIFO order until every producer is gone.
    pub async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            self.apply(event);
        }
    }

    fn apply(&self, event: Event) {
        let result = match event {
            Event::SetBinary { pin, on } => self.outputs.write_digital(pin, on),
            Event::SetDimmable { channel, level } => self.outputs.write_level(channel, level),
        };
        match result {
            Ok(()) => debug!(?event, "actuation applied"),
            Err(err) => warn!(?event, error = %err, "actuation failed"),
        }
    }
}
