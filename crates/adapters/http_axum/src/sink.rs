//! [`WebEventSink`] implementation backed by the web notification queue.

use roomhub_app::ports::WebEventSink;
use roomhub_app::queue::QueueSender;
use roomhub_domain::web_event::WebEvent;

/// Pushes notifications into the queue consumed by the notifier task.
///
/// This is the web layer's side of the one-directional notification
/// boundary: the core calls the port, this sink feeds the queue, and the
/// notifier fans out to clients.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    queue: QueueSender<WebEvent>,
}

impl ChannelSink {
    #[must_use]
    pub fn new(queue: QueueSender<WebEvent>) -> Self {
        Self { queue }
    }
}

impl WebEventSink for ChannelSink {
    fn notify(&self, event: WebEvent) {
        if self.queue.send(event).is_err() {
            tracing::warn!(?event, "web notifier gone, notification dropped");
        }
    }
}
