//! Notification sink port — the one-directional boundary towards the web
//! layer.
//!
//! The core publishes [`WebEvent`]s through this trait without knowing how
//! (or whether) they reach connected clients. The web adapter implements it
//! by feeding its notification queue; [`NullSink`] drops everything for
//! headless operation and tests.

use std::sync::Arc;

use roomhub_domain::web_event::WebEvent;

/// Receives state-change notifications produced by pollers and handlers.
pub trait WebEventSink {
    /// Deliver one notification. Delivery is best-effort: implementations
    /// must not block and must swallow downstream failures.
    fn notify(&self, event: WebEvent);
}

/// A sink that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl WebEventSink for NullSink {
    fn notify(&self, _event: WebEvent) {}
}

impl<T: WebEventSink> WebEventSink for Arc<T> {
    fn notify(&self, event: WebEvent) {
        (**self).notify(event);
    }
}
