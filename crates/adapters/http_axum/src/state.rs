//! Shared application state for axum handlers.

use std::sync::Arc;

use roomhub_app::commands::CommandService;
use roomhub_app::ports::WebEventSink;

use crate::clients::ClientSet;

/// Application state shared across all axum handlers.
///
/// Generic over the notification sink to avoid dynamic dispatch. `Clone` is
/// implemented manually so the sink itself does not need to be `Clone` —
/// only the `Arc` wrapper is cloned.
pub struct AppState<S> {
    /// Command ingestion service (the one actuation path).
    pub commands: Arc<CommandService<S>>,
    /// Connected WebSocket clients.
    pub clients: ClientSet,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            commands: Arc::clone(&self.commands),
            clients: self.clients.clone(),
        }
    }
}

impl<S: WebEventSink + Send + Sync + 'static> AppState<S> {
    /// Create a new application state from the command service and the
    /// client set shared with the notifier task.
    pub fn new(commands: CommandService<S>, clients: ClientSet) -> Self {
        Self {
            commands: Arc::new(commands),
            clients,
        }
    }
}
