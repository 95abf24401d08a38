//! Connected WebSocket client bookkeeping.
//!
//! Each client owns an unbounded channel feeding its socket task. A failed
//! channel send means the socket task is gone; that client is removed on the
//! spot and never retried, while the broadcast continues to the rest.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::warn;

/// Handle to one connected client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(u64);

/// The set of connected WebSocket clients.
#[derive(Clone, Default)]
pub struct ClientSet {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    clients: Vec<(ClientId, mpsc::UnboundedSender<String>)>,
}

impl ClientSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client, returning its id and the receiving half its
    /// socket task drains.
    pub fn register(&self) -> (ClientId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        let id = ClientId(inner.next_id);
        inner.next_id += 1;
        inner.clients.push((id, tx));
        (id, rx)
    }

    /// Drop one client (socket closed or handed back by a failed send).
    pub fn remove(&self, id: ClientId) {
        self.lock().clients.retain(|(client, _)| *client != id);
    }

    /// Number of connected clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().clients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Send `payload` to every client, evicting those whose channel is gone.
    pub fn broadcast(&self, payload: &str) {
        self.lock().clients.retain(|(id, tx)| {
            if tx.send(payload.to_string()).is_ok() {
                true
            } else {
                warn!(client = id.0, "client send failed, removing from set");
                false
            }
        });
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
