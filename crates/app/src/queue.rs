//! In-process FIFO queues connecting producers to single consumers.
//!
//! Both the actuation queue and the web notification queue are unbounded,
//! strictly FIFO channels of owned records. Enqueue never blocks and fails
//! only once the consumer has shut down. The consumer chooses between a
//! blocking receive (actuation executor) and a non-blocking receive (web
//! notifier, which also services its own idle timer).

use tokio::sync::mpsc;

use roomhub_domain::error::QueueClosed;

/// Create a connected sender/receiver pair.
#[must_use]
pub fn channel<T>() -> (QueueSender<T>, QueueReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (QueueSender { tx }, QueueReceiver { rx })
}

/// Producer half — cheap to clone, never blocks.
#[derive(Debug)]
pub struct QueueSender<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> QueueSender<T> {
    /// Enqueue one record.
    ///
    /// # Errors
    ///
    /// Returns [`QueueClosed`] when the consumer has shut down; the record
    /// is dropped and the caller logs and continues.
    pub fn send(&self, value: T) -> Result<(), QueueClosed> {
        self.tx.send(value).map_err(|_| QueueClosed)
    }
}

/// Consumer half — owned by exactly one task.
#[derive(Debug)]
pub struct QueueReceiver<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> QueueReceiver<T> {
    /// Wait indefinitely for the next record.
    ///
    /// Returns `None` once every sender is dropped and the queue is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Take the next record if one is already queued, without waiting.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}
