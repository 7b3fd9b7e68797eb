//! Subscriber registry and fan-out broadcaster.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use newswire_core::{PipelineStatus, StreamMessage};
use parking_lot::Mutex;
use telemetry::metrics;
use tokio::sync::mpsc;
use tracing::debug;

/// Handle identifying one registered subscriber.
pub type SubscriberId = u64;

/// Holds live observer handles and fans out records and status changes.
///
/// Broadcast iterates a snapshot of the sender set taken under the lock and
/// sends outside it, so a disconnecting subscriber never blocks delivery to
/// the others. A failed send removes that subscriber only.
#[derive(Debug, Default)]
pub struct Broadcaster {
    subscribers: Mutex<HashMap<SubscriberId, mpsc::UnboundedSender<StreamMessage>>>,
    next_id: AtomicU64,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber and returns its id and message stream.
    ///
    /// The current pipeline status is queued as the first message, so a new
    /// subscriber sees correct status without waiting for the next event.
    pub fn subscribe(
        &self,
        current_status: PipelineStatus,
    ) -> (SubscriberId, mpsc::UnboundedReceiver<StreamMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        // Cannot fail: the receiver was created on the line above.
        let _ = tx.send(StreamMessage::status(current_status));

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut subscribers = self.subscribers.lock();
        subscribers.insert(id, tx);
        metrics().subscribers_connected.set(subscribers.len() as u64);
        debug!(subscriber_id = id, total = subscribers.len(), "Subscriber registered");
        (id, rx)
    }

    /// Removes a subscriber. Idempotent.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut subscribers = self.subscribers.lock();
        if subscribers.remove(&id).is_some() {
            debug!(subscriber_id = id, total = subscribers.len(), "Subscriber removed");
        }
        metrics().subscribers_connected.set(subscribers.len() as u64);
    }

    /// Sends a message to every currently registered subscriber.
    pub fn broadcast(&self, message: StreamMessage) {
        let targets: Vec<(SubscriberId, mpsc::UnboundedSender<StreamMessage>)> = {
            let subscribers = self.subscribers.lock();
            subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        let mut failed = Vec::new();
        for (id, tx) in targets {
            if tx.send(message.clone()).is_err() {
                failed.push(id);
            }
        }

        if !failed.is_empty() {
            metrics().subscriber_send_failures.inc_by(failed.len() as u64);
            let mut subscribers = self.subscribers.lock();
            for id in failed {
                subscribers.remove(&id);
                debug!(subscriber_id = id, "Dropped subscriber after send failure");
            }
            metrics().subscribers_connected.set(subscribers.len() as u64);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}
