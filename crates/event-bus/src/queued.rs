//! A subscriber behind its own private queue.
//!
//! Composition of the queue topology's retry semantics with the bus's
//! fan-out: the bus-facing `handle` only enqueues, so a slow or erroring
//! inner handler gets independent redelivery and dead-lettering without
//! the bus or any sibling subscriber noticing.

use std::sync::Arc;

use async_trait::async_trait;
use queue::{InMemoryQueue, QueueClient};

use crate::error::SubscriberError;
use crate::event::EventEnvelope;
use crate::subscriber::EventSubscriber;

/// Counts from one drain pass over the private queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueuedDrainOutcome {
    /// Deliveries attempted in this pass.
    pub attempted: usize,

    /// Deliveries the inner subscriber handled successfully.
    pub succeeded: usize,
}

/// Wraps an inner subscriber behind a private queue.
pub struct QueuedSubscriber {
    name: String,
    inner: Arc<dyn EventSubscriber>,
    queue: InMemoryQueue,
}

impl QueuedSubscriber {
    /// Creates a queued wrapper around `inner` using the given private
    /// queue for buffering and retry.
    pub fn new(inner: Arc<dyn EventSubscriber>, queue: InMemoryQueue) -> Self {
        Self {
            name: format!("queued-{}", inner.name()),
            inner,
            queue,
        }
    }

    /// Returns the private queue, for observing retry and dead-letter
    /// behavior.
    pub fn queue(&self) -> &InMemoryQueue {
        &self.queue
    }

    /// Delivers one batch from the private queue to the inner subscriber.
    ///
    /// Failed deliveries stay queued and are redelivered after the
    /// visibility timeout, dead-lettering once the receive count is
    /// exhausted.
    #[tracing::instrument(skip(self), fields(subscriber = %self.name))]
    pub async fn drain_once(&self) -> QueuedDrainOutcome {
        let batch = self.queue.receive_batch().await;
        let mut outcome = QueuedDrainOutcome {
            attempted: batch.len(),
            succeeded: 0,
        };

        for message in &batch {
            let envelope: EventEnvelope = match serde_json::from_str(&message.body) {
                Ok(envelope) => envelope,
                Err(e) => {
                    tracing::warn!(message_id = %message.message_id, error = %e, "malformed buffered event");
                    continue;
                }
            };

            match self.inner.handle(&envelope).await {
                Ok(()) => {
                    self.queue.delete(message.message_id).await;
                    outcome.succeeded += 1;
                }
                Err(e) => {
                    tracing::warn!(message_id = %message.message_id, error = %e, "inner subscriber failed, retaining for retry");
                }
            }
        }

        outcome
    }
}

#[async_trait]
impl EventSubscriber for QueuedSubscriber {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<(), SubscriberError> {
        let body = serde_json::to_string(event)
            .map_err(|e| SubscriberError::new(self.name.clone(), e.to_string()))?;

        self.queue
            .send(body)
            .await
            .map_err(|e| SubscriberError::new(self.name.clone(), e.to_string()))?;

        Ok(())
    }
}
