//! Drain loop wiring receive, process, and acknowledge together.
//!
//! In production the hosting layer triggers the consumer once per
//! delivered batch; this worker plays that role for demos and
//! integration tests against the in-memory transport.

use domain::{CatalogGateway, OrderStore};

use crate::client::InMemoryQueue;
use crate::consumer::BatchConsumer;

/// Counts from a single drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainOutcome {
    /// Messages delivered in this pass.
    pub received: usize,

    /// Messages processed and acknowledged.
    pub succeeded: usize,

    /// Messages left for redelivery.
    pub failed: usize,
}

/// Drives one queue: receives batches, processes them, and acknowledges
/// every message not reported failed.
pub struct QueueWorker<C: CatalogGateway, S: OrderStore> {
    queue: InMemoryQueue,
    consumer: BatchConsumer<C, S>,
}

impl<C: CatalogGateway, S: OrderStore> QueueWorker<C, S> {
    /// Creates a worker over a queue and a consumer.
    pub fn new(queue: InMemoryQueue, consumer: BatchConsumer<C, S>) -> Self {
        Self { queue, consumer }
    }

    /// Receives and processes one batch.
    ///
    /// Failed messages are left unacknowledged; the transport redelivers
    /// them after the visibility timeout.
    #[tracing::instrument(skip(self))]
    pub async fn run_once(&self) -> DrainOutcome {
        let batch = self.queue.receive_batch().await;
        if batch.is_empty() {
            return DrainOutcome::default();
        }

        let report = self.consumer.process_batch(&batch).await;

        let mut succeeded = 0;
        for message in &batch {
            if !report.is_failed(message.message_id) {
                self.queue.delete(message.message_id).await;
                succeeded += 1;
            }
        }

        DrainOutcome {
            received: batch.len(),
            succeeded,
            failed: batch.len() - succeeded,
        }
    }

    /// Runs passes until a receive returns nothing.
    ///
    /// Failed messages still inside their visibility timeout are not
    /// waited for; call again after the timeout to pick up redeliveries.
    pub async fn drain(&self) -> DrainOutcome {
        let mut total = DrainOutcome::default();
        loop {
            let pass = self.run_once().await;
            if pass.received == 0 {
                return total;
            }
            total.received += pass.received;
            total.succeeded += pass.succeeded;
            total.failed += pass.failed;
        }
    }
}
