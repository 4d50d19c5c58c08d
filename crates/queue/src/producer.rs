//! Producer side of the queue topology.

use common::CorrelationId;
use domain::OrderRequest;
use serde::{Deserialize, Serialize};

use crate::client::QueueClient;
use crate::error::QueueError;
use crate::message::QueueMessage;

/// Acknowledgement that a request was accepted for processing.
///
/// Guarantees only "accepted", never "processed": whether the order was
/// actually placed is observable later through the order store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accepted {
    /// Handle on this placement attempt.
    pub correlation_id: CorrelationId,
}

/// Submits order requests to the queue and returns immediately.
pub struct OrderSubmitter<Q: QueueClient> {
    queue: Q,
}

impl<Q: QueueClient> OrderSubmitter<Q> {
    /// Creates a submitter over the given queue client.
    pub fn new(queue: Q) -> Self {
        Self { queue }
    }

    /// Normalizes the request into a queue message and enqueues it.
    ///
    /// Returns as soon as the transport accepts the message, without
    /// waiting for processing. No validation happens here; a malformed
    /// order is rejected later by the consumer.
    #[tracing::instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn submit(&self, request: OrderRequest) -> Result<Accepted, QueueError> {
        let message = QueueMessage::new(request);
        let correlation_id = message.correlation_id;
        let body = serde_json::to_string(&message)?;

        self.queue.send(body).await?;

        metrics::counter!("queue_orders_submitted").increment(1);
        tracing::info!(%correlation_id, "order accepted for processing");

        Ok(Accepted { correlation_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryQueue;

    #[tokio::test]
    async fn submit_enqueues_one_message() {
        let queue = InMemoryQueue::new();
        let submitter = OrderSubmitter::new(queue.clone());

        let accepted = submitter
            .submit(OrderRequest::single("CUST-123", "P001", 2))
            .await
            .unwrap();

        assert_eq!(queue.message_count().await, 1);

        let batch = queue.receive_batch().await;
        let message: QueueMessage = serde_json::from_str(&batch[0].body).unwrap();
        assert_eq!(message.correlation_id, accepted.correlation_id);
        assert_eq!(message.request.customer_id, "CUST-123");
    }

    #[tokio::test]
    async fn submit_does_not_validate_the_request() {
        let queue = InMemoryQueue::new();
        let submitter = OrderSubmitter::new(queue.clone());

        // An invalid request is still accepted; rejection happens at the
        // consumer.
        let result = submitter.submit(OrderRequest::new("", vec![])).await;
        assert!(result.is_ok());
        assert_eq!(queue.message_count().await, 1);
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let queue = InMemoryQueue::new();
        queue.set_fail_on_send(true).await;
        let submitter = OrderSubmitter::new(queue.clone());

        let result = submitter
            .submit(OrderRequest::single("CUST-123", "P001", 1))
            .await;
        assert!(matches!(result, Err(QueueError::Transport(_))));
    }

    #[tokio::test]
    async fn each_submission_gets_its_own_correlation_id() {
        let queue = InMemoryQueue::new();
        let submitter = OrderSubmitter::new(queue);

        let a = submitter
            .submit(OrderRequest::single("CUST-123", "P001", 1))
            .await
            .unwrap();
        let b = submitter
            .submit(OrderRequest::single("CUST-123", "P001", 1))
            .await
            .unwrap();
        assert_ne!(a.correlation_id, b.correlation_id);
    }
}
