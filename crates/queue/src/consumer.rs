//! Consumer side of the queue topology: partial-batch-failure processing.

use common::MessageId;
use domain::{CatalogGateway, Order, OrderService, OrderStore, PlaceOrderError};
use serde::Serialize;
use thiserror::Error;

use crate::message::{QueueMessage, ReceivedMessage};

/// Why a single message failed processing.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The body was not a valid queue message.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The order service rejected the request or hit a fault.
    #[error(transparent)]
    PlaceOrder(#[from] PlaceOrderError),
}

/// Outcome of processing one batch.
///
/// Messages whose IDs are absent are fully processed and must not be
/// redelivered; listed messages return to visibility for retry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// IDs of the messages that failed, in batch order.
    pub failed_message_ids: Vec<MessageId>,
}

impl BatchReport {
    /// True if no message in the batch failed.
    pub fn all_succeeded(&self) -> bool {
        self.failed_message_ids.is_empty()
    }

    /// True if the given message was reported failed.
    pub fn is_failed(&self, message_id: MessageId) -> bool {
        self.failed_message_ids.contains(&message_id)
    }
}

/// Processes batches of queued order messages.
///
/// Each message is handled independently: a pure fold from the batch to
/// the set of failed IDs, with no shared mutable accumulator and no
/// batch-wide transaction. One message's failure never affects or rolls
/// back another's success.
pub struct BatchConsumer<C: CatalogGateway, S: OrderStore> {
    service: OrderService<C, S>,
}

impl<C: CatalogGateway, S: OrderStore> BatchConsumer<C, S> {
    /// Creates a consumer over the given order service.
    pub fn new(service: OrderService<C, S>) -> Self {
        Self { service }
    }

    /// Processes each message in the batch independently and reports the
    /// failed subset.
    #[tracing::instrument(skip(self, messages), fields(batch_size = messages.len()))]
    pub async fn process_batch(&self, messages: &[ReceivedMessage]) -> BatchReport {
        let mut failed_message_ids = Vec::new();

        for message in messages {
            match self.process_one(message).await {
                Ok(order) => {
                    metrics::counter!("queue_messages_processed").increment(1);
                    tracing::info!(message_id = %message.message_id, order_id = %order.id, "message processed");
                }
                Err(e) => {
                    metrics::counter!("queue_messages_failed").increment(1);
                    tracing::warn!(message_id = %message.message_id, error = %e, "message failed");
                    failed_message_ids.push(message.message_id);
                }
            }
        }

        BatchReport { failed_message_ids }
    }

    /// Deserializes and places a single order.
    async fn process_one(&self, message: &ReceivedMessage) -> Result<Order, ProcessError> {
        let queue_message: QueueMessage = serde_json::from_str(&message.body)?;
        let order = self.service.place_order(queue_message.request).await?;
        Ok(order)
    }
}
