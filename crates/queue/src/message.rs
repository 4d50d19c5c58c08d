//! Message shapes for the queue topology.

use common::{CorrelationId, MessageId};
use domain::OrderRequest;
use serde::{Deserialize, Serialize};

/// Serialized projection of an accepted order request.
///
/// One message corresponds to exactly one order-placement attempt. The
/// correlation ID is generated at submission and handed back to the
/// caller; it is the only handle the caller has on the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMessage {
    /// Correlation ID generated at submission time.
    pub correlation_id: CorrelationId,

    /// The order request as submitted.
    pub request: OrderRequest,
}

impl QueueMessage {
    /// Wraps a request with a fresh correlation ID.
    pub fn new(request: OrderRequest) -> Self {
        Self {
            correlation_id: CorrelationId::new(),
            request,
        }
    }
}

/// A message as delivered by the transport to a batch consumer.
///
/// Visible to exactly one consumer at a time while being processed;
/// returns to visibility after the queue's visibility timeout if not
/// acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    /// Transport-assigned message ID; failures are reported against it.
    pub message_id: MessageId,

    /// How many times this message has been delivered, this delivery
    /// included.
    pub receive_count: u32,

    /// The raw message body.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_message_roundtrip() {
        let message = QueueMessage::new(OrderRequest::single("CUST-123", "P001", 2));
        let json = serde_json::to_string(&message).unwrap();
        let back: QueueMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(message, back);
    }

    #[test]
    fn queue_message_wire_field_names() {
        let message = QueueMessage::new(OrderRequest::single("CUST-123", "P001", 2));
        let json = serde_json::to_value(&message).unwrap();
        assert!(json["correlationId"].is_string());
        assert_eq!(json["request"]["customerId"], "CUST-123");
    }

    #[test]
    fn fresh_correlation_ids_per_message() {
        let a = QueueMessage::new(OrderRequest::single("CUST-123", "P001", 1));
        let b = QueueMessage::new(OrderRequest::single("CUST-123", "P001", 1));
        assert_ne!(a.correlation_id, b.correlation_id);
    }
}
