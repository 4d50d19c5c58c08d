//! Domain event shapes for the bus.

use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{CustomerId, Money, Order, ProductId};
use serde::{Deserialize, Serialize};

/// Event type emitted once per confirmed order.
pub const ORDER_PLACED: &str = "order.placed";

/// Immutable snapshot of a confirmed order's essential fields.
///
/// The camelCase field names are the published contract and must not be
/// renamed. The payload names a single product and quantity; for
/// multi-line orders the first line is snapshotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlaced {
    /// The confirmed order's identity.
    pub order_id: OrderId,

    /// The customer who placed it.
    pub customer_id: CustomerId,

    /// Product from the order's first line.
    pub product_id: ProductId,

    /// Quantity from the order's first line.
    pub quantity: u32,

    /// Total across all lines.
    pub total_amount: Money,

    /// When the order was persisted.
    pub placed_at: DateTime<Utc>,
}

impl OrderPlaced {
    /// Snapshots a confirmed order. Orders always carry at least one
    /// line, so the first line is always present.
    pub fn from_order(order: &Order) -> Self {
        let first_line = &order.lines[0];
        Self {
            order_id: order.id,
            customer_id: order.customer_id.clone(),
            product_id: first_line.product_id.clone(),
            quantity: first_line.quantity,
            total_amount: order.total_amount,
            placed_at: order.created_at,
        }
    }
}

/// An event as delivered to subscribers: a named type plus its payload.
///
/// Each subscriber receives its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// The event type (e.g. `"order.placed"`).
    pub event_type: String,

    /// The event payload.
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Creates an envelope.
    pub fn new(event_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }

    /// Deserializes the payload as an `OrderPlaced` snapshot.
    pub fn order_placed(&self) -> Result<OrderPlaced, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::OrderLine;

    fn sample_order() -> Order {
        Order::confirmed(
            CustomerId::new("CUST-123"),
            vec![
                OrderLine::new("P001", "Widget Pro", "Electronics", 2, Money::from_cents(2999)),
                OrderLine::new("P002", "Gadget", "Electronics", 1, Money::from_cents(500)),
            ],
        )
    }

    #[test]
    fn snapshot_takes_first_line_and_full_total() {
        let order = sample_order();
        let event = OrderPlaced::from_order(&order);

        assert_eq!(event.order_id, order.id);
        assert_eq!(event.product_id.as_str(), "P001");
        assert_eq!(event.quantity, 2);
        assert_eq!(event.total_amount, Money::from_cents(6498));
        assert_eq!(event.placed_at, order.created_at);
    }

    #[test]
    fn payload_wire_field_names() {
        let event = OrderPlaced::from_order(&sample_order());
        let json = serde_json::to_value(&event).unwrap();
        assert!(json["orderId"].is_string());
        assert_eq!(json["customerId"], "CUST-123");
        assert_eq!(json["productId"], "P001");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["totalAmount"], 6498);
        assert!(json["placedAt"].is_string());
    }

    #[test]
    fn envelope_payload_roundtrip() {
        let event = OrderPlaced::from_order(&sample_order());
        let envelope = EventEnvelope::new(ORDER_PLACED, serde_json::to_value(&event).unwrap());
        assert_eq!(envelope.event_type, ORDER_PLACED);
        assert_eq!(envelope.order_placed().unwrap(), event);
    }
}
