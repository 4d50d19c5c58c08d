//! The persisted order record.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::value_objects::{CustomerId, Money, OrderLine};

/// Status of a persisted order.
///
/// `Confirmed` is the only reachable state: orders that fail validation
/// or enrichment are never materialized, so no failed or pending status
/// ever exists in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Confirmed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Confirmed => write!(f, "CONFIRMED"),
        }
    }
}

/// A confirmed order.
///
/// Created by the order service in one atomic logical step (validate,
/// enrich all lines, persist) and read-only thereafter; no update or
/// delete operation is defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque unique identity, assigned once at confirmation.
    pub id: OrderId,

    /// The customer who placed the order.
    pub customer_id: CustomerId,

    /// Order status.
    pub status: OrderStatus,

    /// UTC timestamp assigned at persistence time.
    pub created_at: DateTime<Utc>,

    /// Enriched lines, in submission order.
    pub lines: Vec<OrderLine>,

    /// Sum of all line totals.
    pub total_amount: Money,
}

impl Order {
    /// Builds a confirmed order from fully enriched lines.
    ///
    /// Assigns a fresh ID, stamps the current UTC time, and computes the
    /// total as the sum of line totals.
    pub fn confirmed(customer_id: CustomerId, lines: Vec<OrderLine>) -> Self {
        let total_amount = lines.iter().map(|line| line.line_total).sum();
        Self {
            id: OrderId::new(),
            customer_id,
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
            lines,
            total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget_line(quantity: u32) -> OrderLine {
        OrderLine::new("P001", "Widget Pro", "Electronics", quantity, Money::from_cents(2999))
    }

    #[test]
    fn confirmed_sums_line_totals() {
        let order = Order::confirmed(
            CustomerId::new("CUST-123"),
            vec![
                widget_line(2),
                OrderLine::new("P002", "Gadget", "Electronics", 1, Money::from_cents(500)),
            ],
        );
        assert_eq!(order.total_amount.cents(), 6498);
        assert_eq!(order.status, OrderStatus::Confirmed);
    }

    #[test]
    fn confirmed_assigns_unique_ids() {
        let a = Order::confirmed(CustomerId::new("CUST-1"), vec![widget_line(1)]);
        let b = Order::confirmed(CustomerId::new("CUST-1"), vec![widget_line(1)]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn status_serializes_screaming_snake() {
        let json = serde_json::to_string(&OrderStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");
    }

    #[test]
    fn order_serializes_camel_case() {
        let order = Order::confirmed(CustomerId::new("CUST-123"), vec![widget_line(2)]);
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["customerId"], "CUST-123");
        assert_eq!(json["status"], "CONFIRMED");
        assert_eq!(json["totalAmount"], 5998);
        assert!(json["createdAt"].is_string());
    }
}
