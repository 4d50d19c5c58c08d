//! Inbound order request shapes.
//!
//! An `OrderRequest` is transient: constructed per call, normalized by a
//! topology front-end, handled by the service, and never persisted as-is.

use serde::{Deserialize, Serialize};

use crate::value_objects::ProductId;

/// A single requested line: which product and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    /// The product identifier.
    pub product_id: ProductId,

    /// Requested quantity. Must be positive; zero is rejected by the
    /// service before any catalog call is made for the line.
    pub quantity: u32,
}

impl OrderLineRequest {
    /// Creates a new line request.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A request to place an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Raw customer identifier as submitted. Validated (non-empty after
    /// trimming) by the service, not here.
    pub customer_id: String,

    /// Requested lines, in submission order.
    pub items: Vec<OrderLineRequest>,
}

impl OrderRequest {
    /// Creates a new order request.
    pub fn new(customer_id: impl Into<String>, items: Vec<OrderLineRequest>) -> Self {
        Self {
            customer_id: customer_id.into(),
            items,
        }
    }

    /// Convenience constructor for a single-line request.
    pub fn single(
        customer_id: impl Into<String>,
        product_id: impl Into<ProductId>,
        quantity: u32,
    ) -> Self {
        Self::new(customer_id, vec![OrderLineRequest::new(product_id, quantity)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_builds_one_line() {
        let request = OrderRequest::single("CUST-123", "P001", 2);
        assert_eq!(request.customer_id, "CUST-123");
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].product_id.as_str(), "P001");
        assert_eq!(request.items[0].quantity, 2);
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = OrderRequest::single("CUST-123", "P001", 2);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["customerId"], "CUST-123");
        assert_eq!(json["items"][0]["productId"], "P001");
        assert_eq!(json["items"][0]["quantity"], 2);
    }

    #[test]
    fn request_roundtrip() {
        let request = OrderRequest::new(
            "CUST-123",
            vec![
                OrderLineRequest::new("P001", 2),
                OrderLineRequest::new("P002", 1),
            ],
        );
        let json = serde_json::to_string(&request).unwrap();
        let back: OrderRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
