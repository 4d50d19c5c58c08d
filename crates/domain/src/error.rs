//! Error taxonomy for the order domain.
//!
//! Two distinct categories per the propagation policy:
//! - [`OrderError`]: domain validation and business failures, detected
//!   either before any external call or during enrichment. Typed
//!   outcomes, never retried.
//! - [`InfrastructureFault`]: transport-level failures from the external
//!   collaborators. Surfaced to the calling topology, which owns retry
//!   policy.

use thiserror::Error;

use crate::value_objects::ProductId;

/// Domain-level failures from placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The customer ID was empty after trimming.
    #[error("customer id is required")]
    CustomerIdRequired,

    /// The request contained no items.
    #[error("order must contain at least one item")]
    ItemsRequired,

    /// A line requested a non-positive quantity.
    #[error("invalid quantity for product {product_id}: must be greater than zero")]
    InvalidQuantity { product_id: ProductId },

    /// The catalog has no product with this ID.
    #[error("product not found: {product_id}")]
    ProductNotFound { product_id: ProductId },

    /// The product exists but is not in stock.
    #[error("product {product_id} ({product_name}) is out of stock")]
    ProductOutOfStock {
        product_id: ProductId,
        product_name: String,
    },
}

/// Transport-level failures from external collaborators.
///
/// Distinct from [`OrderError`]: a malfunctioning catalog or store is not
/// a statement about the order itself.
#[derive(Debug, Error)]
pub enum InfrastructureFault {
    /// The catalog gateway call failed (as opposed to returning NotFound).
    #[error("catalog gateway fault: {0}")]
    Catalog(String),

    /// The order store read or write failed.
    #[error("order store fault: {0}")]
    Store(String),

    /// A downstream dependency invoked by a topology front-end failed.
    #[error("downstream fault: {0}")]
    Downstream(String),

    /// A payload could not be serialized or deserialized.
    #[error("serialization fault: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The full outcome space of `place_order`.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The request was rejected by validation or business rules.
    #[error(transparent)]
    Domain(#[from] OrderError),

    /// An external collaborator failed.
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureFault),
}

impl PlaceOrderError {
    /// Returns the domain error, if this is one.
    pub fn as_domain(&self) -> Option<&OrderError> {
        match self {
            PlaceOrderError::Domain(e) => Some(e),
            PlaceOrderError::Infrastructure(_) => None,
        }
    }

    /// True if the failure came from an external collaborator rather than
    /// the request itself.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, PlaceOrderError::Infrastructure(_))
    }
}
