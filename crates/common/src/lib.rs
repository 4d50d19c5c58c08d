//! Shared identifier types used across the order-topologies workspace.

pub mod types;

pub use types::{CorrelationId, MessageId, OrderId};
