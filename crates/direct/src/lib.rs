//! Direct invocation topology: synchronous coupling made visible.
//!
//! The caller blocks until the order service and the downstream payment
//! hop both complete. There is no retry, no buffering, and no local
//! timeout budget: downstream latency and failure are transmitted to the
//! caller instantly and in full. This topology exists as the contrast
//! case against the queue and event-bus topologies and must stay
//! unhardened.

pub mod frontend;
pub mod payment;

pub use frontend::DirectFrontend;
pub use payment::{InMemoryPaymentProcessor, PaymentConfirmation, PaymentProcessor};
