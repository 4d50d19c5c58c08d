//! Error types for the event-bus topology.

use thiserror::Error;

/// Errors from publishing to the bus.
///
/// Subscriber outcomes are not part of this: publishing succeeds
/// independently of what subscribers do with the event.
#[derive(Debug, Error)]
pub enum BusError {
    /// The bus itself rejected or failed the publish.
    #[error("event bus transport error: {0}")]
    Transport(String),

    /// The event payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A failure inside a single subscriber's handler.
///
/// Isolated per subscriber; the bus logs and counts it, and every other
/// subscriber still receives its own copy of the event.
#[derive(Debug, Error)]
#[error("subscriber {subscriber} failed: {message}")]
pub struct SubscriberError {
    /// Which subscriber failed.
    pub subscriber: String,

    /// Human-readable failure description.
    pub message: String,
}

impl SubscriberError {
    /// Creates a subscriber error.
    pub fn new(subscriber: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subscriber: subscriber.into(),
            message: message.into(),
        }
    }
}
