//! Queue transport error types.

use thiserror::Error;

/// Errors that can occur when interacting with the queue transport.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The send to the queue failed.
    #[error("queue transport error: {0}")]
    Transport(String),

    /// A message body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
