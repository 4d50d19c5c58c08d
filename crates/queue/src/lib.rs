//! Queue topology: decoupled order submission and processing.
//!
//! The producer enqueues a message and returns immediately; a consumer
//! receives bounded batches and places each order independently,
//! reporting the failed subset so the transport redelivers only those.
//! Delivery is at-least-once with a visibility timeout, a bounded
//! receive count, and dead-letter diversion — never a silent drop.

pub mod client;
pub mod consumer;
pub mod error;
pub mod message;
pub mod producer;
pub mod worker;

pub use client::{InMemoryQueue, QueueClient, QueueConfig};
pub use consumer::{BatchConsumer, BatchReport, ProcessError};
pub use error::QueueError;
pub use message::{QueueMessage, ReceivedMessage};
pub use producer::{Accepted, OrderSubmitter};
pub use worker::{DrainOutcome, QueueWorker};
