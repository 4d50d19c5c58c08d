//! Queue client trait and in-memory transport.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::MessageId;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::QueueError;
use crate::message::ReceivedMessage;

/// Trait for sending messages to a queue.
///
/// This is the only capability the producer side needs; receiving and
/// acknowledgement are transport concerns driven by the hosting layer.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Enqueues a message body.
    async fn send(&self, body: String) -> Result<(), QueueError>;
}

/// Configuration for the in-memory queue transport.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Upper bound on messages delivered per batch.
    pub max_batch_size: usize,

    /// How long a delivered message stays invisible before it returns to
    /// visibility if not acknowledged.
    pub visibility_timeout: Duration,

    /// Deliveries allowed before a message is diverted to the dead-letter
    /// buffer.
    pub max_receive_count: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 10,
            visibility_timeout: Duration::from_secs(30),
            max_receive_count: 3,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredMessage {
    id: MessageId,
    body: String,
    receive_count: u32,
    invisible_until: Option<Instant>,
}

#[derive(Debug, Default)]
struct InMemoryQueueState {
    messages: VecDeque<StoredMessage>,
    dead_letters: Vec<StoredMessage>,
    fail_on_send: bool,
}

/// In-memory queue with at-least-once semantics for testing and demos.
///
/// Models the transport contract the consumer relies on: bounded batch
/// delivery, visibility timeout, receive counting, and dead-letter
/// diversion after `max_receive_count` deliveries. No ordering is
/// guaranteed within or across batches.
#[derive(Clone)]
pub struct InMemoryQueue {
    state: Arc<RwLock<InMemoryQueueState>>,
    config: QueueConfig,
}

impl InMemoryQueue {
    /// Creates a queue with default configuration.
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Creates a queue with the given configuration.
    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryQueueState::default())),
            config,
        }
    }

    /// Configures the queue to fail sends with a transport error.
    pub async fn set_fail_on_send(&self, fail: bool) {
        self.state.write().await.fail_on_send = fail;
    }

    /// Delivers a batch of up to `max_batch_size` visible messages.
    ///
    /// Delivered messages become invisible for the visibility timeout.
    /// A message that has already been delivered `max_receive_count`
    /// times is moved to the dead-letter buffer instead of delivered.
    pub async fn receive_batch(&self) -> Vec<ReceivedMessage> {
        let now = Instant::now();
        let mut state = self.state.write().await;
        let mut delivered = Vec::new();

        let mut index = 0;
        while index < state.messages.len() && delivered.len() < self.config.max_batch_size {
            let visible = state.messages[index]
                .invisible_until
                .is_none_or(|until| until <= now);
            if !visible {
                index += 1;
                continue;
            }

            if state.messages[index].receive_count >= self.config.max_receive_count {
                // Exhausted its deliveries without an ack; divert, never drop.
                if let Some(message) = state.messages.remove(index) {
                    tracing::warn!(message_id = %message.id, receive_count = message.receive_count, "dead-lettering message");
                    metrics::counter!("queue_messages_dead_lettered").increment(1);
                    state.dead_letters.push(message);
                }
                continue;
            }

            let message = &mut state.messages[index];
            message.receive_count += 1;
            message.invisible_until = Some(now + self.config.visibility_timeout);
            delivered.push(ReceivedMessage {
                message_id: message.id,
                receive_count: message.receive_count,
                body: message.body.clone(),
            });
            index += 1;
        }

        delivered
    }

    /// Acknowledges a message, removing it permanently.
    pub async fn delete(&self, message_id: MessageId) {
        let mut state = self.state.write().await;
        state.messages.retain(|m| m.id != message_id);
    }

    /// Returns the number of messages still on the queue (visible or not).
    pub async fn message_count(&self) -> usize {
        self.state.read().await.messages.len()
    }

    /// Returns the number of dead-lettered messages.
    pub async fn dead_letter_count(&self) -> usize {
        self.state.read().await.dead_letters.len()
    }

    /// Returns the bodies of all dead-lettered messages.
    pub async fn dead_letter_bodies(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .dead_letters
            .iter()
            .map(|m| m.body.clone())
            .collect()
    }
}

impl Default for InMemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueClient for InMemoryQueue {
    async fn send(&self, body: String) -> Result<(), QueueError> {
        let mut state = self.state.write().await;
        if state.fail_on_send {
            return Err(QueueError::Transport("queue unreachable".to_string()));
        }
        state.messages.push_back(StoredMessage {
            id: MessageId::new(),
            body,
            receive_count: 0,
            invisible_until: None,
        });
        Ok(())
    }
}
