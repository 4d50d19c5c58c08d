//! Subscriber contract and the concrete reactors shipped with the demo.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::SubscriberError;
use crate::event::EventEnvelope;

/// Contract every independent reactor implements.
///
/// Each subscriber is invoked with its own copy of the event, on its own
/// schedule, with its own success/failure outcome. Subscribers must not
/// assume anything about ordering relative to other subscribers.
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// Stable name for logs and metrics.
    fn name(&self) -> &str;

    /// Handles one event delivery.
    async fn handle(&self, event: &EventEnvelope) -> Result<(), SubscriberError>;
}

#[derive(Debug, Default)]
struct AnalyticsState {
    orders_seen: u64,
    revenue_cents: i64,
}

/// Accumulates order counts and revenue from `order.placed` events.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsSubscriber {
    state: Arc<RwLock<AnalyticsState>>,
}

impl AnalyticsSubscriber {
    /// Creates a new analytics subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many orders have been observed.
    pub fn orders_seen(&self) -> u64 {
        self.state.read().unwrap().orders_seen
    }

    /// Returns accumulated revenue in cents.
    pub fn revenue_cents(&self) -> i64 {
        self.state.read().unwrap().revenue_cents
    }
}

#[async_trait]
impl EventSubscriber for AnalyticsSubscriber {
    fn name(&self) -> &str {
        "analytics"
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<(), SubscriberError> {
        let placed = event
            .order_placed()
            .map_err(|e| SubscriberError::new(self.name(), e.to_string()))?;

        let mut state = self.state.write().unwrap();
        state.orders_seen += 1;
        state.revenue_cents += placed.total_amount.cents();

        tracing::debug!(order_id = %placed.order_id, "analytics updated");
        Ok(())
    }
}

/// Records a customer notification per `order.placed` event.
#[derive(Debug, Clone, Default)]
pub struct NotificationSubscriber {
    notifications: Arc<RwLock<Vec<String>>>,
}

impl NotificationSubscriber {
    /// Creates a new notification subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications sent so far.
    pub fn notifications(&self) -> Vec<String> {
        self.notifications.read().unwrap().clone()
    }
}

#[async_trait]
impl EventSubscriber for NotificationSubscriber {
    fn name(&self) -> &str {
        "notification"
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<(), SubscriberError> {
        let placed = event
            .order_placed()
            .map_err(|e| SubscriberError::new(self.name(), e.to_string()))?;

        let message = format!(
            "order {} confirmed for {} ({})",
            placed.order_id, placed.customer_id, placed.total_amount
        );
        self.notifications.write().unwrap().push(message);

        Ok(())
    }
}
