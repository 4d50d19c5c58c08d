//! Event bus client trait and in-memory fan-out implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures_util::future::join_all;
use tokio::sync::RwLock;

use crate::error::BusError;
use crate::event::EventEnvelope;
use crate::subscriber::EventSubscriber;

/// Trait for publishing events to a one-to-many dispatch bus.
///
/// The publisher never enumerates or knows its subscribers; the bus
/// delivers the payload independently to every subscription currently
/// matching the event type.
#[async_trait]
pub trait EventBusClient: Send + Sync {
    /// Publishes an event. Succeeds once the bus accepts it, regardless
    /// of subscriber outcomes.
    async fn publish(
        &self,
        event_type: &str,
        payload: serde_json::Value,
    ) -> Result<(), BusError>;
}

/// In-memory event bus with per-event-type subscriptions.
///
/// Delivery is concurrent and unordered across subscribers; failures are
/// isolated per subscriber (logged and counted, never propagated to the
/// publisher or to sibling subscribers). Handlers subscribed after a
/// publish do not see earlier events.
#[derive(Clone, Default)]
pub struct InMemoryEventBus {
    subscriptions: Arc<RwLock<HashMap<String, Vec<Arc<dyn EventSubscriber>>>>>,
    fail_on_publish: Arc<AtomicBool>,
}

impl InMemoryEventBus {
    /// Creates a new bus with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber for an event type.
    pub async fn subscribe(&self, event_type: impl Into<String>, subscriber: Arc<dyn EventSubscriber>) {
        let mut subscriptions = self.subscriptions.write().await;
        subscriptions
            .entry(event_type.into())
            .or_default()
            .push(subscriber);
    }

    /// Returns how many subscribers match an event type.
    pub async fn subscriber_count(&self, event_type: &str) -> usize {
        self.subscriptions
            .read()
            .await
            .get(event_type)
            .map_or(0, Vec::len)
    }

    /// Configures the bus to fail publishes with a transport error.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.fail_on_publish.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventBusClient for InMemoryEventBus {
    async fn publish(
        &self,
        event_type: &str,
        payload: serde_json::Value,
    ) -> Result<(), BusError> {
        if self.fail_on_publish.load(Ordering::SeqCst) {
            return Err(BusError::Transport("bus unreachable".to_string()));
        }

        // Snapshot the matching subscribers, then release the lock before
        // dispatching so slow handlers never block new subscriptions.
        let subscribers = {
            let subscriptions = self.subscriptions.read().await;
            subscriptions.get(event_type).cloned().unwrap_or_default()
        };

        metrics::counter!("bus_events_published").increment(1);

        let envelope = EventEnvelope::new(event_type, payload);
        let deliveries = subscribers.iter().map(|subscriber| {
            let envelope = envelope.clone();
            async move {
                match subscriber.handle(&envelope).await {
                    Ok(()) => {
                        metrics::counter!("bus_deliveries_succeeded").increment(1);
                    }
                    Err(e) => {
                        metrics::counter!("bus_deliveries_failed").increment(1);
                        tracing::warn!(subscriber = subscriber.name(), error = %e, "subscriber failed");
                    }
                }
            }
        });
        join_all(deliveries).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubscriberError;
    use std::sync::RwLock as StdRwLock;

    /// Records every envelope it receives.
    #[derive(Default)]
    struct RecordingSubscriber {
        seen: Arc<StdRwLock<Vec<EventEnvelope>>>,
    }

    impl RecordingSubscriber {
        fn seen_count(&self) -> usize {
            self.seen.read().unwrap().len()
        }
    }

    #[async_trait]
    impl EventSubscriber for RecordingSubscriber {
        fn name(&self) -> &str {
            "recording"
        }

        async fn handle(&self, event: &EventEnvelope) -> Result<(), SubscriberError> {
            self.seen.write().unwrap().push(event.clone());
            Ok(())
        }
    }

    /// Always fails.
    struct FailingSubscriber;

    #[async_trait]
    impl EventSubscriber for FailingSubscriber {
        fn name(&self) -> &str {
            "failing"
        }

        async fn handle(&self, _event: &EventEnvelope) -> Result<(), SubscriberError> {
            Err(SubscriberError::new("failing", "boom"))
        }
    }

    #[tokio::test]
    async fn all_matching_subscribers_receive_the_event() {
        let bus = InMemoryEventBus::new();
        let a = Arc::new(RecordingSubscriber::default());
        let b = Arc::new(RecordingSubscriber::default());
        let c = Arc::new(RecordingSubscriber::default());
        bus.subscribe("order.placed", a.clone()).await;
        bus.subscribe("order.placed", b.clone()).await;
        bus.subscribe("order.placed", c.clone()).await;

        bus.publish("order.placed", serde_json::json!({"n": 1}))
            .await
            .unwrap();

        assert_eq!(a.seen_count(), 1);
        assert_eq!(b.seen_count(), 1);
        assert_eq!(c.seen_count(), 1);
    }

    #[tokio::test]
    async fn non_matching_event_types_are_not_delivered() {
        let bus = InMemoryEventBus::new();
        let subscriber = Arc::new(RecordingSubscriber::default());
        bus.subscribe("order.placed", subscriber.clone()).await;

        bus.publish("order.cancelled", serde_json::json!({}))
            .await
            .unwrap();

        assert_eq!(subscriber.seen_count(), 0);
    }

    #[tokio::test]
    async fn one_failing_subscriber_does_not_suppress_the_others() {
        let bus = InMemoryEventBus::new();
        let before = Arc::new(RecordingSubscriber::default());
        let after = Arc::new(RecordingSubscriber::default());
        bus.subscribe("order.placed", before.clone()).await;
        bus.subscribe("order.placed", Arc::new(FailingSubscriber)).await;
        bus.subscribe("order.placed", after.clone()).await;

        // Publish still succeeds.
        bus.publish("order.placed", serde_json::json!({}))
            .await
            .unwrap();

        assert_eq!(before.seen_count(), 1);
        assert_eq!(after.seen_count(), 1);
    }

    #[tokio::test]
    async fn publish_with_no_subscribers_succeeds() {
        let bus = InMemoryEventBus::new();
        let result = bus.publish("order.placed", serde_json::json!({})).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_events() {
        let bus = InMemoryEventBus::new();
        bus.publish("order.placed", serde_json::json!({}))
            .await
            .unwrap();

        let late = Arc::new(RecordingSubscriber::default());
        bus.subscribe("order.placed", late.clone()).await;
        assert_eq!(late.seen_count(), 0);

        bus.publish("order.placed", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(late.seen_count(), 1);
    }

    #[tokio::test]
    async fn fail_on_publish_surfaces_transport_error() {
        let bus = InMemoryEventBus::new();
        bus.set_fail_on_publish(true);

        let result = bus.publish("order.placed", serde_json::json!({})).await;
        assert!(matches!(result, Err(BusError::Transport(_))));
    }
}
