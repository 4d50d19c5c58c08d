//! Publisher side of the event-bus topology.

use domain::Order;

use crate::client::EventBusClient;
use crate::error::BusError;
use crate::event::{ORDER_PLACED, OrderPlaced};

/// Emits `order.placed` once per confirmed order.
///
/// Has zero knowledge of how many subscribers exist or what they do;
/// returns as soon as the bus accepts the event.
pub struct OrderPlacedPublisher<B: EventBusClient> {
    bus: B,
}

impl<B: EventBusClient> OrderPlacedPublisher<B> {
    /// Creates a publisher over the given bus client.
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Snapshots the order and publishes it.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn publish(&self, order: &Order) -> Result<(), BusError> {
        let event = OrderPlaced::from_order(order);
        let payload = serde_json::to_value(&event)?;

        self.bus.publish(ORDER_PLACED, payload).await?;

        tracing::info!(order_id = %order.id, "order.placed published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryEventBus;
    use crate::subscriber::AnalyticsSubscriber;
    use domain::{CustomerId, Money, OrderLine};
    use std::sync::Arc;

    fn sample_order() -> Order {
        Order::confirmed(
            CustomerId::new("CUST-123"),
            vec![OrderLine::new(
                "P001",
                "Widget Pro",
                "Electronics",
                2,
                Money::from_cents(2999),
            )],
        )
    }

    #[tokio::test]
    async fn publish_reaches_a_subscriber() {
        let bus = InMemoryEventBus::new();
        let analytics = Arc::new(AnalyticsSubscriber::new());
        bus.subscribe(ORDER_PLACED, analytics.clone()).await;

        let publisher = OrderPlacedPublisher::new(bus);
        publisher.publish(&sample_order()).await.unwrap();

        assert_eq!(analytics.orders_seen(), 1);
        assert_eq!(analytics.revenue_cents(), 5998);
    }

    #[tokio::test]
    async fn publish_succeeds_with_no_subscribers() {
        let publisher = OrderPlacedPublisher::new(InMemoryEventBus::new());
        assert!(publisher.publish(&sample_order()).await.is_ok());
    }

    #[tokio::test]
    async fn bus_fault_propagates_to_publisher() {
        let bus = InMemoryEventBus::new();
        bus.set_fail_on_publish(true);

        let publisher = OrderPlacedPublisher::new(bus);
        let result = publisher.publish(&sample_order()).await;
        assert!(matches!(result, Err(BusError::Transport(_))));
    }
}
