//! Synchronous front door over the order service.

use domain::{
    CatalogGateway, Order, OrderRequest, OrderService, OrderStore, PlaceOrderError,
};

use crate::payment::PaymentProcessor;

/// Places orders in a single blocking call chain.
///
/// The caller waits for the order service and then for the downstream
/// payment hop; any failure or delay anywhere in the chain is the
/// caller's failure or delay. Deliberately unhardened: adding retries or
/// a local timeout here would hide the coupling this topology exists to
/// demonstrate.
pub struct DirectFrontend<C: CatalogGateway, S: OrderStore, P: PaymentProcessor> {
    service: OrderService<C, S>,
    payments: P,
}

impl<C: CatalogGateway, S: OrderStore, P: PaymentProcessor> DirectFrontend<C, S, P> {
    /// Creates a front-end over the order service and downstream hop.
    pub fn new(service: OrderService<C, S>, payments: P) -> Self {
        Self { service, payments }
    }

    /// Places an order and confirms payment, synchronously.
    ///
    /// Note the failure mode: if the downstream hop fails after the
    /// order was persisted, the caller sees an error for an order that
    /// exists. The decoupled topologies avoid exactly this.
    #[tracing::instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn place_order_sync(&self, request: OrderRequest) -> Result<Order, PlaceOrderError> {
        let order = self.service.place_order(request).await?;

        let confirmation = self.payments.confirm(&order).await?;

        metrics::counter!("direct_orders_placed").increment(1);
        tracing::info!(order_id = %order.id, payment_id = %confirmation.payment_id, "order placed synchronously");

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::InMemoryPaymentProcessor;
    use domain::{
        InMemoryCatalog, InMemoryOrderStore, Money, OrderError, ProductDetails,
    };
    use std::time::Duration;
    use tokio::time::Instant;

    fn setup() -> (
        DirectFrontend<InMemoryCatalog, InMemoryOrderStore, InMemoryPaymentProcessor>,
        InMemoryPaymentProcessor,
        InMemoryOrderStore,
    ) {
        let catalog = InMemoryCatalog::new();
        catalog.insert(ProductDetails::new(
            "P001",
            "Widget Pro",
            Money::from_cents(2999),
            "Electronics",
            true,
        ));
        let store = InMemoryOrderStore::new();
        let payments = InMemoryPaymentProcessor::new();
        let frontend = DirectFrontend::new(
            OrderService::new(catalog, store.clone()),
            payments.clone(),
        );
        (frontend, payments, store)
    }

    #[tokio::test]
    async fn caller_gets_the_full_order_back() {
        let (frontend, payments, store) = setup();

        let order = frontend
            .place_order_sync(OrderRequest::single("CUST-123", "P001", 2))
            .await
            .unwrap();

        assert_eq!(order.total_amount, Money::from_cents(5998));
        assert_eq!(payments.confirmation_count(), 1);
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn domain_rejection_skips_the_downstream_hop() {
        let (frontend, payments, store) = setup();

        let err = frontend
            .place_order_sync(OrderRequest::single("CUST-123", "P999", 1))
            .await
            .unwrap_err();

        assert_eq!(
            err.as_domain(),
            Some(&OrderError::ProductNotFound {
                product_id: "P999".into()
            })
        );
        assert_eq!(payments.confirmation_count(), 0);
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn downstream_failure_is_the_callers_failure() {
        let (frontend, payments, store) = setup();
        payments.set_fail_on_confirm(true);

        let err = frontend
            .place_order_sync(OrderRequest::single("CUST-123", "P001", 1))
            .await
            .unwrap_err();

        assert!(err.is_infrastructure());
        // The coupling flaw on display: the order was already persisted
        // before the downstream hop failed.
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn downstream_latency_is_transmitted_in_full() {
        tokio::time::pause();
        let (frontend, payments, _) = setup();
        payments.set_latency(Duration::from_secs(5));

        let started = Instant::now();
        frontend
            .place_order_sync(OrderRequest::single("CUST-123", "P001", 1))
            .await
            .unwrap();

        // No local timeout budget: the caller waits the whole 5 seconds.
        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
