//! Demo entry point: one order scenario through each delivery topology.

mod config;

use std::sync::Arc;

use direct::{DirectFrontend, InMemoryPaymentProcessor};
use domain::{
    InMemoryCatalog, InMemoryOrderStore, Money, OrderRequest, OrderService, ProductDetails,
};
use event_bus::{
    AnalyticsSubscriber, InMemoryEventBus, NotificationSubscriber, ORDER_PLACED,
    OrderPlacedPublisher, QueuedSubscriber,
};
use queue::{BatchConsumer, InMemoryQueue, OrderSubmitter, QueueClient, QueueWorker};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::Config;

fn seeded_catalog() -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    catalog.insert(ProductDetails::new(
        "P001",
        "Widget Pro",
        Money::from_cents(2999),
        "Electronics",
        true,
    ));
    catalog.insert(ProductDetails::new(
        "P002",
        "Gadget",
        Money::from_cents(500),
        "Electronics",
        true,
    ));
    catalog.insert(ProductDetails::new(
        "P003",
        "Doohickey",
        Money::from_cents(1250),
        "Hardware",
        false,
    ));
    catalog
}

async fn run_direct(catalog: InMemoryCatalog, store: InMemoryOrderStore) {
    tracing::info!("--- direct invocation topology ---");

    let frontend = DirectFrontend::new(
        OrderService::new(catalog, store),
        InMemoryPaymentProcessor::new(),
    );

    match frontend
        .place_order_sync(OrderRequest::single("CUST-123", "P001", 2))
        .await
    {
        Ok(order) => tracing::info!(order_id = %order.id, total = %order.total_amount, "direct order placed"),
        Err(e) => tracing::error!(error = %e, "direct order failed"),
    }

    // Out-of-stock product: the caller sees the rejection immediately.
    if let Err(e) = frontend
        .place_order_sync(OrderRequest::single("CUST-123", "P003", 1))
        .await
    {
        tracing::info!(error = %e, "direct order rejected as expected");
    }
}

async fn run_queue(config: &Config, catalog: InMemoryCatalog, store: InMemoryOrderStore) {
    tracing::info!("--- queue topology ---");

    let queue = InMemoryQueue::with_config(config.queue_config());
    let submitter = OrderSubmitter::new(queue.clone());
    let consumer = BatchConsumer::new(OrderService::new(catalog, store.clone()));
    let worker = QueueWorker::new(queue.clone(), consumer);

    for customer in ["CUST-123", "CUST-456", "CUST-789"] {
        match submitter
            .submit(OrderRequest::single(customer, "P001", 1))
            .await
        {
            Ok(accepted) => {
                tracing::info!(correlation_id = %accepted.correlation_id, %customer, "submitted")
            }
            Err(e) => tracing::error!(error = %e, "submission failed"),
        }
    }

    // A poison message alongside the good ones.
    if let Err(e) = queue.send("{not json".to_string()).await {
        tracing::error!(error = %e, "raw send failed");
    }

    let outcome = worker.drain().await;
    tracing::info!(
        received = outcome.received,
        succeeded = outcome.succeeded,
        failed = outcome.failed,
        persisted = store.order_count().await,
        "queue drain complete; failed messages retry after the visibility timeout"
    );

    // Let the poison message exhaust its receives and dead-letter.
    for _ in 0..config.max_receive_count {
        tokio::time::sleep(config.visibility_timeout).await;
        worker.run_once().await;
    }
    tracing::info!(
        dead_letters = queue.dead_letter_count().await,
        "poison message diverted to the dead-letter buffer"
    );
}

async fn run_event_bus(config: &Config, catalog: InMemoryCatalog, store: InMemoryOrderStore) {
    tracing::info!("--- event-bus topology ---");

    let bus = InMemoryEventBus::new();
    let analytics = Arc::new(AnalyticsSubscriber::new());
    let notifications = Arc::new(NotificationSubscriber::new());
    let buffered = Arc::new(QueuedSubscriber::new(
        Arc::new(NotificationSubscriber::new()),
        InMemoryQueue::with_config(config.queue_config()),
    ));
    bus.subscribe(ORDER_PLACED, analytics.clone()).await;
    bus.subscribe(ORDER_PLACED, notifications.clone()).await;
    bus.subscribe(ORDER_PLACED, buffered.clone()).await;

    let service = OrderService::new(catalog, store);
    let publisher = OrderPlacedPublisher::new(bus);

    for (customer, product, quantity) in
        [("CUST-123", "P001", 2), ("CUST-456", "P002", 5)]
    {
        match service
            .place_order(OrderRequest::single(customer, product, quantity))
            .await
        {
            Ok(order) => {
                if let Err(e) = publisher.publish(&order).await {
                    tracing::error!(error = %e, "publish failed");
                }
            }
            Err(e) => tracing::error!(error = %e, "order failed"),
        }
    }

    buffered.drain_once().await;

    tracing::info!(
        orders_seen = analytics.orders_seen(),
        revenue = %Money::from_cents(analytics.revenue_cents()),
        notifications = notifications.notifications().len(),
        "fan-out complete"
    );
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Shared collaborators: one catalog, one store, three topologies
    let catalog = seeded_catalog();
    let store = InMemoryOrderStore::new();

    run_direct(catalog.clone(), store.clone()).await;
    run_queue(&config, catalog.clone(), store.clone()).await;
    run_event_bus(&config, catalog, store.clone()).await;

    tracing::info!(orders = store.order_count().await, "all topologies done");
    println!("{}", metrics_handle.render());
}
