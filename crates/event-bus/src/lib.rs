//! Event-bus topology: true fan-out to independent subscribers.
//!
//! After an order is confirmed, a publisher emits a single `order.placed`
//! event and returns. The bus delivers an independent copy to every
//! matching subscriber with no ordering guarantee among them; one
//! subscriber's failure has no effect on delivery to, or the outcome of,
//! any other. Subscribers may additionally sit behind their own private
//! queue for independent retry ([`QueuedSubscriber`]).

pub mod client;
pub mod error;
pub mod event;
pub mod publisher;
pub mod queued;
pub mod subscriber;

pub use client::{EventBusClient, InMemoryEventBus};
pub use error::{BusError, SubscriberError};
pub use event::{EventEnvelope, ORDER_PLACED, OrderPlaced};
pub use publisher::OrderPlacedPublisher;
pub use queued::{QueuedDrainOutcome, QueuedSubscriber};
pub use subscriber::{AnalyticsSubscriber, EventSubscriber, NotificationSubscriber};
