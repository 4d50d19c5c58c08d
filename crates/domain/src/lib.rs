//! Order domain layer.
//!
//! This crate provides the single authoritative definition of "place an
//! order", independent of how the request arrived:
//! - Value objects (customer, product, money, enriched order lines)
//! - The `Order` record and its request shape
//! - Capability traits for the external collaborators (catalog, store)
//!   with in-memory implementations
//! - The `OrderService` that validates, enriches, prices, and persists

pub mod catalog;
pub mod error;
pub mod order;
pub mod request;
pub mod service;
pub mod store;
pub mod value_objects;

pub use catalog::{CatalogGateway, InMemoryCatalog, ProductDetails};
pub use error::{InfrastructureFault, OrderError, PlaceOrderError};
pub use order::{Order, OrderStatus};
pub use request::{OrderLineRequest, OrderRequest};
pub use service::OrderService;
pub use store::{InMemoryOrderStore, OrderStore};
pub use value_objects::{CustomerId, Money, OrderLine, ProductId};
