//! Order store trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use tokio::sync::RwLock;

use crate::error::InfrastructureFault;
use crate::order::Order;

/// Trait for persisting and retrieving orders by ID.
///
/// Key-value semantics keyed on the order ID. Implementations guarantee
/// per-key read-after-write consistency; no cross-order consistency is
/// provided or required.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists an order. At most one save per `place_order` call.
    async fn save(&self, order: &Order) -> Result<(), InfrastructureFault>;

    /// Retrieves an order by ID. Returns `None` if no order exists.
    async fn get_by_id(&self, order_id: OrderId) -> Result<Option<Order>, InfrastructureFault>;
}

#[derive(Debug, Default)]
struct InMemoryOrderStoreState {
    orders: HashMap<OrderId, Order>,
    fail_on_save: bool,
}

/// In-memory order store for testing and demos.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<InMemoryOrderStoreState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail the next save with a transport fault.
    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }

    /// Returns the number of persisted orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, order: &Order) -> Result<(), InfrastructureFault> {
        let mut state = self.state.write().await;
        if state.fail_on_save {
            return Err(InfrastructureFault::Store("write failed".to_string()));
        }
        state.orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn get_by_id(&self, order_id: OrderId) -> Result<Option<Order>, InfrastructureFault> {
        let state = self.state.read().await;
        Ok(state.orders.get(&order_id).cloned())
    }
}
