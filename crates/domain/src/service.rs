//! Order service: the single authoritative definition of "place an order".

use common::OrderId;

use crate::catalog::CatalogGateway;
use crate::error::{InfrastructureFault, OrderError, PlaceOrderError};
use crate::order::Order;
use crate::request::{OrderLineRequest, OrderRequest};
use crate::store::OrderStore;
use crate::value_objects::{CustomerId, OrderLine};

/// Service for placing and retrieving orders.
///
/// Depends only on the capability traits, never on concrete transport
/// clients, so every topology front-end shares the same kernel and tests
/// substitute in-memory fakes. Holds no invocation-spanning mutable
/// state; safe to share across concurrent invocations.
pub struct OrderService<C: CatalogGateway, S: OrderStore> {
    catalog: C,
    store: S,
}

impl<C: CatalogGateway, S: OrderStore> OrderService<C, S> {
    /// Creates a new order service over the given collaborators.
    pub fn new(catalog: C, store: S) -> Self {
        Self { catalog, store }
    }

    /// Validates, enriches, prices, and persists an order.
    ///
    /// Shape validation happens before any external call. Lines are
    /// enriched sequentially in input order and processing stops at the
    /// first failing line. An order is persisted if and only if every
    /// line enriched successfully; on any failure the store is never
    /// called.
    #[tracing::instrument(skip(self, request), fields(customer_id = %request.customer_id, lines = request.items.len()))]
    pub async fn place_order(&self, request: OrderRequest) -> Result<Order, PlaceOrderError> {
        let customer_id = request.customer_id.trim();
        if customer_id.is_empty() {
            metrics::counter!("orders_rejected").increment(1);
            return Err(OrderError::CustomerIdRequired.into());
        }
        if request.items.is_empty() {
            metrics::counter!("orders_rejected").increment(1);
            return Err(OrderError::ItemsRequired.into());
        }

        let mut lines = Vec::with_capacity(request.items.len());
        for item in &request.items {
            match self.enrich_line(item).await {
                Ok(line) => lines.push(line),
                Err(e) => {
                    if e.as_domain().is_some() {
                        metrics::counter!("orders_rejected").increment(1);
                        tracing::info!(product_id = %item.product_id, error = %e, "order rejected");
                    }
                    return Err(e);
                }
            }
        }

        let order = Order::confirmed(CustomerId::new(customer_id), lines);
        self.store.save(&order).await?;

        metrics::counter!("orders_placed").increment(1);
        tracing::info!(order_id = %order.id, total = %order.total_amount, "order confirmed");

        Ok(order)
    }

    /// Loads an order by ID. Pure read-through, no business logic.
    ///
    /// Returns `None` if the order doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>, InfrastructureFault> {
        self.store.get_by_id(order_id).await
    }

    /// Enriches one requested line with catalog data.
    ///
    /// Exactly one catalog read per line, and none at all for a line
    /// rejected on quantity.
    async fn enrich_line(&self, item: &OrderLineRequest) -> Result<OrderLine, PlaceOrderError> {
        if item.quantity == 0 {
            return Err(OrderError::InvalidQuantity {
                product_id: item.product_id.clone(),
            }
            .into());
        }

        let product = self
            .catalog
            .get_product(&item.product_id)
            .await?
            .ok_or_else(|| OrderError::ProductNotFound {
                product_id: item.product_id.clone(),
            })?;

        if !product.in_stock {
            return Err(OrderError::ProductOutOfStock {
                product_id: product.product_id,
                product_name: product.product_name,
            }
            .into());
        }

        Ok(OrderLine::new(
            product.product_id,
            product.product_name,
            product.category,
            item.quantity,
            product.unit_price,
        ))
    }
}
