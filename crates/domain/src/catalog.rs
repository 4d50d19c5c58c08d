//! Catalog gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InfrastructureFault;
use crate::value_objects::{Money, ProductId};

/// Product details returned by the upstream catalog service.
///
/// A volatile snapshot, valid only at the instant of the call. The
/// camelCase field names are contract surface shared with the upstream
/// service and must not be renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    /// The product identifier.
    pub product_id: ProductId,

    /// Human-readable product name.
    pub product_name: String,

    /// Current price per unit.
    pub unit_price: Money,

    /// Product category.
    pub category: String,

    /// Whether the product is currently in stock.
    pub in_stock: bool,
}

impl ProductDetails {
    /// Creates product details.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        unit_price: Money,
        category: impl Into<String>,
        in_stock: bool,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            unit_price,
            category: category.into(),
            in_stock,
        }
    }
}

/// Trait for fetching product details from the upstream catalog.
///
/// A pure read with no side effects on the domain. `Ok(None)` means the
/// product does not exist; `Err` means the gateway itself failed.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Looks up a product by ID.
    async fn get_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<ProductDetails>, InfrastructureFault>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: HashMap<ProductId, ProductDetails>,
    fail_on_get: bool,
    lookups: u64,
}

/// In-memory catalog for testing and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalog {
    /// Creates a new empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a product.
    pub fn insert(&self, product: ProductDetails) {
        let mut state = self.state.write().unwrap();
        state.products.insert(product.product_id.clone(), product);
    }

    /// Configures the catalog to fail every lookup with a transport fault.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.state.write().unwrap().fail_on_get = fail;
    }

    /// Returns how many lookups have been made.
    pub fn lookup_count(&self) -> u64 {
        self.state.read().unwrap().lookups
    }
}

#[async_trait]
impl CatalogGateway for InMemoryCatalog {
    async fn get_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<ProductDetails>, InfrastructureFault> {
        let mut state = self.state.write().unwrap();
        state.lookups += 1;

        if state.fail_on_get {
            return Err(InfrastructureFault::Catalog(
                "catalog unreachable".to_string(),
            ));
        }

        Ok(state.products.get(product_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ProductDetails {
        ProductDetails::new("P001", "Widget Pro", Money::from_cents(2999), "Electronics", true)
    }

    #[tokio::test]
    async fn lookup_returns_inserted_product() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(widget());

        let found = catalog.get_product(&ProductId::new("P001")).await.unwrap();
        assert_eq!(found, Some(widget()));
        assert_eq!(catalog.lookup_count(), 1);
    }

    #[tokio::test]
    async fn lookup_of_unknown_product_is_none_not_error() {
        let catalog = InMemoryCatalog::new();
        let found = catalog.get_product(&ProductId::new("P999")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fail_on_get_surfaces_transport_fault() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(widget());
        catalog.set_fail_on_get(true);

        let result = catalog.get_product(&ProductId::new("P001")).await;
        assert!(matches!(result, Err(InfrastructureFault::Catalog(_))));
    }

    #[test]
    fn product_details_wire_field_names() {
        let json = serde_json::to_value(widget()).unwrap();
        assert_eq!(json["productId"], "P001");
        assert_eq!(json["productName"], "Widget Pro");
        assert_eq!(json["unitPrice"], 2999);
        assert_eq!(json["category"], "Electronics");
        assert_eq!(json["inStock"], true);
    }
}
