//! Integration tests for Catalog Bridge.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-bridge-integration-tests
//! ```
//!
//! No store credentials or network access are needed: every test runs the
//! real resolver, reconciler, checkout translator and router against
//! [`FakeStore`], an in-memory catalog that counts the calls it receives.
//!
//! # Test Categories
//!
//! - `resolver` - SKU cache behaviour across lookups
//! - `checkout` - Cart translation and draft order creation
//! - `reconcile` - Catalog joins over two stores
//! - `routes` - HTTP status codes and JSON bodies

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use catalog_bridge::cache::SkuCache;
use catalog_bridge::shopify::{CatalogApi, DraftOrder, RemoteApiError, Stores};
use catalog_bridge::state::AppState;
use catalog_bridge_core::{
    DraftOrderId, LineItem, Product, ProductId, ShopInfo, Variant, VariantId,
};
use tokio::sync::{Barrier, Mutex};

/// In-memory store implementing [`CatalogApi`].
#[derive(Debug)]
pub struct FakeStore {
    domain: String,
    products: Vec<Product>,
    list_failure: Option<u16>,
    order_failure: Option<u16>,
    shop_failure: Option<u16>,
    variant_failures: Vec<(VariantId, u16)>,
    listing_barrier: Option<Arc<Barrier>>,
    list_calls: AtomicUsize,
    variant_calls: AtomicUsize,
    shop_calls: AtomicUsize,
    next_order_id: AtomicI64,
    orders: Mutex<Vec<Vec<LineItem>>>,
}

impl FakeStore {
    /// An empty store served from `domain`.
    #[must_use]
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            products: Vec::new(),
            list_failure: None,
            order_failure: None,
            shop_failure: None,
            variant_failures: Vec::new(),
            listing_barrier: None,
            list_calls: AtomicUsize::new(0),
            variant_calls: AtomicUsize::new(0),
            shop_calls: AtomicUsize::new(0),
            next_order_id: AtomicI64::new(1001),
            orders: Mutex::new(Vec::new()),
        }
    }

    /// Replace the catalog, in listing order.
    #[must_use]
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Fail every product listing with `status`.
    #[must_use]
    pub const fn failing_listing(mut self, status: u16) -> Self {
        self.list_failure = Some(status);
        self
    }

    /// Fail lookups of one variant with `status`.
    #[must_use]
    pub fn failing_variant(mut self, id: i64, status: u16) -> Self {
        self.variant_failures.push((VariantId::new(id), status));
        self
    }

    /// Fail draft order creation with `status`.
    #[must_use]
    pub const fn failing_orders(mut self, status: u16) -> Self {
        self.order_failure = Some(status);
        self
    }

    /// Fail the shop probe with `status`.
    #[must_use]
    pub const fn failing_shop(mut self, status: u16) -> Self {
        self.shop_failure = Some(status);
        self
    }

    /// Make every listing wait on `barrier` before answering.
    #[must_use]
    pub fn with_listing_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.listing_barrier = Some(barrier);
        self
    }

    /// Number of product listings served (including failed ones).
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of variant lookups served (including failed ones).
    pub fn variant_calls(&self) -> usize {
        self.variant_calls.load(Ordering::SeqCst)
    }

    /// Number of shop probes served.
    pub fn shop_calls(&self) -> usize {
        self.shop_calls.load(Ordering::SeqCst)
    }

    /// Line items of every draft order request received, in call order.
    pub async fn orders(&self) -> Vec<Vec<LineItem>> {
        self.orders.lock().await.clone()
    }

    fn failure(status: u16) -> RemoteApiError {
        RemoteApiError::Status {
            status,
            body: format!(r#"{{"errors":"fake failure {status}"}}"#),
        }
    }
}

impl CatalogApi for FakeStore {
    async fn list_products(&self, limit: u32) -> Result<Vec<Product>, RemoteApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.listing_barrier {
            barrier.wait().await;
        }
        if let Some(status) = self.list_failure {
            return Err(Self::failure(status));
        }
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self.products.iter().take(limit).cloned().collect())
    }

    async fn get_variant(&self, id: VariantId) -> Result<Variant, RemoteApiError> {
        self.variant_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((_, status)) = self.variant_failures.iter().find(|(v, _)| *v == id) {
            return Err(Self::failure(*status));
        }
        self.products
            .iter()
            .flat_map(|p| &p.variants)
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| RemoteApiError::Status {
                status: 404,
                body: r#"{"errors":"Not Found"}"#.to_string(),
            })
    }

    async fn create_draft_order(
        &self,
        line_items: &[LineItem],
    ) -> Result<DraftOrder, RemoteApiError> {
        self.orders.lock().await.push(line_items.to_vec());
        if let Some(status) = self.order_failure {
            return Err(Self::failure(status));
        }
        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        Ok(DraftOrder {
            id: DraftOrderId::new(id),
            name: Some(format!("#D{id}")),
            invoice_url: Some(format!("https://{}/invoices/{id}", self.domain)),
            status: Some("open".to_string()),
        })
    }

    async fn shop(&self) -> Result<ShopInfo, RemoteApiError> {
        self.shop_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.shop_failure {
            return Err(Self::failure(status));
        }
        Ok(ShopInfo {
            name: format!("Fake {}", self.domain),
            domain: self.domain.clone(),
            myshopify_domain: Some(self.domain.clone()),
            currency: Some("USD".to_string()),
        })
    }
}

/// Build a product whose variants are `(variant_id, sku)` pairs.
#[must_use]
pub fn product(id: i64, title: &str, variants: &[(i64, Option<&str>)]) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        variants: variants
            .iter()
            .map(|&(variant_id, sku)| Variant {
                id: VariantId::new(variant_id),
                product_id: Some(ProductId::new(id)),
                sku: sku.map(str::to_string),
                title: format!("Variant {variant_id}"),
            })
            .collect(),
    }
}

/// Default source store domain.
pub const SOURCE_DOMAIN: &str = "source-shop.myshopify.com";
/// Default target store domain.
pub const TARGET_DOMAIN: &str = "target-shop.myshopify.com";

/// Stores with the given catalogs and a one hour cache.
#[must_use]
pub fn stores(source: Vec<Product>, target: Vec<Product>) -> Stores<FakeStore> {
    Stores::new(
        FakeStore::new(SOURCE_DOMAIN).with_products(source),
        FakeStore::new(TARGET_DOMAIN).with_products(target),
    )
}

/// Application state over fake stores with a one hour cache.
#[must_use]
pub fn app_state(stores: Stores<FakeStore>) -> AppState<FakeStore> {
    AppState::new(stores, SkuCache::new(Duration::from_secs(3600)))
}
