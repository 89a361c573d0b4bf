//! Shopify REST Admin API access for both stores.
//!
//! # Architecture
//!
//! - [`StoreClient`] performs authenticated requests against one store
//! - [`CatalogApi`] is the seam the resolver, reconciler and checkout
//!   translator depend on, so they can run against an in-memory catalog
//! - Shopify is the source of truth - NO local sync, only the SKU cache
//!
//! # Endpoints
//!
//! - `GET /products.json?limit=250` - first page of the catalog only
//! - `GET /variants/<id>.json` - single variant lookup
//! - `POST /draft_orders.json` - draft order (checkout) creation
//! - `GET /shop.json` - connectivity probe
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_bridge::shopify::{CatalogApi, StoreClient, StoreRole};
//!
//! let target = StoreClient::new(StoreRole::Target, &config.target)?;
//! let products = target.list_products(250).await?;
//! ```

mod client;
pub mod types;

pub use client::StoreClient;
pub use types::DraftOrder;

use std::future::Future;

use catalog_bridge_core::{LineItem, Product, ShopInfo, Variant, VariantId};
use serde::Serialize;
use thiserror::Error;

/// Maximum number of characters of an upstream body shown in `Display`.
const BODY_PREVIEW_CHARS: usize = 200;

/// Errors that can occur when calling a store's API.
#[derive(Debug, Error)]
pub enum RemoteApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Shopify answered with a non-2xx status.
    #[error("Shopify API returned {status}: {}", preview(.body))]
    Status {
        /// Upstream HTTP status code.
        status: u16,
        /// Raw upstream response body.
        body: String,
    },

    /// A 2xx response body did not have the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The access token cannot be sent as a header value.
    #[error("Invalid access token header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl RemoteApiError {
    /// Upstream HTTP status, if Shopify answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether Shopify rejected the request with 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() <= BODY_PREVIEW_CHARS {
        return body.to_string();
    }
    let mut truncated: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
    truncated.push_str("...");
    truncated
}

/// Which side of the bridge a store is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreRole {
    /// Store whose identifiers appear in incoming carts.
    Source,
    /// Store where checkouts are created.
    Target,
}

impl std::fmt::Display for StoreRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Catalog and order operations used by the bridge.
///
/// Implemented by [`StoreClient`] for live stores.
pub trait CatalogApi: Send + Sync {
    /// List up to `limit` products (first page only).
    fn list_products(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Product>, RemoteApiError>> + Send;

    /// Fetch one variant by ID.
    fn get_variant(
        &self,
        id: VariantId,
    ) -> impl Future<Output = Result<Variant, RemoteApiError>> + Send;

    /// Create a draft order containing exactly `line_items`.
    fn create_draft_order(
        &self,
        line_items: &[LineItem],
    ) -> impl Future<Output = Result<DraftOrder, RemoteApiError>> + Send;

    /// Fetch the shop's identity, used as a connectivity probe.
    fn shop(&self) -> impl Future<Output = Result<ShopInfo, RemoteApiError>> + Send;
}

/// The pair of stores being bridged.
#[derive(Debug, Clone)]
pub struct Stores<C> {
    pub source: C,
    pub target: C,
}

impl<C> Stores<C> {
    #[must_use]
    pub const fn new(source: C, target: C) -> Self {
        Self { source, target }
    }

    /// Get the store playing `role`.
    #[must_use]
    pub const fn get(&self, role: StoreRole) -> &C {
        match role {
            StoreRole::Source => &self.source,
            StoreRole::Target => &self.target,
        }
    }
}
