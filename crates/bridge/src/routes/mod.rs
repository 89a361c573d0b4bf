//! HTTP route handlers for the bridge.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Service identity
//! GET  /health                 - Liveness check
//!
//! # API
//! POST /api/create-checkout    - Translate a source cart into a target draft order
//! GET  /api/products/sync      - Full SKU reconciliation report
//! GET  /api/test               - Connectivity probe for both stores
//! ```
//!
//! All `/api` responses are JSON with a top-level `success` flag.

pub mod checkout;
pub mod probe;
pub mod sync;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::shopify::CatalogApi;
use crate::state::AppState;

/// Create the API routes router.
pub fn api_routes<C: CatalogApi + 'static>() -> Router<AppState<C>> {
    Router::new()
        .route("/create-checkout", post(checkout::create_checkout::<C>))
        .route("/products/sync", get(sync::sync_products::<C>))
        .route("/test", get(probe::test_connections::<C>))
}

/// Create the main routes router.
pub fn routes<C: CatalogApi + 'static>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api", api_routes())
}

/// Service identity.
async fn index() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "catalog-bridge",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not contact either store.
async fn health() -> &'static str {
    "ok"
}
