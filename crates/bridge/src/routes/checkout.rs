//! Checkout route handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use catalog_bridge_core::{CartLine, DraftOrderId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::shopify::CatalogApi;
use crate::state::AppState;

/// Cart posted by the source storefront.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    #[serde(default)]
    pub cart_items: Vec<CartLine>,
}

/// Successful checkout response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutResponse {
    pub success: bool,
    pub checkout_url: Option<String>,
    pub draft_order_id: DraftOrderId,
    pub items_processed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

/// Create a draft order on the target store from a source-store cart.
///
/// POST /api/create-checkout
///
/// Lines that cannot be mapped are skipped and reported in `warnings`.
/// Returns 400 when the cart is empty or nothing could be mapped, and 502
/// when the draft order call fails.
#[instrument(skip_all)]
pub async fn create_checkout<C: CatalogApi + 'static>(
    State(state): State<AppState<C>>,
    payload: std::result::Result<Json<CreateCheckoutRequest>, JsonRejection>,
) -> Result<Json<CreateCheckoutResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let outcome = state
        .translator()
        .create_checkout(&request.cart_items)
        .await?;

    Ok(Json(CreateCheckoutResponse {
        success: true,
        checkout_url: outcome.checkout_url,
        draft_order_id: outcome.draft_order_id,
        items_processed: outcome.items_processed,
        warnings: outcome.warnings,
    }))
}
