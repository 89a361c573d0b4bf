//! Connectivity probe for both stores.

use axum::{Json, extract::State};
use catalog_bridge_core::ShopInfo;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::shopify::{CatalogApi, RemoteApiError, StoreRole};
use crate::state::AppState;

/// Probe result for one store.
#[derive(Debug, Serialize)]
pub struct StoreStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop: Option<ShopInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoreStatus {
    fn from_result(role: StoreRole, result: std::result::Result<ShopInfo, RemoteApiError>) -> Self {
        match result {
            Ok(shop) => Self {
                connected: true,
                shop: Some(shop),
                error: None,
            },
            Err(e) => {
                warn!(store = %role, error = %e, "Store connectivity check failed");
                Self {
                    connected: false,
                    shop: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Probe response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResponse {
    pub success: bool,
    pub source: StoreStatus,
    pub target: StoreStatus,
    pub cached_skus: u64,
}

/// Check that both stores answer with their shop identity.
///
/// GET /api/test
///
/// Always 200; `success` is true only when both stores are reachable.
#[instrument(skip_all)]
pub async fn test_connections<C: CatalogApi + 'static>(
    State(state): State<AppState<C>>,
) -> Json<ProbeResponse> {
    let stores = state.stores();
    let (source, target) = tokio::join!(stores.source.shop(), stores.target.shop());

    let source = StoreStatus::from_result(StoreRole::Source, source);
    let target = StoreStatus::from_result(StoreRole::Target, target);

    Json(ProbeResponse {
        success: source.connected && target.connected,
        source,
        target,
        cached_skus: state.cache().entry_count(),
    })
}
