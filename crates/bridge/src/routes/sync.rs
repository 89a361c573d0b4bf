//! Catalog reconciliation route handler.

use axum::{Json, extract::State};
use catalog_bridge_core::{CatalogReport, MappingEntry, SyncStats, UnmappedItem};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::reconcile;
use crate::shopify::CatalogApi;
use crate::state::AppState;

/// Reconciliation report response.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub stats: SyncStats,
    pub mapping: Vec<MappingEntry>,
    pub unmapped: Unmapped,
}

/// Variants present in only one store.
#[derive(Debug, Serialize)]
pub struct Unmapped {
    pub source: Vec<UnmappedItem>,
    pub target: Vec<UnmappedItem>,
}

impl From<CatalogReport> for SyncResponse {
    fn from(report: CatalogReport) -> Self {
        let stats = report.stats();
        Self {
            success: true,
            stats,
            mapping: report.mapping,
            unmapped: Unmapped {
                source: report.unmapped_source,
                target: report.unmapped_target,
            },
        }
    }
}

/// Join both catalogs by SKU.
///
/// GET /api/products/sync
///
/// Lists both stores on every call; the SKU cache is not used. Returns 502
/// if either listing fails.
#[instrument(skip_all)]
pub async fn sync_products<C: CatalogApi + 'static>(
    State(state): State<AppState<C>>,
) -> Result<Json<SyncResponse>> {
    let report = reconcile::reconcile(state.stores()).await?;
    Ok(Json(report.into()))
}
