//! Catalog reconciliation command.
//!
//! # Usage
//!
//! ```bash
//! bridge-cli sync
//! bridge-cli sync --json
//! ```

use catalog_bridge::reconcile;

use super::{CommandError, connect};

/// Reconcile both catalogs and log the result.
///
/// Logs the stats and every unmapped SKU. With `json`, also logs the full
/// report in the same shape as `GET /api/products/sync`.
pub async fn run(json: bool) -> Result<(), CommandError> {
    let state = connect()?;

    let report = reconcile::reconcile(state.stores()).await?;
    let stats = report.stats();

    tracing::info!(
        "Mapped {} SKU(s); {} only in source, {} only in target",
        stats.total_mapped,
        stats.unmapped_source,
        stats.unmapped_target
    );

    for item in &report.unmapped_source {
        tracing::info!(
            "  source only: {} ({} / {})",
            item.sku,
            item.item.product_title,
            item.item.variant_title
        );
    }
    for item in &report.unmapped_target {
        tracing::info!(
            "  target only: {} ({} / {})",
            item.sku,
            item.item.product_title,
            item.item.variant_title
        );
    }

    if json {
        let body = serde_json::json!({
            "success": true,
            "stats": stats,
            "mapping": report.mapping,
            "unmapped": {
                "source": report.unmapped_source,
                "target": report.unmapped_target,
            },
        });
        match serde_json::to_string_pretty(&body) {
            Ok(text) => tracing::info!("{text}"),
            Err(e) => tracing::warn!("Failed to render report: {e}"),
        }
    }

    Ok(())
}
