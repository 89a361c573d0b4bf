//! Full two-way catalog join by SKU.
//!
//! Both stores are listed concurrently, then every source variant with a SKU
//! is linked to the first target variant (in target listing order) carrying
//! the same SKU. Target variants whose SKU was never linked are reported as
//! unmapped. The SKU cache is not consulted or updated.
//!
//! First-listed-wins for duplicate target SKUs matches how the stores have
//! always been reconciled, but nothing upstream guarantees listing order is
//! stable, so duplicate SKUs should be treated as a catalog defect.

use std::collections::{HashMap, HashSet};

use catalog_bridge_core::{CatalogReport, MappingEntry, Product, Sku, UnmappedItem, VariantRef};
use tracing::{info, instrument, warn};

use crate::resolver::PRODUCT_PAGE_LIMIT;
use crate::shopify::{CatalogApi, RemoteApiError, Stores};

/// List both catalogs and join them by SKU.
///
/// Both listing calls are in flight at the same time and both complete
/// before either result is inspected.
///
/// # Errors
///
/// Returns an error if either listing fails; no partial report is produced.
#[instrument(skip_all)]
pub async fn reconcile<C: CatalogApi>(stores: &Stores<C>) -> Result<CatalogReport, RemoteApiError> {
    let (source, target) = tokio::join!(
        stores.source.list_products(PRODUCT_PAGE_LIMIT),
        stores.target.list_products(PRODUCT_PAGE_LIMIT),
    );
    let source = source.inspect_err(|e| warn!(error = %e, "Source listing failed"))?;
    let target = target.inspect_err(|e| warn!(error = %e, "Target listing failed"))?;

    let report = build_report(&source, &target);

    let stats = report.stats();
    info!(
        source_products = source.len(),
        target_products = target.len(),
        total_mapped = stats.total_mapped,
        unmapped_source = stats.unmapped_source,
        unmapped_target = stats.unmapped_target,
        "Catalog reconciliation complete"
    );

    Ok(report)
}

/// Join two product listings by exact SKU.
#[must_use]
pub fn build_report(source: &[Product], target: &[Product]) -> CatalogReport {
    // First target variant per SKU, in listing order
    let mut target_by_sku: HashMap<Sku, VariantRef> = HashMap::new();
    for product in target {
        for variant in &product.variants {
            if let Some(sku) = variant.sku() {
                target_by_sku
                    .entry(sku)
                    .or_insert_with(|| VariantRef::new(product, variant));
            }
        }
    }

    let mut report = CatalogReport::default();
    let mut mapped: HashSet<Sku> = HashSet::new();

    for product in source {
        for variant in &product.variants {
            let Some(sku) = variant.sku() else {
                continue;
            };
            let source_ref = VariantRef::new(product, variant);

            match target_by_sku.get(&sku) {
                Some(target_ref) => {
                    mapped.insert(sku.clone());
                    report.mapping.push(MappingEntry {
                        sku,
                        source: source_ref,
                        target: target_ref.clone(),
                    });
                }
                None => report.unmapped_source.push(UnmappedItem {
                    sku,
                    item: source_ref,
                }),
            }
        }
    }

    for product in target {
        for variant in &product.variants {
            if let Some(sku) = variant.sku()
                && !mapped.contains(&sku)
            {
                report.unmapped_target.push(UnmappedItem {
                    sku,
                    item: VariantRef::new(product, variant),
                });
            }
        }
    }

    report
}
