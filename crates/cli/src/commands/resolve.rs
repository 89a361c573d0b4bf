//! Identifier resolution command.
//!
//! # Usage
//!
//! ```bash
//! bridge-cli resolve --sku TEE-M
//! bridge-cli resolve --variant-id gid://shopify/ProductVariant/44012345678
//! ```

use catalog_bridge::shopify::StoreRole;
use catalog_bridge_core::{ResolvedPair, Sku, VariantId};

use super::{CommandError, connect};

/// Resolve a SKU on the target store.
pub async fn by_sku(sku: &str) -> Result<(), CommandError> {
    let sku = Sku::parse(sku).ok_or(CommandError::EmptySku)?;
    let state = connect()?;

    let pair = state
        .resolver()
        .resolve_by_sku(StoreRole::Target, &sku)
        .await?;

    report(&sku.to_string(), pair.as_ref());
    Ok(())
}

/// Resolve a source store variant on the target store.
pub async fn by_variant(variant_id: VariantId) -> Result<(), CommandError> {
    let state = connect()?;

    let pair = state.resolver().resolve_by_source_variant(variant_id).await?;

    report(&format!("source variant {variant_id}"), pair.as_ref());
    Ok(())
}

fn report(query: &str, pair: Option<&ResolvedPair>) {
    match pair {
        Some(pair) => {
            let target = pair.to_ref();
            tracing::info!(
                "{query} -> target variant {} ({} / {}), product {}",
                target.variant_id,
                target.product_title,
                target.variant_title,
                target.product_id
            );
        }
        None => tracing::info!("{query}: no matching variant in target store"),
    }
}
