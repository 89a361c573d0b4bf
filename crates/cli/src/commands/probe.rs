//! Store connectivity command.

use catalog_bridge::shopify::{CatalogApi, StoreRole};

use super::{CommandError, connect};

/// Fetch shop info from both stores.
///
/// Fails if either store is unreachable, after reporting both.
pub async fn run() -> Result<(), CommandError> {
    let state = connect()?;
    let stores = state.stores();

    let (source, target) = tokio::join!(stores.source.shop(), stores.target.shop());

    let mut unreachable = 0;
    for (role, result) in [(StoreRole::Source, source), (StoreRole::Target, target)] {
        match result {
            Ok(shop) => tracing::info!(
                "{role}: connected to {} ({}, {})",
                shop.name,
                shop.myshopify_domain.as_deref().unwrap_or("-"),
                shop.currency.as_deref().unwrap_or("-")
            ),
            Err(e) => {
                unreachable += 1;
                tracing::error!("{role}: {e}");
            }
        }
    }

    if unreachable > 0 {
        return Err(CommandError::Unreachable(unreachable));
    }
    Ok(())
}
