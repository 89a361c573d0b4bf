//! Cross-store resolution of source identifiers to target variants.
//!
//! Resolution is SKU-based: a source variant ID is first turned into its SKU
//! on the source store, then the SKU is looked up on the target store.
//! Successful SKU lookups are memoized in the [`SkuCache`]; misses are not.
//!
//! Listings are limited to the first [`PRODUCT_PAGE_LIMIT`] products of a
//! store. Variants beyond the first page are never found; pagination is not
//! implemented.

use catalog_bridge_core::{ResolvedPair, Sku, VariantId};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::cache::SkuCache;
use crate::shopify::{CatalogApi, RemoteApiError, StoreRole, Stores};

/// Maximum products fetched per listing (one page of the REST API).
pub const PRODUCT_PAGE_LIMIT: u32 = 250;

/// Errors that can occur while resolving a source variant.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The source variant exists but has no SKU to match on.
    #[error("source variant {variant_id} has no SKU")]
    MissingSku {
        /// The source variant ID that was looked up.
        variant_id: VariantId,
    },

    /// A store API call failed.
    #[error(transparent)]
    Remote(#[from] RemoteApiError),
}

/// Resolves identifiers against the bridged stores, using the SKU cache.
pub struct Resolver<'a, C> {
    stores: &'a Stores<C>,
    cache: &'a SkuCache,
}

impl<'a, C: CatalogApi> Resolver<'a, C> {
    #[must_use]
    pub const fn new(stores: &'a Stores<C>, cache: &'a SkuCache) -> Self {
        Self { stores, cache }
    }

    /// The stores this resolver queries.
    #[must_use]
    pub const fn stores(&self) -> &'a Stores<C> {
        self.stores
    }

    /// Find the first variant in `store` whose SKU equals `sku`.
    ///
    /// Checks the cache first. On a miss, lists the store's first page of
    /// products and scans variants in listing order; the first match is
    /// cached and returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the product listing fails.
    #[instrument(skip(self), fields(store = %store, sku = %sku))]
    pub async fn resolve_by_sku(
        &self,
        store: StoreRole,
        sku: &Sku,
    ) -> Result<Option<ResolvedPair>, RemoteApiError> {
        if let Some(pair) = self.cache.lookup(store, sku).await {
            debug!(variant_id = %pair.variant.id, "SKU cache hit");
            return Ok(Some(pair));
        }

        let products = self
            .stores
            .get(store)
            .list_products(PRODUCT_PAGE_LIMIT)
            .await?;

        let Some(pair) = ResolvedPair::find_by_sku(&products, sku) else {
            debug!(scanned = products.len(), "No variant with this SKU");
            return Ok(None);
        };

        debug!(
            product_id = %pair.product.id,
            variant_id = %pair.variant.id,
            "Resolved SKU"
        );
        self.cache.store(store, pair.clone()).await;
        Ok(Some(pair))
    }

    /// Map a source-store variant to its target-store counterpart.
    ///
    /// Fetches the variant from the source store and resolves its SKU on the
    /// target store. This costs one more API call than [`Self::resolve_by_sku`].
    ///
    /// # Errors
    ///
    /// Returns `MissingSku` if the source variant has no SKU, or `Remote` if
    /// either store call fails (including 404 for an unknown variant).
    #[instrument(skip(self), fields(variant_id = %variant_id))]
    pub async fn resolve_by_source_variant(
        &self,
        variant_id: VariantId,
    ) -> Result<Option<ResolvedPair>, ResolveError> {
        let variant = self.stores.source.get_variant(variant_id).await?;

        let sku = variant
            .sku()
            .ok_or(ResolveError::MissingSku { variant_id })?;

        Ok(self.resolve_by_sku(StoreRole::Target, &sku).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sku_display() {
        let err = ResolveError::MissingSku {
            variant_id: VariantId::new(10),
        };
        assert_eq!(err.to_string(), "source variant 10 has no SKU");
    }

    #[test]
    fn test_remote_error_is_transparent() {
        let err = ResolveError::from(RemoteApiError::Status {
            status: 404,
            body: "Not Found".to_string(),
        });
        assert_eq!(err.to_string(), "Shopify API returned 404: Not Found");
    }
}
