//! Application state shared across handlers.

use std::sync::Arc;

use crate::cache::SkuCache;
use crate::checkout::CheckoutTranslator;
use crate::config::BridgeConfig;
use crate::resolver::Resolver;
use crate::shopify::{CatalogApi, RemoteApiError, StoreClient, StoreRole, Stores};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to both
/// stores and the SKU cache. It is generic over the catalog backend so the
/// router can be driven by an in-memory catalog in tests.
pub struct AppState<C = StoreClient> {
    inner: Arc<AppStateInner<C>>,
}

struct AppStateInner<C> {
    stores: Stores<C>,
    cache: SkuCache,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: CatalogApi> AppState<C> {
    /// Create a new application state.
    #[must_use]
    pub fn new(stores: Stores<C>, cache: SkuCache) -> Self {
        Self {
            inner: Arc::new(AppStateInner { stores, cache }),
        }
    }

    /// Get a reference to the bridged stores.
    #[must_use]
    pub fn stores(&self) -> &Stores<C> {
        &self.inner.stores
    }

    /// Get a reference to the SKU resolution cache.
    #[must_use]
    pub fn cache(&self) -> &SkuCache {
        &self.inner.cache
    }

    /// Resolver borrowing this state's stores and cache.
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_, C> {
        Resolver::new(&self.inner.stores, &self.inner.cache)
    }

    /// Checkout translator borrowing this state's stores and cache.
    #[must_use]
    pub fn translator(&self) -> CheckoutTranslator<'_, C> {
        CheckoutTranslator::new(self.resolver())
    }
}

impl AppState<StoreClient> {
    /// Build live store clients and an empty cache from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either store client cannot be built.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, RemoteApiError> {
        let stores = Stores::new(
            StoreClient::new(StoreRole::Source, &config.source)?,
            StoreClient::new(StoreRole::Target, &config.target)?,
        );
        Ok(Self::new(stores, SkuCache::new(config.cache_ttl)))
    }
}
