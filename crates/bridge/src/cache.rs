//! SKU resolution cache.
//!
//! Memoizes the last successful (product, variant) resolution per store and
//! SKU for a fixed TTL. Entries are keyed `sku:<SKU>` within a store and
//! replaced wholesale on every `store` call; there is no merging.
//!
//! Backed by `moka`, which never returns an entry older than the TTL, so
//! expiry does not depend on when the sweeper last ran. The sweeper only
//! bounds memory by evicting expired entries in the background.

use std::fmt;
use std::time::Duration;

use catalog_bridge_core::{ResolvedPair, Sku};
use moka::future::Cache;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::shopify::StoreRole;

/// Upper bound on cached resolutions.
const MAX_ENTRIES: u64 = 10_000;

/// Cache key: one SKU within one store.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey {
    store: StoreRole,
    sku: Sku,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/sku:{}", self.store, self.sku)
    }
}

/// Time-bounded memo of SKU resolutions.
///
/// Cheap to clone; clones share the same entries.
#[derive(Clone)]
pub struct SkuCache {
    entries: Cache<CacheKey, ResolvedPair>,
    ttl: Duration,
}

impl SkuCache {
    /// Create an empty cache whose entries expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();

        Self { entries, ttl }
    }

    /// The staleness bound.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a live resolution. Returns a copy, never a shared reference.
    pub async fn lookup(&self, store: StoreRole, sku: &Sku) -> Option<ResolvedPair> {
        let key = CacheKey {
            store,
            sku: sku.clone(),
        };
        self.entries.get(&key).await
    }

    /// Cache `pair` under its variant's SKU, replacing any previous entry.
    ///
    /// Variants without a SKU are never cached.
    pub async fn store(&self, store: StoreRole, pair: ResolvedPair) {
        let Some(sku) = pair.variant.sku() else {
            debug!(variant_id = %pair.variant.id, "Refusing to cache variant without SKU");
            return;
        };
        self.entries.insert(CacheKey { store, sku }, pair).await;
    }

    /// Evict every entry whose age has reached the TTL.
    #[instrument(skip(self))]
    pub async fn purge_expired(&self) {
        self.entries.run_pending_tasks().await;
        debug!(entries = self.entries.entry_count(), "Purged expired SKU cache entries");
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Spawn a background task that purges expired entries every `interval`.
    #[must_use]
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                cache.purge_expired().await;
            }
        })
    }
}

impl fmt::Debug for SkuCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkuCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
