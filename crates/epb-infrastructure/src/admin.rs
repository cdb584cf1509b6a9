//! Cache administration
//!
//! Administrative cache clear with audit records. Privilege checks belong
//! to the boundary exposing this operation; this service assumes the
//! caller is already authorized.

use crate::logging::log_cache_clear;
use epb_application::PriceCache;
use epb_domain::entities::{CacheClearAudit, CacheStatistics, InvalidationScope};
use epb_domain::error::Result;
use epb_domain::ports::HealthResultStore;
use std::sync::Arc;
use tracing::warn;

/// Administrative operations on the price cache
pub struct CacheAdminService {
    cache: Arc<PriceCache>,
    store: Arc<dyn HealthResultStore>,
}

impl CacheAdminService {
    /// Create an admin service over the shared cache
    pub fn new(cache: Arc<PriceCache>, store: Arc<dyn HealthResultStore>) -> Self {
        Self { cache, store }
    }

    /// Clear cache entries in the given scope
    ///
    /// Returns the number of entries actually removed and records an audit
    /// row through the storage collaborator. A failed audit write is
    /// logged and does not fail the clear; the entries are already gone.
    pub async fn clear_cache(&self, scope: InvalidationScope) -> Result<usize> {
        let removed = self.cache.invalidate(&scope)?;
        log_cache_clear(&scope, removed);

        let audit = CacheClearAudit::new(scope, removed);
        if let Err(error) = self.store.record_cache_clear(&audit).await {
            warn!(error = %error, "Failed to record cache clear audit");
        }

        Ok(removed)
    }

    /// Snapshot the cache statistics
    pub fn statistics(&self) -> CacheStatistics {
        self.cache.statistics()
    }
}
