//! Price cache statistics and invalidation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-demand snapshot of price cache counters
///
/// Computed from live state when requested, never cached incrementally.
/// `hit_rate`/`miss_rate` are 0 when no lookups have happened yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStatistics {
    /// Cumulative cache hits
    pub hits: u64,
    /// Cumulative cache misses
    pub misses: u64,
    /// Cumulative evictions (expiry, invalidation, sweep)
    pub evictions: u64,
    /// Live entries at snapshot time
    pub entries: usize,
    /// hits / (hits + misses), 0 when no lookups
    pub hit_rate: f64,
    /// misses / (hits + misses), 0 when no lookups
    pub miss_rate: f64,
    /// Age of the oldest live entry in seconds, absent when empty
    pub oldest_entry_age_secs: Option<u64>,
    /// Sum of per-entry hit counts over live entries
    pub total_hits_across_entries: u64,
}

/// Scope of a cache invalidation request
///
/// Replaces the historical optional-argument pair: requesting specific plan
/// ids without a tenant is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidationScope {
    /// Remove the single entry for one tenant's exact plan set
    Entry {
        /// Owning tenant
        tenant_id: String,
        /// The plan set whose cached result should be dropped
        plan_ids: Vec<String>,
    },
    /// Remove every entry owned by one tenant
    Tenant(String),
    /// Remove everything
    All,
}

impl InvalidationScope {
    /// Tenant the scope is limited to, if any
    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            Self::Entry { tenant_id, .. } | Self::Tenant(tenant_id) => Some(tenant_id),
            Self::All => None,
        }
    }
}

/// Audit record for an administrative cache clear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheClearAudit {
    /// What was cleared
    pub scope: InvalidationScope,
    /// Entries actually removed
    pub removed: usize,
    /// When the clear happened
    pub cleared_at: DateTime<Utc>,
}

impl CacheClearAudit {
    /// Create an audit record stamped with the current time
    pub fn new(scope: InvalidationScope, removed: usize) -> Self {
        Self {
            scope,
            removed,
            cleared_at: Utc::now(),
        }
    }
}
