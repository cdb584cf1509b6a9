//! Health Result Storage Port
//!
//! Port for the storage collaborator that persists classified health
//! results and cache administration audit records. The core holds no
//! history of its own; a store failure costs durability, never
//! already-computed results.

use crate::entities::{CacheClearAudit, HealthCheckResult};
use crate::error::Result;
use async_trait::async_trait;

/// Health Result Storage Port
#[async_trait]
pub trait HealthResultStore: Send + Sync {
    /// Persist one run's results as a single batch insert
    async fn insert_results(&self, results: &[HealthCheckResult]) -> Result<()>;

    /// Record an administrative cache clear
    async fn record_cache_clear(&self, audit: &CacheClearAudit) -> Result<()>;
}
