//! In-memory health result store
//!
//! Captures health results and cache-clear audits in process memory.
//! Useful for tests and for embedded deployments without a database.

use async_trait::async_trait;
use epb_domain::entities::{CacheClearAudit, HealthCheckResult};
use epb_domain::error::Result;
use epb_domain::ports::HealthResultStore;
use parking_lot::Mutex;

/// Capturing in-memory health result store
#[derive(Debug, Default)]
pub struct InMemoryHealthResultStore {
    results: Mutex<Vec<HealthCheckResult>>,
    audits: Mutex<Vec<CacheClearAudit>>,
}

impl InMemoryHealthResultStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All results persisted so far, in insertion order
    pub fn results(&self) -> Vec<HealthCheckResult> {
        self.results.lock().clone()
    }

    /// All cache-clear audits recorded so far
    pub fn audits(&self) -> Vec<CacheClearAudit> {
        self.audits.lock().clone()
    }

    /// Drop everything captured so far
    pub fn clear(&self) {
        self.results.lock().clear();
        self.audits.lock().clear();
    }
}

#[async_trait]
impl HealthResultStore for InMemoryHealthResultStore {
    async fn insert_results(&self, results: &[HealthCheckResult]) -> Result<()> {
        self.results.lock().extend_from_slice(results);
        Ok(())
    }

    async fn record_cache_clear(&self, audit: &CacheClearAudit) -> Result<()> {
        self.audits.lock().push(audit.clone());
        Ok(())
    }
}
