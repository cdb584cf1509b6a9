//! Tenant Configuration Source Port
//!
//! Port for the configuration collaborator that owns tenant ERP settings
//! and credential decryption. The core only ever sees read-only snapshots
//! filtered to active tenants, with credentials already decrypted (or
//! absent when decryption failed).

use crate::entities::TenantErpConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Tenant Configuration Source Port
#[async_trait]
pub trait TenantConfigProvider: Send + Sync {
    /// List the current active tenant configurations
    ///
    /// An empty list is a valid, non-error outcome. An error here is fatal
    /// to the caller's run: without the list, no probes can be attempted.
    async fn active_configs(&self) -> Result<Vec<TenantErpConfig>>;
}
