//! In-memory tenant configuration provider
//!
//! Serves a fixed snapshot of tenant configurations. Useful for tests and
//! for embedded deployments where the tenant list is known at startup.

use async_trait::async_trait;
use epb_domain::entities::TenantErpConfig;
use epb_domain::error::Result;
use epb_domain::ports::TenantConfigProvider;

/// Fixed-snapshot tenant configuration provider
#[derive(Debug, Clone, Default)]
pub struct InMemoryTenantConfigProvider {
    configs: Vec<TenantErpConfig>,
}

impl InMemoryTenantConfigProvider {
    /// Create a provider serving the given snapshot
    pub fn new(configs: Vec<TenantErpConfig>) -> Self {
        Self { configs }
    }

    /// Create a provider with no active tenants
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenantConfigProvider for InMemoryTenantConfigProvider {
    async fn active_configs(&self) -> Result<Vec<TenantErpConfig>> {
        Ok(self.configs.clone())
    }
}
