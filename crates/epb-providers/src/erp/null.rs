//! Null ERP client for testing
//!
//! An ERP client implementation that never reaches the network. Useful
//! for testing cache behavior and for wiring where ERP integration is
//! disabled.

use async_trait::async_trait;
use epb_domain::entities::{PriceBreakdown, TenantErpConfig};
use epb_domain::error::{Error, Result};
use epb_domain::ports::{ErpClient, ProbeOutcome};

/// Null ERP client that never performs network calls
///
/// Price fetches fail with a descriptive error and probes report a
/// transport failure, so misconfigured wiring is visible instead of
/// silently succeeding.
#[derive(Debug, Clone, Default)]
pub struct NullErpClient;

impl NullErpClient {
    /// Create a new null ERP client
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ErpClient for NullErpClient {
    async fn fetch_prices(
        &self,
        config: &TenantErpConfig,
        _plan_ids: &[String],
    ) -> Result<Vec<PriceBreakdown>> {
        Err(Error::network(format!(
            "ERP integration disabled; cannot fetch prices for tenant {}",
            config.tenant_id
        )))
    }

    async fn probe(&self, _config: &TenantErpConfig) -> ProbeOutcome {
        ProbeOutcome::Failed {
            message: "ERP integration disabled".to_string(),
        }
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
