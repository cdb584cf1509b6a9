//! ERP health probe scheduler
//!
//! Assesses reachability and latency of every active tenant's ERP endpoint
//! without fetching pricing data. Tenants are probed in fixed-size batches:
//! batches run strictly in sequence, tenants within a batch fully in
//! parallel, so in-flight network operations never exceed the batch size.
//!
//! One tenant's failure never affects a sibling probe: every failure mode
//! is classified into a [`HealthCheckResult`] and the run always completes
//! once the tenant list was obtained.

use epb_domain::entities::{HealthCheckResult, HealthRunSummary, TenantErpConfig};
use epb_domain::error::Result;
use epb_domain::ports::{ErpClient, HealthResultStore, ProbeOutcome, TenantConfigProvider};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default number of tenants probed in parallel per batch
pub const DEFAULT_HEALTH_BATCH_SIZE: usize = 5;

/// Default latency threshold separating healthy from degraded (1 second)
pub const DEFAULT_DEGRADED_THRESHOLD_MS: u64 = 1000;

/// ERP health probe scheduler
///
/// Each `run` is a fresh, independent pass over the current tenant
/// snapshot; there are no retries within a run and no history kept here.
pub struct HealthCheckService {
    configs: Arc<dyn TenantConfigProvider>,
    erp: Arc<dyn ErpClient>,
    store: Arc<dyn HealthResultStore>,
    batch_size: usize,
    degraded_threshold: Duration,
}

impl HealthCheckService {
    /// Create a scheduler with default batch size and latency threshold
    pub fn new(
        configs: Arc<dyn TenantConfigProvider>,
        erp: Arc<dyn ErpClient>,
        store: Arc<dyn HealthResultStore>,
    ) -> Self {
        Self {
            configs,
            erp,
            store,
            batch_size: DEFAULT_HEALTH_BATCH_SIZE,
            degraded_threshold: Duration::from_millis(DEFAULT_DEGRADED_THRESHOLD_MS),
        }
    }

    /// Override the per-batch parallelism bound
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Override the healthy/degraded latency threshold
    pub fn with_degraded_threshold(mut self, threshold: Duration) -> Self {
        self.degraded_threshold = threshold;
        self
    }

    /// Run one full health pass over all active tenants
    ///
    /// # Errors
    /// Only a failure to obtain the tenant configuration list is fatal;
    /// it propagates and zero probes are attempted. Persistence failure is
    /// logged and does not fail the run.
    pub async fn run(&self) -> Result<HealthRunSummary> {
        let configs = self.configs.active_configs().await?;
        if configs.is_empty() {
            info!("ERP health run: no active tenants to check");
            return Ok(HealthRunSummary::new());
        }

        let mut results = Vec::with_capacity(configs.len());
        for batch in configs.chunks(self.batch_size) {
            let probes = batch.iter().map(|config| self.check_tenant(config));
            results.extend(join_all(probes).await);
        }

        let mut summary = HealthRunSummary::new();
        for result in &results {
            summary.record(result.status);
        }

        if let Err(error) = self.store.insert_results(&results).await {
            warn!(error = %error, "Failed to persist ERP health check results");
        }

        info!(
            total = summary.total,
            healthy = summary.healthy,
            degraded = summary.degraded,
            down = summary.down,
            "ERP health run complete"
        );
        Ok(summary)
    }

    /// Probe and classify a single tenant
    ///
    /// Missing credentials classify as down without a network call; the
    /// tenant still occupies its batch slot but completes instantly.
    async fn check_tenant(&self, config: &TenantErpConfig) -> HealthCheckResult {
        if !config.has_credential() {
            return HealthCheckResult::down(
                &config.tenant_id,
                None,
                "ERP credentials unavailable or not decryptable",
            );
        }

        let outcome = self.erp.probe(config).await;
        let result = self.classify(config, outcome);
        debug!(
            tenant = %result.tenant_id,
            status = ?result.status,
            latency_ms = result.latency_ms,
            "ERP probe classified"
        );
        result
    }

    /// Map a probe outcome onto a health classification
    fn classify(&self, config: &TenantErpConfig, outcome: ProbeOutcome) -> HealthCheckResult {
        let tenant_id = &config.tenant_id;
        match outcome {
            ProbeOutcome::Responded { status, latency } if (200..300).contains(&status) => {
                if latency <= self.degraded_threshold {
                    HealthCheckResult::healthy(tenant_id, latency)
                } else {
                    HealthCheckResult::degraded(tenant_id, latency)
                }
            }
            ProbeOutcome::Responded { status, latency } => HealthCheckResult::down(
                tenant_id,
                Some(latency),
                format!("ERP endpoint returned status {status}"),
            ),
            ProbeOutcome::TimedOut { limit } => HealthCheckResult::down(
                tenant_id,
                Some(limit),
                format!("probe timed out after {}ms", limit.as_millis()),
            ),
            ProbeOutcome::Failed { message } => {
                HealthCheckResult::down(tenant_id, None, message)
            }
        }
    }
}
