//! Health probe scheduler tests
//!
//! Probe latencies are scripted and the tokio clock is paused, so batch
//! timing is asserted deterministically.

use async_trait::async_trait;
use epb_application::HealthCheckService;
use epb_domain::Error;
use epb_domain::entities::{HealthCheckResult, HealthStatus, PriceBreakdown, TenantErpConfig};
use epb_domain::error::Result;
use epb_domain::ports::{ErpClient, ProbeOutcome, TenantConfigProvider};
use epb_providers::{InMemoryHealthResultStore, InMemoryTenantConfigProvider};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted probe behavior for one tenant
#[derive(Clone)]
struct ScriptedProbe {
    delay: Duration,
    outcome: ProbeOutcome,
}

/// ERP client that replays scripted outcomes and tracks concurrency
#[derive(Default)]
struct ScriptedErpClient {
    probes: HashMap<String, ScriptedProbe>,
    calls: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedErpClient {
    fn new() -> Self {
        Self::default()
    }

    fn script(mut self, tenant_id: &str, delay: Duration, outcome: ProbeOutcome) -> Self {
        self.probes
            .insert(tenant_id.to_string(), ScriptedProbe { delay, outcome });
        self
    }

    fn probe_calls(&self, tenant_id: &str) -> usize {
        self.calls.lock().get(tenant_id).copied().unwrap_or(0)
    }

    fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ErpClient for ScriptedErpClient {
    async fn fetch_prices(
        &self,
        _config: &TenantErpConfig,
        _plan_ids: &[String],
    ) -> Result<Vec<PriceBreakdown>> {
        Err(Error::internal("scheduler must not fetch prices"))
    }

    async fn probe(&self, config: &TenantErpConfig) -> ProbeOutcome {
        *self
            .calls
            .lock()
            .entry(config.tenant_id.clone())
            .or_insert(0) += 1;

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let probe = self.probes.get(&config.tenant_id).cloned();
        let outcome = match probe {
            Some(probe) => {
                if !probe.delay.is_zero() {
                    tokio::time::sleep(probe.delay).await;
                }
                probe.outcome
            }
            None => ProbeOutcome::Failed {
                message: format!("no script for tenant {}", config.tenant_id),
            },
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Config provider whose fetch always fails
struct FailingConfigProvider;

#[async_trait]
impl TenantConfigProvider for FailingConfigProvider {
    async fn active_configs(&self) -> Result<Vec<TenantErpConfig>> {
        Err(Error::storage("tenant configuration table unavailable"))
    }
}

/// Store whose batch insert always fails
struct FailingStore;

#[async_trait]
impl epb_domain::ports::HealthResultStore for FailingStore {
    async fn insert_results(&self, _results: &[HealthCheckResult]) -> Result<()> {
        Err(Error::storage("insert rejected"))
    }

    async fn record_cache_clear(
        &self,
        _audit: &epb_domain::entities::CacheClearAudit,
    ) -> Result<()> {
        Err(Error::storage("insert rejected"))
    }
}

fn tenant(id: &str) -> TenantErpConfig {
    TenantErpConfig::new(id, format!("https://erp.{id}.example"))
        .with_credential("key")
        .with_timeout(Duration::from_secs(5))
}

fn responded(status: u16, latency_ms: u64) -> ProbeOutcome {
    ProbeOutcome::Responded {
        status,
        latency: Duration::from_millis(latency_ms),
    }
}

fn results_by_tenant(store: &InMemoryHealthResultStore) -> HashMap<String, HealthCheckResult> {
    store
        .results()
        .into_iter()
        .map(|r| (r.tenant_id.clone(), r))
        .collect()
}

#[tokio::test]
async fn test_empty_tenant_list_completes_with_zero_results() {
    let store = Arc::new(InMemoryHealthResultStore::new());
    let service = HealthCheckService::new(
        Arc::new(InMemoryTenantConfigProvider::empty()),
        Arc::new(ScriptedErpClient::new()),
        store.clone(),
    );

    let summary = service.run().await.unwrap();
    assert_eq!(summary.total, 0);
    assert!(store.results().is_empty());
}

#[tokio::test]
async fn test_classification_boundaries() {
    let erp = Arc::new(
        ScriptedErpClient::new()
            .script("at-threshold", Duration::ZERO, responded(200, 1000))
            .script("past-threshold", Duration::ZERO, responded(200, 1001))
            .script("client-error", Duration::ZERO, responded(404, 50))
            .script(
                "timing-out",
                Duration::ZERO,
                ProbeOutcome::TimedOut {
                    limit: Duration::from_secs(5),
                },
            )
            .script(
                "unreachable",
                Duration::ZERO,
                ProbeOutcome::Failed {
                    message: "dns error: no such host".to_string(),
                },
            ),
    );
    let store = Arc::new(InMemoryHealthResultStore::new());
    let service = HealthCheckService::new(
        Arc::new(InMemoryTenantConfigProvider::new(vec![
            tenant("at-threshold"),
            tenant("past-threshold"),
            tenant("client-error"),
            tenant("timing-out"),
            tenant("unreachable"),
        ])),
        erp,
        store.clone(),
    );

    let summary = service.run().await.unwrap();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.healthy, 1);
    assert_eq!(summary.degraded, 1);
    assert_eq!(summary.down, 3);

    let results = results_by_tenant(&store);

    let healthy = &results["at-threshold"];
    assert_eq!(healthy.status, HealthStatus::Healthy);
    assert_eq!(healthy.latency_ms, Some(1000));

    let degraded = &results["past-threshold"];
    assert_eq!(degraded.status, HealthStatus::Degraded);
    assert_eq!(degraded.latency_ms, Some(1001));

    let client_error = &results["client-error"];
    assert_eq!(client_error.status, HealthStatus::Down);
    assert_eq!(client_error.latency_ms, Some(50));
    assert!(client_error.error.as_deref().unwrap().contains("404"));

    let timing_out = &results["timing-out"];
    assert_eq!(timing_out.status, HealthStatus::Down);
    assert_eq!(timing_out.latency_ms, Some(5000));
    assert!(timing_out.error.as_deref().unwrap().contains("5000"));

    let unreachable = &results["unreachable"];
    assert_eq!(unreachable.status, HealthStatus::Down);
    assert!(unreachable.latency_ms.is_none());
    assert!(unreachable.error.as_deref().unwrap().contains("dns error"));
}

#[tokio::test]
async fn test_missing_credential_short_circuits() {
    let erp = Arc::new(
        ScriptedErpClient::new().script("no-creds", Duration::ZERO, responded(200, 10)),
    );
    let store = Arc::new(InMemoryHealthResultStore::new());
    let config = TenantErpConfig::new("no-creds", "https://erp.no-creds.example");
    let service = HealthCheckService::new(
        Arc::new(InMemoryTenantConfigProvider::new(vec![config])),
        erp.clone(),
        store.clone(),
    );

    let summary = service.run().await.unwrap();
    assert_eq!(summary.down, 1);

    // Classified without ever reaching the network.
    assert_eq!(erp.probe_calls("no-creds"), 0);

    let results = results_by_tenant(&store);
    let result = &results["no-creds"];
    assert_eq!(result.status, HealthStatus::Down);
    assert!(result.latency_ms.is_none());
    assert!(result.error.as_deref().unwrap().contains("credential"));
}

#[tokio::test(start_paused = true)]
async fn test_batches_bound_concurrency() {
    let mut erp = ScriptedErpClient::new();
    for i in 0..12 {
        erp = erp.script(
            &format!("tenant-{i}"),
            Duration::from_millis(100),
            responded(200, 10),
        );
    }
    let erp = Arc::new(erp);
    let configs: Vec<_> = (0..12).map(|i| tenant(&format!("tenant-{i}"))).collect();
    let store = Arc::new(InMemoryHealthResultStore::new());
    let service = HealthCheckService::new(
        Arc::new(InMemoryTenantConfigProvider::new(configs)),
        erp.clone(),
        store.clone(),
    )
    .with_batch_size(5);

    let start = tokio::time::Instant::now();
    let summary = service.run().await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(summary.total, 12);
    assert_eq!(summary.healthy, 12);
    assert_eq!(store.results().len(), 12);

    // 3 batches (5, 5, 2) of 100ms each, not 12 sequential probes.
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(400));
    assert!(erp.max_in_flight() <= 5);
}

#[tokio::test(start_paused = true)]
async fn test_run_latency_is_sum_of_batch_maxima() {
    let delays = [
        ("a-1", 300u64),
        ("a-2", 50),
        ("a-3", 50),
        ("b-1", 200),
        ("b-2", 10),
        ("b-3", 10),
    ];
    let mut erp = ScriptedErpClient::new();
    for (id, delay) in delays {
        erp = erp.script(id, Duration::from_millis(delay), responded(200, 10));
    }
    let configs: Vec<_> = delays.iter().map(|(id, _)| tenant(id)).collect();
    let service = HealthCheckService::new(
        Arc::new(InMemoryTenantConfigProvider::new(configs)),
        Arc::new(erp),
        Arc::new(InMemoryHealthResultStore::new()),
    )
    .with_batch_size(3);

    let start = tokio::time::Instant::now();
    service.run().await.unwrap();
    let elapsed = start.elapsed();

    // max(300, 50, 50) + max(200, 10, 10) = 500ms.
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed < Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn test_one_timing_out_tenant_does_not_poison_the_batch() {
    let erp = Arc::new(
        ScriptedErpClient::new()
            .script("ok-1", Duration::from_millis(20), responded(200, 20))
            .script("ok-2", Duration::from_millis(20), responded(200, 20))
            .script("slow", Duration::from_millis(1200), responded(200, 1200))
            .script(
                "stuck",
                Duration::from_secs(5),
                ProbeOutcome::TimedOut {
                    limit: Duration::from_secs(5),
                },
            )
            .script("ok-3", Duration::from_millis(20), responded(200, 20)),
    );
    let configs = vec![
        tenant("ok-1"),
        tenant("ok-2"),
        tenant("slow"),
        tenant("stuck"),
        tenant("ok-3"),
    ];
    let store = Arc::new(InMemoryHealthResultStore::new());
    let service = HealthCheckService::new(
        Arc::new(InMemoryTenantConfigProvider::new(configs)),
        erp.clone(),
        store.clone(),
    );

    let summary = service.run().await.unwrap();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.healthy, 3);
    assert_eq!(summary.degraded, 1);
    assert_eq!(summary.down, 1);

    let results = results_by_tenant(&store);
    assert_eq!(results["stuck"].status, HealthStatus::Down);
    assert_eq!(results["ok-1"].status, HealthStatus::Healthy);
    assert_eq!(results["slow"].status, HealthStatus::Degraded);

    // A subsequent run is a fresh, independent attempt.
    let summary = service.run().await.unwrap();
    assert_eq!(summary.total, 5);
    assert_eq!(erp.probe_calls("stuck"), 2);
}

#[tokio::test]
async fn test_persistence_failure_does_not_fail_the_run() {
    let erp = Arc::new(
        ScriptedErpClient::new().script("t1", Duration::ZERO, responded(200, 10)),
    );
    let service = HealthCheckService::new(
        Arc::new(InMemoryTenantConfigProvider::new(vec![tenant("t1")])),
        erp,
        Arc::new(FailingStore),
    );

    let summary = service.run().await.unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.healthy, 1);
}

#[tokio::test]
async fn test_config_fetch_failure_is_fatal_with_zero_probes() {
    let erp = Arc::new(ScriptedErpClient::new());
    let store = Arc::new(InMemoryHealthResultStore::new());
    let service = HealthCheckService::new(
        Arc::new(FailingConfigProvider),
        erp.clone(),
        store.clone(),
    );

    let result = service.run().await;
    assert!(matches!(result, Err(Error::Storage { .. })));
    assert_eq!(erp.max_in_flight(), 0);
    assert!(store.results().is_empty());
}
