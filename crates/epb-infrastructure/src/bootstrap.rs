//! Service wiring
//!
//! Builds the whole resilience layer by explicit constructor injection:
//! every service receives its collaborators as `Arc` handles, and the
//! background tasks are owned by the returned bundle so shutdown always
//! reaches them. There is no ambient global state.

use crate::admin::CacheAdminService;
use crate::cache::CacheSweeper;
use crate::config::AppConfig;
use crate::health::HealthCheckRunner;
use epb_application::{HealthCheckService, PriceCache, PricingService};
use epb_domain::error::Result;
use epb_domain::ports::{ErpClient, HealthResultStore, TenantConfigProvider};
use epb_providers::erp::{ErpHttpConfig, HttpErpClient};
use std::sync::Arc;
use std::time::Duration;

/// The wired resilience layer
///
/// Background tasks are not started automatically; call
/// [`AppServices::start_background`] once the surrounding process is ready
/// and [`AppServices::shutdown`] before exit.
pub struct AppServices {
    /// Shared price cache
    pub cache: Arc<PriceCache>,
    /// Cache-aside pricing lookups
    pub pricing: Arc<PricingService>,
    /// On-demand health runs
    pub health: Arc<HealthCheckService>,
    /// Administrative cache operations
    pub admin: CacheAdminService,
    /// Periodic cache sweep task
    pub sweeper: CacheSweeper,
    /// Periodic health run task
    pub health_runner: HealthCheckRunner,
}

impl AppServices {
    /// Start the periodic sweep and health run tasks
    pub fn start_background(&self) {
        self.sweeper.start();
        self.health_runner.start();
    }

    /// Stop all background tasks and wait for them to finish
    pub async fn shutdown(&self) {
        self.sweeper.stop().await;
        self.health_runner.stop().await;
    }
}

/// Map the ERP config section onto the HTTP client settings
fn erp_http_config(config: &AppConfig) -> ErpHttpConfig {
    ErpHttpConfig {
        max_idle_per_host: config.erp.max_idle_per_host,
        idle_timeout: Duration::from_secs(config.erp.idle_timeout_secs),
        keepalive: Duration::from_secs(config.erp.keepalive_secs),
        timeout: Duration::from_secs(config.erp.request_timeout_secs),
        ..Default::default()
    }
}

/// Wire the resilience layer from configuration and external collaborators
///
/// The tenant configuration provider and the result store are the two
/// collaborators owned by the surrounding platform; everything else is
/// constructed here.
pub fn build_services(
    config: &AppConfig,
    tenant_configs: Arc<dyn TenantConfigProvider>,
    store: Arc<dyn HealthResultStore>,
) -> Result<AppServices> {
    let cache = Arc::new(PriceCache::with_namespace(&config.cache.namespace));
    let erp: Arc<dyn ErpClient> = Arc::new(HttpErpClient::with_config(erp_http_config(config))?);

    let pricing = Arc::new(
        PricingService::new(Arc::clone(&cache), Arc::clone(&erp))
            .with_default_ttl(Duration::from_secs(config.cache.default_ttl_secs)),
    );

    let health = Arc::new(
        HealthCheckService::new(tenant_configs, erp, Arc::clone(&store))
            .with_batch_size(config.health.batch_size)
            .with_degraded_threshold(Duration::from_millis(config.health.degraded_threshold_ms)),
    );

    let sweeper = CacheSweeper::new(
        Arc::clone(&cache),
        Duration::from_secs(config.cache.sweep_interval_secs),
    );
    let health_runner = HealthCheckRunner::new(
        Arc::clone(&health),
        Duration::from_secs(config.health.run_interval_secs),
    );
    let admin = CacheAdminService::new(Arc::clone(&cache), store);

    Ok(AppServices {
        cache,
        pricing,
        health,
        admin,
        sweeper,
        health_runner,
    })
}
