//! Configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Price cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Health check scheduler settings
    #[serde(default)]
    pub health: HealthCheckConfig,

    /// ERP HTTP client settings
    #[serde(default)]
    pub erp: ErpClientConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Price cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Namespace prepended to every cache key
    pub namespace: String,

    /// Default TTL for cached pricing results in seconds
    pub default_ttl_secs: u64,

    /// Background sweep cadence in seconds
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: "erp-prices".to_string(),
            default_ttl_secs: CACHE_DEFAULT_TTL_SECS,
            sweep_interval_secs: CACHE_SWEEP_INTERVAL_SECS,
        }
    }
}

/// Health check scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckConfig {
    /// Tenants probed in parallel per batch
    pub batch_size: usize,

    /// Latency threshold separating healthy from degraded, in milliseconds
    pub degraded_threshold_ms: u64,

    /// Scheduled run cadence in seconds
    pub run_interval_secs: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            batch_size: HEALTH_BATCH_SIZE,
            degraded_threshold_ms: HEALTH_DEGRADED_THRESHOLD_MS,
            run_interval_secs: HEALTH_RUN_INTERVAL_SECS,
        }
    }
}

/// ERP HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpClientConfig {
    /// Maximum idle connections per ERP host
    pub max_idle_per_host: usize,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,

    /// TCP keep-alive duration in seconds
    pub keepalive_secs: u64,

    /// Default total request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ErpClientConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: ERP_MAX_IDLE_PER_HOST,
            idle_timeout_secs: ERP_IDLE_TIMEOUT_SECS,
            keepalive_secs: ERP_KEEPALIVE_SECS,
            request_timeout_secs: ERP_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, or error
    pub level: String,

    /// Emit JSON-formatted log lines
    pub json_format: bool,

    /// Optional log file path enabling daily-rolling file output
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
