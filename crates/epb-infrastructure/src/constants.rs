//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "epb.toml";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "EPB";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default TTL for cached pricing results in seconds (5 minutes)
pub const CACHE_DEFAULT_TTL_SECS: u64 = 300;

/// Default background sweep cadence in seconds (5 minutes)
pub const CACHE_SWEEP_INTERVAL_SECS: u64 = 300;

// ============================================================================
// HEALTH CHECK CONSTANTS
// ============================================================================

/// Tenants probed in parallel per batch
pub const HEALTH_BATCH_SIZE: usize = 5;

/// Latency threshold separating healthy from degraded, in milliseconds
pub const HEALTH_DEGRADED_THRESHOLD_MS: u64 = 1000;

/// Default scheduled health run cadence in seconds (5 minutes)
pub const HEALTH_RUN_INTERVAL_SECS: u64 = 300;

// ============================================================================
// ERP CLIENT CONSTANTS
// ============================================================================

/// Maximum idle HTTP connections per ERP host
pub const ERP_MAX_IDLE_PER_HOST: usize = 10;

/// Idle HTTP connection timeout in seconds
pub const ERP_IDLE_TIMEOUT_SECS: u64 = 90;

/// TCP keep-alive duration in seconds
pub const ERP_KEEPALIVE_SECS: u64 = 60;

/// Default total request timeout in seconds
pub const ERP_REQUEST_TIMEOUT_SECS: u64 = 30;
