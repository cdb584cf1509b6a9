//! Structured logging with tracing
//!
//! Centralized logging configuration and log helpers for the resilience
//! layer. Configures structured logging with optional JSON output and
//! daily-rolling file output.

use epb_domain::entities::{HealthRunSummary, InvalidationScope};
use epb_domain::error::{Error, Result};
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// Re-export LoggingConfig for convenience
pub use crate::config::LoggingConfig;

/// Initialize logging with the provided configuration
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env("EPB_LOG").unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| std::path::Path::new(".")),
            path.file_stem()
                .unwrap_or_else(|| std::ffi::OsStr::new("epb")),
        )
    });

    // json_format selects layer types, so the branches cannot be merged
    if config.json_format {
        let stdout = fmt::layer().json().with_target(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(stdout).with(file).init();
        } else {
            registry.with(stdout).init();
        }
    } else {
        let stdout = fmt::layer().with_target(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(stdout).with(file).init();
        } else {
            registry.with(stdout).init();
        }
    }

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {}. Use trace, debug, info, warn, or error",
            level
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &std::path::Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}

/// Log the summary of a completed scheduled health run
pub fn log_health_run(summary: &HealthRunSummary) {
    if summary.down > 0 {
        error!(
            total = summary.total,
            healthy = summary.healthy,
            degraded = summary.degraded,
            down = summary.down,
            "Scheduled ERP health run found unreachable tenants"
        );
    } else {
        debug!(
            total = summary.total,
            healthy = summary.healthy,
            degraded = summary.degraded,
            "Scheduled ERP health run passed"
        );
    }
}

/// Log an administrative cache clear
pub fn log_cache_clear(scope: &InvalidationScope, removed: usize) {
    match scope {
        InvalidationScope::All => info!(removed, "Price cache cleared globally"),
        InvalidationScope::Tenant(tenant_id) => {
            info!(tenant = %tenant_id, removed, "Price cache cleared for tenant");
        }
        InvalidationScope::Entry { tenant_id, .. } => {
            info!(tenant = %tenant_id, removed, "Price cache entry invalidated");
        }
    }
}
