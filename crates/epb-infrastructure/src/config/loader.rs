//! Configuration loader
//!
//! Handles loading configuration from defaults, an optional TOML file, and
//! environment variables. Uses Figment for source merging.

use crate::config::AppConfig;
use crate::constants::*;
use crate::logging::log_config_loaded;
use epb_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources
    /// override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if it exists)
    /// 3. Environment variables with prefix; a double underscore separates
    ///    nesting levels (e.g. `EPB_CACHE__DEFAULT_TTL_SECS`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            figment = figment.merge(Toml::file(config_path));
            log_config_loaded(config_path, config_path.exists());
        } else {
            let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
            if default_path.exists() {
                figment = figment.merge(Toml::file(default_path));
                log_config_loaded(default_path, true);
            }
        }

        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("__"));

        let app_config: AppConfig = figment.extract().map_err(|e| {
            Error::configuration_with_source("Failed to extract configuration", e)
        })?;

        self.validate_config(&app_config)?;
        Ok(app_config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(config).map_err(|e| {
            Error::configuration_with_source("Failed to serialize config to TOML", e)
        })?;
        std::fs::write(path.as_ref(), toml_string).map_err(|e| {
            Error::configuration_with_source(
                format!("Failed to write config to {}", path.as_ref().display()),
                e,
            )
        })
    }

    /// Reject configurations the core cannot run with
    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        if config.cache.default_ttl_secs == 0 {
            return Err(Error::configuration("cache.default_ttl_secs must be > 0"));
        }
        if config.cache.sweep_interval_secs == 0 {
            return Err(Error::configuration(
                "cache.sweep_interval_secs must be > 0",
            ));
        }
        if config.cache.namespace.is_empty() {
            return Err(Error::configuration("cache.namespace must not be empty"));
        }
        if config.health.batch_size == 0 {
            return Err(Error::configuration("health.batch_size must be at least 1"));
        }
        if config.health.degraded_threshold_ms == 0 {
            return Err(Error::configuration(
                "health.degraded_threshold_ms must be > 0",
            ));
        }
        if config.health.run_interval_secs == 0 {
            return Err(Error::configuration("health.run_interval_secs must be > 0"));
        }
        if config.erp.request_timeout_secs == 0 {
            return Err(Error::configuration("erp.request_timeout_secs must be > 0"));
        }
        Ok(())
    }
}
