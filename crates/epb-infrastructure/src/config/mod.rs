//! Configuration management
//!
//! Typed configuration sections and the figment-based loader merging
//! defaults, an optional TOML file, and `EPB_*` environment variables.

/// Configuration loader
pub mod loader;
/// Configuration types
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, CacheConfig, ErpClientConfig, HealthCheckConfig, LoggingConfig};
