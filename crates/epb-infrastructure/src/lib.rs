//! Infrastructure Layer - ERP Pricing Bridge
//!
//! Ambient concerns around the application core: configuration loading,
//! structured logging, background task lifecycles, cache administration,
//! and explicit service wiring.
//!
//! ## Modules
//!
//! - **config** - figment-based configuration (defaults, TOML, `EPB_*` env)
//! - **logging** - tracing setup and structured log helpers
//! - **cache** - the background sweep task for the price cache
//! - **health** - the periodic ERP health run task
//! - **admin** - administrative cache clear with audit records
//! - **bootstrap** - constructor-injection wiring of the whole layer

pub mod admin;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod constants;
pub mod health;
pub mod logging;

pub use admin::CacheAdminService;
pub use bootstrap::{AppServices, build_services};
pub use cache::CacheSweeper;
pub use config::{AppConfig, ConfigLoader};
pub use health::HealthCheckRunner;
