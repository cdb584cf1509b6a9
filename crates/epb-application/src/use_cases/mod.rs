//! Application Use Cases
//!
//! Services orchestrating the domain ports around the price cache:
//! cache-aside pricing lookups and the tenant ERP health run.

/// ERP health probe scheduler
pub mod health_check_service;
/// Cache-aside pricing lookup
pub mod pricing_service;

pub use health_check_service::{
    DEFAULT_DEGRADED_THRESHOLD_MS, DEFAULT_HEALTH_BATCH_SIZE, HealthCheckService,
};
pub use pricing_service::{PricingLookup, PricingService};
