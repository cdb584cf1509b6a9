//! Domain Entities
//!
//! Typed representations of the data flowing through the resilience layer.
//! Payloads that were historically JSON-shaped (price breakdowns, tenant
//! configurations, health results) are declared as explicit structs and
//! validated at the boundary where they enter the core.
//!
//! ## Entities
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`PriceBreakdown`] | One plan's pricing record as returned by an ERP |
//! | [`TenantErpConfig`] | Read-only per-tenant ERP connection snapshot |
//! | [`HealthStatus`] | Classified reachability state of an ERP endpoint |
//! | [`HealthCheckResult`] | One tenant's classified probe result |
//! | [`HealthRunSummary`] | Per-status counts for one scheduler run |
//! | [`CacheStatistics`] | On-demand snapshot of price cache counters |
//! | [`CacheClearAudit`] | Audit record for an administrative cache clear |

/// Price cache statistics and invalidation types
pub mod cache;
/// Health classification types
pub mod health;
/// Pricing payload types
pub mod pricing;
/// Tenant ERP configuration snapshot
pub mod tenant;

// Re-export commonly used entities
pub use cache::{CacheClearAudit, CacheStatistics, InvalidationScope};
pub use health::{HealthCheckResult, HealthRunSummary, HealthStatus};
pub use pricing::PriceBreakdown;
pub use tenant::TenantErpConfig;
