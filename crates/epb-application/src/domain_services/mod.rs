//! Application Domain Services
//!
//! Core services with real business logic, as opposed to the use-case
//! services that orchestrate ports around them.

/// Tenant-scoped price cache with TTL eviction and statistics
pub mod price_cache;

pub use price_cache::{DEFAULT_CACHE_NAMESPACE, DEFAULT_PRICE_TTL_SECS, PriceCache};
