//! Application Layer - ERP Pricing Bridge
//!
//! This crate contains the application layer of the ERP Pricing Bridge:
//! the tenant-scoped price cache and the services that orchestrate pricing
//! lookups and ERP health runs over the domain ports.
//!
//! ## Architecture
//!
//! The application layer:
//! - Owns the price cache domain service (the only mutable shared state in
//!   the core)
//! - Orchestrates the ERP client, tenant configuration, and storage ports
//! - Has no dependencies on infrastructure or external frameworks
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `epb-domain`: For domain entities, errors, and port traits
//! - Pure Rust libraries for async, hashing, and logging

pub mod domain_services;
pub mod use_cases;

pub use domain_services::price_cache::PriceCache;
pub use use_cases::health_check_service::HealthCheckService;
pub use use_cases::pricing_service::{PricingLookup, PricingService};
