//! Health check infrastructure
//!
//! Background scheduling around the application-layer health check
//! service.

/// Periodic health run task
pub mod runner;

pub use runner::HealthCheckRunner;
