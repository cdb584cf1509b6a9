//! Price cache infrastructure
//!
//! Background maintenance around the application-layer price cache.

/// Periodic expired-entry sweep task
pub mod sweeper;

pub use sweeper::CacheSweeper;
