//! ERP client providers
//!
//! Implementations of the [`epb_domain::ports::ErpClient`] port.

/// reqwest-based production ERP client
pub mod http;
/// Null ERP client for testing and disabled wiring
pub mod null;

pub use http::{ErpHttpConfig, HttpErpClient};
pub use null::NullErpClient;
