//! ERP Client Port
//!
//! Port for the external pricing system a tenant integrates with. Two
//! operations share one contract: the full pricing fetch used on the
//! cache-population path, and a lightweight reachability probe used by the
//! health scheduler. The probe never fetches pricing payloads.

use crate::entities::{PriceBreakdown, TenantErpConfig};
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Outcome of one reachability probe
///
/// Probes are infallible by construction: every failure mode becomes a
/// value, so one tenant's outcome can never escalate into a sibling's
/// probe or the surrounding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The endpoint answered within the timeout
    Responded {
        /// HTTP status code of the response
        status: u16,
        /// Observed round-trip latency
        latency: Duration,
    },
    /// The configured per-tenant timeout elapsed before a response
    TimedOut {
        /// The timeout bound that was hit
        limit: Duration,
    },
    /// Transport-level failure before any response (DNS, refused, TLS, ...)
    Failed {
        /// Raw error message
        message: String,
    },
}

impl ProbeOutcome {
    /// Whether the endpoint answered with a success status
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Responded { status, .. } if (200..300).contains(status))
    }
}

/// ERP Client Port
///
/// Implementations perform the actual network calls against a tenant's
/// configured endpoint. Both operations are bounded by the per-call timeout
/// carried in the [`TenantErpConfig`] snapshot.
///
/// # Implementations
///
/// - **Http**: reqwest-based production adapter
/// - **Null**: no-network adapter for testing and disabled wiring
#[async_trait]
pub trait ErpClient: Send + Sync {
    /// Fetch pricing for a set of plans from the tenant's ERP
    ///
    /// # Arguments
    /// * `config` - The tenant's connection snapshot
    /// * `plan_ids` - Plans to price; must be non-empty
    ///
    /// # Returns
    /// The ERP's price breakdowns, or the failure the ERP or transport
    /// reported.
    async fn fetch_prices(
        &self,
        config: &TenantErpConfig,
        plan_ids: &[String],
    ) -> Result<Vec<PriceBreakdown>>;

    /// Probe the tenant's endpoint for reachability and latency
    ///
    /// Performs a lightweight connectivity check without fetching pricing
    /// data, bounded by `config.timeout`.
    async fn probe(&self, config: &TenantErpConfig) -> ProbeOutcome;

    /// Get the name/identifier of this client implementation
    fn provider_name(&self) -> &str;
}
