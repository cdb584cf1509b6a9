//! Health classification types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Classified reachability state of a tenant's ERP endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Endpoint responded successfully within the latency threshold
    Healthy,
    /// Endpoint responded successfully but slower than the threshold
    Degraded,
    /// Endpoint unreachable, erroring, or credentials unavailable
    Down,
}

impl HealthStatus {
    /// Check if the status indicates the endpoint is fully healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Check if the endpoint is usable (healthy or degraded)
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Healthy | Self::Degraded)
    }
}

/// One tenant's classified probe result
///
/// Created fresh on every scheduler run, handed to the storage collaborator
/// and never mutated afterward. `latency_ms` is present only when a response
/// or a timeout was actually observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Tenant whose endpoint was probed
    pub tenant_id: String,
    /// Classified status
    pub status: HealthStatus,
    /// Observed round-trip latency, or the timeout bound on timeout
    pub latency_ms: Option<u64>,
    /// Human-readable error detail for non-healthy outcomes
    pub error: Option<String>,
    /// When the probe completed
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    /// Create a healthy result
    pub fn healthy<S: Into<String>>(tenant_id: S, latency: Duration) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            status: HealthStatus::Healthy,
            latency_ms: Some(latency.as_millis() as u64),
            error: None,
            checked_at: Utc::now(),
        }
    }

    /// Create a degraded result
    pub fn degraded<S: Into<String>>(tenant_id: S, latency: Duration) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            status: HealthStatus::Degraded,
            latency_ms: Some(latency.as_millis() as u64),
            error: None,
            checked_at: Utc::now(),
        }
    }

    /// Create a down result with an error detail
    pub fn down<S: Into<String>, E: Into<String>>(
        tenant_id: S,
        latency: Option<Duration>,
        error: E,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            status: HealthStatus::Down,
            latency_ms: latency.map(|l| l.as_millis() as u64),
            error: Some(error.into()),
            checked_at: Utc::now(),
        }
    }
}

/// Per-status counts for one scheduler run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRunSummary {
    /// Total tenants checked
    pub total: usize,
    /// Tenants classified healthy
    pub healthy: usize,
    /// Tenants classified degraded
    pub degraded: usize,
    /// Tenants classified down
    pub down: usize,
}

impl HealthRunSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified result
    pub fn record(&mut self, status: HealthStatus) {
        self.total += 1;
        match status {
            HealthStatus::Healthy => self.healthy += 1,
            HealthStatus::Degraded => self.degraded += 1,
            HealthStatus::Down => self.down += 1,
        }
    }
}
