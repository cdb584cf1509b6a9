//! Tenant ERP configuration snapshot

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default per-call timeout for ERP operations (10 seconds)
pub const DEFAULT_ERP_TIMEOUT_SECS: u64 = 10;

/// Read-only per-tenant ERP connection snapshot
///
/// Supplied by the configuration collaborator at the start of each health
/// run or pricing lookup. The core never mutates a snapshot; a missing
/// `credential` means decryption failed or no credential is stored, and
/// callers must treat the tenant's ERP as unreachable without attempting
/// a network call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantErpConfig {
    /// Owning tenant identifier
    pub tenant_id: String,
    /// Base URL of the tenant's ERP pricing endpoint
    pub endpoint_url: String,
    /// Decrypted API credential; `None` when unavailable for this run
    #[serde(default)]
    pub credential: Option<String>,
    /// Per-call timeout for requests against this endpoint
    pub timeout: Duration,
    /// Extra headers the ERP requires on every request
    #[serde(default)]
    pub custom_headers: HashMap<String, String>,
}

impl TenantErpConfig {
    /// Create a configuration snapshot with the default timeout
    pub fn new<T: Into<String>, U: Into<String>>(tenant_id: T, endpoint_url: U) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            endpoint_url: endpoint_url.into(),
            credential: None,
            timeout: Duration::from_secs(DEFAULT_ERP_TIMEOUT_SECS),
            custom_headers: HashMap::new(),
        }
    }

    /// Set the decrypted credential
    pub fn with_credential<S: Into<String>>(mut self, credential: S) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a custom header
    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.custom_headers.insert(name.into(), value.into());
        self
    }

    /// Whether a usable credential is present for this run
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}
