//! HTTP ERP client
//!
//! reqwest-based implementation of the [`ErpClient`] port. One pooled
//! client serves every tenant; per-tenant endpoint, credential, headers,
//! and timeout come from the [`TenantErpConfig`] snapshot on each call.
//!
//! The reachability probe is a HEAD request against the tenant endpoint;
//! it never fetches a pricing payload.

use async_trait::async_trait;
use epb_domain::entities::{PriceBreakdown, TenantErpConfig};
use epb_domain::error::{Error, Result};
use epb_domain::ports::{ErpClient, ProbeOutcome};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// HTTP client configuration
///
/// Controls connection pooling, timeouts, and the user agent for the
/// shared ERP client. Per-tenant request timeouts override the pool
/// default on each call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpHttpConfig {
    /// Maximum idle connections per host
    pub max_idle_per_host: usize,
    /// Idle connection timeout
    pub idle_timeout: Duration,
    /// TCP keep-alive duration
    pub keepalive: Duration,
    /// Default total timeout for requests
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ErpHttpConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 10,
            idle_timeout: Duration::from_secs(90),
            keepalive: Duration::from_secs(60),
            timeout: Duration::from_secs(30),
            user_agent: format!("epb/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Request body for a pricing fetch
#[derive(Serialize)]
struct PriceRequest<'a> {
    plan_ids: &'a [String],
}

/// ERP response envelope for a pricing fetch
#[derive(Deserialize)]
struct PriceResponse {
    success: bool,
    #[serde(default)]
    data: Option<Vec<PriceBreakdown>>,
    #[serde(default)]
    error: Option<ErpErrorBody>,
}

/// Error payload inside a failed ERP envelope
#[derive(Deserialize)]
struct ErpErrorBody {
    code: String,
    message: String,
}

/// reqwest-based ERP client
///
/// # Example
///
/// ```no_run
/// use epb_providers::erp::{ErpHttpConfig, HttpErpClient};
///
/// let client = HttpErpClient::with_config(ErpHttpConfig::default()).unwrap();
/// ```
pub struct HttpErpClient {
    client: reqwest::Client,
    config: ErpHttpConfig,
}

impl HttpErpClient {
    /// Create a client with default pool settings
    pub fn new() -> Result<Self> {
        Self::with_config(ErpHttpConfig::default())
    }

    /// Create a client with custom pool settings
    pub fn with_config(config: ErpHttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout)
            .tcp_keepalive(config.keepalive)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::network_with_source("Failed to build ERP HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// The pool configuration this client was built with
    pub fn config(&self) -> &ErpHttpConfig {
        &self.config
    }

    /// Resolve the pricing URL for a tenant endpoint
    fn prices_url(config: &TenantErpConfig) -> String {
        format!("{}/prices", config.endpoint_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ErpClient for HttpErpClient {
    async fn fetch_prices(
        &self,
        config: &TenantErpConfig,
        plan_ids: &[String],
    ) -> Result<Vec<PriceBreakdown>> {
        if plan_ids.is_empty() {
            return Err(Error::invalid_argument(
                "plan id list for a pricing fetch cannot be empty",
            ));
        }
        let credential = config.credential.as_deref().ok_or_else(|| {
            Error::credential(format!(
                "no decrypted ERP credential for tenant {}",
                config.tenant_id
            ))
        })?;

        let mut request = self
            .client
            .post(Self::prices_url(config))
            .bearer_auth(credential)
            .json(&PriceRequest { plan_ids })
            .timeout(config.timeout);
        for (name, value) in &config.custom_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::network(format!(
                    "ERP price fetch timed out after {}ms",
                    config.timeout.as_millis()
                ))
            } else {
                Error::network_with_source("ERP price fetch failed", e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(format!(
                "ERP endpoint returned status {status}"
            )));
        }

        let envelope: PriceResponse = response
            .json()
            .await
            .map_err(|e| Error::network_with_source("Invalid ERP pricing response body", e))?;

        if envelope.success {
            let prices = envelope.data.unwrap_or_default();
            tracing::debug!(
                tenant = %config.tenant_id,
                prices = prices.len(),
                "ERP price fetch succeeded"
            );
            Ok(prices)
        } else {
            Err(match envelope.error {
                Some(body) => Error::erp(body.code, body.message),
                None => Error::erp("UNKNOWN", "ERP reported failure without detail"),
            })
        }
    }

    async fn probe(&self, config: &TenantErpConfig) -> ProbeOutcome {
        let mut request = self
            .client
            .head(&config.endpoint_url)
            .timeout(config.timeout);
        if let Some(credential) = config.credential.as_deref() {
            request = request.bearer_auth(credential);
        }
        for (name, value) in &config.custom_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let start = Instant::now();
        match request.send().await {
            Ok(response) => ProbeOutcome::Responded {
                status: response.status().as_u16(),
                latency: start.elapsed(),
            },
            Err(e) if e.is_timeout() => ProbeOutcome::TimedOut {
                limit: config.timeout,
            },
            Err(e) => ProbeOutcome::Failed {
                message: e.to_string(),
            },
        }
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}

impl std::fmt::Debug for HttpErpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpErpClient")
            .field("user_agent", &self.config.user_agent)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}
