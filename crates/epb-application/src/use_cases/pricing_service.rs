//! Cache-aside pricing lookup
//!
//! The pricing-population path of the resilience layer: a lookup first
//! queries the price cache, and only on a miss calls the tenant's ERP,
//! storing the fetched result with a TTL before returning it.

use crate::domain_services::price_cache::{DEFAULT_PRICE_TTL_SECS, PriceCache};
use epb_domain::entities::{PriceBreakdown, TenantErpConfig};
use epb_domain::error::Result;
use epb_domain::ports::ErpClient;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of one pricing lookup
#[derive(Debug, Clone)]
pub struct PricingLookup {
    /// The price breakdowns, from cache or freshly fetched
    pub prices: Vec<PriceBreakdown>,
    /// Whether the result came from the cache (hit) or the ERP (miss)
    pub from_cache: bool,
    /// Operation duration
    pub duration: Duration,
}

/// Cache-aside pricing service
///
/// Holds the shared price cache and the ERP client port. ERP failures on
/// the miss path propagate to the caller and leave the cache untouched.
pub struct PricingService {
    cache: Arc<PriceCache>,
    erp: Arc<dyn ErpClient>,
    default_ttl: Duration,
}

impl PricingService {
    /// Create a pricing service with the default result TTL
    pub fn new(cache: Arc<PriceCache>, erp: Arc<dyn ErpClient>) -> Self {
        Self {
            cache,
            erp,
            default_ttl: Duration::from_secs(DEFAULT_PRICE_TTL_SECS),
        }
    }

    /// Override the TTL applied to freshly fetched results
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Look up prices for a tenant's plan set, cache-aside
    ///
    /// # Errors
    /// `InvalidArgument` for an empty plan set; ERP/network errors from the
    /// client on the miss path.
    pub async fn get_prices(
        &self,
        config: &TenantErpConfig,
        plan_ids: &[String],
    ) -> Result<PricingLookup> {
        let start = Instant::now();
        let key = self.cache.generate_key(&config.tenant_id, plan_ids)?;

        if let Some(prices) = self.cache.get(&key) {
            debug!(
                tenant = %config.tenant_id,
                plans = plan_ids.len(),
                "Pricing lookup served from cache"
            );
            return Ok(PricingLookup {
                prices,
                from_cache: true,
                duration: start.elapsed(),
            });
        }

        let prices = self.erp.fetch_prices(config, plan_ids).await?;
        self.cache
            .set(&key, prices.clone(), self.default_ttl, &config.tenant_id);

        debug!(
            tenant = %config.tenant_id,
            plans = plan_ids.len(),
            provider = self.erp.provider_name(),
            "Pricing fetched from ERP and cached"
        );

        Ok(PricingLookup {
            prices,
            from_cache: false,
            duration: start.elapsed(),
        })
    }
}
