//! Pricing payload types

use serde::{Deserialize, Serialize};

/// One plan's pricing record as returned by a tenant's ERP
///
/// The price cache treats these records as opaque data; only the ERP client
/// adapter interprets the wire shape they are parsed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Identifier of the priced plan
    pub plan_id: String,
    /// Display name of the plan, when the ERP provides one
    #[serde(default)]
    pub plan_name: Option<String>,
    /// Monthly premium in the ERP's currency
    pub monthly_premium: f64,
    /// Annual deductible, when the ERP provides one
    #[serde(default)]
    pub annual_deductible: Option<f64>,
    /// ISO 4217 currency code
    pub currency: String,
}

impl PriceBreakdown {
    /// Create a minimal price breakdown
    pub fn new<P: Into<String>, C: Into<String>>(
        plan_id: P,
        monthly_premium: f64,
        currency: C,
    ) -> Self {
        Self {
            plan_id: plan_id.into(),
            plan_name: None,
            monthly_premium,
            annual_deductible: None,
            currency: currency.into(),
        }
    }

    /// Set the plan display name
    pub fn with_plan_name<S: Into<String>>(mut self, name: S) -> Self {
        self.plan_name = Some(name.into());
        self
    }

    /// Set the annual deductible
    pub fn with_annual_deductible(mut self, deductible: f64) -> Self {
        self.annual_deductible = Some(deductible);
        self
    }
}
