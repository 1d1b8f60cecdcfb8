//! Data models for the Cooler Engine.
//!
//! The `models` module defines the serialisable input and output
//! records of the profit estimator.  These data types derive
//! `Serialize` and `Deserialize` so that they can be transmitted over
//! the HTTP API or stored by callers running what-if sweeps.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::params::BusinessParameters;

/// The product mix stocked in a cooler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoolerType {
    /// Drinks only.
    DrinkOnly,
    /// Drinks and snacks sharing one unit.
    Mixed,
}

impl CoolerType {
    pub const ALL: [CoolerType; 2] = [CoolerType::DrinkOnly, CoolerType::Mixed];
}

impl fmt::Display for CoolerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoolerType::DrinkOnly => write!(f, "Drink-Only"),
            CoolerType::Mixed => write!(f, "Drink & Snack Mix"),
        }
    }
}

/// Everything the caller knows about one location.
///
/// Percentages are expressed on a 0–100 scale.  Currency amounts are
/// monthly unless the field name says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    /// Daily visitor count, 1 to 5000.
    pub foot_traffic: u32,
    pub cooler_type: CoolerType,
    /// Stock level, in percent of capacity, tied to a refill visit.  How
    /// it sizes the stock sold between refills depends on the configured
    /// [`DrawdownPolicy`](crate::params::DrawdownPolicy).
    pub refill_threshold_percent: f64,
    /// Labor hours spent on each refill visit.
    pub time_per_refill_hours: f64,
    /// Share of gross sales kept before operating costs.
    pub profit_margin_percent: f64,
    /// Monthly connectivity fee per physical cooler.
    pub data_cost_per_cooler: f64,
    #[serde(default)]
    pub uses_employee: bool,
    /// Hourly wage, only charged when `uses_employee` is set.
    #[serde(default)]
    pub employee_wage: f64,
    #[serde(default)]
    pub has_financing: bool,
    /// Monthly financing payment, only charged when `has_financing` is set.
    #[serde(default)]
    pub financing_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_sales_tax_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_fee_percent: Option<f64>,
}

impl EstimateInput {
    /// Builds an input for a location using the defaults carried by
    /// `params`: self-serviced, unfinanced, with no tax or card fees.
    pub fn for_location(foot_traffic: u32, cooler_type: CoolerType, params: &BusinessParameters) -> Self {
        Self {
            foot_traffic,
            cooler_type,
            refill_threshold_percent: params.default_refill_threshold_percent,
            time_per_refill_hours: params.default_time_per_refill_hours,
            profit_margin_percent: params.profile(cooler_type).default_profit_margin_percent,
            data_cost_per_cooler: params.default_data_cost_per_cooler,
            uses_employee: false,
            employee_wage: params.default_employee_wage,
            has_financing: false,
            financing_cost: 0.0,
            state_sales_tax_percent: None,
            credit_card_fee_percent: None,
        }
    }
}

/// Conditions the engine reports instead of producing non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateWarning {
    /// Usable capacity times item price was zero, so the number of refills
    /// cannot be derived.  Refills and labor hours are reported as zero.
    RefillEstimateUnavailable,
}

impl fmt::Display for EstimateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateWarning::RefillEstimateUnavailable => {
                write!(f, "Refill estimate unavailable: no usable capacity between refills")
            }
        }
    }
}

/// Projected monthly figures for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub estimated_daily_revenue: f64,
    /// Gross sales over `days_in_month` days.
    pub monthly_sales: f64,
    /// Gross profit at the configured margin, before operating costs.
    pub monthly_profit: f64,
    /// Items sold from one cooler between two refill visits.
    pub usable_capacity: f64,
    pub refills_per_month: f64,
    pub monthly_labor_hours: f64,
    pub labor_cost: f64,
    pub data_cost: f64,
    pub financing_cost: f64,
    pub sales_tax_cost: f64,
    pub credit_card_cost: f64,
    pub total_operating_cost: f64,
    /// Monthly profit minus operating costs.  Not clamped at zero.
    pub net_profit: f64,
    pub coolers_needed: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EstimateWarning>,
}

impl EstimateResult {
    pub fn refill_estimate_available(&self) -> bool {
        !self.warnings.contains(&EstimateWarning::RefillEstimateUnavailable)
    }
}

/// One point of a foot traffic sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub foot_traffic: u32,
    pub result: EstimateResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_deserializes_with_optional_fields_missing() {
        let input: EstimateInput = serde_json::from_value(json!({
            "foot_traffic": 120,
            "cooler_type": "drink-only",
            "refill_threshold_percent": 65.0,
            "time_per_refill_hours": 2.0,
            "profit_margin_percent": 60.0,
            "data_cost_per_cooler": 45.0
        }))
        .unwrap();
        assert_eq!(input.cooler_type, CoolerType::DrinkOnly);
        assert!(!input.uses_employee);
        assert!(!input.has_financing);
        assert_eq!(input.state_sales_tax_percent, None);
        assert_eq!(input.credit_card_fee_percent, None);
    }

    #[test]
    fn test_for_location_uses_parameter_defaults() {
        let params = BusinessParameters::default();
        let input = EstimateInput::for_location(50, CoolerType::Mixed, &params);
        assert_eq!(input.refill_threshold_percent, 65.0);
        assert_eq!(input.time_per_refill_hours, 2.0);
        assert_eq!(input.profit_margin_percent, 58.0);
        assert_eq!(input.data_cost_per_cooler, 45.0);
        assert_eq!(input.employee_wage, 18.0);
        let drinks = EstimateInput::for_location(50, CoolerType::DrinkOnly, &params);
        assert_eq!(drinks.profit_margin_percent, 60.0);
    }

    #[test]
    fn test_warning_serializes_as_snake_case() {
        let value = serde_json::to_value(EstimateWarning::RefillEstimateUnavailable).unwrap();
        assert_eq!(value, json!("refill_estimate_unavailable"));
    }
}
