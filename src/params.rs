//! Business parameters for the estimator.
//!
//! Every constant the estimate depends on (capacities, spend rates,
//! item price, refill policy, sizing heuristic) lives in
//! [`BusinessParameters`].  Deployments choose which of these to expose
//! to users; the rest keep their documented defaults.  Parameters may
//! be overridden from a JSON file on disk.

use crate::error::{EstimateError, ParameterError};
use crate::models::CoolerType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Documented uplift for drink-only coolers, used when the option
/// correlation factor is turned on.
pub const DEFAULT_OPTION_CORRELATION_FACTOR: f64 = 1.65;

/// Capacity, spend rate and default margin for one cooler type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolerProfile {
    /// Items held by one physical unit.
    pub capacity: u32,
    /// Average daily spend per visitor.
    pub revenue_per_person: f64,
    pub default_profit_margin_percent: f64,
}

/// How the refill threshold sizes the stock sold between two visits.
///
/// The two readings are not interchangeable:
///
/// * `RemainingStock` sells `capacity * threshold` items per refill
///   cycle.  At 65 % a 240 item cooler is serviced every 156 items sold.
/// * `ConsumedStock` refills once stock falls to the threshold, so the
///   cycle sells `capacity * (1 - threshold)` items.  At 100 % nothing
///   is sold between visits and the refill estimate is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawdownPolicy {
    #[default]
    RemainingStock,
    ConsumedStock,
}

impl DrawdownPolicy {
    /// Fraction of capacity sold between refills.
    pub fn fraction(&self, refill_threshold_percent: f64) -> f64 {
        let threshold = refill_threshold_percent / 100.0;
        match self {
            DrawdownPolicy::RemainingStock => threshold,
            DrawdownPolicy::ConsumedStock => 1.0 - threshold,
        }
    }
}

/// The configurable business constants of the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessParameters {
    pub drink_only: CoolerProfile,
    pub mixed: CoolerProfile,
    /// Multiplier on drink-only daily revenue.  `None` leaves revenue at
    /// `foot_traffic * revenue_per_person`.
    pub option_correlation_factor: Option<f64>,
    /// Price used to turn a sales value into a number of items sold.
    pub average_item_price: f64,
    pub days_in_month: u32,
    pub drawdown_policy: DrawdownPolicy,
    /// Daily visitors served by one cooler.
    pub visitors_per_cooler: u32,
    pub default_refill_threshold_percent: f64,
    pub default_time_per_refill_hours: f64,
    pub default_data_cost_per_cooler: f64,
    pub default_employee_wage: f64,
}

impl Default for BusinessParameters {
    fn default() -> Self {
        Self {
            drink_only: CoolerProfile {
                capacity: 240,
                revenue_per_person: 0.76,
                default_profit_margin_percent: 60.0,
            },
            // 144 drinks + 135 snacks
            mixed: CoolerProfile {
                capacity: 279,
                revenue_per_person: 0.39,
                default_profit_margin_percent: 58.0,
            },
            option_correlation_factor: None,
            average_item_price: 2.61,
            days_in_month: 31,
            drawdown_policy: DrawdownPolicy::RemainingStock,
            visitors_per_cooler: 100,
            default_refill_threshold_percent: 65.0,
            default_time_per_refill_hours: 2.0,
            default_data_cost_per_cooler: 45.0,
            default_employee_wage: 18.0,
        }
    }
}

impl BusinessParameters {
    pub fn profile(&self, cooler_type: CoolerType) -> &CoolerProfile {
        match cooler_type {
            CoolerType::DrinkOnly => &self.drink_only,
            CoolerType::Mixed => &self.mixed,
        }
    }

    /// Daily revenue multiplier for the given cooler type.
    pub fn revenue_uplift(&self, cooler_type: CoolerType) -> f64 {
        match (cooler_type, self.option_correlation_factor) {
            (CoolerType::DrinkOnly, Some(factor)) => factor,
            _ => 1.0,
        }
    }

    /// Rejects parameters that would make the estimate meaningless.
    pub fn validate(&self) -> Result<(), EstimateError> {
        let profiles = [
            (&self.drink_only, ["drink_only.capacity", "drink_only.revenue_per_person", "drink_only.default_profit_margin_percent"]),
            (&self.mixed, ["mixed.capacity", "mixed.revenue_per_person", "mixed.default_profit_margin_percent"]),
        ];
        for (profile, [capacity, revenue, margin]) in profiles {
            if profile.capacity == 0 {
                return Err(EstimateError::invalid(capacity, "cooler capacity must be positive"));
            }
            if !profile.revenue_per_person.is_finite() || profile.revenue_per_person < 0.0 {
                return Err(EstimateError::invalid(
                    revenue,
                    format!("expected a non-negative amount, got {}", profile.revenue_per_person),
                ));
            }
            check_percent(margin, profile.default_profit_margin_percent)?;
        }
        if let Some(factor) = self.option_correlation_factor {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(EstimateError::invalid(
                    "option_correlation_factor",
                    format!("expected a positive multiplier, got {factor}"),
                ));
            }
        }
        if !self.average_item_price.is_finite() || self.average_item_price <= 0.0 {
            return Err(EstimateError::invalid(
                "average_item_price",
                format!("expected a positive price, got {}", self.average_item_price),
            ));
        }
        if self.days_in_month == 0 {
            return Err(EstimateError::invalid("days_in_month", "must be at least one day"));
        }
        if self.visitors_per_cooler == 0 {
            return Err(EstimateError::invalid("visitors_per_cooler", "must be at least one visitor"));
        }
        check_percent("default_refill_threshold_percent", self.default_refill_threshold_percent)?;
        if !self.default_time_per_refill_hours.is_finite() || self.default_time_per_refill_hours <= 0.0 {
            return Err(EstimateError::invalid(
                "default_time_per_refill_hours",
                "expected a positive number of hours",
            ));
        }
        if !self.default_data_cost_per_cooler.is_finite() || self.default_data_cost_per_cooler < 0.0 {
            return Err(EstimateError::invalid(
                "default_data_cost_per_cooler",
                "expected a non-negative amount",
            ));
        }
        if !self.default_employee_wage.is_finite() || self.default_employee_wage < 0.0 {
            return Err(EstimateError::invalid("default_employee_wage", "expected a non-negative amount"));
        }
        Ok(())
    }
}

/// Accepts a percentage in (0, 100].
pub(crate) fn check_percent(field: &'static str, value: f64) -> Result<(), EstimateError> {
    if value.is_finite() && value > 0.0 && value <= 100.0 {
        Ok(())
    } else {
        Err(EstimateError::invalid(field, format!("expected a percentage in (0, 100], got {value}")))
    }
}

/// Load business parameters from a JSON file.
///
/// Fields missing from the file keep their defaults.  A path that does
/// not point at a file yields the defaults; a file that cannot be read,
/// parsed or validated is an error.
pub fn load_parameters(path: &Path) -> Result<BusinessParameters, ParameterError> {
    if !path.is_file() {
        warn!(path = %path.display(), "parameter file not found, using defaults");
        return Ok(BusinessParameters::default());
    }
    let data = std::fs::read_to_string(path)?;
    let params: BusinessParameters = serde_json::from_str(&data)?;
    params.validate()?;
    info!(path = %path.display(), policy = ?params.drawdown_policy, "loaded business parameters");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_valid() {
        let params = BusinessParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.profile(CoolerType::DrinkOnly).capacity, 240);
        assert_eq!(params.profile(CoolerType::Mixed).capacity, 279);
        assert_eq!(params.days_in_month, 31);
    }

    #[test]
    fn test_drawdown_fractions() {
        assert!((DrawdownPolicy::RemainingStock.fraction(65.0) - 0.65).abs() < 1e-12);
        assert!((DrawdownPolicy::ConsumedStock.fraction(65.0) - 0.35).abs() < 1e-12);
        assert_eq!(DrawdownPolicy::ConsumedStock.fraction(100.0), 0.0);
    }

    #[test]
    fn test_uplift_only_applies_to_drink_only() {
        let mut params = BusinessParameters::default();
        assert_eq!(params.revenue_uplift(CoolerType::DrinkOnly), 1.0);
        params.option_correlation_factor = Some(DEFAULT_OPTION_CORRELATION_FACTOR);
        assert_eq!(params.revenue_uplift(CoolerType::DrinkOnly), 1.65);
        assert_eq!(params.revenue_uplift(CoolerType::Mixed), 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params: BusinessParameters = serde_json::from_value(json!({
            "average_item_price": 2.4276,
            "drawdown_policy": "consumed_stock"
        }))
        .unwrap();
        assert_eq!(params.average_item_price, 2.4276);
        assert_eq!(params.drawdown_policy, DrawdownPolicy::ConsumedStock);
        assert_eq!(params.mixed.revenue_per_person, 0.39);
        assert_eq!(params.days_in_month, 31);
    }

    #[test]
    fn test_validate_rejects_zero_capacity_and_price() {
        let mut params = BusinessParameters::default();
        params.mixed.capacity = 0;
        assert_eq!(params.validate().unwrap_err().field(), "mixed.capacity");

        let mut params = BusinessParameters::default();
        params.average_item_price = 0.0;
        assert_eq!(params.validate().unwrap_err().field(), "average_item_price");

        let mut params = BusinessParameters::default();
        params.option_correlation_factor = Some(-1.0);
        assert_eq!(params.validate().unwrap_err().field(), "option_correlation_factor");
    }

    #[test]
    fn test_load_parameters_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("cooler_engine_params_does_not_exist.json");
        let params = load_parameters(&path).unwrap();
        assert_eq!(params, BusinessParameters::default());
    }

    #[test]
    fn test_load_parameters_from_file() {
        let path = std::env::temp_dir().join(format!("cooler_engine_params_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"days_in_month": 30, "visitors_per_cooler": 150}"#).unwrap();
        let params = load_parameters(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(params.days_in_month, 30);
        assert_eq!(params.visitors_per_cooler, 150);
        assert_eq!(params.average_item_price, 2.61);
    }

    #[test]
    fn test_load_parameters_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!("cooler_engine_bad_params_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"days_in_month": 0}"#).unwrap();
        let err = load_parameters(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ParameterError::Invalid(_)));
    }

    #[test]
    fn test_load_parameters_rejects_malformed_json() {
        let path = std::env::temp_dir().join(format!("cooler_engine_malformed_params_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"days_in_month": 31,"#).unwrap();
        let err = load_parameters(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ParameterError::Parse(_)));
    }
}
