//! Profit estimation engine.
//!
//! The `engine` module turns an [`EstimateInput`] into an
//! [`EstimateResult`] under a set of [`BusinessParameters`].  The
//! computation is pure: the same input and parameters always produce
//! the same figures, and nothing is retained between calls.  Batch
//! evaluation and foot traffic sweeps use the [`rayon`] crate to spread
//! independent estimates across CPU cores.

use crate::error::EstimateError;
use crate::models::{EstimateInput, EstimateResult, EstimateWarning, SweepPoint};
use crate::params::{check_percent, BusinessParameters};
use rayon::prelude::*;
use tracing::debug;

pub const MIN_FOOT_TRAFFIC: u32 = 1;
pub const MAX_FOOT_TRAFFIC: u32 = 5000;

/// Refill denominators at or below this value are treated as zero.
const DEGENERATE_DENOMINATOR: f64 = 1e-9;

/// Estimates the monthly figures for one location.
///
/// Both `input` and `params` are validated first; the returned error
/// names the offending field.  Once validated the computation cannot
/// fail.  A refill denominator of zero does not fail either: the result
/// reports zero refills and carries
/// [`EstimateWarning::RefillEstimateUnavailable`].
pub fn compute(input: &EstimateInput, params: &BusinessParameters) -> Result<EstimateResult, EstimateError> {
    params.validate()?;
    validate_input(input)?;
    Ok(estimate(input, params))
}

/// Evaluates many inputs in parallel.  Results keep the order of
/// `inputs` and an invalid input only fails its own slot.
pub fn compute_batch(
    inputs: &[EstimateInput],
    params: &BusinessParameters,
) -> Vec<Result<EstimateResult, EstimateError>> {
    inputs.par_iter().map(|input| compute(input, params)).collect()
}

/// Re-runs `base` for every foot traffic value from `from` to `to`
/// inclusive, in increments of `step`.
pub fn sweep_foot_traffic(
    base: &EstimateInput,
    from: u32,
    to: u32,
    step: u32,
    params: &BusinessParameters,
) -> Result<Vec<SweepPoint>, EstimateError> {
    if step == 0 {
        return Err(EstimateError::invalid("step", "sweep step must be at least 1"));
    }
    if from > to {
        return Err(EstimateError::invalid(
            "from",
            format!("sweep start {from} is greater than end {to}"),
        ));
    }
    if from < MIN_FOOT_TRAFFIC {
        return Err(EstimateError::invalid(
            "from",
            format!("sweep start {from} is below {MIN_FOOT_TRAFFIC} daily visitors"),
        ));
    }
    if to > MAX_FOOT_TRAFFIC {
        return Err(EstimateError::invalid(
            "to",
            format!("sweep end {to} is above {MAX_FOOT_TRAFFIC} daily visitors"),
        ));
    }
    params.validate()?;
    validate_input(&EstimateInput {
        foot_traffic: from,
        ..base.clone()
    })?;
    let points = (to - from) / step + 1;
    Ok((0..points)
        .into_par_iter()
        .map(|index| {
            let foot_traffic = from + index * step;
            let input = EstimateInput {
                foot_traffic,
                ..base.clone()
            };
            SweepPoint {
                foot_traffic,
                result: estimate(&input, params),
            }
        })
        .collect())
}

/// Number of physical coolers for a daily foot traffic.
///
/// `foot_traffic / visitors_per_cooler` rounded half to even, never
/// below one.  Integer arithmetic keeps the halfway case exact.
pub fn coolers_needed(foot_traffic: u32, visitors_per_cooler: u32) -> u32 {
    let divisor = visitors_per_cooler.max(1);
    let quotient = foot_traffic / divisor;
    let twice_remainder = u64::from(foot_traffic % divisor) * 2;
    let rounded = match twice_remainder.cmp(&u64::from(divisor)) {
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient % 2 == 1 => quotient + 1,
        _ => quotient,
    };
    rounded.max(1)
}

/// Checks every input field against its documented domain.
///
/// The wage and the financing payment are only checked when the
/// matching flag is set, since they are ignored otherwise.
pub fn validate_input(input: &EstimateInput) -> Result<(), EstimateError> {
    if !(MIN_FOOT_TRAFFIC..=MAX_FOOT_TRAFFIC).contains(&input.foot_traffic) {
        return Err(EstimateError::invalid(
            "foot_traffic",
            format!(
                "expected {MIN_FOOT_TRAFFIC} to {MAX_FOOT_TRAFFIC} daily visitors, got {}",
                input.foot_traffic
            ),
        ));
    }
    check_percent("refill_threshold_percent", input.refill_threshold_percent)?;
    check_percent("profit_margin_percent", input.profit_margin_percent)?;
    if !input.time_per_refill_hours.is_finite() || input.time_per_refill_hours <= 0.0 {
        return Err(EstimateError::invalid(
            "time_per_refill_hours",
            format!("expected a positive number of hours, got {}", input.time_per_refill_hours),
        ));
    }
    check_amount("data_cost_per_cooler", input.data_cost_per_cooler)?;
    if input.uses_employee {
        check_amount("employee_wage", input.employee_wage)?;
    }
    if input.has_financing {
        check_amount("financing_cost", input.financing_cost)?;
    }
    if let Some(rate) = input.state_sales_tax_percent {
        check_rate("state_sales_tax_percent", rate)?;
    }
    if let Some(rate) = input.credit_card_fee_percent {
        check_rate("credit_card_fee_percent", rate)?;
    }
    Ok(())
}

fn check_rate(field: &'static str, value: f64) -> Result<(), EstimateError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(EstimateError::invalid(field, format!("expected a percentage in [0, 100], got {value}")))
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), EstimateError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EstimateError::invalid(field, format!("expected a non-negative amount, got {value}")))
    }
}

/// The arithmetic proper.  Assumes validated input and parameters.
fn estimate(input: &EstimateInput, params: &BusinessParameters) -> EstimateResult {
    let profile = params.profile(input.cooler_type);
    let mut warnings = Vec::new();

    let estimated_daily_revenue =
        f64::from(input.foot_traffic) * profile.revenue_per_person * params.revenue_uplift(input.cooler_type);
    let monthly_sales = estimated_daily_revenue * f64::from(params.days_in_month);

    let usable_capacity =
        f64::from(profile.capacity) * params.drawdown_policy.fraction(input.refill_threshold_percent);
    let refill_value = usable_capacity * params.average_item_price;
    let refills_per_month = if refill_value > DEGENERATE_DENOMINATOR {
        monthly_sales / refill_value
    } else {
        debug!(
            threshold = input.refill_threshold_percent,
            policy = ?params.drawdown_policy,
            "no usable capacity between refills"
        );
        warnings.push(EstimateWarning::RefillEstimateUnavailable);
        0.0
    };
    let monthly_labor_hours = refills_per_month * input.time_per_refill_hours;
    let labor_cost = if input.uses_employee {
        monthly_labor_hours * input.employee_wage
    } else {
        0.0
    };

    let coolers_needed = coolers_needed(input.foot_traffic, params.visitors_per_cooler);
    let data_cost = f64::from(coolers_needed) * input.data_cost_per_cooler;

    let monthly_profit = monthly_sales * (input.profit_margin_percent / 100.0);
    let sales_tax_cost = monthly_sales * input.state_sales_tax_percent.unwrap_or(0.0) / 100.0;
    let credit_card_cost = monthly_sales * input.credit_card_fee_percent.unwrap_or(0.0) / 100.0;
    let financing_cost = if input.has_financing { input.financing_cost } else { 0.0 };

    let total_operating_cost = labor_cost + data_cost + financing_cost + sales_tax_cost + credit_card_cost;
    let net_profit = monthly_profit - total_operating_cost;

    EstimateResult {
        estimated_daily_revenue,
        monthly_sales,
        monthly_profit,
        usable_capacity,
        refills_per_month,
        monthly_labor_hours,
        labor_cost,
        data_cost,
        financing_cost,
        sales_tax_cost,
        credit_card_cost,
        total_operating_cost,
        net_profit,
        coolers_needed,
        warnings,
    }
}
