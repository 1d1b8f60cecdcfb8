//! Text rendering of an estimate.
//!
//! Currency is always shown with two decimals and thousands separators.
//! The summary lists the headline figures followed by the assumptions
//! and cost breakdown behind them.

use crate::models::{CoolerType, EstimateInput, EstimateResult};
use crate::params::BusinessParameters;

/// Formats an amount as `$1,234.56`, with a leading `-` when negative.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Renders the headline figures and the assumptions behind them.
pub fn render_summary(input: &EstimateInput, params: &BusinessParameters, result: &EstimateResult) -> String {
    let profile = params.profile(input.cooler_type);
    let refill_trigger_items =
        f64::from(profile.capacity) * params.drawdown_policy.fraction(input.refill_threshold_percent);

    let mut lines = vec![
        format!("Projected Monthly Sales: {}", format_currency(result.monthly_sales)),
        format!("Projected Monthly Profit: {}", format_currency(result.monthly_profit)),
        format!("Operating Costs: {}", format_currency(result.total_operating_cost)),
        format!("Estimated Monthly Net Profit: {}", format_currency(result.net_profit)),
        format!("Estimated Coolers Needed: {}", result.coolers_needed),
        String::new(),
        "Assumptions and Cost Breakdown:".to_string(),
        format!("- Cooler Type Selected: {}", input.cooler_type),
        format!("- Each Cooler Capacity: {} items", profile.capacity),
        format!("- Refill Threshold: {refill_trigger_items:.0} items per cooler"),
    ];
    for cooler_type in CoolerType::ALL {
        lines.push(format!(
            "- Estimated Daily Revenue Per Person ({}): {}",
            cooler_type,
            format_currency(params.profile(cooler_type).revenue_per_person)
        ));
    }
    lines.push(format!("- Time Per Refill: {} hours", input.time_per_refill_hours));
    lines.push(format!("- Profit Margin: {:.0}%", input.profit_margin_percent));
    if input.uses_employee {
        lines.push(format!("- Employee Wage: {} per hour", format_currency(input.employee_wage)));
    } else {
        lines.push("- Self-service: No labor cost applied".to_string());
    }
    lines.push(format!("- Estimated Monthly Labor Cost: {}", format_currency(result.labor_cost)));
    lines.push(format!(
        "- Data Cost: {} (Based on {} coolers at {} per cooler)",
        format_currency(result.data_cost),
        result.coolers_needed,
        format_currency(input.data_cost_per_cooler)
    ));
    lines.push(format!("- Financing Cost: {}", format_currency(result.financing_cost)));
    if let Some(rate) = input.state_sales_tax_percent {
        lines.push(format!("- Sales Tax ({rate}%): {}", format_currency(result.sales_tax_cost)));
    }
    if let Some(rate) = input.credit_card_fee_percent {
        lines.push(format!("- Card Processing ({rate}%): {}", format_currency(result.credit_card_cost)));
    }
    for warning in &result.warnings {
        lines.push(format!("! {warning}"));
    }
    lines.join("\n")
}
