//! Employer on-cost calculation.
//!
//! On-costs are employer-side levies charged as a fraction of gross labor:
//! superannuation, payroll tax, workers' compensation and holiday-pay accrual.
//! Every rate applies to the full priced total, premiums included.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::validation::{checked_product, checked_sum, require_non_negative};
use crate::config::OnCostRates;
use crate::error::EngineResult;

/// Itemized employer on-costs for one gross labor amount.
///
/// Each component is rounded to cents and `total_on_costs` is the sum of the
/// rounded components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OnCosts {
    /// Superannuation guarantee.
    pub superannuation: Decimal,
    /// State payroll tax.
    pub payroll_tax: Decimal,
    /// Workers' compensation premium.
    pub workers_comp: Decimal,
    /// Holiday-pay accrual.
    pub holiday_pay: Decimal,
    /// Sum of the components.
    pub total_on_costs: Decimal,
}

impl OnCosts {
    /// On-costs of nothing.
    pub fn zero() -> Self {
        Self {
            superannuation: Decimal::ZERO,
            payroll_tax: Decimal::ZERO,
            workers_comp: Decimal::ZERO,
            holiday_pay: Decimal::ZERO,
            total_on_costs: Decimal::ZERO,
        }
    }
}

/// Rounds a money amount to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes employer on-costs for a gross labor amount.
///
/// # Errors
///
/// Returns [`EngineError::Validation`](crate::error::EngineError::Validation)
/// when `gross_labor` or any rate is negative, or when a component falls
/// outside the decimal range.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::compute_on_costs;
/// use labor_engine::config::OnCostRates;
/// use rust_decimal::Decimal;
///
/// let on_costs = compute_on_costs(Decimal::new(1000, 0), &OnCostRates::default()).unwrap();
///
/// assert_eq!(on_costs.superannuation, Decimal::new(115, 0));
/// assert_eq!(on_costs.payroll_tax, Decimal::new(485, 1));
/// assert_eq!(on_costs.workers_comp, Decimal::new(30, 0));
/// assert_eq!(on_costs.total_on_costs, Decimal::new(1935, 1));
/// ```
pub fn compute_on_costs(gross_labor: Decimal, rates: &OnCostRates) -> EngineResult<OnCosts> {
    require_non_negative("gross_labor", gross_labor)?;
    let super_rate = require_non_negative("super_rate", rates.super_rate)?;
    let payroll_tax_rate = require_non_negative("payroll_tax_rate", rates.payroll_tax_rate)?;
    let workers_comp_rate = require_non_negative("workers_comp_rate", rates.workers_comp_rate)?;
    let holiday_pay_rate = require_non_negative("holiday_pay_rate", rates.holiday_pay_rate)?;

    let superannuation = round_money(checked_product("superannuation", gross_labor, super_rate)?);
    let payroll_tax = round_money(checked_product("payroll_tax", gross_labor, payroll_tax_rate)?);
    let workers_comp =
        round_money(checked_product("workers_comp", gross_labor, workers_comp_rate)?);
    let holiday_pay = round_money(checked_product("holiday_pay", gross_labor, holiday_pay_rate)?);

    Ok(OnCosts {
        superannuation,
        payroll_tax,
        workers_comp,
        holiday_pay,
        total_on_costs: checked_sum(
            "total_on_costs",
            [superannuation, payroll_tax, workers_comp, holiday_pay],
        )?,
    })
}
