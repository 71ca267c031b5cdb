//! Line item aggregation.
//!
//! This module prices a labor line item across its active phases: every
//! working date is classified, priced at the phase's default hours, and summed
//! into a per-phase subtotal. The gross labor total then attracts employer
//! on-costs.
//!
//! ## Flat Items
//!
//! A flat item's gross is its configured amount, whatever the schedule. No
//! dates are priced, and on-costs are added unless the item switches them off.

use rust_decimal::Decimal;

use super::{
    DayPay, OnCosts, checked_sum, classify_day, compute_on_costs, price_day, require_non_negative,
    round_money,
};
use crate::config::{OnCostRates, PayRules};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculationInput, DayLine, HolidayCalendar, LaborUnit, LineItemCalculation, Phase,
    PhaseBreakdown, PhaseConfig,
};

/// Running totals of the premium split across priced days.
#[derive(Debug, Default)]
struct PayTotals {
    base: Decimal,
    overtime: Decimal,
    penalty: Decimal,
}

impl PayTotals {
    fn add(&mut self, pay: &DayPay) -> EngineResult<()> {
        self.base = checked_sum("base_pay", [self.base, pay.base_pay])?;
        self.overtime = checked_sum("overtime_pay", [self.overtime, pay.overtime_pay])?;
        self.penalty = checked_sum("penalty_pay", [self.penalty, pay.penalty_pay])?;
        Ok(())
    }
}

/// The on-cost rates that apply to an input.
///
/// Casuals are paid a loading in lieu of leave, so they accrue no holiday pay.
fn rates_for(input: &CalculationInput, rates: &OnCostRates) -> OnCostRates {
    if input.is_casual {
        rates.without_holiday_pay()
    } else {
        rates.clone()
    }
}

/// Prices a labor line item.
///
/// # Arguments
///
/// * `input` - The line item snapshot with its resolved phase calendars
/// * `rules` - The pay-rule table
/// * `rates` - Employer on-cost rates
/// * `holidays` - Public holidays used to classify dates
///
/// # Errors
///
/// - [`EngineError::Validation`] for a negative rate or negative phase hours
/// - [`EngineError::ConfigResolution`] when an active phase has no resolved
///   calendar in `input.phase_configs`
///
/// # Example
///
/// ```
/// use labor_engine::calculation::compute_line_item;
/// use labor_engine::config::{OnCostRates, PayRules};
/// use labor_engine::models::{
///     ActivePhases, CalculationInput, EmploymentCategory, HolidayCalendar, Phase, PhaseConfig,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // Two 10 hour weekdays on the shoot
/// let input = CalculationInput::hourly(Decimal::new(50, 0), false, EmploymentCategory::Crew)
///     .with_active_phases(ActivePhases::only(Phase::Shoot))
///     .with_phase(
///         Phase::Shoot,
///         PhaseConfig::new(
///             Decimal::new(10, 0),
///             [
///                 NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///                 NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
///             ],
///         ),
///     );
///
/// let result = compute_line_item(
///     &input,
///     &PayRules::default(),
///     &OnCostRates::default(),
///     &HolidayCalendar::new(),
/// )
/// .unwrap();
///
/// assert_eq!(result.days_count, 2);
/// assert_eq!(result.total_labor_cost, Decimal::new(1140, 0));
/// assert_eq!(result.total_on_costs, Decimal::new(22059, 2));
/// assert_eq!(result.grand_total, Decimal::new(136059, 2));
/// ```
pub fn compute_line_item(
    input: &CalculationInput,
    rules: &PayRules,
    rates: &OnCostRates,
    holidays: &HolidayCalendar,
) -> EngineResult<LineItemCalculation> {
    require_non_negative("base_hourly_rate", input.base_hourly_rate)?;
    let rates = rates_for(input, rates);

    if input.unit == LaborUnit::Flat {
        return compute_flat(input, &rates);
    }

    let mut per_phase_breakdown = Vec::new();
    let mut totals = PayTotals::default();
    let mut days_count: u32 = 0;

    for phase in input.active_phases.iter() {
        let config = input.phase_configs.get(&phase).ok_or_else(|| {
            EngineError::resolution(phase, "active phase has no resolved calendar")
        })?;
        let breakdown = price_phase(input, phase, config, rules, holidays, &mut totals)?;
        days_count = days_count
            .checked_add(breakdown.days)
            .ok_or_else(|| EngineError::resolution(phase, "too many working dates"))?;
        per_phase_breakdown.push(breakdown);
    }

    let total_labor_cost =
        checked_sum("total_labor_cost", per_phase_breakdown.iter().map(|p| p.cost))?;
    let on_costs = compute_on_costs(total_labor_cost, &rates)?;
    let total_on_costs = on_costs.total_on_costs;

    tracing::debug!(
        category = %input.employment_category,
        is_casual = input.is_casual,
        days_count,
        total_labor_cost = %total_labor_cost,
        total_on_costs = %total_on_costs,
        "Priced line item"
    );

    Ok(LineItemCalculation {
        total_labor_cost,
        total_on_costs,
        grand_total: checked_sum("grand_total", [total_labor_cost, total_on_costs])?,
        base_pay: round_money(totals.base),
        overtime_pay: round_money(totals.overtime),
        penalty_pay: round_money(totals.penalty),
        on_costs,
        per_phase_breakdown,
        days_count,
        unit: LaborUnit::Hourly,
    })
}

fn day_count(phase: Phase, dates: usize) -> EngineResult<u32> {
    u32::try_from(dates).map_err(|_| EngineError::resolution(phase, "too many working dates"))
}

fn price_phase(
    input: &CalculationInput,
    phase: Phase,
    config: &PhaseConfig,
    rules: &PayRules,
    holidays: &HolidayCalendar,
    totals: &mut PayTotals,
) -> EngineResult<PhaseBreakdown> {
    let hours = config.default_hours_per_day;
    let mut days_detail = Vec::with_capacity(config.days());
    let mut subtotal = Decimal::ZERO;

    // BTreeSet iteration is ascending by date
    for date in &config.working_dates {
        let day_type = classify_day(*date, holidays);
        let pay = price_day(
            hours,
            input.base_hourly_rate,
            input.employment_category,
            input.is_casual,
            day_type,
            rules,
        )?;
        subtotal = checked_sum("total_labor_cost", [subtotal, pay.total_pay])?;
        totals.add(&pay)?;
        days_detail.push(DayLine {
            date: *date,
            day_type,
            pay,
        });
    }

    let cost = round_money(subtotal);
    let days = day_count(phase, days_detail.len())?;
    tracing::debug!(
        phase = %phase,
        days,
        hours_per_day = %hours,
        cost = %cost,
        "Priced phase"
    );

    Ok(PhaseBreakdown {
        phase,
        days,
        hours_per_day: hours,
        cost,
        days_detail,
    })
}

fn compute_flat(input: &CalculationInput, rates: &OnCostRates) -> EngineResult<LineItemCalculation> {
    let total_labor_cost = input.base_hourly_rate;
    let on_costs = if input.apply_on_costs {
        compute_on_costs(total_labor_cost, rates)?
    } else {
        OnCosts::zero()
    };
    let total_on_costs = on_costs.total_on_costs;

    tracing::debug!(
        total_labor_cost = %total_labor_cost,
        apply_on_costs = input.apply_on_costs,
        "Priced flat line item"
    );

    Ok(LineItemCalculation {
        total_labor_cost,
        total_on_costs,
        grand_total: checked_sum("grand_total", [total_labor_cost, total_on_costs])?,
        base_pay: total_labor_cost,
        overtime_pay: Decimal::ZERO,
        penalty_pay: Decimal::ZERO,
        on_costs,
        per_phase_breakdown: Vec::new(),
        days_count: 0,
        unit: LaborUnit::Flat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::DayType;
    use crate::models::{ActivePhases, EmploymentCategory};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn compute(input: &CalculationInput) -> EngineResult<LineItemCalculation> {
        compute_line_item(
            input,
            &PayRules::default(),
            &OnCostRates::default(),
            &HolidayCalendar::new(),
        )
    }

    /// Crew permanent at $50 with one date per phase:
    /// pre-production Monday 8h, shoot Monday + Saturday 10h, post Monday 8h.
    fn three_phase_input() -> CalculationInput {
        CalculationInput::hourly(dec("50"), false, EmploymentCategory::Crew)
            .with_phase(
                Phase::PreProduction,
                PhaseConfig::new(dec("8"), [date("2026-02-02")]),
            )
            .with_phase(
                Phase::Shoot,
                PhaseConfig::new(dec("10"), [date("2026-03-07"), date("2026-03-02")]),
            )
            .with_phase(
                Phase::PostProduction,
                PhaseConfig::new(dec("8"), [date("2026-04-13")]),
            )
    }

    // ==========================================================================
    // LI-001: Three phases aggregate into one total
    // ==========================================================================
    #[test]
    fn test_li_001_three_phase_total() {
        let result = compute(&three_phase_input()).unwrap();

        // 410 + (570 + 785) + 410
        assert_eq!(result.total_labor_cost, dec("2175"));
        assert_eq!(result.days_count, 4);
        assert_eq!(result.per_phase_breakdown.len(), 3);
        assert_eq!(result.per_phase_breakdown[0].phase, Phase::PreProduction);
        assert_eq!(result.per_phase_breakdown[1].cost, dec("1355"));

        // 2175 × 0.115 = 250.125, × 0.0485 = 105.4875, × 0.03 = 65.25
        assert_eq!(result.on_costs.superannuation, dec("250.13"));
        assert_eq!(result.on_costs.payroll_tax, dec("105.49"));
        assert_eq!(result.on_costs.workers_comp, dec("65.25"));
        assert_eq!(result.total_on_costs, dec("420.87"));
        assert_eq!(result.grand_total, dec("2595.87"));
    }

    // ==========================================================================
    // LI-002: Dates within a phase are priced in ascending order
    // ==========================================================================
    #[test]
    fn test_li_002_ascending_dates() {
        let result = compute(&three_phase_input()).unwrap();
        let shoot = &result.per_phase_breakdown[1];

        assert_eq!(shoot.days_detail[0].date, date("2026-03-02"));
        assert_eq!(shoot.days_detail[0].day_type, DayType::Weekday);
        assert_eq!(shoot.days_detail[1].date, date("2026-03-07"));
        assert_eq!(shoot.days_detail[1].day_type, DayType::Saturday);
    }

    // ==========================================================================
    // LI-003: Inactive phase is excluded from cost and day count
    // ==========================================================================
    #[test]
    fn test_li_003_inactive_phase_excluded() {
        let mut flags = ActivePhases::all();
        flags.set(Phase::Shoot, false);
        let input = three_phase_input().with_active_phases(flags);

        let result = compute(&input).unwrap();
        assert_eq!(result.total_labor_cost, dec("820"));
        assert_eq!(result.days_count, 2);
        assert!(
            result
                .per_phase_breakdown
                .iter()
                .all(|p| p.phase != Phase::Shoot)
        );
    }

    // ==========================================================================
    // LI-004: Inactive phase needs no resolved calendar
    // ==========================================================================
    #[test]
    fn test_li_004_inactive_phase_without_config() {
        let mut input = three_phase_input().with_active_phases(ActivePhases::only(Phase::Shoot));
        input.phase_configs.remove(&Phase::PreProduction);

        let result = compute(&input).unwrap();
        assert_eq!(result.days_count, 2);
        assert_eq!(result.total_labor_cost, dec("1355"));
    }

    // ==========================================================================
    // LI-005: Active phase without a resolved calendar is an error
    // ==========================================================================
    #[test]
    fn test_li_005_missing_active_config() {
        let mut input = three_phase_input();
        input.phase_configs.remove(&Phase::PostProduction);

        let result = compute(&input);
        assert!(matches!(
            result,
            Err(EngineError::ConfigResolution {
                phase: Phase::PostProduction,
                ..
            })
        ));
    }

    // ==========================================================================
    // LI-006: Public holidays are priced at the holiday rate
    // ==========================================================================
    #[test]
    fn test_li_006_public_holiday_priced() {
        // Good Friday 2026
        let good_friday = date("2026-04-03");
        let input = CalculationInput::hourly(dec("40"), true, EmploymentCategory::Crew)
            .with_active_phases(ActivePhases::only(Phase::Shoot))
            .with_phase(Phase::Shoot, PhaseConfig::new(dec("8"), [good_friday]));

        let result = compute_line_item(
            &input,
            &PayRules::default(),
            &OnCostRates::default(),
            &HolidayCalendar::from_dates([good_friday]),
        )
        .unwrap();

        assert_eq!(result.total_labor_cost, dec("1000"));
        assert_eq!(result.penalty_pay, dec("680"));
        assert_eq!(result.overtime_pay, Decimal::ZERO);
    }

    // ==========================================================================
    // LI-007: Flat item ignores the schedule
    // ==========================================================================
    #[test]
    fn test_li_007_flat_item() {
        let mut input = three_phase_input();
        input.unit = LaborUnit::Flat;
        input.base_hourly_rate = dec("1000");

        let result = compute(&input).unwrap();
        assert_eq!(result.total_labor_cost, dec("1000"));
        assert_eq!(result.total_on_costs, dec("193.5"));
        assert_eq!(result.grand_total, dec("1193.5"));
        assert_eq!(result.days_count, 0);
        assert!(result.per_phase_breakdown.is_empty());
        assert_eq!(result.unit, LaborUnit::Flat);

        // More dates change nothing
        input
            .phase_configs
            .insert(Phase::Shoot, PhaseConfig::new(dec("10"), [date("2026-03-09")]));
        assert_eq!(compute(&input).unwrap().grand_total, dec("1193.5"));
    }

    // ==========================================================================
    // LI-008: Flat item with on-costs switched off
    // ==========================================================================
    #[test]
    fn test_li_008_flat_without_on_costs() {
        let mut input = CalculationInput::flat(dec("750"), EmploymentCategory::Artist);
        input.apply_on_costs = false;

        let result = compute(&input).unwrap();
        assert_eq!(result.total_on_costs, Decimal::ZERO);
        assert_eq!(result.grand_total, dec("750"));
        assert_eq!(result.on_costs, OnCosts::zero());
    }

    // ==========================================================================
    // LI-009: Casual items accrue no holiday pay
    // ==========================================================================
    #[test]
    fn test_li_009_casual_no_holiday_pay() {
        let rates = OnCostRates {
            holiday_pay_rate: dec("0.08"),
            ..OnCostRates::default()
        };
        let permanent = three_phase_input();
        let mut casual = three_phase_input();
        casual.is_casual = true;

        let perm_result =
            compute_line_item(&permanent, &PayRules::default(), &rates, &HolidayCalendar::new())
                .unwrap();
        let casual_result =
            compute_line_item(&casual, &PayRules::default(), &rates, &HolidayCalendar::new())
                .unwrap();

        assert_eq!(perm_result.on_costs.holiday_pay, dec("174.00"));
        assert_eq!(casual_result.on_costs.holiday_pay, Decimal::ZERO);
    }

    // ==========================================================================
    // LI-010: Negative rate is a validation error
    // ==========================================================================
    #[test]
    fn test_li_010_negative_rate() {
        let mut input = three_phase_input();
        input.base_hourly_rate = dec("-50");
        assert!(matches!(
            compute(&input),
            Err(EngineError::Validation { .. })
        ));
    }

    // ==========================================================================
    // LI-011: Totals beyond the decimal range are rejected
    // ==========================================================================
    #[test]
    fn test_li_011_out_of_range_total() {
        // One 10 hour weekday is 11.4 × rate: fits once, not ten times
        let rate = Decimal::MAX / dec("100");
        let dates: Vec<_> = (2..=13).map(|day| date(&format!("2026-03-{:02}", day))).collect();
        let input = CalculationInput::hourly(rate, false, EmploymentCategory::Crew)
            .with_active_phases(ActivePhases::only(Phase::Shoot))
            .with_phase(Phase::Shoot, PhaseConfig::new(dec("10"), dates));

        assert!(matches!(
            compute(&input),
            Err(EngineError::Validation { ref message, .. }) if message == "amount out of range"
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_day_count_rejects_more_than_u32_dates() {
        assert_eq!(day_count(Phase::Shoot, 12).unwrap(), 12);
        assert!(matches!(
            day_count(Phase::Shoot, u32::MAX as usize + 1),
            Err(EngineError::ConfigResolution { phase: Phase::Shoot, .. })
        ));
    }

    #[test]
    fn test_no_dates_prices_nothing() {
        let input = CalculationInput::hourly(dec("50"), false, EmploymentCategory::Crew)
            .with_phase(Phase::PreProduction, PhaseConfig::new(dec("8"), []))
            .with_phase(Phase::Shoot, PhaseConfig::new(dec("10"), []))
            .with_phase(Phase::PostProduction, PhaseConfig::new(dec("8"), []));

        let result = compute(&input).unwrap();
        assert_eq!(result.grand_total, Decimal::ZERO);
        assert_eq!(result.days_count, 0);
        assert_eq!(result.per_phase_breakdown.len(), 3);
    }

    #[test]
    fn test_premium_totals_split() {
        let result = compute(&three_phase_input()).unwrap();

        // Base: 400 + 500 + 500 + 400; Saturday and overtime premiums are overtime
        assert_eq!(result.base_pay, dec("1800"));
        assert_eq!(result.overtime_pay, dec("375"));
        assert_eq!(result.penalty_pay, Decimal::ZERO);
        assert_eq!(
            result.base_pay + result.overtime_pay + result.penalty_pay,
            result.total_labor_cost
        );
    }

    #[test]
    fn test_phase_subtotals_round_to_cents() {
        // 7.6 × 33.33 = 253.308 per day; three days = 759.924
        let input = CalculationInput::hourly(dec("33.33"), false, EmploymentCategory::Crew)
            .with_active_phases(ActivePhases::only(Phase::PreProduction))
            .with_phase(
                Phase::PreProduction,
                PhaseConfig::new(
                    dec("7.6"),
                    [date("2026-02-02"), date("2026-02-03"), date("2026-02-04")],
                ),
            );

        let result = compute(&input).unwrap();
        assert_eq!(result.total_labor_cost, dec("759.92"));
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let input = three_phase_input();
        assert_eq!(compute(&input).unwrap(), compute(&input).unwrap());
    }
}
