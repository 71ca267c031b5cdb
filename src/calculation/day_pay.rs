//! Pricing of a single working day.
//!
//! This module applies the minimum call, splits the effective hours into
//! ordinary, first overtime and extended overtime tiers, and prices each tier
//! at the multiplier the [`PayRules`] table gives for the employment category,
//! engagement and [`DayType`].
//!
//! ## Premium Reporting
//!
//! `base_pay` is always the untiered reference `effective_hours × base_rate`.
//! Everything above it is either overtime or penalty, never both:
//! - Flat-multiplier days (public holidays, artist Sundays) and crew Sundays
//!   report the premium as `penalty_pay`
//! - Every other day reports it as `overtime_pay`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DayType;
use super::validation::{checked_product, checked_sum, require_non_negative};
use crate::config::{DayRule, PayRules, PremiumKind};
use crate::error::{EngineError, EngineResult};
use crate::models::EmploymentCategory;

/// The hour band a [`TierLine`] was priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayTier {
    /// Hours up to the ordinary limit.
    Ordinary,
    /// Hours between the ordinary and first overtime limits.
    FirstOvertime,
    /// Hours beyond the first overtime limit.
    ExtendedOvertime,
    /// All hours of a flat-multiplier day.
    Flat,
}

/// One priced tier of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLine {
    /// The tier.
    pub tier: PayTier,
    /// Hours paid in the tier.
    pub hours: Decimal,
    /// Multiplier applied to the base rate.
    pub multiplier: Decimal,
    /// `hours × base_rate × multiplier`.
    pub amount: Decimal,
}

/// The pay for one working day.
///
/// Amounts are kept at full precision; rounding happens when a phase subtotal
/// is formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPay {
    /// How the day was classified.
    pub day_type: DayType,
    /// Scheduled hours as supplied.
    pub hours: Decimal,
    /// Hours paid after the minimum call is applied.
    pub effective_hours: Decimal,
    /// `effective_hours × base_rate`.
    pub base_pay: Decimal,
    /// Premium above base pay on ordinary days.
    pub overtime_pay: Decimal,
    /// Premium above base pay on weekend-penalty and holiday days.
    pub penalty_pay: Decimal,
    /// Sum of the tier amounts.
    pub total_pay: Decimal,
    /// Per-tier detail for audit display (tiers with zero hours omitted).
    pub tiers: Vec<TierLine>,
}

/// Effective hours split into the three tiers.
///
/// The three parts always sum exactly to the hours that were split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierHours {
    /// Hours in `[0, ordinary_hours_limit)`.
    pub ordinary: Decimal,
    /// Hours in `[ordinary_hours_limit, first_overtime_limit)`.
    pub first_overtime: Decimal,
    /// Hours at or beyond `first_overtime_limit`.
    pub extended_overtime: Decimal,
}

impl TierHours {
    /// Total hours across the tiers.
    pub fn total(&self) -> Decimal {
        self.ordinary + self.first_overtime + self.extended_overtime
    }
}

/// Returns the minimum-call adjusted hours: `max(hours, minimum_call_hours)`.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::effective_hours;
/// use labor_engine::config::PayRules;
/// use rust_decimal::Decimal;
///
/// let rules = PayRules::default();
/// assert_eq!(effective_hours(Decimal::new(2, 0), &rules), Decimal::new(4, 0));
/// assert_eq!(effective_hours(Decimal::new(10, 0), &rules), Decimal::new(10, 0));
/// ```
pub fn effective_hours(hours: Decimal, rules: &PayRules) -> Decimal {
    hours.max(rules.minimum_call_hours)
}

/// Splits hours into the ordinary and overtime tiers.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::split_tiers;
/// use labor_engine::config::PayRules;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tiers = split_tiers(Decimal::new(10, 0), &PayRules::default());
/// assert_eq!(tiers.ordinary, Decimal::from_str("7.6").unwrap());
/// assert_eq!(tiers.first_overtime, Decimal::from_str("2.0").unwrap());
/// assert_eq!(tiers.extended_overtime, Decimal::from_str("0.4").unwrap());
/// ```
pub fn split_tiers(hours: Decimal, rules: &PayRules) -> TierHours {
    let ordinary_limit = rules.ordinary_hours_limit;
    let first_limit = rules.first_overtime_limit.max(ordinary_limit);

    let ordinary = hours.min(ordinary_limit).max(Decimal::ZERO);
    let first_overtime = (hours.min(first_limit) - ordinary_limit).max(Decimal::ZERO);
    let extended_overtime = (hours - first_limit).max(Decimal::ZERO);

    TierHours {
        ordinary,
        first_overtime,
        extended_overtime,
    }
}

fn tier_line(
    tier: PayTier,
    hours: Decimal,
    multiplier: Decimal,
    base_rate: Decimal,
) -> EngineResult<TierLine> {
    let hourly = checked_product("total_pay", hours, base_rate)?;
    let amount = checked_product("total_pay", hourly, multiplier)?;
    Ok(TierLine {
        tier,
        hours,
        multiplier,
        amount,
    })
}

/// Prices one working day.
///
/// # Arguments
///
/// * `hours` - Scheduled hours for the day (before the minimum call)
/// * `base_rate` - The base hourly rate
/// * `category` - Artist or crew rule set
/// * `is_casual` - Whether the casual multipliers apply
/// * `day_type` - The classification of the date
/// * `rules` - The pay-rule table
///
/// # Errors
///
/// Returns [`EngineError::Validation`](crate::error::EngineError::Validation)
/// when `hours` or `base_rate` is negative, or when they are so large that the
/// day's pay falls outside the decimal range. Zero is valid: zero hours is
/// still paid at the minimum call, and a zero rate yields zero pay.
///
/// # Examples
///
/// ## 10 hour crew weekday (permanent)
///
/// ```
/// use labor_engine::calculation::{price_day, DayType};
/// use labor_engine::config::PayRules;
/// use labor_engine::models::EmploymentCategory;
/// use rust_decimal::Decimal;
///
/// let pay = price_day(
///     Decimal::new(10, 0),
///     Decimal::new(50, 0),
///     EmploymentCategory::Crew,
///     false,
///     DayType::Weekday,
///     &PayRules::default(),
/// )
/// .unwrap();
///
/// // 7.6h × $50 + 2.0h × $75 + 0.4h × $100
/// assert_eq!(pay.total_pay, Decimal::new(570, 0));
/// assert_eq!(pay.base_pay, Decimal::new(500, 0));
/// assert_eq!(pay.overtime_pay, Decimal::new(70, 0));
/// assert_eq!(pay.penalty_pay, Decimal::ZERO);
/// ```
///
/// ## Public holiday (casual crew)
///
/// ```
/// use labor_engine::calculation::{price_day, DayType};
/// use labor_engine::config::PayRules;
/// use labor_engine::models::EmploymentCategory;
/// use rust_decimal::Decimal;
///
/// let pay = price_day(
///     Decimal::new(8, 0),
///     Decimal::new(40, 0),
///     EmploymentCategory::Crew,
///     true,
///     DayType::PublicHoliday,
///     &PayRules::default(),
/// )
/// .unwrap();
///
/// assert_eq!(pay.total_pay, Decimal::new(1000, 0));
/// assert_eq!(pay.overtime_pay, Decimal::ZERO);
/// assert_eq!(pay.penalty_pay, Decimal::new(680, 0));
/// ```
pub fn price_day(
    hours: Decimal,
    base_rate: Decimal,
    category: EmploymentCategory,
    is_casual: bool,
    day_type: DayType,
    rules: &PayRules,
) -> EngineResult<DayPay> {
    require_non_negative("hours", hours)?;
    require_non_negative("base_rate", base_rate)?;

    let effective_hours = effective_hours(hours, rules);
    let base_pay = checked_product("base_pay", effective_hours, base_rate)?;

    let (tiers, premium) = match rules.rule_for(category, day_type, is_casual) {
        DayRule::Flat { multiplier } => (
            vec![tier_line(PayTier::Flat, effective_hours, *multiplier, base_rate)?],
            PremiumKind::Penalty,
        ),
        DayRule::Tiered {
            multipliers,
            premium,
        } => {
            let split = split_tiers(effective_hours, rules);
            let tiers = [
                (PayTier::Ordinary, split.ordinary, multipliers.ordinary),
                (
                    PayTier::FirstOvertime,
                    split.first_overtime,
                    multipliers.first_overtime,
                ),
                (
                    PayTier::ExtendedOvertime,
                    split.extended_overtime,
                    multipliers.extended_overtime,
                ),
            ]
            .into_iter()
            .filter(|(_, tier_hours, _)| *tier_hours > Decimal::ZERO)
            .map(|(tier, tier_hours, multiplier)| tier_line(tier, tier_hours, multiplier, base_rate))
            .collect::<EngineResult<Vec<_>>>()?;
            (tiers, *premium)
        }
    };

    let total_pay = checked_sum("total_pay", tiers.iter().map(|line| line.amount))?;
    let premium_pay = total_pay
        .checked_sub(base_pay)
        .ok_or_else(|| EngineError::validation("total_pay", "amount out of range"))?;
    let (overtime_pay, penalty_pay) = match premium {
        PremiumKind::Overtime => (premium_pay, Decimal::ZERO),
        PremiumKind::Penalty => (Decimal::ZERO, premium_pay),
    };

    Ok(DayPay {
        day_type,
        hours,
        effective_hours,
        base_pay,
        overtime_pay,
        penalty_pay,
        total_pay,
        tiers,
    })
}
