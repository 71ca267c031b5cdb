//! Configuration types for labor costing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every type has a
//! `Default` matching the documented award figures, so the engine works
//! without a configuration directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DayType;
use crate::models::{EmploymentCategory, HolidayCalendar};

/// Hours of the minimum call (4.0).
pub const MINIMUM_CALL_HOURS: Decimal = Decimal::from_parts(40, 0, 0, false, 1);

/// Hours at which ordinary time ends and first-tier overtime begins (7.6).
pub const ORDINARY_HOURS_LIMIT: Decimal = Decimal::from_parts(76, 0, 0, false, 1);

/// Hours at which first-tier overtime ends and extended overtime begins (9.6).
pub const FIRST_OVERTIME_LIMIT: Decimal = Decimal::from_parts(96, 0, 0, false, 1);

/// Where the premium above base pay is reported for a tiered day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumKind {
    /// The premium is overtime.
    Overtime,
    /// The premium is a weekend/holiday penalty.
    Penalty,
}

/// Multipliers for the three hour tiers of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierMultipliers {
    /// Hours up to the ordinary limit.
    pub ordinary: Decimal,
    /// Hours between the ordinary limit and the first overtime limit.
    pub first_overtime: Decimal,
    /// Hours beyond the first overtime limit.
    pub extended_overtime: Decimal,
}

impl TierMultipliers {
    /// Builds tier multipliers from `(mantissa, scale)` pairs.
    const fn scaled(ordinary: (u32, u32), first: (u32, u32), extended: (u32, u32)) -> Self {
        Self {
            ordinary: dec_const(ordinary),
            first_overtime: dec_const(first),
            extended_overtime: dec_const(extended),
        }
    }
}

const fn dec_const((mantissa, scale): (u32, u32)) -> Decimal {
    Decimal::from_parts(mantissa, 0, 0, false, scale)
}

/// How one kind of day is priced.
///
/// # Example
///
/// ```
/// use labor_engine::config::DayRule;
///
/// let yaml = "kind: flat\nmultiplier: '2.5'\n";
/// let rule: DayRule = serde_yaml::from_str(yaml).unwrap();
/// assert!(matches!(rule, DayRule::Flat { .. }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayRule {
    /// Hours are split into tiers, each with its own multiplier.
    Tiered {
        /// The tier multipliers.
        multipliers: TierMultipliers,
        /// Where the premium above base pay is reported.
        premium: PremiumKind,
    },
    /// Every hour carries the same multiplier; the premium is a penalty.
    Flat {
        /// The multiplier for all hours.
        multiplier: Decimal,
    },
}

impl DayRule {
    const fn overtime(ordinary: (u32, u32), first: (u32, u32), extended: (u32, u32)) -> Self {
        DayRule::Tiered {
            multipliers: TierMultipliers::scaled(ordinary, first, extended),
            premium: PremiumKind::Overtime,
        }
    }

    const fn penalty(ordinary: (u32, u32), first: (u32, u32), extended: (u32, u32)) -> Self {
        DayRule::Tiered {
            multipliers: TierMultipliers::scaled(ordinary, first, extended),
            premium: PremiumKind::Penalty,
        }
    }

    const fn flat(multiplier: (u32, u32)) -> Self {
        DayRule::Flat {
            multiplier: dec_const(multiplier),
        }
    }
}

/// Day rules for permanent and casual engagements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngagementRules {
    /// Full-time and part-time workers.
    pub permanent: DayRule,
    /// Casual workers (multipliers include the casual loading).
    pub casual: DayRule,
}

impl EngagementRules {
    /// Picks the rule for an engagement.
    pub fn for_engagement(&self, is_casual: bool) -> &DayRule {
        if is_casual { &self.casual } else { &self.permanent }
    }
}

/// Day rules for one employment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryRules {
    /// Monday to Friday.
    pub weekday: EngagementRules,
    /// Saturday.
    pub saturday: EngagementRules,
    /// Sunday.
    pub sunday: EngagementRules,
    /// Any public holiday, whatever the weekday.
    pub public_holiday: EngagementRules,
}

impl CategoryRules {
    /// Picks the rules for a day type.
    pub fn for_day(&self, day_type: DayType) -> &EngagementRules {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
            DayType::PublicHoliday => &self.public_holiday,
        }
    }
}

/// The complete pay-rule table: minimum call, tier boundaries and multipliers.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::DayType;
/// use labor_engine::config::{DayRule, PayRules};
/// use labor_engine::models::EmploymentCategory;
/// use rust_decimal::Decimal;
///
/// let rules = PayRules::default();
/// let rule = rules.rule_for(EmploymentCategory::Crew, DayType::PublicHoliday, true);
/// assert_eq!(*rule, DayRule::Flat { multiplier: Decimal::new(3125, 3) });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayRules {
    /// Minimum paid hours for any engaged day.
    pub minimum_call_hours: Decimal,
    /// End of ordinary time.
    pub ordinary_hours_limit: Decimal,
    /// End of first-tier overtime.
    pub first_overtime_limit: Decimal,
    /// Cast rules.
    pub artist: CategoryRules,
    /// Crew rules.
    pub crew: CategoryRules,
}

impl PayRules {
    /// Picks the rule for a category, day type and engagement.
    pub fn rule_for(
        &self,
        category: EmploymentCategory,
        day_type: DayType,
        is_casual: bool,
    ) -> &DayRule {
        let rules = match category {
            EmploymentCategory::Artist => &self.artist,
            EmploymentCategory::Crew => &self.crew,
        };
        rules.for_day(day_type).for_engagement(is_casual)
    }
}

impl Default for PayRules {
    fn default() -> Self {
        let artist_ordinary_week = EngagementRules {
            permanent: DayRule::overtime((10, 1), (15, 1), (20, 1)),
            casual: DayRule::overtime((125, 2), (1875, 3), (25, 1)),
        };

        Self {
            minimum_call_hours: MINIMUM_CALL_HOURS,
            ordinary_hours_limit: ORDINARY_HOURS_LIMIT,
            first_overtime_limit: FIRST_OVERTIME_LIMIT,
            artist: CategoryRules {
                weekday: artist_ordinary_week,
                saturday: artist_ordinary_week,
                sunday: EngagementRules {
                    permanent: DayRule::flat((20, 1)),
                    casual: DayRule::flat((20, 1)),
                },
                public_holiday: EngagementRules {
                    permanent: DayRule::flat((25, 1)),
                    casual: DayRule::flat((25, 1)),
                },
            },
            crew: CategoryRules {
                weekday: EngagementRules {
                    permanent: DayRule::overtime((10, 1), (15, 1), (20, 1)),
                    casual: DayRule::overtime((125, 2), (1875, 3), (25, 1)),
                },
                saturday: EngagementRules {
                    permanent: DayRule::overtime((15, 1), (175, 2), (20, 1)),
                    casual: DayRule::overtime((175, 2), (21875, 4), (25, 1)),
                },
                sunday: EngagementRules {
                    permanent: DayRule::penalty((175, 2), (20, 1), (20, 1)),
                    casual: DayRule::penalty((20, 1), (25, 1), (25, 1)),
                },
                public_holiday: EngagementRules {
                    permanent: DayRule::flat((25, 1)),
                    casual: DayRule::flat((3125, 3)),
                },
            },
        }
    }
}

/// Employer on-cost rates, each a fraction of gross labor.
///
/// # Example
///
/// ```
/// use labor_engine::config::OnCostRates;
/// use rust_decimal::Decimal;
///
/// let rates = OnCostRates::default();
/// assert_eq!(rates.super_rate, Decimal::new(115, 3));
/// assert_eq!(rates.holiday_pay_rate, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OnCostRates {
    /// Superannuation guarantee.
    #[serde(default = "default_super_rate")]
    pub super_rate: Decimal,
    /// State payroll tax.
    #[serde(default = "default_payroll_tax_rate")]
    pub payroll_tax_rate: Decimal,
    /// Workers' compensation premium.
    #[serde(default = "default_workers_comp_rate")]
    pub workers_comp_rate: Decimal,
    /// Holiday-pay accrual, supplied by project settings.
    #[serde(default)]
    pub holiday_pay_rate: Decimal,
}

fn default_super_rate() -> Decimal {
    Decimal::new(115, 3)
}

fn default_payroll_tax_rate() -> Decimal {
    Decimal::new(485, 4)
}

fn default_workers_comp_rate() -> Decimal {
    Decimal::new(3, 2)
}

impl OnCostRates {
    /// The same rates with holiday-pay accrual switched off.
    pub fn without_holiday_pay(&self) -> Self {
        Self {
            holiday_pay_rate: Decimal::ZERO,
            ..self.clone()
        }
    }
}

impl Default for OnCostRates {
    fn default() -> Self {
        Self {
            super_rate: default_super_rate(),
            payroll_tax_rate: default_payroll_tax_rate(),
            workers_comp_rate: default_workers_comp_rate(),
            holiday_pay_rate: Decimal::ZERO,
        }
    }
}

/// Pay-rule configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PayRulesFile {
    /// The pay rules.
    pub pay_rules: PayRules,
}

/// On-cost configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct OnCostsFile {
    /// The on-cost rates.
    pub on_costs: OnCostRates,
}

/// Holiday configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysFile {
    /// The public holidays.
    #[serde(default)]
    pub public_holidays: HolidayCalendar,
}

/// The complete engine configuration.
///
/// Aggregates the pay rules, on-cost rates and public holidays loaded from a
/// configuration directory, or the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pay_rules: PayRules,
    on_cost_rates: OnCostRates,
    holidays: HolidayCalendar,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(pay_rules: PayRules, on_cost_rates: OnCostRates, holidays: HolidayCalendar) -> Self {
        Self {
            pay_rules,
            on_cost_rates,
            holidays,
        }
    }

    /// Returns the pay rules.
    pub fn pay_rules(&self) -> &PayRules {
        &self.pay_rules
    }

    /// Returns the on-cost rates.
    pub fn on_cost_rates(&self) -> &OnCostRates {
        &self.on_cost_rates
    }

    /// Returns the public holidays.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }
}
