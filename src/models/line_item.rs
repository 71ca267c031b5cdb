//! Line item inputs.
//!
//! This module defines [`CalculationInput`], the snapshot a caller builds for
//! every labor calculation, together with the material item input used for
//! non-labor budget lines.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Phase, PhaseConfig};

/// The award rule set a line item is priced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentCategory {
    /// Cast (performer) rules.
    Artist,
    /// Crew rules, used for every other labor line.
    Crew,
}

impl std::fmt::Display for EmploymentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmploymentCategory::Artist => write!(f, "artist"),
            EmploymentCategory::Crew => write!(f, "crew"),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Which production phases a line item is engaged for.
///
/// Every phase is active unless switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePhases {
    /// Engaged during pre-production.
    #[serde(default = "default_true")]
    pub pre_production: bool,
    /// Engaged during the shoot.
    #[serde(default = "default_true")]
    pub shoot: bool,
    /// Engaged during post-production.
    #[serde(default = "default_true")]
    pub post_production: bool,
}

impl ActivePhases {
    /// Every phase active.
    pub fn all() -> Self {
        Self {
            pre_production: true,
            shoot: true,
            post_production: true,
        }
    }

    /// Only the given phase active.
    pub fn only(phase: Phase) -> Self {
        let mut flags = Self {
            pre_production: false,
            shoot: false,
            post_production: false,
        };
        flags.set(phase, true);
        flags
    }

    /// Returns whether a phase is active.
    pub fn is_active(&self, phase: Phase) -> bool {
        match phase {
            Phase::PreProduction => self.pre_production,
            Phase::Shoot => self.shoot,
            Phase::PostProduction => self.post_production,
        }
    }

    /// Switches a phase on or off.
    pub fn set(&mut self, phase: Phase, active: bool) {
        match phase {
            Phase::PreProduction => self.pre_production = active,
            Phase::Shoot => self.shoot = active,
            Phase::PostProduction => self.post_production = active,
        }
    }

    /// Active phases in production order.
    pub fn iter(&self) -> impl Iterator<Item = Phase> + '_ {
        Phase::ALL.into_iter().filter(|phase| self.is_active(*phase))
    }
}

impl Default for ActivePhases {
    fn default() -> Self {
        Self::all()
    }
}

/// How a labor line item is costed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborUnit {
    /// Priced per scheduled hour under the pay rules.
    #[default]
    Hourly,
    /// A fixed allowance: the rate is the gross total, whatever the schedule.
    Flat,
}

/// Everything the aggregator needs to price one labor line item.
///
/// Built fresh for each calculation from the line item's stored fields and the
/// resolved calendar. The type is hashable so callers can memoize results.
///
/// # Example
///
/// ```
/// use labor_engine::models::{ActivePhases, CalculationInput, EmploymentCategory, Phase, PhaseConfig};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput::hourly(Decimal::new(50, 0), false, EmploymentCategory::Crew)
///     .with_phase(
///         Phase::Shoot,
///         PhaseConfig::new(Decimal::new(10, 0), [NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()]),
///     );
/// assert!(input.phase_configs.contains_key(&Phase::Shoot));
/// assert_eq!(input.active_phases, ActivePhases::all());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalculationInput {
    /// The base hourly rate, or the fixed amount for flat items.
    pub base_hourly_rate: Decimal,
    /// Casual (loaded) rather than permanent engagement.
    #[serde(default)]
    pub is_casual: bool,
    /// The award rule set.
    pub employment_category: EmploymentCategory,
    /// Which phases are priced.
    #[serde(default)]
    pub active_phases: ActivePhases,
    /// The resolved schedule for each active phase.
    #[serde(default)]
    pub phase_configs: BTreeMap<Phase, PhaseConfig>,
    /// Hourly or flat costing.
    #[serde(default)]
    pub unit: LaborUnit,
    /// Whether on-costs are added. Only flat items may switch them off.
    #[serde(default = "default_true")]
    pub apply_on_costs: bool,
}

impl CalculationInput {
    /// Creates an hourly input with every phase active and no schedules yet.
    pub fn hourly(
        base_hourly_rate: Decimal,
        is_casual: bool,
        employment_category: EmploymentCategory,
    ) -> Self {
        Self {
            base_hourly_rate,
            is_casual,
            employment_category,
            active_phases: ActivePhases::all(),
            phase_configs: BTreeMap::new(),
            unit: LaborUnit::Hourly,
            apply_on_costs: true,
        }
    }

    /// Creates a flat allowance input.
    pub fn flat(amount: Decimal, employment_category: EmploymentCategory) -> Self {
        Self {
            unit: LaborUnit::Flat,
            ..Self::hourly(amount, false, employment_category)
        }
    }

    /// Attaches the resolved schedule for a phase.
    pub fn with_phase(mut self, phase: Phase, config: PhaseConfig) -> Self {
        self.phase_configs.insert(phase, config);
        self
    }

    /// Replaces the active phase flags.
    pub fn with_active_phases(mut self, active_phases: ActivePhases) -> Self {
        self.active_phases = active_phases;
        self
    }
}

/// How a material (non-labor) line item is costed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialUnit {
    /// Rate charged per working day.
    Day,
    /// Rate charged per week of working days.
    Week,
    /// A fixed amount regardless of schedule.
    Flat,
}

fn default_days_per_week() -> Decimal {
    Decimal::new(5, 0)
}

/// A material line item priced against the phase calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialInput {
    /// The rate per unit (or the flat amount).
    pub rate: Decimal,
    /// The costing unit.
    pub unit: MaterialUnit,
    /// Working days that make up one week for weekly items.
    #[serde(default = "default_days_per_week")]
    pub days_per_week: Decimal,
    /// Which phases the item is hired for.
    #[serde(default)]
    pub active_phases: ActivePhases,
}
