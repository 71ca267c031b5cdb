//! Production phase and calendar models.
//!
//! This module defines the three production [`Phase`]s and the schedule
//! records attached to each phase at the production, department and line-item
//! levels of the calendar cascade.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the three production stages.
///
/// # Example
///
/// ```
/// use labor_engine::models::Phase;
///
/// assert_eq!(Phase::ALL[1], Phase::Shoot);
/// assert_eq!(Phase::PostProduction.to_string(), "post_production");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Preparation ahead of principal photography.
    PreProduction,
    /// Principal photography.
    Shoot,
    /// Editing, sound and delivery.
    PostProduction,
}

impl Phase {
    /// All phases in production order.
    pub const ALL: [Phase; 3] = [Phase::PreProduction, Phase::Shoot, Phase::PostProduction];

    /// Default hours per day for a production that has never saved a calendar.
    pub fn default_hours(self) -> Decimal {
        match self {
            Phase::Shoot => Decimal::new(10, 0),
            Phase::PreProduction | Phase::PostProduction => Decimal::new(8, 0),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::PreProduction => write!(f, "pre_production"),
            Phase::Shoot => write!(f, "shoot"),
            Phase::PostProduction => write!(f, "post_production"),
        }
    }
}

fn default_inherit() -> bool {
    true
}

/// The schedule of one phase at one level of the cascade.
///
/// `working_dates` is a set, so a date can never be listed twice, and it
/// iterates in ascending date order.
///
/// # Example
///
/// ```
/// use labor_engine::models::PhaseConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = PhaseConfig::new(
///     Decimal::new(10, 0),
///     [
///         NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
///         NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///         NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     ],
/// );
/// assert_eq!(config.working_dates.len(), 2);
/// assert_eq!(
///     config.working_dates.first(),
///     Some(&NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// Scheduled hours for every working date in the phase.
    pub default_hours_per_day: Decimal,
    /// The dates the phase is worked.
    #[serde(default)]
    pub working_dates: BTreeSet<NaiveDate>,
    /// Whether this level defers to its parent. Always false on a resolved config.
    #[serde(default)]
    pub inherit_from_parent: bool,
}

impl PhaseConfig {
    /// Creates a concrete (non-inheriting) phase configuration.
    pub fn new(
        default_hours_per_day: Decimal,
        working_dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            default_hours_per_day,
            working_dates: working_dates.into_iter().collect(),
            inherit_from_parent: false,
        }
    }

    /// The number of working dates in the phase.
    pub fn days(&self) -> usize {
        self.working_dates.len()
    }
}

/// A partial override of one phase at the department or line-item level.
///
/// An absent override and an override with `inherit_from_parent = true` mean
/// the same thing. When inheritance is switched off, any field that is present
/// replaces the parent's value outright; a missing field falls back to the
/// parent's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseOverride {
    /// Whether this level defers to its parent.
    #[serde(default = "default_inherit")]
    pub inherit_from_parent: bool,
    /// Replacement hours per day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_hours_per_day: Option<Decimal>,
    /// Replacement working dates (never merged with the parent's).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dates: Option<BTreeSet<NaiveDate>>,
}

impl PhaseOverride {
    /// An override that defers to the parent level.
    pub fn inherit() -> Self {
        Self {
            inherit_from_parent: true,
            default_hours_per_day: None,
            working_dates: None,
        }
    }

    /// An override that replaces both hours and dates.
    pub fn replace(
        default_hours_per_day: Decimal,
        working_dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            inherit_from_parent: false,
            default_hours_per_day: Some(default_hours_per_day),
            working_dates: Some(working_dates.into_iter().collect()),
        }
    }

    /// An override that replaces only the working dates and keeps the parent's hours.
    pub fn replace_dates(working_dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            inherit_from_parent: false,
            default_hours_per_day: None,
            working_dates: Some(working_dates.into_iter().collect()),
        }
    }
}

/// The production-wide calendar: one concrete schedule per phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Pre-production schedule.
    pub pre_production: PhaseConfig,
    /// Shoot schedule.
    pub shoot: PhaseConfig,
    /// Post-production schedule.
    pub post_production: PhaseConfig,
}

impl CalendarConfig {
    /// Returns the schedule for a phase.
    pub fn phase(&self, phase: Phase) -> &PhaseConfig {
        match phase {
            Phase::PreProduction => &self.pre_production,
            Phase::Shoot => &self.shoot,
            Phase::PostProduction => &self.post_production,
        }
    }

    /// Returns a mutable reference to the schedule for a phase.
    pub fn phase_mut(&mut self, phase: Phase) -> &mut PhaseConfig {
        match phase {
            Phase::PreProduction => &mut self.pre_production,
            Phase::Shoot => &mut self.shoot,
            Phase::PostProduction => &mut self.post_production,
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            pre_production: PhaseConfig::new(Phase::PreProduction.default_hours(), []),
            shoot: PhaseConfig::new(Phase::Shoot.default_hours(), []),
            post_production: PhaseConfig::new(Phase::PostProduction.default_hours(), []),
        }
    }
}
