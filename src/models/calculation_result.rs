//! Calculation result models for the labor cost engine.
//!
//! This module contains the [`LineItemCalculation`] produced for labor line
//! items and the tagged [`Breakdown`] stored alongside every priced budget
//! line.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LaborUnit, Phase};
use crate::calculation::{DayPay, DayType, OnCosts};

/// One priced working date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLine {
    /// The working date.
    pub date: NaiveDate,
    /// How the date was classified.
    pub day_type: DayType,
    /// The pay for the date.
    pub pay: DayPay,
}

/// The priced subtotal for one active phase.
///
/// # Example
///
/// ```
/// use labor_engine::models::{Phase, PhaseBreakdown};
/// use rust_decimal::Decimal;
///
/// let breakdown = PhaseBreakdown {
///     phase: Phase::Shoot,
///     days: 0,
///     hours_per_day: Decimal::new(10, 0),
///     cost: Decimal::ZERO,
///     days_detail: vec![],
/// };
/// assert_eq!(breakdown.phase, Phase::Shoot);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseBreakdown {
    /// The phase priced.
    pub phase: Phase,
    /// Number of dates priced in the phase.
    pub days: u32,
    /// Scheduled hours per date before the minimum call is applied.
    pub hours_per_day: Decimal,
    /// Phase subtotal, rounded to cents.
    pub cost: Decimal,
    /// Per-date detail in ascending date order.
    pub days_detail: Vec<DayLine>,
}

/// The complete result of pricing one labor line item.
///
/// An immutable value: every numeric field is a [`Decimal`], so the JSON
/// encoding round-trips exactly and results can be cached by input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemCalculation {
    /// Gross labor cost (sum of phase subtotals, or the flat amount).
    pub total_labor_cost: Decimal,
    /// Sum of the employer on-costs.
    pub total_on_costs: Decimal,
    /// Labor plus on-costs.
    pub grand_total: Decimal,
    /// Untiered reference pay (effective hours × base rate) across all days.
    pub base_pay: Decimal,
    /// Overtime premiums across all days.
    pub overtime_pay: Decimal,
    /// Weekend and public holiday premiums across all days.
    pub penalty_pay: Decimal,
    /// The itemized on-costs.
    pub on_costs: OnCosts,
    /// One entry per active phase, in production order.
    pub per_phase_breakdown: Vec<PhaseBreakdown>,
    /// Number of dates priced.
    pub days_count: u32,
    /// How the item was costed.
    pub unit: LaborUnit,
}

impl LineItemCalculation {
    /// Builds the stored breakdown for this labor calculation.
    pub fn breakdown(&self) -> Breakdown {
        Breakdown::Labor {
            base: self.base_pay,
            overtime: self.overtime_pay,
            penalty: self.penalty_pay,
            on_costs: self.on_costs.clone(),
            phases: self
                .per_phase_breakdown
                .iter()
                .map(|p| PhaseCost {
                    phase: p.phase,
                    days: p.days,
                    cost: p.cost,
                })
                .collect(),
        }
    }
}

/// Days and cost for one phase of a stored breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCost {
    /// The phase.
    pub phase: Phase,
    /// Working days counted for the phase.
    pub days: u32,
    /// Cost attributed to the phase.
    pub cost: Decimal,
}

/// Days counted for one phase of a flat material breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDays {
    /// The phase.
    pub phase: Phase,
    /// Working days counted for the phase.
    pub days: u32,
}

/// The stored cost breakdown of a budget line.
///
/// The variant is fixed when the breakdown is built and travels with the
/// encoded value as a `type` tag, so readers never guess it from the shape.
///
/// # Example
///
/// ```
/// use labor_engine::models::Breakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = Breakdown::MaterialFlat { phases: vec![], flat_total: Decimal::new(250, 0) };
/// let json = serde_json::to_string(&breakdown).unwrap();
/// assert!(json.starts_with("{\"type\":\"material_flat\""));
/// assert_eq!(breakdown.total(), Decimal::new(250, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Breakdown {
    /// A labor line priced under the pay rules.
    Labor {
        /// Untiered reference pay.
        base: Decimal,
        /// Overtime premiums.
        overtime: Decimal,
        /// Weekend and public holiday premiums.
        penalty: Decimal,
        /// Employer on-costs.
        on_costs: OnCosts,
        /// Per-phase subtotals.
        phases: Vec<PhaseCost>,
    },
    /// A material line charged per day or per week.
    Material {
        /// Per-phase days and cost.
        phases: Vec<PhaseCost>,
    },
    /// A material line charged a fixed amount.
    MaterialFlat {
        /// Per-phase day counts, for display only.
        phases: Vec<PhaseDays>,
        /// The fixed amount.
        flat_total: Decimal,
    },
}

impl Breakdown {
    /// The total cost the breakdown represents, including on-costs for labor.
    pub fn total(&self) -> Decimal {
        match self {
            Breakdown::Labor {
                phases, on_costs, ..
            } => phases.iter().map(|p| p.cost).sum::<Decimal>() + on_costs.total_on_costs,
            Breakdown::Material { phases } => phases.iter().map(|p| p.cost).sum(),
            Breakdown::MaterialFlat { flat_total, .. } => *flat_total,
        }
    }
}
