//! Material (non-labor) line item pricing.
//!
//! Material items are hired against the same phase calendar as labor but
//! carry no pay rules: a day rate is charged per working day, a week rate per
//! `days_per_week` working days, and a flat amount once.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::{checked_product, checked_sum, require_non_negative, round_money};
use crate::error::{EngineError, EngineResult};
use crate::models::{Breakdown, MaterialInput, MaterialUnit, Phase, PhaseCost, PhaseDays};

/// Prices a material line item from the working-day count of each phase.
///
/// Phases missing from `phase_days` count as zero days. Inactive phases are
/// left out of the breakdown.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] for a negative rate, for a weekly
/// item whose `days_per_week` is not positive, or when a cost falls outside
/// the decimal range.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::compute_material_item;
/// use labor_engine::models::{ActivePhases, MaterialInput, MaterialUnit, Phase};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let input = MaterialInput {
///     rate: Decimal::new(900, 0),
///     unit: MaterialUnit::Week,
///     days_per_week: Decimal::new(5, 0),
///     active_phases: ActivePhases::only(Phase::Shoot),
/// };
/// let days = BTreeMap::from([(Phase::Shoot, 10), (Phase::PreProduction, 3)]);
///
/// let breakdown = compute_material_item(&input, &days).unwrap();
/// assert_eq!(breakdown.total(), Decimal::new(1800, 0));
/// ```
pub fn compute_material_item(
    input: &MaterialInput,
    phase_days: &BTreeMap<Phase, u32>,
) -> EngineResult<Breakdown> {
    let rate = require_non_negative("rate", input.rate)?;
    let active_days = input
        .active_phases
        .iter()
        .map(|phase| (phase, phase_days.get(&phase).copied().unwrap_or(0)));

    let breakdown = match input.unit {
        MaterialUnit::Flat => Breakdown::MaterialFlat {
            phases: active_days
                .map(|(phase, days)| PhaseDays { phase, days })
                .collect(),
            flat_total: rate,
        },
        MaterialUnit::Day => Breakdown::Material {
            phases: active_days
                .map(|(phase, days)| {
                    let cost = checked_product("cost", rate, Decimal::from(days))?;
                    Ok(PhaseCost {
                        phase,
                        days,
                        cost: round_money(cost),
                    })
                })
                .collect::<EngineResult<_>>()?,
        },
        MaterialUnit::Week => {
            if input.days_per_week <= Decimal::ZERO {
                return Err(EngineError::validation(
                    "days_per_week",
                    format!("must be positive (got {})", input.days_per_week),
                ));
            }
            Breakdown::Material {
                phases: active_days
                    .map(|(phase, days)| {
                        let cost = checked_product("cost", rate, Decimal::from(days))?
                            .checked_div(input.days_per_week)
                            .ok_or_else(|| EngineError::validation("cost", "amount out of range"))?;
                        Ok(PhaseCost {
                            phase,
                            days,
                            cost: round_money(cost),
                        })
                    })
                    .collect::<EngineResult<_>>()?,
            }
        }
    };

    // Keeps Breakdown::total within range
    if let Breakdown::Material { phases } = &breakdown {
        checked_sum("total", phases.iter().map(|p| p.cost))?;
    }

    tracing::debug!(
        unit = ?input.unit,
        rate = %rate,
        total = %breakdown.total(),
        "Priced material item"
    );

    Ok(breakdown)
}
