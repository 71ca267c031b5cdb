//! The labor cost engine service object.
//!
//! [`LaborCostEngine`] bundles the loaded configuration with one production's
//! calendar cascade and exposes the two entry points callers need:
//! [`resolve_calendar`](LaborCostEngine::resolve_calendar) and
//! [`compute_line_item`](LaborCostEngine::compute_line_item). Everything is
//! passed in explicitly; there is no global state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    CalendarCascade, DayPay, EntityRef, classify_day, compute_line_item, compute_material_item,
    price_day,
};
use crate::config::{EngineConfig, OnCostRates};
use crate::error::EngineResult;
use crate::models::{
    ActivePhases, Breakdown, CalculationInput, EmploymentCategory, HolidayCalendar, LaborUnit,
    LineItemCalculation, MaterialInput, Phase, PhaseConfig,
};

fn default_true() -> bool {
    true
}

/// A labor line item as stored by the budget: its own fields plus the
/// entity it resolves its calendar through.
///
/// # Example
///
/// ```
/// use labor_engine::engine::LaborLineItem;
///
/// let json = r#"{
///     "entity": { "kind": "line_item", "id": "li-1", "department_id": "camera" },
///     "base_hourly_rate": "55.00",
///     "employment_category": "crew"
/// }"#;
/// let item: LaborLineItem = serde_json::from_str(json).unwrap();
/// assert!(!item.is_casual);
/// assert!(item.apply_on_costs);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborLineItem {
    /// The entity whose calendar applies.
    pub entity: EntityRef,
    /// The base hourly rate, or the fixed amount for flat items.
    pub base_hourly_rate: Decimal,
    /// Casual rather than permanent engagement.
    #[serde(default)]
    pub is_casual: bool,
    /// The award rule set.
    pub employment_category: EmploymentCategory,
    /// Which phases the item is engaged for.
    #[serde(default)]
    pub active_phases: ActivePhases,
    /// Hourly or flat costing.
    #[serde(default)]
    pub unit: LaborUnit,
    /// Whether on-costs are added to a flat item.
    #[serde(default = "default_true")]
    pub apply_on_costs: bool,
}

/// Prices line items for one production.
///
/// # Example
///
/// ```
/// use labor_engine::calculation::{CalendarCascade, EntityRef};
/// use labor_engine::config::EngineConfig;
/// use labor_engine::engine::{LaborCostEngine, LaborLineItem};
/// use labor_engine::models::{
///     ActivePhases, CalendarConfig, EmploymentCategory, LaborUnit, Phase, PhaseConfig,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut calendar = CalendarConfig::default();
/// calendar.shoot = PhaseConfig::new(
///     Decimal::new(10, 0),
///     [NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()],
/// );
/// let engine = LaborCostEngine::new(EngineConfig::default(), CalendarCascade::new(calendar));
///
/// let item = LaborLineItem {
///     entity: EntityRef::line_item("li-1", None),
///     base_hourly_rate: Decimal::new(50, 0),
///     is_casual: false,
///     employment_category: EmploymentCategory::Crew,
///     active_phases: ActivePhases::only(Phase::Shoot),
///     unit: LaborUnit::Hourly,
///     apply_on_costs: true,
/// };
/// let result = engine.price_line_item(&item).unwrap();
/// assert_eq!(result.total_labor_cost, Decimal::new(570, 0));
/// ```
#[derive(Debug, Clone)]
pub struct LaborCostEngine {
    config: EngineConfig,
    cascade: CalendarCascade,
}

impl LaborCostEngine {
    /// Creates an engine over a configuration and a calendar cascade.
    pub fn new(config: EngineConfig, cascade: CalendarCascade) -> Self {
        Self { config, cascade }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The calendar cascade.
    pub fn cascade(&self) -> &CalendarCascade {
        &self.cascade
    }

    /// Mutable access to the calendar cascade for calendar-settings writes.
    pub fn cascade_mut(&mut self) -> &mut CalendarCascade {
        &mut self.cascade
    }

    /// Adds caller-supplied public holiday dates to the configured ones.
    pub fn with_extra_holidays(self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let holidays = self.config.holidays().with_extra_dates(dates);
        self.with_holidays(holidays)
    }

    /// Replaces the public holidays.
    pub fn with_holidays(self, holidays: HolidayCalendar) -> Self {
        let config = EngineConfig::new(
            self.config.pay_rules().clone(),
            self.config.on_cost_rates().clone(),
            holidays,
        );
        Self { config, ..self }
    }

    /// Replaces the on-cost rates (project settings).
    pub fn with_on_cost_rates(self, rates: OnCostRates) -> Self {
        let config = EngineConfig::new(
            self.config.pay_rules().clone(),
            rates,
            self.config.holidays().clone(),
        );
        Self { config, ..self }
    }

    /// Resolves the effective schedule of one phase for an entity.
    pub fn resolve_calendar(&self, entity: &EntityRef, phase: Phase) -> EngineResult<PhaseConfig> {
        self.cascade.resolve(entity, phase)
    }

    /// Builds the calculation snapshot for a stored line item, resolving the
    /// calendar of every active phase.
    pub fn build_input(&self, item: &LaborLineItem) -> EngineResult<CalculationInput> {
        let mut phase_configs = BTreeMap::new();
        for phase in item.active_phases.iter() {
            phase_configs.insert(phase, self.resolve_calendar(&item.entity, phase)?);
        }

        Ok(CalculationInput {
            base_hourly_rate: item.base_hourly_rate,
            is_casual: item.is_casual,
            employment_category: item.employment_category,
            active_phases: item.active_phases,
            phase_configs,
            unit: item.unit,
            apply_on_costs: item.apply_on_costs,
        })
    }

    /// Prices a calculation snapshot under this engine's configuration.
    pub fn compute_line_item(&self, input: &CalculationInput) -> EngineResult<LineItemCalculation> {
        compute_line_item(
            input,
            self.config.pay_rules(),
            self.config.on_cost_rates(),
            self.config.holidays(),
        )
    }

    /// Resolves and prices a stored line item.
    pub fn price_line_item(&self, item: &LaborLineItem) -> EngineResult<LineItemCalculation> {
        let input = self.build_input(item)?;
        self.compute_line_item(&input)
    }

    /// Prices a material item against the entity's resolved day counts.
    pub fn price_material_item(
        &self,
        entity: &EntityRef,
        item: &MaterialInput,
    ) -> EngineResult<Breakdown> {
        let mut phase_days = BTreeMap::new();
        for phase in item.active_phases.iter() {
            let days = self.resolve_calendar(entity, phase)?.days();
            phase_days.insert(phase, u32::try_from(days).unwrap_or(u32::MAX));
        }
        compute_material_item(item, &phase_days)
    }

    /// Prices a single date, classifying it against the configured holidays.
    pub fn price_date(
        &self,
        date: NaiveDate,
        hours: Decimal,
        base_rate: Decimal,
        category: EmploymentCategory,
        is_casual: bool,
    ) -> EngineResult<DayPay> {
        let day_type = classify_day(date, self.config.holidays());
        price_day(
            hours,
            base_rate,
            category,
            is_casual,
            day_type,
            self.config.pay_rules(),
        )
    }
}
