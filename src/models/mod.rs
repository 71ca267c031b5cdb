//! Core data models for the labor cost engine.
//!
//! This module contains the domain models used throughout the engine.

mod calculation_result;
mod holiday;
mod line_item;
mod phase;

pub use calculation_result::{
    Breakdown, DayLine, LineItemCalculation, PhaseBreakdown, PhaseCost, PhaseDays,
};
pub use holiday::{HolidayCalendar, PublicHoliday};
pub use line_item::{
    ActivePhases, CalculationInput, EmploymentCategory, LaborUnit, MaterialInput, MaterialUnit,
};
pub use phase::{CalendarConfig, Phase, PhaseConfig, PhaseOverride};
