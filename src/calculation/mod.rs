//! Calculation logic for the labor cost engine.
//!
//! This module contains the pure calculation functions: day classification,
//! single-day pricing under the pay rules, employer on-costs, calendar cascade
//! resolution, line item aggregation and material pricing. None of them do I/O
//! or hold shared state, so they are safe to call concurrently.

mod calendar_resolver;
mod day_detection;
mod day_pay;
mod line_item;
mod material;
mod on_costs;
mod validation;

pub use calendar_resolver::{
    CalendarCascade, CascadeSnapshot, EntityKind, EntityRef, OverrideKey, PhaseOverrides,
    ResolutionMemo,
};
pub use day_detection::{DayType, classify_day, get_day_type};
pub use day_pay::{
    DayPay, PayTier, TierHours, TierLine, effective_hours, price_day, split_tiers,
};
pub use line_item::compute_line_item;
pub use material::compute_material_item;
pub use on_costs::{OnCosts, compute_on_costs, round_money};
pub use validation::{checked_product, checked_sum, decimal_from_f64, require_non_negative};
