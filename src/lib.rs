//! Labor cost engine for production budgets
//!
//! This crate prices labor line items across the three production phases.
//! Each phase calendar resolves through a production, department and line
//! item cascade, every working date is classified and priced under the award
//! pay rules, and employer on-costs are added on top.
//!
//! # Example
//!
//! ```
//! use labor_engine::calculation::{compute_line_item, price_day, DayType};
//! use labor_engine::config::{OnCostRates, PayRules};
//! use labor_engine::models::{
//!     ActivePhases, CalculationInput, EmploymentCategory, HolidayCalendar, Phase, PhaseConfig,
//! };
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let rules = PayRules::default();
//! let saturday = price_day(
//!     Decimal::new(10, 0),
//!     Decimal::new(50, 0),
//!     EmploymentCategory::Crew,
//!     false,
//!     DayType::Saturday,
//!     &rules,
//! )
//! .unwrap();
//! assert_eq!(saturday.total_pay, Decimal::new(785, 0));
//!
//! let input = CalculationInput::hourly(Decimal::new(50, 0), false, EmploymentCategory::Crew)
//!     .with_active_phases(ActivePhases::only(Phase::Shoot))
//!     .with_phase(
//!         Phase::Shoot,
//!         PhaseConfig::new(Decimal::new(10, 0), [NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()]),
//!     );
//! let result = compute_line_item(
//!     &input,
//!     &rules,
//!     &OnCostRates::default(),
//!     &HolidayCalendar::new(),
//! )
//! .unwrap();
//! assert_eq!(result.total_labor_cost, Decimal::new(570, 0));
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
