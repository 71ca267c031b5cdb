//! Configuration loading and management for the labor cost engine.
//!
//! This module provides functionality to load the pay-rule table, employer
//! on-cost rates and public holidays from YAML files. Every type falls back to
//! the documented award figures, so [`ConfigLoader::defaults`] works without a
//! configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use labor_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Minimum call: {} hours", config.pay_rules().minimum_call_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CategoryRules, DayRule, EngagementRules, EngineConfig, FIRST_OVERTIME_LIMIT, HolidaysFile,
    MINIMUM_CALL_HOURS, ORDINARY_HOURS_LIMIT, OnCostRates, OnCostsFile, PayRules, PayRulesFile,
    PremiumKind, TierMultipliers,
};
