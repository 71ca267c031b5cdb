//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pay rules,
//! on-cost rates and public holidays from YAML files.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::HolidayCalendar;

use super::types::{EngineConfig, HolidaysFile, OnCostRates, OnCostsFile, PayRules, PayRulesFile};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── pay_rules.yaml   # Minimum call, tier limits and multiplier tables
/// ├── on_costs.yaml    # Employer on-cost rates
/// └── holidays.yaml    # Public holidays (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use labor_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Super rate: {}", loader.on_cost_rates().super_rate);
/// println!("Holidays: {}", loader.holidays().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `pay_rules.yaml` or `on_costs.yaml` is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    ///
    /// A missing `holidays.yaml` is not an error; no dates are then treated as
    /// public holidays unless a caller supplies them.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let pay_rules = Self::load_yaml::<PayRulesFile>(&path.join("pay_rules.yaml"))?.pay_rules;
        let on_cost_rates = Self::load_yaml::<OnCostsFile>(&path.join("on_costs.yaml"))?.on_costs;

        let holidays_path = path.join("holidays.yaml");
        let holidays = if holidays_path.exists() {
            Self::load_yaml::<HolidaysFile>(&holidays_path)?.public_holidays
        } else {
            HolidayCalendar::new()
        };

        tracing::info!(
            path = %path.display(),
            holidays = holidays.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(pay_rules, on_cost_rates, holidays),
        })
    }

    /// The built-in configuration: documented pay rules, default on-cost
    /// rates and no public holidays.
    ///
    /// # Example
    ///
    /// ```
    /// use labor_engine::config::ConfigLoader;
    /// use rust_decimal::Decimal;
    ///
    /// let loader = ConfigLoader::defaults();
    /// assert_eq!(loader.pay_rules().minimum_call_hours, Decimal::new(4, 0));
    /// assert!(loader.holidays().is_empty());
    /// ```
    pub fn defaults() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the pay rules.
    pub fn pay_rules(&self) -> &PayRules {
        self.config.pay_rules()
    }

    /// Returns the on-cost rates.
    pub fn on_cost_rates(&self) -> &OnCostRates {
        self.config.on_cost_rates()
    }

    /// Returns the configured public holidays.
    pub fn holidays(&self) -> &HolidayCalendar {
        self.config.holidays()
    }

    /// Returns true if the date is a configured public holiday.
    pub fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.config.holidays().is_public_holiday(date)
    }
}
