//! Application state for the labor cost engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::config::{ConfigLoader, OnCostRates};
use crate::error::EngineResult;
use crate::models::{CalculationInput, LineItemCalculation};

/// Maximum number of memoized calculations before the cache is cleared.
pub const MAX_CACHED_CALCULATIONS: usize = 1024;

/// Everything a line item result depends on besides the pay rules, which are
/// fixed for the life of the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CalculationKey {
    /// The calculation snapshot.
    pub input: CalculationInput,
    /// The on-cost rates in force.
    pub rates: OnCostRates,
    /// The public holiday dates in force.
    pub holidays: BTreeSet<NaiveDate>,
}

/// Shared application state.
///
/// Holds the loaded configuration and a bounded memo of recent line item
/// calculations. Clones share both.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// Recent calculations by input.
    cache: Arc<Mutex<HashMap<CalculationKey, LineItemCalculation>>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Number of memoized calculations.
    pub fn cached_calculations(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Returns the memoized result for `key`, computing and storing it on a miss.
    ///
    /// The boolean is true when the result came from the cache. Errors are not
    /// memoized. The lock is not held while computing.
    pub fn memoize(
        &self,
        key: CalculationKey,
        compute: impl FnOnce() -> EngineResult<LineItemCalculation>,
    ) -> EngineResult<(LineItemCalculation, bool)> {
        {
            let cache = self
                .cache
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(result) = cache.get(&key) {
                return Ok((result.clone(), true));
            }
        }

        let result = compute()?;

        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if cache.len() >= MAX_CACHED_CALCULATIONS {
            tracing::debug!(entries = cache.len(), "Clearing calculation cache");
            cache.clear();
        }
        cache.insert(key, result.clone());
        Ok((result, false))
    }
}
