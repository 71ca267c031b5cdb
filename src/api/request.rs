//! Request types for the labor cost engine API.
//!
//! This module defines the JSON request structures for every endpoint. Money
//! and hours are decimal strings, except on `/price-day`, which accepts plain
//! JSON numbers and validates them at the boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{CascadeSnapshot, EntityRef};
use crate::config::OnCostRates;
use crate::engine::LaborLineItem;
use crate::models::{EmploymentCategory, MaterialInput, Phase};

fn production_entity() -> EntityRef {
    EntityRef::Production
}

/// Request body for the `/calculate` endpoint.
///
/// Contains the stored line item, the production's calendar cascade and any
/// per-project settings that override the server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The labor line item to price.
    pub line_item: LaborLineItem,
    /// The production calendar and its overrides.
    #[serde(default)]
    pub calendar: CascadeSnapshot,
    /// Public holiday dates in addition to the configured ones.
    #[serde(default)]
    pub public_holidays: Vec<NaiveDate>,
    /// On-cost rates from project settings, replacing the configured ones.
    #[serde(default)]
    pub on_cost_rates: Option<OnCostRates>,
}

/// Request body for the `/calculate/material` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRequest {
    /// The entity whose calendar supplies the day counts.
    #[serde(default = "production_entity")]
    pub entity: EntityRef,
    /// The material item to price.
    pub item: MaterialInput,
    /// The production calendar and its overrides.
    #[serde(default)]
    pub calendar: CascadeSnapshot,
}

/// Request body for the `/calendar/resolve` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// The entity to resolve for.
    #[serde(default = "production_entity")]
    pub entity: EntityRef,
    /// The phase to resolve.
    pub phase: Phase,
    /// The production calendar and its overrides.
    #[serde(default)]
    pub calendar: CascadeSnapshot,
}

/// Request body for the `/price-day` endpoint.
///
/// `hours` and `base_rate` are JSON numbers; non-finite or negative values
/// are rejected with a validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceDayRequest {
    /// The working date.
    pub date: NaiveDate,
    /// Scheduled hours.
    pub hours: f64,
    /// Base hourly rate.
    pub base_rate: f64,
    /// The award rule set.
    pub employment_category: EmploymentCategory,
    /// Casual rather than permanent engagement.
    #[serde(default)]
    pub is_casual: bool,
    /// Public holiday dates in addition to the configured ones.
    #[serde(default)]
    pub public_holidays: Vec<NaiveDate>,
}
