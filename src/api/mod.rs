//! HTTP API module for the labor cost engine.
//!
//! This module provides the REST endpoints for pricing labor and material
//! line items, resolving calendars and pricing single days.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, MaterialRequest, PriceDayRequest, ResolveRequest};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::{AppState, CalculationKey, MAX_CACHED_CALCULATIONS};
