//! HTTP request handlers for the labor cost engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! request builds its own [`LaborCostEngine`] from the shared configuration
//! and the calendar carried in the body, so handlers share nothing mutable
//! except the calculation cache.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{CalendarCascade, DayPay, decimal_from_f64};
use crate::engine::LaborCostEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{Breakdown, PhaseConfig};

use super::request::{CalculationRequest, MaterialRequest, PriceDayRequest, ResolveRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::{AppState, CalculationKey};

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/material", post(material_handler))
        .route("/calendar/resolve", post(resolve_handler))
        .route("/price-day", post(price_day_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /calculate endpoint.
///
/// Resolves the line item's calendar, prices it, and returns the result with
/// its tagged breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_calculation(&state, request) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %response.calculation_id,
                days_count = response.result.days_count,
                grand_total = %response.result.grand_total,
                cached = response.cached,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Prices a labor line item, consulting the calculation cache.
fn perform_calculation(
    state: &AppState,
    request: CalculationRequest,
) -> EngineResult<CalculationResponse> {
    let mut engine = LaborCostEngine::new(
        state.config().config().clone(),
        CalendarCascade::from(request.calendar),
    )
    .with_extra_holidays(request.public_holidays);
    if let Some(rates) = request.on_cost_rates {
        engine = engine.with_on_cost_rates(rates);
    }

    let input = engine.build_input(&request.line_item)?;
    let key = CalculationKey {
        input: input.clone(),
        rates: engine.config().on_cost_rates().clone(),
        holidays: engine.config().holidays().dates(),
    };
    let (result, cached) = state.memoize(key, || engine.compute_line_item(&input))?;

    Ok(CalculationResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        cached,
        breakdown: result.breakdown(),
        result,
    })
}

/// Handler for POST /calculate/material endpoint.
async fn material_handler(
    State(state): State<AppState>,
    payload: Result<Json<MaterialRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing material request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let engine = LaborCostEngine::new(
        state.config().config().clone(),
        CalendarCascade::from(request.calendar),
    );
    let result: EngineResult<Breakdown> = engine.price_material_item(&request.entity, &request.item);
    match result {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                total = %breakdown.total(),
                "Material pricing completed"
            );
            json_response(StatusCode::OK, breakdown)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /calendar/resolve endpoint.
async fn resolve_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calendar resolution request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let engine = LaborCostEngine::new(
        state.config().config().clone(),
        CalendarCascade::from(request.calendar),
    );
    let result: EngineResult<PhaseConfig> = engine.resolve_calendar(&request.entity, request.phase);
    match result {
        Ok(config) => {
            info!(
                correlation_id = %correlation_id,
                phase = %request.phase,
                days = config.days(),
                "Calendar resolved"
            );
            json_response(StatusCode::OK, config)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /price-day endpoint.
async fn price_day_handler(
    State(state): State<AppState>,
    payload: Result<Json<PriceDayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing day pricing request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match price_single_day(&state, request) {
        Ok(pay) => {
            info!(
                correlation_id = %correlation_id,
                day_type = %pay.day_type,
                total_pay = %pay.total_pay,
                "Day priced"
            );
            json_response(StatusCode::OK, pay)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn price_single_day(state: &AppState, request: PriceDayRequest) -> EngineResult<DayPay> {
    let hours = decimal_from_f64("hours", request.hours)?;
    let base_rate = decimal_from_f64("base_rate", request.base_rate)?;

    let engine = LaborCostEngine::new(state.config().config().clone(), CalendarCascade::default())
        .with_extra_holidays(request.public_holidays);
    engine.price_date(
        request.date,
        hours,
        base_rate,
        request.employment_category,
        request.is_casual,
    )
}
