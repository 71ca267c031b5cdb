//! End-to-end tests for the labor cost engine HTTP API.
//!
//! This test suite covers:
//! - Hourly labor pricing across weekday, Saturday, Sunday and holiday dates
//! - Minimum call and overtime tiers
//! - Casual engagements and holiday-pay accrual
//! - Flat labor items with and without on-costs
//! - Department and line item calendar overrides
//! - Material pricing and calendar resolution
//! - Single day pricing
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use labor_engine::api::{AppState, create_router};
use labor_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    post_json(router, "/calculate", body).await
}

fn phase(hours: &str, dates: &[&str]) -> Value {
    json!({ "default_hours_per_day": hours, "working_dates": dates })
}

/// Production calendar with an empty pre-production, a Monday and a Saturday
/// on the shoot, and an empty post-production.
fn production_calendar() -> Value {
    json!({
        "production": {
            "pre_production": phase("8", &[]),
            "shoot": phase("10", &["2026-03-02", "2026-03-07"]),
            "post_production": phase("8", &[]),
        }
    })
}

fn calendar_with_shoot(hours: &str, dates: &[&str]) -> Value {
    json!({
        "production": {
            "pre_production": phase("8", &[]),
            "shoot": phase(hours, dates),
            "post_production": phase("8", &[]),
        }
    })
}

fn line_item(rate: &str, category: &str, is_casual: bool) -> Value {
    json!({
        "entity": { "kind": "line_item", "id": "li-1", "department_id": "camera" },
        "base_hourly_rate": rate,
        "employment_category": category,
        "is_casual": is_casual,
    })
}

fn create_request(item: Value, calendar: Value) -> Value {
    json!({ "line_item": item, "calendar": calendar })
}

fn assert_decimal(result: &Value, pointer: &str, expected: &str) {
    let actual = result
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("Missing decimal at {} in {}", pointer, result));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {} = {}, got {}",
        pointer,
        expected,
        actual
    );
}

fn assert_labor_cost(result: &Value, expected: &str) {
    assert_decimal(result, "/result/total_labor_cost", expected);
}

fn assert_grand_total(result: &Value, expected: &str) {
    assert_decimal(result, "/result/grand_total", expected);
}

// =============================================================================
// SECTION 1: Hourly Labor Pricing - 6 tests
// =============================================================================

#[tokio::test]
async fn test_crew_weekday_and_saturday() {
    // Monday 10h: 7.6 × 50 + 2 × 75 + 0.4 × 100 = 570
    // Saturday 10h: 7.6 × 75 + 2 × 87.5 + 0.4 × 100 = 785
    let router = create_router_for_test();
    let request = create_request(line_item("50", "crew", false), production_calendar());

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "1355");
    assert_eq!(result["result"]["days_count"], 2);

    let days = result["result"]["per_phase_breakdown"][1]["days_detail"]
        .as_array()
        .unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["day_type"], "weekday");
    assert_decimal(&days[0]["pay"], "/total_pay", "570");
    assert_eq!(days[1]["day_type"], "saturday");
    assert_decimal(&days[1]["pay"], "/total_pay", "785");
}

#[tokio::test]
async fn test_on_costs_and_grand_total() {
    // 1355 × 0.115 = 155.825 → 155.83; × 0.0485 = 65.7175 → 65.72; × 0.03 = 40.65
    let router = create_router_for_test();
    let request = create_request(line_item("50", "crew", false), production_calendar());

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "/result/on_costs/superannuation", "155.83");
    assert_decimal(&result, "/result/on_costs/payroll_tax", "65.72");
    assert_decimal(&result, "/result/on_costs/workers_comp", "40.65");
    assert_decimal(&result, "/result/total_on_costs", "262.20");
    assert_grand_total(&result, "1617.20");
}

#[tokio::test]
async fn test_crew_sunday_is_tiered_penalty() {
    // 2026-03-08 is a Sunday: 7.6 × 87.5 + 2 × 100 + 0.4 × 100 = 905
    let router = create_router_for_test();
    let request = create_request(
        line_item("50", "crew", false),
        calendar_with_shoot("10", &["2026-03-08"]),
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "905");
    assert_decimal(&result, "/result/overtime_pay", "0");
    assert_decimal(&result, "/result/penalty_pay", "405");
}

#[tokio::test]
async fn test_artist_sunday_is_flat_double_time() {
    let router = create_router_for_test();
    let request = create_request(
        line_item("50", "artist", false),
        calendar_with_shoot("10", &["2026-03-08"]),
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "1000");
    assert_decimal(&result, "/result/penalty_pay", "500");
}

#[tokio::test]
async fn test_short_day_pays_minimum_call() {
    // 3 scheduled hours are paid as 4
    let router = create_router_for_test();
    let request = create_request(
        line_item("50", "crew", false),
        calendar_with_shoot("3", &["2026-03-02"]),
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "200");
    assert_decimal(
        &result,
        "/result/per_phase_breakdown/1/days_detail/0/pay/effective_hours",
        "4",
    );
}

#[tokio::test]
async fn test_inactive_phases_are_skipped() {
    let router = create_router_for_test();
    let mut item = line_item("50", "crew", false);
    item["active_phases"] = json!({ "shoot": false });
    let request = create_request(item, production_calendar());

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "0");
    assert_eq!(result["result"]["days_count"], 0);
    assert_eq!(
        result["result"]["per_phase_breakdown"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

// =============================================================================
// SECTION 2: Public Holidays - 3 tests
// =============================================================================

#[tokio::test]
async fn test_request_holiday_reclassifies_weekday() {
    // The Monday becomes a public holiday: 10 × 125 = 1250
    let router = create_router_for_test();
    let mut request = create_request(line_item("50", "crew", false), production_calendar());
    request["public_holidays"] = json!(["2026-03-02"]);

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "2035");
    assert_eq!(
        result["result"]["per_phase_breakdown"][1]["days_detail"][0]["day_type"],
        "public_holiday"
    );
}

#[tokio::test]
async fn test_configured_holiday_applies() {
    // Christmas Day comes from config/default/holidays.yaml
    let router = create_router_for_test();
    let request = create_request(
        line_item("50", "crew", false),
        calendar_with_shoot("10", &["2026-12-25"]),
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "1250");
}

#[tokio::test]
async fn test_casual_crew_public_holiday() {
    // 10 × 50 × 3.125 = 1562.50
    let router = create_router_for_test();
    let request = create_request(
        line_item("50", "crew", true),
        calendar_with_shoot("10", &["2026-12-25"]),
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "1562.50");
}

// =============================================================================
// SECTION 3: Casual Engagements and Holiday Pay - 3 tests
// =============================================================================

#[tokio::test]
async fn test_casual_artist_weekday() {
    // 7.6 × 62.5 + 2 × 93.75 + 0.4 × 125 = 712.50
    let router = create_router_for_test();
    let request = create_request(
        line_item("50", "artist", true),
        calendar_with_shoot("10", &["2026-03-02"]),
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "712.50");
}

#[tokio::test]
async fn test_holiday_pay_accrues_for_permanent() {
    // 570 × 0.08 = 45.60
    let router = create_router_for_test();
    let mut request = create_request(
        line_item("50", "crew", false),
        calendar_with_shoot("10", &["2026-03-02"]),
    );
    request["on_cost_rates"] = json!({ "holiday_pay_rate": "0.08" });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "/result/on_costs/holiday_pay", "45.60");
    assert_decimal(&result, "/result/on_costs/superannuation", "65.55");
}

#[tokio::test]
async fn test_holiday_pay_is_zero_for_casual() {
    let router = create_router_for_test();
    let mut request = create_request(
        line_item("50", "crew", true),
        calendar_with_shoot("10", &["2026-03-02"]),
    );
    request["on_cost_rates"] = json!({ "holiday_pay_rate": "0.08" });

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result, "/result/on_costs/holiday_pay", "0");
}

// =============================================================================
// SECTION 4: Flat Items - 2 tests
// =============================================================================

#[tokio::test]
async fn test_flat_item_with_on_costs() {
    // 2500 × (0.115 + 0.0485 + 0.03) = 483.75
    let router = create_router_for_test();
    let mut item = line_item("2500", "crew", false);
    item["unit"] = json!("flat");
    let request = create_request(item, production_calendar());

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "2500");
    assert_decimal(&result, "/result/total_on_costs", "483.75");
    assert_eq!(result["result"]["days_count"], 0);
    assert_eq!(result["result"]["unit"], "flat");
}

#[tokio::test]
async fn test_flat_item_without_on_costs() {
    let router = create_router_for_test();
    let mut item = line_item("2500", "crew", false);
    item["unit"] = json!("flat");
    item["apply_on_costs"] = json!(false);
    let request = create_request(item, production_calendar());

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_grand_total(&result, "2500");
    assert_decimal(&result, "/result/total_on_costs", "0");
}

// =============================================================================
// SECTION 5: Calendar Cascade - 4 tests
// =============================================================================

#[tokio::test]
async fn test_department_override_applies_to_line_item() {
    // Camera works one 12 hour Monday: 380 + 150 + 2.4 × 100 = 770
    let router = create_router_for_test();
    let mut calendar = production_calendar();
    calendar["departments"] = json!({
        "camera": {
            "shoot": {
                "inherit_from_parent": false,
                "default_hours_per_day": "12",
                "working_dates": ["2026-03-02"]
            }
        }
    });
    let request = create_request(line_item("50", "crew", false), calendar);

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "770");
    assert_eq!(result["result"]["days_count"], 1);
}

#[tokio::test]
async fn test_line_item_override_wins_over_department() {
    let router = create_router_for_test();
    let mut calendar = production_calendar();
    calendar["departments"] = json!({
        "camera": {
            "shoot": { "inherit_from_parent": false, "default_hours_per_day": "12" }
        }
    });
    calendar["line_items"] = json!({
        "li-1": {
            "shoot": { "inherit_from_parent": false, "working_dates": ["2026-03-03"] }
        }
    });
    let request = create_request(line_item("50", "crew", false), calendar);

    let (status, result) = post_calculate(router, request).await;

    // Dates from the line item, hours from the department
    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "770");
    assert_eq!(
        result["result"]["per_phase_breakdown"][1]["days_detail"][0]["date"],
        "2026-03-03"
    );
}

#[tokio::test]
async fn test_inheriting_override_is_ignored() {
    let router = create_router_for_test();
    let mut calendar = production_calendar();
    calendar["departments"] = json!({
        "camera": {
            "shoot": { "inherit_from_parent": true, "default_hours_per_day": "12" }
        }
    });
    let request = create_request(line_item("50", "crew", false), calendar);

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_labor_cost(&result, "1355");
}

#[tokio::test]
async fn test_resolve_endpoint() {
    let router = create_router_for_test();
    let mut calendar = production_calendar();
    calendar["departments"] = json!({
        "grip": {
            "shoot": { "inherit_from_parent": false, "working_dates": ["2026-03-04"] }
        }
    });
    let body = json!({
        "entity": { "kind": "line_item", "id": "li-9", "department_id": "grip" },
        "phase": "shoot",
        "calendar": calendar,
    });

    let (status, result) = post_json(router, "/calendar/resolve", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["working_dates"], json!(["2026-03-04"]));
    assert_decimal(&result, "/default_hours_per_day", "10");
    assert_eq!(result["inherit_from_parent"], false);
}

// =============================================================================
// SECTION 6: Material Items and Single Days - 4 tests
// =============================================================================

#[tokio::test]
async fn test_material_weekly_item() {
    // 900 per 5 day week over 2 shoot days = 360
    let router = create_router_for_test();
    let body = json!({
        "item": {
            "rate": "900",
            "unit": "week",
            "active_phases": { "pre_production": false, "post_production": false }
        },
        "calendar": production_calendar(),
    });

    let (status, result) = post_json(router, "/calculate/material", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["type"], "material");
    assert_decimal(&result, "/phases/0/cost", "360");
    assert_eq!(result["phases"][0]["days"], 2);
}

#[tokio::test]
async fn test_material_flat_item() {
    let router = create_router_for_test();
    let body = json!({
        "item": { "rate": "1200", "unit": "flat" },
        "calendar": production_calendar(),
    });

    let (status, result) = post_json(router, "/calculate/material", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["type"], "material_flat");
    assert_decimal(&result, "/flat_total", "1200");
    assert_eq!(result["phases"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_price_day_public_holiday() {
    let router = create_router_for_test();
    let body = json!({
        "date": "2026-03-02",
        "hours": 8,
        "base_rate": 40.5,
        "employment_category": "artist",
        "public_holidays": ["2026-03-02"]
    });

    let (status, result) = post_json(router, "/price-day", body).await;

    // 8 × 40.5 × 2.5 = 810
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["day_type"], "public_holiday");
    assert_decimal(&result, "/total_pay", "810");
}

#[tokio::test]
async fn test_price_day_negative_hours_rejected() {
    let router = create_router_for_test();
    let body = json!({
        "date": "2026-03-02",
        "hours": -1,
        "base_rate": 50,
        "employment_category": "crew"
    });

    let (status, result) = post_json(router, "/price-day", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 7: Error Cases - 6 tests
// =============================================================================

#[tokio::test]
async fn test_negative_rate_rejected() {
    let router = create_router_for_test();
    let request = create_request(line_item("-50", "crew", false), production_calendar());

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert!(result["message"].as_str().unwrap().contains("base_hourly_rate"));
}

#[tokio::test]
async fn test_out_of_range_rate_rejected() {
    // Decimal::MAX as a string: parses, but ten hours of it does not fit
    let router = create_router_for_test();
    let request = create_request(
        line_item("79228162514264337593543950335", "crew", false),
        production_calendar(),
    );

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert!(result["message"].as_str().unwrap().contains("amount out of range"));
}

#[tokio::test]
async fn test_out_of_range_material_rejected() {
    let router = create_router_for_test();
    let body = json!({
        "item": { "rate": "79228162514264337593543950335", "unit": "day" },
        "calendar": production_calendar(),
    });

    let (status, result) = post_json(router, "/calculate/material", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_negative_override_hours_rejected() {
    let router = create_router_for_test();
    let mut calendar = production_calendar();
    calendar["departments"] = json!({
        "camera": {
            "shoot": { "inherit_from_parent": false, "default_hours_per_day": "-2" }
        }
    });
    let request = create_request(line_item("50", "crew", false), calendar);

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "CALENDAR_RESOLUTION_ERROR");
}

#[tokio::test]
async fn test_unknown_category_rejected() {
    let router = create_router_for_test();
    let request = create_request(line_item("50", "stunt", false), production_calendar());

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"line_item\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// SECTION 8: Response Field Validation - 2 tests
// =============================================================================

#[tokio::test]
async fn test_response_metadata() {
    let router = create_router_for_test();
    let request = create_request(line_item("50", "crew", false), production_calendar());

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(uuid::Uuid::parse_str(result["calculation_id"].as_str().unwrap()).is_ok());
    assert_eq!(result["engine_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(result["cached"], false);
    assert!(result["timestamp"].is_string());
}

#[tokio::test]
async fn test_breakdown_is_tagged_labor() {
    let router = create_router_for_test();
    let request = create_request(line_item("50", "crew", false), production_calendar());

    let (status, result) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["breakdown"]["type"], "labor");
    assert_decimal(&result, "/breakdown/phases/1/cost", "1355");
    assert_decimal(&result, "/breakdown/on_costs/total_on_costs", "262.20");
}
