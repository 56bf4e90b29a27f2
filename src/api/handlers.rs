//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_statement, calculate_shift_pay, current_period, period_for, period_label_for,
};
use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculatedShift, ClosingDay, PayrollPeriod, PayrollStatement, Shift};

use super::request::{CalculateShiftRequest, PeriodSelector, ResolvePeriodRequest, StatementRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts/calculate", post(calculate_shift_handler))
        .route("/periods/resolve", post(resolve_period_handler))
        .route("/statements", post(statement_handler))
        .with_state(state)
}

/// Handler for POST /shifts/calculate.
///
/// Prices a single shift at the given rate.
async fn calculate_shift_handler(
    payload: Result<Json<CalculateShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match calculate_shift(request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.shift.employee_id,
                total_minutes = result.total_minutes,
                night_minutes = %result.night_minutes,
                salary = %result.salary,
                duration_us = start_time.elapsed().as_micros(),
                "Shift calculation completed successfully"
            );
            json_ok(result)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /periods/resolve.
///
/// Returns the period for a date, for a billing label, or the current one.
async fn resolve_period_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResolvePeriodRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing period resolution request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = request.selector().and_then(|selector| {
        let closing = request.closing_day()?;
        resolve_period(state.settings(), selector, closing)
    });

    match result {
        Ok(period) => {
            info!(
                correlation_id = %correlation_id,
                label = %period.label(),
                start = %period.start,
                end = %period.end,
                "Period resolved"
            );
            json_ok(period)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /statements.
///
/// Builds an employee's statement for one period.
async fn statement_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing statement request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_statement(state.settings(), request) {
        Ok(statement) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %statement.employee_id,
                period = %statement.period.label(),
                shifts_count = statement.shifts.len(),
                total_pay = %statement.totals.total_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Statement completed successfully"
            );
            json_ok(statement)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn calculate_shift(request: CalculateShiftRequest) -> EngineResult<CalculatedShift> {
    let shift = Shift::try_from(request.shift)?;
    calculate_shift_pay(&shift, &request.rate)
}

fn perform_statement(
    settings: &PayrollSettings,
    request: StatementRequest,
) -> EngineResult<PayrollStatement> {
    let selector = request.selector()?;
    let closing = request.closing_day()?;
    let period = resolve_period(settings, selector, closing)?;

    let shifts = request
        .shifts
        .into_iter()
        .map(Shift::try_from)
        .collect::<EngineResult<Vec<Shift>>>()?;

    build_statement(&request.employee_id, &request.wage_history, &shifts, &period)
}

/// Resolves a period under the override closing day, or the configured one.
fn resolve_period(
    settings: &PayrollSettings,
    selector: PeriodSelector,
    closing_override: Option<ClosingDay>,
) -> EngineResult<PayrollPeriod> {
    let closing = closing_override.unwrap_or(settings.closing_date);

    match selector {
        PeriodSelector::Date(date) => {
            let label = period_label_for(date, closing);
            period_for(label.year, label.month, closing)
        }
        PeriodSelector::Label { year, month } => period_for(year, month, closing),
        PeriodSelector::Current => current_period(closing, settings.now_local()),
    }
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem.
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

    ApiErrorResponse::bad_request(error).into_response()
}
