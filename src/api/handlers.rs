//! HTTP request handlers for the Payroll Engine API.
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
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{amortize, compute_annual_report, compute_period_payroll};
use crate::error::EngineError;
use crate::models::{OvertimeEntry, PayrollPeriod};

use super::request::{AmortizeRequest, AnnualReportRequest, PayrollRequest, RecordOvertimeRequest};
use super::response::{AmortizeResponse, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .route("/payroll/annual", post(annual_report_handler))
        .route("/advances/amortize", post(amortize_handler))
        .route("/overtime/record", post(record_overtime_handler))
        .with_state(state)
}

/// Unwraps a JSON body or builds the 400 response for its rejection.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
    Err(ApiErrorResponse::bad_request(error).into_response())
}

fn ok_json<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_json(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn resolve_as_of(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Utc::now().date_naive())
}

/// Handler for POST /payroll.
///
/// Computes the payroll of every employee in the request snapshot for one
/// period.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let options = request.options();
    let result = PayrollPeriod::new(request.year, request.month).and_then(|period| {
        let settings = state.settings_for(request.settings)?;
        compute_period_payroll(
            &request.snapshot,
            &period,
            &settings,
            resolve_as_of(request.as_of),
            &options,
        )
    });

    match result {
        Ok(payroll) => {
            info!(
                correlation_id = %correlation_id,
                period = %payroll.period,
                employees = payroll.totals.employee_count,
                net_pay = %payroll.totals.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll completed successfully"
            );
            ok_json(payroll)
        }
        Err(err) => error_json(err, correlation_id),
    }
}

/// Handler for POST /payroll/annual.
async fn annual_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnnualReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing annual report request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let options = request.options();
    let result = state.settings_for(request.settings).and_then(|settings| {
        compute_annual_report(
            &request.snapshot,
            &request.employee_id,
            request.year,
            &settings,
            resolve_as_of(request.as_of),
            &options,
        )
    });

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %report.employee_id,
                months = report.months.len(),
                "Annual report completed successfully"
            );
            ok_json(report)
        }
        Err(err) => error_json(err, correlation_id),
    }
}

/// Handler for POST /advances/amortize.
///
/// Returns the new balances; nothing is persisted.
async fn amortize_handler(payload: Result<Json<AmortizeRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = amortize(&request.advances, request.periods_elapsed);
    info!(
        correlation_id = %correlation_id,
        advances = request.advances.len(),
        total_cut = %result.total_cut,
        "Amortization completed"
    );
    ok_json(AmortizeResponse::from(result))
}

/// Handler for POST /overtime/record.
///
/// Prices a new overtime entry at the current settings.
async fn record_overtime_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordOvertimeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = request.employee.validate().and_then(|()| {
        let settings = state.settings_for(request.settings)?;
        OvertimeEntry::record(
            request.id,
            &request.employee,
            request.date,
            request.hours,
            &settings,
            request.description,
        )
    });

    match result {
        Ok(entry) => {
            info!(
                correlation_id = %correlation_id,
                entry_id = %entry.id,
                total = %entry.total,
                "Overtime recorded"
            );
            ok_json(entry)
        }
        Err(err) => error_json(err, correlation_id),
    }
}
