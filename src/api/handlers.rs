//! HTTP request handlers for the payslip engine API.
//!
//! Handlers decode the request, call the matching [`PayrollEngine`] operation
//! with the request principal and translate the outcome into JSON.
//!
//! [`PayrollEngine`]: crate::service::PayrollEngine

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::service::{OvertimeSubmission, ReimbursementSubmission};

use super::auth::AuthenticatedUser;
use super::request::{AttendanceRequest, PeriodRequest, RunPayrollRequest};
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/attendance-periods", post(create_period_handler))
        .route("/admin/attendance-periods/:id", put(update_period_handler))
        .route("/admin/payrolls", post(run_payroll_handler))
        .route("/admin/payrolls/:id/summary", get(payroll_summary_handler))
        .route("/employee/attendance", post(attendance_handler))
        .route("/employee/overtime", post(overtime_handler))
        .route("/employee/reimbursements", post(reimbursement_handler))
        .route("/employee/payslips/:payroll_id", get(payslip_handler))
        .with_state(state)
}

/// Handler for POST /admin/attendance-periods.
async fn create_period_handler(
    AuthenticatedUser(principal): AuthenticatedUser,
    State(state): State<AppState>,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = principal.user_id, "Creating attendance period");

    let request = match decode(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let result =
        state
            .engine()
            .create_attendance_period(&principal, request.start_date, request.end_date);
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for PUT /admin/attendance-periods/:id.
async fn update_period_handler(
    AuthenticatedUser(principal): AuthenticatedUser,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = principal.user_id, "Updating attendance period");

    let period_id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return reject(correlation_id, rejection.into()),
    };
    let request = match decode(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let result = state.engine().update_attendance_period(
        &principal,
        period_id,
        request.start_date,
        request.end_date,
    );
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /admin/payrolls.
///
/// Runs payroll for the requested period and returns the run result with
/// its audit trace. The run holds the store lock for every employee, so it
/// executes on the blocking pool.
async fn run_payroll_handler(
    AuthenticatedUser(principal): AuthenticatedUser,
    State(state): State<AppState>,
    payload: Result<Json<RunPayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = principal.user_id, "Processing payroll run request");

    let request = match decode(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let engine = state.engine_handle();
    let attendance_period_id = request.attendance_period_id;
    let result = tokio::task::spawn_blocking(move || {
        engine.run_payroll(&principal, attendance_period_id)
    })
    .await
    .unwrap_or_else(|join_error| {
        error!(correlation_id = %correlation_id, error = %join_error, "Payroll run task failed");
        Err(EngineError::internal("payroll run task failed"))
    });
    if let Ok(run) = &result {
        info!(
            correlation_id = %correlation_id,
            payroll_id = run.payroll.id,
            employees_count = run.payroll.employees_count,
            total_payroll = run.payroll.total_payroll,
            duration_us = start_time.elapsed().as_micros(),
            "Payroll run completed successfully"
        );
    }
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /admin/payrolls/:id/summary.
async fn payroll_summary_handler(
    AuthenticatedUser(principal): AuthenticatedUser,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let payroll_id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return reject(correlation_id, rejection.into()),
    };
    info!(correlation_id = %correlation_id, payroll_id, "Loading payroll summary");

    let result = state.engine().get_payroll_summary(&principal, payroll_id);
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /employee/attendance.
async fn attendance_handler(
    AuthenticatedUser(principal): AuthenticatedUser,
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match decode(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, user_id = principal.user_id, kind = ?request.kind, "Submitting attendance");

    let result = state.engine().submit_attendance(&principal, request.kind);
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /employee/overtime.
async fn overtime_handler(
    AuthenticatedUser(principal): AuthenticatedUser,
    State(state): State<AppState>,
    payload: Result<Json<OvertimeSubmission>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = principal.user_id, "Submitting overtime");

    let submission = match decode(correlation_id, payload) {
        Ok(submission) => submission,
        Err(response) => return response,
    };
    let result = state.engine().submit_overtime(&principal, submission);
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /employee/reimbursements.
async fn reimbursement_handler(
    AuthenticatedUser(principal): AuthenticatedUser,
    State(state): State<AppState>,
    payload: Result<Json<ReimbursementSubmission>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = principal.user_id, "Submitting reimbursement");

    let submission = match decode(correlation_id, payload) {
        Ok(submission) => submission,
        Err(response) => return response,
    };
    let result = state.engine().submit_reimbursement(&principal, submission);
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /employee/payslips/:payroll_id.
async fn payslip_handler(
    AuthenticatedUser(principal): AuthenticatedUser,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let payroll_id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return reject(correlation_id, rejection.into()),
    };
    info!(correlation_id = %correlation_id, user_id = principal.user_id, payroll_id, "Loading payslip");

    let result = state.engine().get_payslip(&principal, payroll_id);
    respond(correlation_id, StatusCode::OK, result)
}

fn decode<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Request body rejected");
            Err(reject(correlation_id, rejection.into()))
        }
    }
}

fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                kind = ?err.kind(),
                error = %err,
                "Request failed"
            );
            reject(correlation_id, err.into())
        }
    }
}

fn reject(correlation_id: Uuid, error: ApiErrorResponse) -> Response {
    if error.status.is_server_error() {
        tracing::error!(correlation_id = %correlation_id, code = %error.error.code, "Server error");
    }
    (
        error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error.error),
    )
        .into_response()
}
