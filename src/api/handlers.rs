//! HTTP request handlers for the salary engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    EarningsSnapshot, PayrollInput, assess_income_tax, leave_balances, run_payroll,
};
use crate::error::EngineError;
use crate::models::{EwaWithdrawal, SalaryComponent};

use super::request::{
    ActionRequest, EarningsRequest, EwaBalanceRequest, LeaveBalanceRequest, PayrollRequest,
    ResolveRequest, TaxEstimateRequest, WithdrawalAction, WithdrawalRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/components", get(list_components_handler))
        .route("/salary/resolve", post(resolve_handler))
        .route("/payroll/run", post(payroll_handler))
        .route("/tax/estimate", post(tax_estimate_handler))
        .route("/leave/balances", post(leave_balances_handler))
        .route("/ewa/balance", post(ewa_balance_handler))
        .route("/ewa/withdrawals", post(request_withdrawal_handler))
        .route("/ewa/withdrawals/:id/action", post(withdrawal_action_handler))
        .route(
            "/ewa/employees/:employee_id/withdrawals",
            get(withdrawal_history_handler),
        )
        .with_state(state)
}

/// Handler for GET /components.
async fn list_components_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.config().catalog().components().to_vec())
}

/// Handler for POST /salary/resolve.
///
/// Resolves catalog codes and inline components against the basic salary.
async fn resolve_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary resolve request");

    let Json(request) = payload.map_err(|rejection| json_error(correlation_id, rejection))?;

    let mut selected: Vec<SalaryComponent> = state
        .config()
        .catalog()
        .select(&request.codes)
        .map_err(|err| engine_error(correlation_id, err))?;
    selected.extend(request.components);

    let start_time = Instant::now();
    let breakdown = state
        .resolver()
        .resolve(request.basic_salary, &selected)
        .map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        components = selected.len(),
        gross = %breakdown.gross,
        net = %breakdown.net,
        ctc = %breakdown.ctc,
        warnings = breakdown.audit_trace.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Salary resolved"
    );
    Ok(Json(breakdown))
}

/// Handler for POST /payroll/run.
///
/// Resolves the salary structure, then pro-rates it over the month's
/// attendance and applies statutory deductions.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run request");

    let Json(request) = payload.map_err(|rejection| json_error(correlation_id, rejection))?;

    let mut selected: Vec<SalaryComponent> = state
        .config()
        .catalog()
        .select(&request.codes)
        .map_err(|err| engine_error(correlation_id, err))?;
    selected.extend(request.components);

    let start_time = Instant::now();
    let structure = state
        .resolver()
        .resolve(request.basic_salary, &selected)
        .map_err(|err| engine_error(correlation_id, err))?;

    let input = PayrollInput {
        employee_id: &request.employee_id,
        structure: &structure,
        attendance: &request.attendance,
        year: request.year,
        month: request.month,
        flags: request.statutory,
        tax: request.tax,
    };
    let payslip = run_payroll(&input, state.config().policy())
        .map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        year = request.year,
        month = request.month,
        paid_days = %payslip.paid_days,
        gross = %payslip.gross_earnings,
        net = %payslip.net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll run complete"
    );
    Ok(Json(payslip))
}

/// Handler for POST /tax/estimate.
async fn tax_estimate_handler(
    payload: Result<Json<TaxEstimateRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| json_error(correlation_id, rejection))?;

    let assessment = assess_income_tax(request.annual_income, &request.profile)
        .map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        regime = request.profile.regime.as_str(),
        total = %assessment.total,
        "Tax estimated"
    );
    Ok(Json(assessment))
}

/// Handler for POST /leave/balances.
async fn leave_balances_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveBalanceRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| json_error(correlation_id, rejection))?;

    let balances = match &request.leave_types {
        Some(types) => leave_balances(&request.employee_id, types, &request.applications),
        None => leave_balances(
            &request.employee_id,
            state.config().leave_types(),
            &request.applications,
        ),
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        applications = request.applications.len(),
        "Leave balances computed"
    );
    Ok(Json(balances))
}

/// Handler for POST /ewa/balance.
async fn ewa_balance_handler(
    State(state): State<AppState>,
    payload: Result<Json<EwaBalanceRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| json_error(correlation_id, rejection))?;

    let monthly_gross = monthly_gross(&state, &request.earnings)
        .map_err(|err| engine_error(correlation_id, err))?;
    let snapshot = EarningsSnapshot {
        monthly_gross,
        attendance: &request.earnings.attendance,
        as_of: request.earnings.as_of,
    };

    let balance = state
        .ledger()
        .read()
        .await
        .balance(&request.employee_id, &snapshot, &state.config().policy().ewa)
        .map_err(|err| engine_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        earned = %balance.earned,
        available = %balance.available,
        "EWA balance computed"
    );
    Ok(Json(balance))
}

/// Handler for POST /ewa/withdrawals.
async fn request_withdrawal_handler(
    State(state): State<AppState>,
    payload: Result<Json<WithdrawalRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| json_error(correlation_id, rejection))?;

    let monthly_gross = monthly_gross(&state, &request.earnings)
        .map_err(|err| engine_error(correlation_id, err))?;
    let snapshot = EarningsSnapshot {
        monthly_gross,
        attendance: &request.earnings.attendance,
        as_of: request.earnings.as_of,
    };

    let mut ledger = state.ledger().write().await;
    let withdrawal: EwaWithdrawal = ledger
        .request_withdrawal(
            &request.employee_id,
            &request.company_id,
            request.amount,
            request.notes,
            &snapshot,
            &state.config().policy().ewa,
        )
        .map_err(|err| engine_error(correlation_id, err))?
        .clone();

    Ok(Json(withdrawal))
}

/// Handler for POST /ewa/withdrawals/:id/action.
async fn withdrawal_action_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let id = Uuid::parse_str(&id).map_err(|err| {
        warn!(correlation_id = %correlation_id, id = %id, "Invalid withdrawal id");
        ApiErrorResponse::bad_request(ApiError::invalid_path(format!(
            "Invalid withdrawal id '{}': {}",
            id, err
        )))
    })?;
    let Json(request) = payload.map_err(|rejection| json_error(correlation_id, rejection))?;

    let mut ledger = state.ledger().write().await;
    let result = match request.action {
        WithdrawalAction::Approve => ledger.approve(id),
        WithdrawalAction::Reject => ledger.reject(id),
        WithdrawalAction::Disburse => ledger.disburse(id),
        WithdrawalAction::Settle => ledger.settle(id),
    };
    let withdrawal = result
        .map_err(|err| engine_error(correlation_id, err))?
        .clone();

    Ok(Json(withdrawal))
}

/// Handler for GET /ewa/employees/:employee_id/withdrawals.
async fn withdrawal_history_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> impl IntoResponse {
    let ledger = state.ledger().read().await;
    let history: Vec<EwaWithdrawal> = ledger.history(&employee_id).into_iter().cloned().collect();
    Json(history)
}

/// Resolves the monthly gross an EWA request earns against.
fn monthly_gross(state: &AppState, earnings: &EarningsRequest) -> Result<Decimal, EngineError> {
    let breakdown = state.resolver().resolve_codes(
        earnings.basic_salary,
        state.config().catalog(),
        &earnings.codes,
    )?;
    Ok(breakdown.gross)
}

fn engine_error(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    err.into()
}

fn json_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
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
    ApiErrorResponse::bad_request(error)
}
