//! Integration tests for the salary engine HTTP API.
//!
//! This test suite covers:
//! - Salary resolution from catalog codes and inline components
//! - Percentage chains, GROSS-based deductions and cycles
//! - Leave balances
//! - Earned wage access balances and the withdrawal lifecycle
//! - Error cases
//! - Payroll runs and income tax estimates

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::ops::RangeInclusive;
use std::str::FromStr;
use tower::ServiceExt;

use salary_engine::api::{AppState, create_router};
use salary_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/standard").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, "POST", uri, Some(body)).await
}

fn assert_amount(value: &Value, expected: &str) {
    let actual = value.as_str().unwrap_or_else(|| panic!("Expected decimal string, got {}", value));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

fn component_amount<'a>(result: &'a Value, code: &str) -> &'a Value {
    result["components"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["code"] == code)
        .map(|c| &c["amount"])
        .unwrap_or_else(|| panic!("Component {} not in breakdown", code))
}

fn present_days(employee_id: &str, month: &str, days: u32) -> Vec<Value> {
    (1..=days)
        .map(|day| {
            json!({
                "employee_id": employee_id,
                "date": format!("{}-{:02}", month, day),
                "status": "present"
            })
        })
        .collect()
}

fn ewa_request(employee_id: &str, basic: &str, attendance: Vec<Value>, as_of: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "basic_salary": basic,
        "codes": [],
        "attendance": attendance,
        "as_of": as_of
    })
}

fn withdrawal_request(employee_id: &str, amount: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "company_id": "acme",
        "amount": amount,
        "basic_salary": "30000",
        "codes": [],
        "attendance": present_days(employee_id, "2026-04", 10),
        "as_of": "2026-04-10"
    })
}

// =============================================================================
// SECTION 1: Salary Resolution
// =============================================================================

#[tokio::test]
async fn test_resolve_hra_and_flat_pf() {
    let body = json!({
        "basic_salary": "30000",
        "components": [
            {
                "id": "2", "name": "HRA", "code": "HRA", "type": "earning",
                "calculation_type": "percentage", "value": "40", "base_component": "BASIC"
            },
            {
                "id": "7", "name": "Provident Fund", "code": "PF_EMPLOYEE", "type": "deduction",
                "calculation_type": "flat", "value": "1800"
            }
        ]
    });

    let (status, result) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(component_amount(&result, "HRA"), "12000");
    assert_amount(&result["gross"], "42000");
    assert_amount(&result["total_deductions"], "1800");
    assert_amount(&result["net"], "40200");
    assert_amount(&result["ctc"], "42000");
    assert_amount(&result["annual_ctc"], "504000");
}

#[tokio::test]
async fn test_resolve_empty_selection() {
    let body = json!({ "basic_salary": "25000" });

    let (status, result) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(&result["gross"], "25000");
    assert_amount(&result["net"], "25000");
    assert_amount(&result["ctc"], "25000");
    assert_amount(&result["annual_ctc"], "300000");
    assert!(result["components"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_resolve_catalog_codes() {
    let body = json!({ "basic_salary": "30000", "codes": ["HRA", "PF_EMPLOYEE"] });

    let (status, result) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(component_amount(&result, "PF_EMPLOYEE"), "3600");
    assert_amount(&result["gross"], "42000");
    assert_amount(&result["net"], "38400");
}

#[tokio::test]
async fn test_resolve_full_standard_catalog() {
    let body = json!({
        "basic_salary": "15000",
        "codes": [
            "BASIC", "HRA", "DA", "CONVEYANCE", "MEDICAL", "SPECIAL",
            "PF_EMPLOYEE", "ESI_EMPLOYEE", "PT", "TDS"
        ]
    });

    let (status, result) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::OK);

    // BASIC is the anchor and is not counted twice
    assert_amount(component_amount(&result, "BASIC"), "15000");
    assert_amount(component_amount(&result, "HRA"), "6000");
    assert_amount(component_amount(&result, "DA"), "3000");
    assert_amount(&result["gross"], "26850");

    // ESI: 0.75% of 26850
    assert_amount(component_amount(&result, "ESI_EMPLOYEE"), "201.375");
    assert_amount(&result["total_deductions"], "2201.375");
    assert_amount(&result["net"], "24648.625");
}

#[tokio::test]
async fn test_resolve_multi_level_chain() {
    let body = json!({
        "basic_salary": "20000",
        "components": [
            {
                "id": "b", "name": "Bonus", "code": "BONUS", "type": "earning",
                "calculation_type": "percentage", "value": "50", "base_component": "HRA"
            },
            {
                "id": "h", "name": "HRA", "code": "HRA", "type": "earning",
                "calculation_type": "percentage", "value": "40", "base_component": "BASIC"
            }
        ]
    });

    let (status, result) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(component_amount(&result, "HRA"), "8000");
    assert_amount(component_amount(&result, "BONUS"), "4000");
    assert_amount(&result["gross"], "32000");

    // Components keep selection order in the output
    assert_eq!(result["components"][0]["code"], "BONUS");
}

#[tokio::test]
async fn test_resolve_missing_base_warns_instead_of_failing() {
    let body = json!({
        "basic_salary": "20000",
        "components": [{
            "id": "x", "name": "Travel", "code": "TRAVEL", "type": "earning",
            "calculation_type": "percentage", "value": "10", "base_component": "LTA"
        }]
    });

    let (status, result) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(component_amount(&result, "TRAVEL"), "0");
    assert_amount(&result["gross"], "20000");

    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "UNRESOLVED_BASE"));
}

#[tokio::test]
async fn test_resolve_records_audit_trace() {
    let body = json!({ "basic_salary": "30000", "codes": ["HRA"] });

    let (_, result) = post(create_router_for_test(), "/salary/resolve", body).await;
    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    assert!(steps.iter().any(|s| s["rule_id"] == "percentage_of_basic"));
    assert_eq!(steps.last().unwrap()["rule_id"], "salary_totals");
}

#[tokio::test]
async fn test_resolve_ten_thousand_link_chain() {
    let depth = 10_000;
    let components: Vec<Value> = (0..depth)
        .rev()
        .map(|i| {
            let base = if i == 0 {
                "BASIC".to_string()
            } else {
                format!("C{}", i - 1)
            };
            json!({
                "id": format!("c{}", i), "name": format!("Chain {}", i), "code": format!("C{}", i),
                "type": "earning", "calculation_type": "percentage", "value": "100",
                "base_component": base
            })
        })
        .collect();
    let body = json!({ "basic_salary": "1", "components": components });

    let (status, result) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(component_amount(&result, "C9999"), "1");
    assert_amount(&result["gross"], "10001");
}

#[tokio::test]
async fn test_list_components() {
    let (status, result) = send(create_router_for_test(), "GET", "/components", None).await;
    assert_eq!(status, StatusCode::OK);

    let components = result.as_array().unwrap();
    assert_eq!(components.len(), 10);
    assert_eq!(components[0]["code"], "BASIC");
    assert_eq!(components[7]["base_component"], "GROSS");
}

// =============================================================================
// SECTION 2: Leave Balances
// =============================================================================

#[tokio::test]
async fn test_leave_balances_with_configured_types() {
    let body = json!({
        "employee_id": "emp_001",
        "applications": [
            {
                "id": 1, "employee_id": "emp_001", "leave_type_id": 1,
                "start_date": "2026-02-09", "end_date": "2026-02-11", "total_days": 3,
                "reason": "Travel", "status": "Approved"
            },
            {
                "id": 2, "employee_id": "emp_001", "leave_type_id": 2,
                "start_date": "2026-03-02", "end_date": "2026-03-03", "total_days": 2,
                "reason": "Fever", "status": "Pending"
            },
            {
                "id": 3, "employee_id": "emp_002", "leave_type_id": 1,
                "start_date": "2026-03-02", "end_date": "2026-03-03", "total_days": 2,
                "reason": "Family", "status": "Approved"
            }
        ]
    });

    let (status, result) = post(create_router_for_test(), "/leave/balances", body).await;
    assert_eq!(status, StatusCode::OK);

    let balances = result.as_array().unwrap();
    assert_eq!(balances.len(), 3);
    assert_eq!(balances[0]["leave_type_name"], "Casual Leave");
    assert_eq!(balances[0]["used"], 3);
    assert_eq!(balances[0]["available"], 9);
    assert_eq!(balances[1]["used"], 0);
    assert_eq!(balances[1]["available"], 10);
    assert_eq!(balances[2]["available"], 15);
}

#[tokio::test]
async fn test_leave_balances_with_custom_types_never_negative() {
    let body = json!({
        "employee_id": "emp_001",
        "leave_types": [{ "id": 9, "name": "Comp Off", "code": "CO", "annual_limit": 2 }],
        "applications": [{
            "id": 1, "employee_id": "emp_001", "leave_type_id": 9,
            "start_date": "2026-02-09", "end_date": "2026-02-13", "total_days": 5,
            "status": "Approved"
        }]
    });

    let (status, result) = post(create_router_for_test(), "/leave/balances", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result[0]["used"], 5);
    assert_eq!(result[0]["available"], 0);
}

// =============================================================================
// SECTION 3: Earned Wage Access
// =============================================================================

#[tokio::test]
async fn test_ewa_balance_half_of_earned() {
    let attendance = present_days("emp_001", "2026-04", 10);
    let body = ewa_request("emp_001", "30000", attendance, "2026-04-10");

    let (status, result) = post(create_router_for_test(), "/ewa/balance", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(&result["paid_days"], "10");
    assert_amount(&result["daily_rate"], "1000");
    assert_amount(&result["earned"], "10000");
    assert_amount(&result["withdrawn"], "0");
    assert_amount(&result["available"], "5000");
}

#[tokio::test]
async fn test_ewa_balance_uses_resolved_gross() {
    let mut body =
        ewa_request("emp_001", "30000", present_days("emp_001", "2026-04", 10), "2026-04-10");
    body["codes"] = json!(["HRA"]);

    let (status, result) = post(create_router_for_test(), "/ewa/balance", body).await;
    assert_eq!(status, StatusCode::OK);
    // 42000 / 30 days
    assert_amount(&result["daily_rate"], "1400");
    assert_amount(&result["available"], "7000");
}

#[tokio::test]
async fn test_ewa_withdrawal_lifecycle() {
    let router = create_router_for_test();

    let (status, withdrawal) =
        post(router.clone(), "/ewa/withdrawals", withdrawal_request("emp_001", "2000")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(withdrawal["status"], "pending");
    assert_eq!(withdrawal["month"], 4);
    assert_eq!(withdrawal["year"], 2026);
    let id = withdrawal["id"].as_str().unwrap().to_string();

    let balance_body =
        ewa_request("emp_001", "30000", present_days("emp_001", "2026-04", 10), "2026-04-10");
    let (_, balance) = post(router.clone(), "/ewa/balance", balance_body).await;
    assert_amount(&balance["withdrawn"], "2000");
    assert_amount(&balance["available"], "3000");

    let action_uri = format!("/ewa/withdrawals/{}/action", id);
    for (action, expected) in [
        ("approve", "approved"),
        ("disburse", "disbursed"),
        ("settle", "settled"),
    ] {
        let (status, result) = post(router.clone(), &action_uri, json!({ "action": action })).await;
        assert_eq!(status, StatusCode::OK, "action {} failed: {}", action, result);
        assert_eq!(result["status"], expected);
    }

    let (status, error) = post(router.clone(), &action_uri, json!({ "action": "approve" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "INVALID_TRANSITION");

    let (status, history) =
        send(router, "GET", "/ewa/employees/emp_001/withdrawals", None).await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["status"], "settled");
    assert!(history[0]["processed_at"].is_string());
}

#[tokio::test]
async fn test_ewa_rejected_withdrawal_releases_balance() {
    let router = create_router_for_test();

    let (_, withdrawal) =
        post(router.clone(), "/ewa/withdrawals", withdrawal_request("emp_001", "5000")).await;
    let id = withdrawal["id"].as_str().unwrap().to_string();

    let (status, _) =
        post(router.clone(), "/ewa/withdrawals", withdrawal_request("emp_001", "1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        router.clone(),
        &format!("/ewa/withdrawals/{}/action", id),
        json!({ "action": "reject" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(router, "/ewa/withdrawals", withdrawal_request("emp_001", "1")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_ewa_history_is_per_employee_newest_first() {
    let router = create_router_for_test();

    let uri = "/ewa/withdrawals";
    let (_, first) = post(router.clone(), uri, withdrawal_request("emp_001", "100")).await;
    let (_, second) = post(router.clone(), uri, withdrawal_request("emp_001", "200")).await;
    post(router.clone(), uri, withdrawal_request("emp_002", "300")).await;

    let (_, history) = send(router, "GET", "/ewa/employees/emp_001/withdrawals", None).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["id"], second["id"]);
    assert_eq!(history[1]["id"], first["id"]);
}

// =============================================================================
// SECTION 4: Error Cases
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/salary/resolve")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_negative_basic_salary() {
    let (status, error) =
        post(create_router_for_test(), "/salary/resolve", json!({ "basic_salary": "-1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_error_basic_salary_too_large() {
    // Annual CTC would leave the decimal range
    let body = json!({ "basic_salary": "10000000000000000000000000000" });
    let (status, error) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_AMOUNT");
    assert!(error["message"].as_str().unwrap().contains("basic_salary"));
}

#[tokio::test]
async fn test_error_unknown_component_code() {
    let body = json!({ "basic_salary": "30000", "codes": ["LTA"] });

    let (status, error) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "COMPONENT_NOT_FOUND");
    assert!(error["message"].as_str().unwrap().contains("LTA"));
}

#[tokio::test]
async fn test_error_circular_reference() {
    let body = json!({
        "basic_salary": "30000",
        "components": [
            {
                "id": "a", "name": "A", "code": "A", "type": "earning",
                "calculation_type": "percentage", "value": "10", "base_component": "B"
            },
            {
                "id": "b", "name": "B", "code": "B", "type": "earning",
                "calculation_type": "percentage", "value": "10", "base_component": "A"
            }
        ]
    });

    let (status, error) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "CIRCULAR_REFERENCE");
    assert!(error["message"].as_str().unwrap().contains("A -> B -> A"));
}

#[tokio::test]
async fn test_error_earning_based_on_gross() {
    let body = json!({
        "basic_salary": "30000",
        "components": [{
            "id": "x", "name": "Bonus", "code": "BONUS", "type": "earning",
            "calculation_type": "percentage", "value": "10", "base_component": "GROSS"
        }]
    });

    let (status, error) = post(create_router_for_test(), "/salary/resolve", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "CIRCULAR_REFERENCE");
}

#[tokio::test]
async fn test_error_withdrawal_exceeds_balance() {
    let (status, error) = post(
        create_router_for_test(),
        "/ewa/withdrawals",
        withdrawal_request("emp_001", "5000.01"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INSUFFICIENT_BALANCE");
}

#[tokio::test]
async fn test_error_zero_withdrawal() {
    let body = withdrawal_request("emp_001", "0");
    let (status, error) = post(create_router_for_test(), "/ewa/withdrawals", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_error_unknown_withdrawal() {
    let uri = "/ewa/withdrawals/6f1c1f8e-4d3a-4b8e-9c0a-2a7d5e9b1c42/action";
    let (status, error) = post(create_router_for_test(), uri, json!({ "action": "approve" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "WITHDRAWAL_NOT_FOUND");
}

#[tokio::test]
async fn test_error_unknown_action() {
    let uri = "/ewa/withdrawals/6f1c1f8e-4d3a-4b8e-9c0a-2a7d5e9b1c42/action";
    let (status, error) = post(create_router_for_test(), uri, json!({ "action": "cancel" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

// =============================================================================
// SECTION 5: Payroll and Income Tax
// =============================================================================

fn attendance_days(employee_id: &str, days: RangeInclusive<u32>, status: &str) -> Vec<Value> {
    days.map(|day| {
        json!({
            "employee_id": employee_id,
            "date": format!("2026-04-{:02}", day),
            "status": status
        })
    })
    .collect()
}

fn line_amount<'a>(payslip: &'a Value, section: &str, code: &str) -> Option<&'a Value> {
    payslip[section]
        .as_array()
        .unwrap()
        .iter()
        .find(|line| line["code"] == code)
        .map(|line| &line["amount"])
}

#[tokio::test]
async fn test_payroll_partial_month() {
    let mut attendance = attendance_days("emp_001", 1..=20, "present");
    attendance.extend(attendance_days("emp_001", 21..=22, "half-day"));
    attendance.extend(attendance_days("emp_001", 23..=24, "leave"));
    let body = json!({
        "employee_id": "emp_001",
        "basic_salary": "30000",
        "codes": ["HRA", "CONVEYANCE", "PF_EMPLOYEE", "PT"],
        "attendance": attendance,
        "year": 2026,
        "month": 4
    });

    let (status, payslip) = post(create_router_for_test(), "/payroll/run", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(&payslip["paid_days"], "23");
    assert_amount(&payslip["absent_days"], "7");
    assert_amount(line_amount(&payslip, "earnings", "BASIC").unwrap(), "23000");
    assert_amount(line_amount(&payslip, "earnings", "HRA").unwrap(), "9200");
    assert_amount(line_amount(&payslip, "earnings", "CONVEYANCE").unwrap(), "1226.67");
    assert_amount(&payslip["gross_earnings"], "33426.67");
    assert_amount(line_amount(&payslip, "deductions", "PF_EMPLOYEE").unwrap(), "2760");
    assert_amount(line_amount(&payslip, "deductions", "PT").unwrap(), "250");
    assert!(line_amount(&payslip, "deductions", "ESI_EMPLOYEE").is_none());
    assert_amount(&payslip["total_deductions"], "3010");
    assert_amount(&payslip["net_pay"], "30416.67");
    assert_eq!(payslip["employer_contributions"][0]["code"], "PF_EMPLOYER");
    assert_amount(&payslip["employer_contributions"][0]["amount"], "2760");
}

#[tokio::test]
async fn test_payroll_flags_disable_esi_and_employer_share() {
    let body = json!({
        "employee_id": "emp_001",
        "basic_salary": "10000",
        "attendance": attendance_days("emp_001", 1..=30, "present"),
        "year": 2026,
        "month": 4,
        "statutory": { "esi_enabled": false, "employer_esi_enabled": false }
    });

    let (status, payslip) = post(create_router_for_test(), "/payroll/run", body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(line_amount(&payslip, "deductions", "ESI_EMPLOYEE").is_none());
    assert_amount(line_amount(&payslip, "deductions", "PF_EMPLOYEE").unwrap(), "1200");
    assert_amount(line_amount(&payslip, "deductions", "PT").unwrap(), "100");
    assert_amount(&payslip["net_pay"], "8700");
    assert_eq!(payslip["employer_contributions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_payroll_withholds_tds() {
    let body = json!({
        "employee_id": "emp_001",
        "basic_salary": "100000",
        "attendance": attendance_days("emp_001", 1..=30, "present"),
        "year": 2026,
        "month": 4
    });

    let (status, payslip) = post(create_router_for_test(), "/payroll/run", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(line_amount(&payslip, "deductions", "TDS").unwrap(), "5958.33");
}

#[tokio::test]
async fn test_payroll_invalid_month() {
    let body = json!({
        "employee_id": "emp_001",
        "basic_salary": "30000",
        "year": 2026,
        "month": 13
    });

    let (status, error) = post(create_router_for_test(), "/payroll/run", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_tax_estimate_regimes() {
    let router = create_router_for_test();

    let new = json!({ "annual_income": "1200000" });
    let (status, estimate) = post(router.clone(), "/tax/estimate", new).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(estimate["regime"], "new");
    assert_amount(&estimate["taxable_income"], "1125000");
    assert_amount(&estimate["total"], "71500");
    assert_amount(&estimate["monthly"], "5958.33");

    let senior = json!({ "annual_income": "650000", "regime": "old", "age": 60 });
    let (status, estimate) = post(router, "/tax/estimate", senior).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(&estimate["taxable_income"], "600000");
    assert_amount(&estimate["total"], "31200");
}

#[tokio::test]
async fn test_tax_estimate_negative_income() {
    let body = json!({ "annual_income": "-1" });
    let (status, error) = post(create_router_for_test(), "/tax/estimate", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_AMOUNT");
}
