//! Request types for the salary engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AttendanceRecord, LeaveApplication, LeaveType, SalaryComponent, StatutoryFlags, TaxProfile,
};

/// Request body for `POST /salary/resolve`.
///
/// `components` carries full component definitions; `codes` selects from the
/// configured catalog. Both may be given, in which case the catalog selection
/// comes first. With neither, only the basic salary is resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// The monthly basic salary.
    pub basic_salary: Decimal,
    /// Inline component definitions.
    #[serde(default)]
    pub components: Vec<SalaryComponent>,
    /// Catalog component codes.
    #[serde(default)]
    pub codes: Vec<String>,
}

/// Request body for `POST /payroll/run`.
///
/// The salary structure is resolved the same way as `POST /salary/resolve`
/// and then run against a month of attendance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee being paid.
    pub employee_id: String,
    /// The monthly basic salary.
    pub basic_salary: Decimal,
    /// Catalog component codes.
    #[serde(default)]
    pub codes: Vec<String>,
    /// Inline component definitions.
    #[serde(default)]
    pub components: Vec<SalaryComponent>,
    /// Attendance records for the month.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Pay year.
    pub year: i32,
    /// Pay month, 1 to 12.
    pub month: u32,
    /// Statutory switches; all on when omitted.
    #[serde(default)]
    pub statutory: StatutoryFlags,
    /// Tax regime and age for TDS.
    #[serde(default)]
    pub tax: TaxProfile,
}

/// Request body for `POST /tax/estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxEstimateRequest {
    /// Annual gross salary income.
    pub annual_income: Decimal,
    /// Regime and age.
    #[serde(flatten)]
    pub profile: TaxProfile,
}

/// Request body for `POST /leave/balances`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveBalanceRequest {
    /// The employee whose balances are computed.
    pub employee_id: String,
    /// Leave types to report on. Defaults to the configured leave types.
    #[serde(default)]
    pub leave_types: Option<Vec<LeaveType>>,
    /// Leave applications to count.
    #[serde(default)]
    pub applications: Vec<LeaveApplication>,
}

/// Earnings inputs shared by the EWA endpoints.
///
/// The monthly gross is resolved from `basic_salary` and catalog `codes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsRequest {
    /// The monthly basic salary.
    pub basic_salary: Decimal,
    /// Catalog component codes making up the salary structure.
    #[serde(default)]
    pub codes: Vec<String>,
    /// Attendance records for the month.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// The date the balance is computed for.
    pub as_of: NaiveDate,
}

/// Request body for `POST /ewa/balance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EwaBalanceRequest {
    /// The employee whose balance is computed.
    pub employee_id: String,
    /// Earnings inputs.
    #[serde(flatten)]
    pub earnings: EarningsRequest,
}

/// Request body for `POST /ewa/withdrawals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    /// The requesting employee.
    pub employee_id: String,
    /// The employee's company.
    pub company_id: String,
    /// The amount requested.
    pub amount: Decimal,
    /// Optional note from the employee.
    #[serde(default)]
    pub notes: Option<String>,
    /// Earnings inputs used to check the available balance.
    #[serde(flatten)]
    pub earnings: EarningsRequest,
}

/// A status change applied to a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalAction {
    /// Pending to approved.
    Approve,
    /// Pending to rejected.
    Reject,
    /// Approved to disbursed.
    Disburse,
    /// Disbursed to settled.
    Settle,
}

/// Request body for `POST /ewa/withdrawals/{id}/action`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The action to apply.
    pub action: WithdrawalAction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, CalculationType, TaxRegime};

    #[test]
    fn test_deserialize_resolve_request_with_inline_components() {
        let json = r#"{
            "basic_salary": "30000",
            "components": [
                {
                    "id": "2",
                    "name": "House Rent Allowance",
                    "code": "HRA",
                    "type": "earning",
                    "calculation_type": "percentage",
                    "value": "40",
                    "base_component": "BASIC"
                },
                {
                    "id": "7",
                    "name": "Provident Fund",
                    "code": "PF_EMPLOYEE",
                    "type": "deduction",
                    "calculation_type": "fixed",
                    "value": "1800"
                }
            ]
        }"#;

        let request: ResolveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.basic_salary, Decimal::from(30000));
        assert_eq!(request.components.len(), 2);
        assert_eq!(request.components[1].calculation_type, CalculationType::Flat);
        assert!(request.codes.is_empty());
    }

    #[test]
    fn test_deserialize_ewa_balance_request_flattens_earnings() {
        let json = r#"{
            "employee_id": "emp_001",
            "basic_salary": "30000",
            "codes": ["HRA"],
            "attendance": [
                {"employee_id": "emp_001", "date": "2026-04-01", "status": "half-day"}
            ],
            "as_of": "2026-04-10"
        }"#;

        let request: EwaBalanceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, "emp_001");
        assert_eq!(request.earnings.codes, vec!["HRA".to_string()]);
        assert_eq!(request.earnings.attendance[0].status, AttendanceStatus::HalfDay);
        assert_eq!(request.earnings.as_of, NaiveDate::from_ymd_opt(2026, 4, 10).unwrap());
    }

    #[test]
    fn test_deserialize_payroll_request_defaults() {
        let json = r#"{
            "employee_id": "emp_001",
            "basic_salary": "30000",
            "codes": ["HRA"],
            "year": 2026,
            "month": 4,
            "statutory": {"pt_enabled": false},
            "tax": {"regime": "old"}
        }"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert!(request.attendance.is_empty());
        assert!(!request.statutory.pt_enabled);
        assert!(request.statutory.tds_enabled);
        assert_eq!(request.tax.regime, TaxRegime::Old);
        assert_eq!(request.tax.age, 30);
    }

    #[test]
    fn test_deserialize_tax_estimate_flattens_profile() {
        let json = r#"{"annual_income": "1200000", "regime": "old", "age": 62}"#;
        let request: TaxEstimateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.annual_income, Decimal::from(1_200_000));
        assert_eq!(request.profile.regime, TaxRegime::Old);
        assert_eq!(request.profile.age, 62);
    }

    #[test]
    fn test_deserialize_action() {
        let request: ActionRequest = serde_json::from_str(r#"{"action": "disburse"}"#).unwrap();
        assert_eq!(request.action, WithdrawalAction::Disburse);
        assert!(serde_json::from_str::<ActionRequest>(r#"{"action": "cancel"}"#).is_err());
    }
}
