//! Leave types, applications, and balances.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The approval state of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; counts against the balance.
    Approved,
    /// Rejected by an approver.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

impl LeaveStatus {
    /// Returns the status label as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
            LeaveStatus::Cancelled => "Cancelled",
        }
    }
}

/// A category of leave with an annual entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Unique identifier.
    pub id: u32,
    /// Display name (e.g. "Casual Leave").
    pub name: String,
    /// Short code (e.g. "CL").
    pub code: String,
    /// Whether the leave is paid.
    #[serde(default = "default_is_paid")]
    pub is_paid: bool,
    /// Days allowed per year.
    #[serde(default)]
    pub annual_limit: u32,
}

fn default_is_paid() -> bool {
    true
}

/// A request by an employee to take leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// Unique identifier.
    pub id: u32,
    /// The employee applying.
    pub employee_id: String,
    /// The leave type requested.
    pub leave_type_id: u32,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of leave days counted against the balance.
    pub total_days: u32,
    /// The employee's stated reason.
    #[serde(default)]
    pub reason: String,
    /// Current approval state.
    pub status: LeaveStatus,
    /// Why the application was rejected, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl LeaveApplication {
    /// Approves a pending application.
    pub fn approve(&mut self) -> EngineResult<()> {
        self.transition("approve", LeaveStatus::Approved)
    }

    /// Rejects a pending application, recording the reason.
    pub fn reject(&mut self, reason: impl Into<String>) -> EngineResult<()> {
        self.transition("reject", LeaveStatus::Rejected)?;
        self.rejection_reason = Some(reason.into());
        Ok(())
    }

    /// Cancels a pending application.
    pub fn cancel(&mut self) -> EngineResult<()> {
        self.transition("cancel", LeaveStatus::Cancelled)
    }

    fn transition(&mut self, action: &str, to: LeaveStatus) -> EngineResult<()> {
        if self.status != LeaveStatus::Pending {
            return Err(EngineError::InvalidTransition {
                entity: "leave application".to_string(),
                status: self.status.as_str().to_string(),
                action: action.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Per-type leave usage for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The leave type.
    pub leave_type_id: u32,
    /// The leave type's display name.
    pub leave_type_name: String,
    /// Days allowed per year.
    pub annual_limit: u32,
    /// Approved days taken.
    pub used: u32,
    /// Days remaining, never below zero.
    pub available: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_application(status: LeaveStatus) -> LeaveApplication {
        LeaveApplication {
            id: 1,
            employee_id: "emp_001".to_string(),
            leave_type_id: 1,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            total_days: 3,
            reason: "Family function".to_string(),
            status,
            rejection_reason: None,
        }
    }

    #[test]
    fn test_status_uses_capitalised_names() {
        let json = serde_json::to_string(&LeaveStatus::Approved).unwrap();
        assert_eq!(json, "\"Approved\"");

        let status: LeaveStatus = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(status, LeaveStatus::Pending);
    }

    #[test]
    fn test_approve_pending() {
        let mut application = create_application(LeaveStatus::Pending);
        application.approve().unwrap();
        assert_eq!(application.status, LeaveStatus::Approved);
    }

    #[test]
    fn test_reject_records_reason() {
        let mut application = create_application(LeaveStatus::Pending);
        application.reject("Project deadline").unwrap();
        assert_eq!(application.status, LeaveStatus::Rejected);
        assert_eq!(application.rejection_reason.as_deref(), Some("Project deadline"));
    }

    #[test]
    fn test_cannot_approve_rejected() {
        let mut application = create_application(LeaveStatus::Rejected);
        let result = application.approve();

        match result {
            Err(EngineError::InvalidTransition { status, action, .. }) => {
                assert_eq!(status, "Rejected");
                assert_eq!(action, "approve");
            }
            _ => panic!("Expected InvalidTransition error"),
        }
        assert_eq!(application.status, LeaveStatus::Rejected);
    }

    #[test]
    fn test_cannot_cancel_approved() {
        let mut application = create_application(LeaveStatus::Approved);
        assert!(application.cancel().is_err());
    }

    #[test]
    fn test_leave_type_defaults() {
        let json = r#"{"id": 3, "name": "Sick Leave", "code": "SL"}"#;
        let leave_type: LeaveType = serde_json::from_str(json).unwrap();
        assert!(leave_type.is_paid);
        assert_eq!(leave_type.annual_limit, 0);
    }
}
