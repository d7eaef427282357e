//! Leave balance aggregation.
//!
//! Balances are derived on demand from leave types and applications; nothing
//! is cached or stored.

use crate::models::{LeaveApplication, LeaveBalance, LeaveStatus, LeaveType};

/// Computes an employee's balance for every leave type.
///
/// Only approved applications count as used. Balances are returned in the
/// order of `leave_types`, and `available` is clamped at zero when an
/// employee has taken more than the annual limit. `used` saturates at
/// `u32::MAX`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::leave_balances;
/// use salary_engine::models::{LeaveApplication, LeaveStatus, LeaveType};
/// use chrono::NaiveDate;
///
/// let casual = LeaveType {
///     id: 1,
///     name: "Casual Leave".into(),
///     code: "CL".into(),
///     is_paid: true,
///     annual_limit: 12,
/// };
/// let taken = LeaveApplication {
///     id: 1,
///     employee_id: "emp_001".into(),
///     leave_type_id: 1,
///     start_date: NaiveDate::from_ymd_opt(2026, 2, 9).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 2, 11).unwrap(),
///     total_days: 3,
///     reason: "Travel".into(),
///     status: LeaveStatus::Approved,
///     rejection_reason: None,
/// };
///
/// let balances = leave_balances("emp_001", &[casual], &[taken]);
/// assert_eq!(balances[0].used, 3);
/// assert_eq!(balances[0].available, 9);
/// ```
pub fn leave_balances(
    employee_id: &str,
    leave_types: &[LeaveType],
    applications: &[LeaveApplication],
) -> Vec<LeaveBalance> {
    leave_types
        .iter()
        .map(|leave_type| {
            let used: u32 = applications
                .iter()
                .filter(|app| {
                    app.employee_id == employee_id
                        && app.status == LeaveStatus::Approved
                        && app.leave_type_id == leave_type.id
                })
                .map(|app| app.total_days)
                .fold(0, u32::saturating_add);

            LeaveBalance {
                leave_type_id: leave_type.id,
                leave_type_name: leave_type.name.clone(),
                annual_limit: leave_type.annual_limit,
                used,
                available: leave_type.annual_limit.saturating_sub(used),
            }
        })
        .collect()
}

/// Returns an employee's applications in their original order.
pub fn leaves_by_employee<'a>(
    employee_id: &str,
    applications: &'a [LeaveApplication],
) -> Vec<&'a LeaveApplication> {
    applications
        .iter()
        .filter(|app| app.employee_id == employee_id)
        .collect()
}

/// Returns all applications awaiting a decision.
pub fn pending_leaves(applications: &[LeaveApplication]) -> Vec<&LeaveApplication> {
    applications
        .iter()
        .filter(|app| app.status == LeaveStatus::Pending)
        .collect()
}
