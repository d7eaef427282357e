//! Attendance and earned wage access (EWA) models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A day's attendance outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    /// Worked the full day.
    Present,
    /// Worked half the day; counts as half a paid day.
    HalfDay,
    /// On paid leave; counts as a paid day.
    Leave,
    /// Absent without pay.
    Absent,
}

impl AttendanceStatus {
    /// The fraction of a paid day this status earns.
    pub fn paid_fraction(&self) -> Decimal {
        match self {
            AttendanceStatus::Present | AttendanceStatus::Leave => Decimal::ONE,
            AttendanceStatus::HalfDay => Decimal::new(5, 1),
            AttendanceStatus::Absent => Decimal::ZERO,
        }
    }
}

/// One attendance entry for an employee on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar date.
    pub date: NaiveDate,
    /// The attendance outcome.
    pub status: AttendanceStatus,
}

/// Lifecycle of an EWA withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EwaStatus {
    /// Requested, awaiting an admin decision.
    Pending,
    /// Approved, awaiting disbursement.
    Approved,
    /// Rejected; does not count against the balance.
    Rejected,
    /// Paid out to the employee.
    Disbursed,
    /// Recovered from the employee's final monthly pay.
    Settled,
}

impl EwaStatus {
    /// Returns the status label as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            EwaStatus::Pending => "pending",
            EwaStatus::Approved => "approved",
            EwaStatus::Rejected => "rejected",
            EwaStatus::Disbursed => "disbursed",
            EwaStatus::Settled => "settled",
        }
    }
}

/// An early withdrawal of earned but unpaid wages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EwaWithdrawal {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee withdrawing.
    pub employee_id: String,
    /// The employer.
    pub company_id: String,
    /// The amount requested.
    pub amount: Decimal,
    /// The pay month (1-12) the withdrawal is drawn against.
    pub month: u32,
    /// The pay year the withdrawal is drawn against.
    pub year: i32,
    /// Current lifecycle status.
    pub status: EwaStatus,
    /// When the request was made.
    pub requested_at: DateTime<Utc>,
    /// When the last admin action happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    /// Optional note from the employee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EwaWithdrawal {
    /// Returns true if this withdrawal reduces the available balance.
    pub fn counts_against_balance(&self) -> bool {
        self.status != EwaStatus::Rejected
    }
}

/// How much an employee has earned this month and can draw early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EwaBalance {
    /// Wages earned so far this month.
    pub earned: Decimal,
    /// Amount already drawn this month (excluding rejected requests).
    pub withdrawn: Decimal,
    /// Amount still available to draw, never below zero.
    pub available: Decimal,
    /// Paid days counted so far this month.
    pub paid_days: Decimal,
    /// Monthly gross divided by the days in the month.
    pub daily_rate: Decimal,
}
