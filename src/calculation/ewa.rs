//! Earned wage access (EWA) balance and withdrawal flow.
//!
//! An employee may draw a share of the wages earned so far in the current
//! month. Earned wages are the monthly gross pro-rated by paid days, where a
//! present or leave day counts as one and a half day counts as half.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;
use uuid::Uuid;

use crate::config::EwaPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, EwaBalance, EwaStatus, EwaWithdrawal};

use super::amount::{checked_sum, percent_of};

/// What an employee has earned so far in a month.
#[derive(Debug, Clone, Copy)]
pub struct EarningsSnapshot<'a> {
    /// The resolved monthly gross salary.
    pub monthly_gross: Decimal,
    /// Attendance records; records for other employees or dates are ignored.
    pub attendance: &'a [AttendanceRecord],
    /// The day the balance is computed for. Its month is the pay month.
    pub as_of: NaiveDate,
}

/// Returns the number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> EngineResult<u32> {
    let first = date.with_day(1);
    let next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };

    match (first, next) {
        (Some(first), Some(next)) => Ok((next - first).num_days() as u32),
        _ => Err(EngineError::CalculationError {
            message: format!("Cannot determine month length for {}", date),
        }),
    }
}

/// Computes how much an employee can withdraw early.
///
/// - `paid_days` counts the employee's attendance from the first of the
///   `as_of` month up to and including `as_of`;
/// - `daily_rate = monthly_gross / days_in_month`;
/// - `earned = daily_rate * paid_days`;
/// - `withdrawn` sums the employee's non-rejected withdrawals for the month;
/// - `available = max(0, earned * max_withdrawal_percent / 100 - withdrawn)`.
///
/// Reported amounts are rounded to two decimal places; `available` rounds
/// toward zero so it never exceeds the true limit.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{EarningsSnapshot, calculate_available_balance};
/// use salary_engine::config::EwaPolicy;
/// use salary_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let attendance: Vec<AttendanceRecord> = (1..=10)
///     .map(|day| AttendanceRecord {
///         employee_id: "emp_001".into(),
///         date: NaiveDate::from_ymd_opt(2026, 4, day).unwrap(),
///         status: AttendanceStatus::Present,
///     })
///     .collect();
/// let snapshot = EarningsSnapshot {
///     monthly_gross: Decimal::from(30000),
///     attendance: &attendance,
///     as_of: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
/// };
///
/// let policy = EwaPolicy::default();
/// let balance = calculate_available_balance("emp_001", &snapshot, &[], &policy).unwrap();
/// assert_eq!(balance.earned, Decimal::from(10000));
/// assert_eq!(balance.available, Decimal::from(5000));
/// ```
pub fn calculate_available_balance(
    employee_id: &str,
    snapshot: &EarningsSnapshot<'_>,
    withdrawals: &[EwaWithdrawal],
    policy: &EwaPolicy,
) -> EngineResult<EwaBalance> {
    if snapshot.monthly_gross < Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            field: "monthly_gross".to_string(),
            message: "must not be negative".to_string(),
        });
    }

    let as_of = snapshot.as_of;
    let month_start = as_of.with_day(1).ok_or_else(|| EngineError::CalculationError {
        message: format!("Cannot determine start of month for {}", as_of),
    })?;
    let days = days_in_month(as_of)?;

    let paid_days: Decimal = snapshot
        .attendance
        .iter()
        .filter(|record| {
            record.employee_id == employee_id && record.date >= month_start && record.date <= as_of
        })
        .map(|record| record.status.paid_fraction())
        .sum();

    let daily_rate = snapshot.monthly_gross / Decimal::from(days);
    let earned = daily_rate
        .checked_mul(paid_days)
        .ok_or_else(|| EngineError::overflow("monthly_gross", "earned wages"))?;

    let withdrawn = checked_sum(
        withdrawals
            .iter()
            .filter(|w| {
                w.employee_id == employee_id
                    && w.month == as_of.month()
                    && w.year == as_of.year()
                    && w.counts_against_balance()
            })
            .map(|w| w.amount),
    )
    .ok_or_else(|| EngineError::overflow("amount", "withdrawn total"))?;

    let limit = percent_of(earned, policy.max_withdrawal_percent)
        .ok_or_else(|| EngineError::overflow("monthly_gross", "withdrawal limit"))?;
    let available = limit
        .checked_sub(withdrawn)
        .ok_or_else(|| EngineError::overflow("amount", "available balance"))?
        .max(Decimal::ZERO);

    Ok(EwaBalance {
        earned: earned.round_dp(2),
        withdrawn,
        available: available.round_dp_with_strategy(2, RoundingStrategy::ToZero),
        paid_days,
        daily_rate: daily_rate.round_dp(2),
    })
}

/// In-memory record of EWA withdrawals and their status changes.
///
/// Status transitions:
/// - `pending` to `approved` or `rejected`;
/// - `approved` to `disbursed`;
/// - `disbursed` to `settled`.
#[derive(Debug, Clone, Default)]
pub struct EwaLedger {
    withdrawals: Vec<EwaWithdrawal>,
}

impl EwaLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every withdrawal in request order.
    pub fn withdrawals(&self) -> &[EwaWithdrawal] {
        &self.withdrawals
    }

    /// Looks up a withdrawal by ID.
    pub fn get(&self, id: Uuid) -> EngineResult<&EwaWithdrawal> {
        self.withdrawals
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| EngineError::WithdrawalNotFound { id: id.to_string() })
    }

    /// Computes the employee's balance against the withdrawals in this ledger.
    pub fn balance(
        &self,
        employee_id: &str,
        snapshot: &EarningsSnapshot<'_>,
        policy: &EwaPolicy,
    ) -> EngineResult<EwaBalance> {
        calculate_available_balance(employee_id, snapshot, &self.withdrawals, policy)
    }

    /// Records a pending withdrawal if the amount fits the available balance.
    ///
    /// The withdrawal is drawn against the month of `snapshot.as_of`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidAmount`] if `amount` is not positive, or if the
    ///   balance arithmetic overflows.
    /// - [`EngineError::WithdrawalExceedsBalance`] if `amount` is above the available balance.
    pub fn request_withdrawal(
        &mut self,
        employee_id: &str,
        company_id: &str,
        amount: Decimal,
        notes: Option<String>,
        snapshot: &EarningsSnapshot<'_>,
        policy: &EwaPolicy,
    ) -> EngineResult<&EwaWithdrawal> {
        if amount <= Decimal::ZERO {
            return Err(EngineError::InvalidAmount {
                field: "amount".to_string(),
                message: format!("must be positive, got {}", amount),
            });
        }

        let balance = self.balance(employee_id, snapshot, policy)?;
        if amount > balance.available {
            return Err(EngineError::WithdrawalExceedsBalance {
                requested: amount,
                available: balance.available,
            });
        }

        let withdrawal = EwaWithdrawal {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            company_id: company_id.to_string(),
            amount,
            month: snapshot.as_of.month(),
            year: snapshot.as_of.year(),
            status: EwaStatus::Pending,
            requested_at: Utc::now(),
            processed_at: None,
            notes,
        };

        info!(
            withdrawal_id = %withdrawal.id,
            employee_id = %employee_id,
            amount = %amount,
            available = %balance.available,
            "EWA withdrawal requested"
        );

        self.withdrawals.push(withdrawal);
        let index = self.withdrawals.len() - 1;
        Ok(&self.withdrawals[index])
    }

    /// Approves a pending withdrawal.
    pub fn approve(&mut self, id: Uuid) -> EngineResult<&EwaWithdrawal> {
        self.transition(id, "approve", EwaStatus::Pending, EwaStatus::Approved)
    }

    /// Rejects a pending withdrawal, releasing its amount back to the balance.
    pub fn reject(&mut self, id: Uuid) -> EngineResult<&EwaWithdrawal> {
        self.transition(id, "reject", EwaStatus::Pending, EwaStatus::Rejected)
    }

    /// Marks an approved withdrawal as paid out.
    pub fn disburse(&mut self, id: Uuid) -> EngineResult<&EwaWithdrawal> {
        self.transition(id, "disburse", EwaStatus::Approved, EwaStatus::Disbursed)
    }

    /// Marks a disbursed withdrawal as recovered from monthly pay.
    pub fn settle(&mut self, id: Uuid) -> EngineResult<&EwaWithdrawal> {
        self.transition(id, "settle", EwaStatus::Disbursed, EwaStatus::Settled)
    }

    /// Returns an employee's withdrawals, newest first.
    pub fn history(&self, employee_id: &str) -> Vec<&EwaWithdrawal> {
        let mut history: Vec<&EwaWithdrawal> = self
            .withdrawals
            .iter()
            .rev()
            .filter(|w| w.employee_id == employee_id)
            .collect();
        history.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        history
    }

    /// Returns a company's pending withdrawals, oldest first.
    pub fn pending(&self, company_id: &str) -> Vec<&EwaWithdrawal> {
        let mut pending: Vec<&EwaWithdrawal> = self
            .withdrawals
            .iter()
            .filter(|w| w.company_id == company_id && w.status == EwaStatus::Pending)
            .collect();
        pending.sort_by(|a, b| a.requested_at.cmp(&b.requested_at));
        pending
    }

    fn transition(
        &mut self,
        id: Uuid,
        action: &str,
        from: EwaStatus,
        to: EwaStatus,
    ) -> EngineResult<&EwaWithdrawal> {
        let withdrawal = self
            .withdrawals
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| EngineError::WithdrawalNotFound { id: id.to_string() })?;

        if withdrawal.status != from {
            return Err(EngineError::InvalidTransition {
                entity: "withdrawal".to_string(),
                status: withdrawal.status.as_str().to_string(),
                action: action.to_string(),
            });
        }

        withdrawal.status = to;
        withdrawal.processed_at = Some(Utc::now());
        info!(
            withdrawal_id = %id,
            status = to.as_str(),
            "EWA withdrawal {}", action
        );
        Ok(withdrawal)
    }
}
