//! Monthly payroll runs.
//!
//! A run takes a resolved salary structure and a month of attendance and
//! produces a payslip. Earnings are pro-rated by paid days. Employee PF, ESI,
//! professional tax and TDS are worked out from the earned figures and replace
//! whatever the structure carried for those codes; other structure deductions
//! are kept at their resolved amount.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::EnginePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AuditTrace, BASIC_ANCHOR, EmployerContribution, MONTHS_PER_YEAR, Payslip,
    PayslipLine, SalaryBreakdown, StatutoryFlags, TaxProfile,
};

use super::amount::{checked_sum, percent_of};
use super::ewa::days_in_month;
use super::income_tax::assess_income_tax;
use super::statutory::{employer_esi, employer_pf};

/// Payslip code for employee provident fund.
pub const PF_CODE: &str = "PF_EMPLOYEE";
/// Payslip code for employee state insurance.
pub const ESI_CODE: &str = "ESI_EMPLOYEE";
/// Payslip code for professional tax.
pub const PT_CODE: &str = "PT";
/// Payslip code for income tax deducted at source.
pub const TDS_CODE: &str = "TDS";

const STATUTORY_CODES: [&str; 4] = [PF_CODE, ESI_CODE, PT_CODE, TDS_CODE];

/// Everything one employee's payroll run needs.
#[derive(Debug, Clone, Copy)]
pub struct PayrollInput<'a> {
    /// The employee being paid.
    pub employee_id: &'a str,
    /// The employee's resolved monthly salary structure.
    pub structure: &'a SalaryBreakdown,
    /// Attendance records; other employees and months are ignored.
    pub attendance: &'a [AttendanceRecord],
    /// Pay year.
    pub year: i32,
    /// Pay month, 1 to 12.
    pub month: u32,
    /// Which statutory items apply.
    pub flags: StatutoryFlags,
    /// Income tax regime and age for TDS.
    pub tax: TaxProfile,
}

/// Runs payroll for one employee and month.
///
/// - `paid_days` counts present and leave days as one and half days as half,
///   capped at the month length;
/// - each earning is `amount * paid_days / days_in_month`, rounded to 2 dp;
/// - PF is a percentage of earned basic;
/// - ESI is a percentage of earned gross while it is within the ESI ceiling;
/// - professional tax comes from the highest slab earned gross exceeds;
/// - TDS is a twelfth of the annual tax on the structure's full gross.
///
/// # Errors
///
/// - [`EngineError::InvalidPeriod`] if `year`/`month` is not a calendar month.
/// - [`EngineError::InvalidAmount`] if an amount overflows.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{PayrollInput, resolve, run_payroll};
/// use salary_engine::config::EnginePolicy;
/// use salary_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let structure = resolve(Decimal::from(10000), &[]).unwrap();
/// let attendance: Vec<AttendanceRecord> = (1..=30)
///     .map(|day| AttendanceRecord {
///         employee_id: "emp_001".into(),
///         date: NaiveDate::from_ymd_opt(2026, 4, day).unwrap(),
///         status: AttendanceStatus::Present,
///     })
///     .collect();
/// let input = PayrollInput {
///     employee_id: "emp_001",
///     structure: &structure,
///     attendance: &attendance,
///     year: 2026,
///     month: 4,
///     flags: Default::default(),
///     tax: Default::default(),
/// };
///
/// let payslip = run_payroll(&input, &EnginePolicy::default()).unwrap();
/// assert_eq!(payslip.gross_earnings, Decimal::from(10000));
/// assert_eq!(payslip.net_pay, Decimal::from(8625));
/// ```
pub fn run_payroll(input: &PayrollInput<'_>, policy: &EnginePolicy) -> EngineResult<Payslip> {
    let first = NaiveDate::from_ymd_opt(input.year, input.month, 1).ok_or(
        EngineError::InvalidPeriod {
            year: input.year,
            month: input.month,
        },
    )?;
    let days = days_in_month(first)?;
    let month_days = Decimal::from(days);
    let mut trace = AuditTrace::default();

    let recorded = input
        .attendance
        .iter()
        .filter(|record| {
            record.employee_id == input.employee_id
                && record.date.year() == input.year
                && record.date.month() == input.month
        })
        .map(|record| record.status.paid_fraction())
        .sum::<Decimal>();
    if recorded > month_days {
        trace.warn(
            "PAID_DAYS_CAPPED",
            format!("{} paid days recorded in a {} day month", recorded, days),
            "medium",
        );
    }
    let paid_days = recorded.min(month_days);
    let absent_days = month_days - paid_days;
    trace.push_step(
        "paid_days",
        "Paid Days",
        serde_json::json!({
            "recorded": recorded.normalize().to_string(),
            "days_in_month": days
        }),
        serde_json::json!({
            "paid_days": paid_days.normalize().to_string(),
            "absent_days": absent_days.normalize().to_string()
        }),
        format!("{} of {} days paid", paid_days.normalize(), days),
    );

    let prorate = |amount: Decimal| -> EngineResult<Decimal> {
        amount
            .checked_mul(paid_days)
            .map(|earned| round(earned / month_days))
            .ok_or_else(|| overflow("earnings"))
    };

    let basic_earned = prorate(input.structure.basic)?;
    let mut earnings = vec![line(BASIC_ANCHOR, "Basic Salary", basic_earned)];
    for component in input.structure.earnings() {
        if component.code.eq_ignore_ascii_case(BASIC_ANCHOR) {
            continue;
        }
        earnings.push(line(&component.code, &component.name, prorate(component.amount)?));
    }
    earnings.retain(|line| line.amount > Decimal::ZERO);
    let gross_earnings =
        checked_sum(earnings.iter().map(|line| line.amount)).ok_or_else(|| overflow("gross"))?;
    trace.push_step(
        "pro_rated_earnings",
        "Pro-rated Earnings",
        serde_json::json!({
            "structure_gross": input.structure.gross.normalize().to_string(),
            "paid_days": paid_days.normalize().to_string(),
            "days_in_month": days
        }),
        serde_json::json!({ "gross_earnings": gross_earnings.normalize().to_string() }),
        format!(
            "{} x {}/{} = {}",
            input.structure.gross.normalize(),
            paid_days.normalize(),
            days,
            gross_earnings.normalize()
        ),
    );

    let payroll = &policy.payroll;
    let statutory = &policy.statutory;
    let mut deductions = Vec::new();

    if input.flags.pf_enabled {
        let pf = percent_of(basic_earned, payroll.employee_pf_rate)
            .map(round)
            .ok_or_else(|| overflow("PF"))?;
        trace.push_step(
            "employee_pf",
            "Employee Provident Fund",
            serde_json::json!({
                "basic_earned": basic_earned.normalize().to_string(),
                "rate": payroll.employee_pf_rate.normalize().to_string()
            }),
            serde_json::json!({ "amount": pf.normalize().to_string() }),
            format!(
                "{}% of earned basic {} = {}",
                payroll.employee_pf_rate.normalize(),
                basic_earned.normalize(),
                pf.normalize()
            ),
        );
        deductions.push(line(PF_CODE, "Provident Fund (Employee)", pf));
    }

    if input.flags.esi_enabled && gross_earnings <= statutory.esi_wage_ceiling {
        let esi = percent_of(gross_earnings, payroll.employee_esi_rate)
            .map(round)
            .ok_or_else(|| overflow("ESI"))?;
        trace.push_step(
            "employee_esi",
            "Employee State Insurance",
            serde_json::json!({
                "gross_earnings": gross_earnings.normalize().to_string(),
                "rate": payroll.employee_esi_rate.normalize().to_string(),
                "ceiling": statutory.esi_wage_ceiling.normalize().to_string()
            }),
            serde_json::json!({ "amount": esi.normalize().to_string() }),
            format!(
                "{}% of earned gross {} = {}",
                payroll.employee_esi_rate.normalize(),
                gross_earnings.normalize(),
                esi.normalize()
            ),
        );
        deductions.push(line(ESI_CODE, "ESI (Employee)", esi));
    }

    if input.flags.pt_enabled {
        let pt = payroll.professional_tax_for(gross_earnings);
        trace.push_step(
            "professional_tax",
            "Professional Tax",
            serde_json::json!({ "gross_earnings": gross_earnings.normalize().to_string() }),
            serde_json::json!({ "amount": pt.normalize().to_string() }),
            format!("Slab for earned gross {} is {}", gross_earnings.normalize(), pt.normalize()),
        );
        deductions.push(line(PT_CODE, "Professional Tax", pt));
    }

    if input.flags.tds_enabled {
        let annual = input
            .structure
            .gross
            .checked_mul(Decimal::from(MONTHS_PER_YEAR))
            .ok_or_else(|| overflow("annual gross"))?;
        let assessment = assess_income_tax(annual, &input.tax)?;
        trace.push_step(
            "income_tax",
            "Income Tax (TDS)",
            serde_json::json!({
                "annual_gross": annual.normalize().to_string(),
                "regime": input.tax.regime.as_str(),
                "standard_deduction": assessment.standard_deduction.normalize().to_string()
            }),
            serde_json::json!({
                "annual_tax": assessment.total.normalize().to_string(),
                "monthly": assessment.monthly.normalize().to_string()
            }),
            format!(
                "Tax on {} under the {} regime is {}; {} a month",
                assessment.taxable_income.normalize(),
                input.tax.regime.as_str(),
                assessment.total.normalize(),
                assessment.monthly.normalize()
            ),
        );
        deductions.push(line(TDS_CODE, "Income Tax (TDS)", assessment.monthly));
    }

    for component in input.structure.deductions() {
        if STATUTORY_CODES.contains(&component.code.as_str()) {
            continue;
        }
        deductions.push(line(&component.code, &component.name, round(component.amount)));
    }
    deductions.retain(|line| line.amount > Decimal::ZERO);

    let total_deductions = checked_sum(deductions.iter().map(|line| line.amount))
        .ok_or_else(|| overflow("total deductions"))?;
    let net_pay = gross_earnings
        .checked_sub(total_deductions)
        .ok_or_else(|| overflow("net pay"))?;

    let mut employer_contributions = Vec::new();
    if input.flags.employer_pf_enabled {
        employer_contributions.push(employer_pf(basic_earned, statutory)?);
    }
    if input.flags.employer_esi_enabled {
        employer_contributions.extend(employer_esi(gross_earnings, statutory)?);
    }
    let employer_contributions: Vec<EmployerContribution> = employer_contributions
        .into_iter()
        .map(|contribution| EmployerContribution {
            amount: round(contribution.amount),
            ..contribution
        })
        .collect();

    trace.push_step(
        "payroll_totals",
        "Payroll Totals",
        serde_json::json!({
            "gross_earnings": gross_earnings.normalize().to_string(),
            "deductions": deductions.len()
        }),
        serde_json::json!({
            "total_deductions": total_deductions.normalize().to_string(),
            "net_pay": net_pay.normalize().to_string()
        }),
        format!(
            "Gross {} - deductions {} = net pay {}",
            gross_earnings.normalize(),
            total_deductions.normalize(),
            net_pay.normalize()
        ),
    );

    debug!(
        employee_id = %input.employee_id,
        year = input.year,
        month = input.month,
        paid_days = %paid_days,
        gross = %gross_earnings,
        net = %net_pay,
        "Payroll run complete"
    );

    Ok(Payslip {
        employee_id: input.employee_id.to_string(),
        month: input.month,
        year: input.year,
        days_in_month: days,
        paid_days,
        absent_days,
        earnings,
        gross_earnings,
        deductions,
        total_deductions,
        net_pay,
        employer_contributions,
        audit_trace: trace,
    })
}

fn line(code: &str, name: &str, amount: Decimal) -> PayslipLine {
    PayslipLine {
        code: code.to_string(),
        name: name.to_string(),
        amount,
    }
}

fn round(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn overflow(quantity: &str) -> EngineError {
    EngineError::overflow("basic_salary", quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{EMPLOYER_ESI_CODE, EMPLOYER_PF_CODE, resolve};
    use crate::models::{AttendanceStatus, ComponentType, SalaryComponent, TaxRegime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 4, day).unwrap(),
            status,
        }
    }

    fn run(input: &PayrollInput<'_>) -> Payslip {
        run_payroll(input, &EnginePolicy::default()).unwrap()
    }

    fn full_month() -> Vec<AttendanceRecord> {
        (1..=30).map(|day| record(day, AttendanceStatus::Present)).collect()
    }

    fn input<'a>(
        structure: &'a SalaryBreakdown,
        attendance: &'a [AttendanceRecord],
    ) -> PayrollInput<'a> {
        PayrollInput {
            employee_id: "emp_001",
            structure,
            attendance,
            year: 2026,
            month: 4,
            flags: StatutoryFlags::default(),
            tax: TaxProfile::default(),
        }
    }

    fn office_structure() -> SalaryBreakdown {
        let hra = SalaryComponent::percentage(
            "2",
            "House Rent Allowance",
            "HRA",
            ComponentType::Earning,
            dec("40"),
            "BASIC",
        );
        let conveyance = SalaryComponent::flat(
            "4",
            "Conveyance Allowance",
            "CONVEYANCE",
            ComponentType::Earning,
            dec("1600"),
        );
        resolve(dec("30000"), &[hra, conveyance]).unwrap()
    }

    /// PR-001: partial month pro-rates every earning
    #[test]
    fn test_partial_month_is_pro_rated() {
        let structure = office_structure();
        let mut attendance: Vec<AttendanceRecord> =
            (1..=20).map(|day| record(day, AttendanceStatus::Present)).collect();
        attendance.push(record(21, AttendanceStatus::HalfDay));
        attendance.push(record(22, AttendanceStatus::HalfDay));
        attendance.push(record(23, AttendanceStatus::Leave));
        attendance.push(record(24, AttendanceStatus::Leave));
        attendance.push(record(25, AttendanceStatus::Absent));

        let payslip = run(&input(&structure, &attendance));

        assert_eq!(payslip.days_in_month, 30);
        assert_eq!(payslip.paid_days, dec("23"));
        assert_eq!(payslip.absent_days, dec("7"));
        assert_eq!(payslip.earning("BASIC"), Some(dec("23000")));
        assert_eq!(payslip.earning("HRA"), Some(dec("9200")));
        assert_eq!(payslip.earning("CONVEYANCE"), Some(dec("1226.67")));
        assert_eq!(payslip.gross_earnings, dec("33426.67"));

        assert_eq!(payslip.deduction(PF_CODE), Some(dec("2760")));
        // Above the ESI ceiling; annual taxable income is inside the rebate
        assert_eq!(payslip.deduction(ESI_CODE), None);
        assert_eq!(payslip.deduction(PT_CODE), Some(dec("250")));
        assert_eq!(payslip.deduction(TDS_CODE), None);
        assert_eq!(payslip.total_deductions, dec("3010"));
        assert_eq!(payslip.net_pay, dec("30416.67"));

        assert_eq!(payslip.employer_contributions.len(), 1);
        assert_eq!(payslip.employer_contributions[0].code, EMPLOYER_PF_CODE);
        assert_eq!(payslip.employer_contributions[0].amount, dec("2760"));
    }

    /// PR-002: low wage full month attracts ESI on both sides
    #[test]
    fn test_low_wage_full_month() {
        let structure = resolve(dec("10000"), &[]).unwrap();
        let attendance = full_month();

        let payslip = run(&input(&structure, &attendance));

        assert_eq!(payslip.absent_days, Decimal::ZERO);
        assert_eq!(payslip.deduction(PF_CODE), Some(dec("1200")));
        assert_eq!(payslip.deduction(ESI_CODE), Some(dec("75")));
        assert_eq!(payslip.deduction(PT_CODE), Some(dec("100")));
        assert_eq!(payslip.net_pay, dec("8625"));

        let employer: Vec<(&str, Decimal)> = payslip
            .employer_contributions
            .iter()
            .map(|c| (c.code.as_str(), c.amount))
            .collect();
        assert_eq!(
            employer,
            vec![(EMPLOYER_PF_CODE, dec("1200")), (EMPLOYER_ESI_CODE, dec("325"))]
        );
    }

    #[test]
    fn test_flags_switch_items_off() {
        let structure = resolve(dec("10000"), &[]).unwrap();
        let attendance = full_month();
        let mut flagged = input(&structure, &attendance);
        flagged.flags = StatutoryFlags {
            pf_enabled: false,
            esi_enabled: false,
            pt_enabled: false,
            tds_enabled: false,
            employer_pf_enabled: false,
            employer_esi_enabled: false,
        };

        let payslip = run(&flagged);

        assert!(payslip.deductions.is_empty());
        assert!(payslip.employer_contributions.is_empty());
        assert_eq!(payslip.net_pay, dec("10000"));
    }

    #[test]
    fn test_tds_is_a_twelfth_of_annual_tax() {
        // 100000 a month: 1200000 a year, 1125000 taxable under the new regime
        let structure = resolve(dec("100000"), &[]).unwrap();
        let attendance = full_month();

        let payslip = run(&input(&structure, &attendance));
        assert_eq!(payslip.deduction(TDS_CODE), Some(dec("5958.33")));

        let mut old = input(&structure, &attendance);
        old.tax = TaxProfile {
            regime: TaxRegime::Old,
            age: 30,
        };
        // 1150000 taxable: 12500 + 100000 + 45000, plus cess = 163800
        let payslip = run(&old);
        assert_eq!(payslip.deduction(TDS_CODE), Some(dec("13650")));
    }

    #[test]
    fn test_structure_deductions_are_replaced_or_carried() {
        let pf = SalaryComponent::flat("7", "PF", PF_CODE, ComponentType::Deduction, dec("1800"));
        let canteen =
            SalaryComponent::flat("c", "Canteen", "CANTEEN", ComponentType::Deduction, dec("450"));
        let structure = resolve(dec("10000"), &[pf, canteen]).unwrap();
        let attendance: Vec<AttendanceRecord> =
            (1..=15).map(|day| record(day, AttendanceStatus::Present)).collect();

        let payslip = run(&input(&structure, &attendance));

        // PF follows earned basic, not the structure's flat 1800
        assert_eq!(payslip.deduction(PF_CODE), Some(dec("600")));
        assert_eq!(payslip.deduction("CANTEEN"), Some(dec("450")));
    }

    #[test]
    fn test_other_employees_and_months_are_ignored() {
        let structure = resolve(dec("30000"), &[]).unwrap();
        let mut attendance = vec![record(1, AttendanceStatus::Present)];
        attendance.push(AttendanceRecord {
            employee_id: "emp_002".to_string(),
            ..record(2, AttendanceStatus::Present)
        });
        attendance.push(AttendanceRecord {
            date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            ..record(1, AttendanceStatus::Present)
        });

        let payslip = run(&input(&structure, &attendance));

        assert_eq!(payslip.paid_days, Decimal::ONE);
        assert_eq!(payslip.earning("BASIC"), Some(dec("1000")));
    }

    #[test]
    fn test_no_attendance_pays_nothing() {
        let structure = office_structure();
        let payslip = run(&input(&structure, &[]));

        assert_eq!(payslip.absent_days, dec("30"));
        assert!(payslip.earnings.is_empty());
        assert_eq!(payslip.gross_earnings, Decimal::ZERO);
        // TDS still follows the structure, which is inside the rebate here
        assert!(payslip.deductions.is_empty());
        assert_eq!(payslip.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_duplicate_records_cap_at_month_length() {
        let structure = resolve(dec("30000"), &[]).unwrap();
        let mut attendance = full_month();
        attendance.extend(full_month());

        let payslip = run(&input(&structure, &attendance));

        assert_eq!(payslip.paid_days, dec("30"));
        assert_eq!(payslip.earning("BASIC"), Some(dec("30000")));
        assert_eq!(payslip.audit_trace.warnings[0].code, "PAID_DAYS_CAPPED");
    }

    #[test]
    fn test_invalid_month_is_an_error() {
        let structure = resolve(dec("30000"), &[]).unwrap();
        let mut period = input(&structure, &[]);
        period.month = 13;

        match run_payroll(&period, &EnginePolicy::default()) {
            Err(EngineError::InvalidPeriod { year, month }) => {
                assert_eq!(year, 2026);
                assert_eq!(month, 13);
            }
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_audit_trace_covers_each_rule() {
        let structure = resolve(dec("10000"), &[]).unwrap();
        let attendance = full_month();
        let payslip = run(&input(&structure, &attendance));

        let rules: Vec<&str> = payslip
            .audit_trace
            .steps
            .iter()
            .map(|step| step.rule_id.as_str())
            .collect();
        assert_eq!(
            rules,
            vec![
                "paid_days",
                "pro_rated_earnings",
                "employee_pf",
                "employee_esi",
                "professional_tax",
                "income_tax",
                "payroll_totals"
            ]
        );
    }
}
