//! Payroll run and income tax models.
//!
//! A [`Payslip`] is what one monthly payroll run produces for one employee:
//! earnings pro-rated by attendance, statutory and structure deductions, and
//! the employer contributions paid on top.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, EmployerContribution};

/// Income tax regime the employee has opted into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Concessional slabs with a higher standard deduction.
    #[default]
    New,
    /// Older slabs; the exemption limit rises for senior citizens.
    Old,
}

impl TaxRegime {
    /// Returns the regime label as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::New => "new",
            TaxRegime::Old => "old",
        }
    }
}

/// What the income tax estimate needs to know about an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxProfile {
    /// The chosen regime.
    #[serde(default)]
    pub regime: TaxRegime,
    /// Age in years; 60 and above raises the old-regime exemption limit.
    #[serde(default = "default_age")]
    pub age: u32,
}

fn default_age() -> u32 {
    30
}

impl Default for TaxProfile {
    fn default() -> Self {
        Self {
            regime: TaxRegime::default(),
            age: default_age(),
        }
    }
}

/// Annual income tax worked out from slabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAssessment {
    /// The regime the slabs came from.
    pub regime: TaxRegime,
    /// Annual gross income before the standard deduction.
    pub gross_income: Decimal,
    /// The standard deduction applied.
    pub standard_deduction: Decimal,
    /// `max(0, gross_income - standard_deduction)`.
    pub taxable_income: Decimal,
    /// Slab tax after the section 87A rebate.
    pub tax: Decimal,
    /// Health and education cess on `tax`.
    pub cess: Decimal,
    /// `tax + cess`.
    pub total: Decimal,
    /// `total / 12`, rounded to two decimal places. This is the monthly TDS.
    pub monthly: Decimal,
}

/// Which statutory deductions and contributions a payroll run applies.
///
/// Everything is on unless switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatutoryFlags {
    /// Employee provident fund.
    pub pf_enabled: bool,
    /// Employee state insurance.
    pub esi_enabled: bool,
    /// Professional tax.
    pub pt_enabled: bool,
    /// Income tax deducted at source.
    pub tds_enabled: bool,
    /// Employer provident fund.
    pub employer_pf_enabled: bool,
    /// Employer state insurance.
    pub employer_esi_enabled: bool,
}

impl Default for StatutoryFlags {
    fn default() -> Self {
        Self {
            pf_enabled: true,
            esi_enabled: true,
            pt_enabled: true,
            tds_enabled: true,
            employer_pf_enabled: true,
            employer_esi_enabled: true,
        }
    }
}

/// One earning or deduction on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// Component or statutory code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Amount for the month, rounded to two decimal places.
    pub amount: Decimal,
}

/// The outcome of a monthly payroll run for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee paid.
    pub employee_id: String,
    /// Pay month, 1 to 12.
    pub month: u32,
    /// Pay year.
    pub year: i32,
    /// Calendar days in the pay month.
    pub days_in_month: u32,
    /// Paid days from attendance, capped at `days_in_month`.
    pub paid_days: Decimal,
    /// `days_in_month - paid_days`.
    pub absent_days: Decimal,
    /// Pro-rated earnings; zero lines are left out.
    pub earnings: Vec<PayslipLine>,
    /// Sum of `earnings`.
    pub gross_earnings: Decimal,
    /// Statutory and structure deductions; zero lines are left out.
    pub deductions: Vec<PayslipLine>,
    /// Sum of `deductions`.
    pub total_deductions: Decimal,
    /// `gross_earnings - total_deductions`.
    pub net_pay: Decimal,
    /// Employer PF and ESI for the month.
    pub employer_contributions: Vec<EmployerContribution>,
    /// How each figure was reached.
    pub audit_trace: AuditTrace,
}

impl Payslip {
    /// Returns the deduction with the given code, if present.
    pub fn deduction(&self, code: &str) -> Option<Decimal> {
        self.deductions
            .iter()
            .find(|line| line.code == code)
            .map(|line| line.amount)
    }

    /// Returns the earning with the given code, if present.
    pub fn earning(&self, code: &str) -> Option<Decimal> {
        self.earnings
            .iter()
            .find(|line| line.code == code)
            .map(|line| line.amount)
    }
}
