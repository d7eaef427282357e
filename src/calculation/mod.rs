//! Calculation logic for the salary engine.
//!
//! Salary resolution orders percentage components by their bases and folds
//! them into gross, net and CTC totals. Payroll runs, income tax, leave
//! balances and earned wage access build on the same models.

mod amount;
mod dependency;
mod ewa;
mod income_tax;
mod leave_balance;
mod payroll;
mod resolver;
mod statutory;

pub use dependency::{BaseRef, DependencyGraph};
pub use ewa::{EarningsSnapshot, EwaLedger, calculate_available_balance, days_in_month};
pub use income_tax::{assess_income_tax, income_tax, slab_tax};
pub use leave_balance::{leave_balances, leaves_by_employee, pending_leaves};
pub use payroll::{ESI_CODE, PF_CODE, PT_CODE, PayrollInput, TDS_CODE, run_payroll};
pub use resolver::{SalaryResolver, resolve};
pub use statutory::{
    EMPLOYER_ESI_CODE, EMPLOYER_PF_CODE, employer_contributions, employer_esi, employer_pf,
};
