//! Core data models for the Salary Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod breakdown;
mod ewa;
mod leave;
mod payroll;
mod salary_component;
mod salary_structure;

pub use breakdown::{
    AuditStep, AuditTrace, AuditWarning, EmployerContribution, MONTHS_PER_YEAR, ResolvedComponent,
    SalaryBreakdown,
};
pub use ewa::{AttendanceRecord, AttendanceStatus, EwaBalance, EwaStatus, EwaWithdrawal};
pub use leave::{LeaveApplication, LeaveBalance, LeaveStatus, LeaveType};
pub use payroll::{Payslip, PayslipLine, StatutoryFlags, TaxAssessment, TaxProfile, TaxRegime};
pub use salary_component::{
    BASIC_ANCHOR, CalculationType, ComponentType, GROSS_ANCHOR, SalaryComponent,
};
pub use salary_structure::SalaryStructure;
