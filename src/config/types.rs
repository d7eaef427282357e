//! Configuration types for salary resolution.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the immutable
//! [`EngineConfig`] aggregate built from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{LeaveType, SalaryComponent};

use super::catalog::ComponentCatalog;

/// Catalog configuration file structure (`catalog.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// The predefined salary components.
    pub components: Vec<SalaryComponent>,
}

/// Leave type configuration file structure (`leave_types.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// The leave types offered.
    pub leave_types: Vec<LeaveType>,
}

/// Employer-side statutory contribution settings.
///
/// Employer contributions are excluded from CTC unless
/// `include_employer_contributions` is set, which keeps `ctc == gross`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryPolicy {
    /// Whether employer PF and ESI are added on top of gross to reach CTC.
    #[serde(default)]
    pub include_employer_contributions: bool,
    /// Employer PF rate as a percentage of basic.
    #[serde(default = "default_employer_pf_rate")]
    pub employer_pf_rate: Decimal,
    /// Employer ESI rate as a percentage of gross.
    #[serde(default = "default_employer_esi_rate")]
    pub employer_esi_rate: Decimal,
    /// ESI only applies while monthly gross is at or below this ceiling.
    #[serde(default = "default_esi_wage_ceiling")]
    pub esi_wage_ceiling: Decimal,
}

fn default_employer_pf_rate() -> Decimal {
    Decimal::from(12)
}

fn default_employer_esi_rate() -> Decimal {
    Decimal::new(325, 2)
}

fn default_esi_wage_ceiling() -> Decimal {
    Decimal::from(21000)
}

impl Default for StatutoryPolicy {
    fn default() -> Self {
        Self {
            include_employer_contributions: false,
            employer_pf_rate: default_employer_pf_rate(),
            employer_esi_rate: default_employer_esi_rate(),
            esi_wage_ceiling: default_esi_wage_ceiling(),
        }
    }
}

/// Earned wage access limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EwaPolicy {
    /// Share of earned wages (as a percentage) an employee may draw early.
    #[serde(default = "default_max_withdrawal_percent")]
    pub max_withdrawal_percent: Decimal,
}

fn default_max_withdrawal_percent() -> Decimal {
    Decimal::from(50)
}

impl Default for EwaPolicy {
    fn default() -> Self {
        Self {
            max_withdrawal_percent: default_max_withdrawal_percent(),
        }
    }
}

/// One professional tax band: `amount` is due once monthly gross exceeds `above`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTaxSlab {
    /// Gross must be strictly greater than this.
    pub above: Decimal,
    /// Monthly professional tax for the band.
    pub amount: Decimal,
}

/// Employee-side deductions applied by a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// Employee PF rate as a percentage of earned basic.
    #[serde(default = "default_employee_pf_rate")]
    pub employee_pf_rate: Decimal,
    /// Employee ESI rate as a percentage of earned gross.
    #[serde(default = "default_employee_esi_rate")]
    pub employee_esi_rate: Decimal,
    /// Professional tax bands. The highest band the gross exceeds applies.
    #[serde(default = "default_professional_tax")]
    pub professional_tax: Vec<ProfessionalTaxSlab>,
}

fn default_employee_pf_rate() -> Decimal {
    Decimal::from(12)
}

fn default_employee_esi_rate() -> Decimal {
    Decimal::new(75, 2)
}

// Tamil Nadu monthly slabs
fn default_professional_tax() -> Vec<ProfessionalTaxSlab> {
    [(12500, 250), (10000, 150), (7500, 100)]
        .into_iter()
        .map(|(above, amount)| ProfessionalTaxSlab {
            above: Decimal::from(above),
            amount: Decimal::from(amount),
        })
        .collect()
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            employee_pf_rate: default_employee_pf_rate(),
            employee_esi_rate: default_employee_esi_rate(),
            professional_tax: default_professional_tax(),
        }
    }
}

impl PayrollPolicy {
    /// Professional tax due on a monthly gross; zero below every band.
    pub fn professional_tax_for(&self, gross: Decimal) -> Decimal {
        self.professional_tax
            .iter()
            .filter(|slab| gross > slab.above)
            .max_by(|a, b| a.above.cmp(&b.above))
            .map(|slab| slab.amount)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Policy configuration file structure (`policy.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnginePolicy {
    /// Statutory contribution settings.
    #[serde(default)]
    pub statutory: StatutoryPolicy,
    /// Earned wage access settings.
    #[serde(default)]
    pub ewa: EwaPolicy,
    /// Payroll run deductions.
    #[serde(default)]
    pub payroll: PayrollPolicy,
}

/// The complete engine configuration.
///
/// Constructed once and passed by reference; nothing in it changes at runtime.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    catalog: ComponentCatalog,
    leave_types: Vec<LeaveType>,
    policy: EnginePolicy,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        catalog: ComponentCatalog,
        leave_types: Vec<LeaveType>,
        policy: EnginePolicy,
    ) -> Self {
        Self {
            catalog,
            leave_types,
            policy,
        }
    }

    /// Returns the component catalog.
    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    /// Returns the configured leave types.
    pub fn leave_types(&self) -> &[LeaveType] {
        &self.leave_types
    }

    /// Returns the engine policy.
    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }
}
