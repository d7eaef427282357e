//! Salary breakdown models for the Salary Engine.
//!
//! This module contains the [`SalaryBreakdown`] type and its associated structures
//! that capture all outputs from resolving a salary structure, including
//! per-component amounts, employer contributions, totals, and audit traces.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CalculationType, ComponentType};

/// Number of pay months in a year, used to annualise CTC.
pub const MONTHS_PER_YEAR: u32 = 12;

/// A component together with the amount it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedComponent {
    /// The ID of the source component.
    pub id: String,
    /// The code of the source component.
    pub code: String,
    /// The display name of the source component.
    pub name: String,
    /// Earning or deduction.
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// How the amount was derived.
    pub calculation_type: CalculationType,
    /// The configured value (amount or percentage).
    pub value: Decimal,
    /// The base used for a percentage, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_component: Option<String>,
    /// The resolved monthly amount.
    pub amount: Decimal,
    /// Whether the component is statutory. Display only.
    pub is_statutory: bool,
}

/// An employer-side statutory contribution that increases CTC but not gross.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContribution {
    /// Contribution code (e.g. "PF_EMPLOYER").
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// The wages the rate was applied to.
    pub wages: Decimal,
    /// The rate as a percentage.
    pub rate: Decimal,
    /// The monthly contribution amount.
    pub amount: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate input that was tolerated (for example, a missing base
/// component resolving to zero) but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the existing steps.
    pub fn push_step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }
}

/// The complete result of resolving a salary structure.
///
/// All amounts are monthly except `annual_ctc`.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::resolve;
/// use salary_engine::models::{ComponentType, SalaryComponent};
/// use rust_decimal::Decimal;
///
/// let forty = Decimal::from(40);
/// let earning = ComponentType::Earning;
/// let hra = SalaryComponent::percentage("2", "HRA", "HRA", earning, forty, "BASIC");
/// let breakdown = resolve(Decimal::from(30000), &[hra]).unwrap();
/// assert_eq!(breakdown.gross, Decimal::from(42000));
/// assert_eq!(breakdown.annual_ctc, Decimal::from(504000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// The basic salary used as the anchor.
    pub basic: Decimal,
    /// Every selected component with its resolved amount, in selection order.
    pub components: Vec<ResolvedComponent>,
    /// Basic plus all earnings.
    pub gross: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Gross minus deductions.
    pub net: Decimal,
    /// Employer-side contributions included in CTC.
    pub employer_contributions: Vec<EmployerContribution>,
    /// Monthly cost to company.
    pub ctc: Decimal,
    /// Monthly CTC multiplied by twelve.
    pub annual_ctc: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl SalaryBreakdown {
    /// Returns the resolved amount for a component code, if it was selected.
    pub fn amount_of(&self, code: &str) -> Option<Decimal> {
        self.components
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.amount)
    }

    /// Returns all resolved earnings.
    pub fn earnings(&self) -> impl Iterator<Item = &ResolvedComponent> {
        self.components
            .iter()
            .filter(|c| c.component_type == ComponentType::Earning)
    }

    /// Returns all resolved deductions.
    pub fn deductions(&self) -> impl Iterator<Item = &ResolvedComponent> {
        self.components
            .iter()
            .filter(|c| c.component_type == ComponentType::Deduction)
    }
}
