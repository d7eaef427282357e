//! Salary component model and related types.
//!
//! This module defines the [`SalaryComponent`] struct along with the
//! [`ComponentType`] and [`CalculationType`] enums that describe how each
//! earning or deduction in a salary structure is valued.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Anchor reference for percentages of the basic salary.
pub const BASIC_ANCHOR: &str = "BASIC";

/// Anchor reference for percentages of the resolved gross salary.
pub const GROSS_ANCHOR: &str = "GROSS";

/// Whether a component adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// Adds to gross pay (e.g. HRA, conveyance).
    Earning,
    /// Subtracts from gross pay to reach net pay (e.g. provident fund).
    Deduction,
}

/// How a component's amount is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    /// A fixed currency amount.
    #[serde(alias = "fixed")]
    Flat,
    /// A percentage (0-100) of a base component.
    Percentage,
}

/// A single earning or deduction line that can be selected into a salary structure.
///
/// # Example
///
/// ```
/// use salary_engine::models::{CalculationType, ComponentType, SalaryComponent};
/// use rust_decimal::Decimal;
///
/// let hra = SalaryComponent::percentage(
///     "2",
///     "House Rent Allowance",
///     "HRA",
///     ComponentType::Earning,
///     Decimal::from(40),
///     "BASIC",
/// );
/// assert_eq!(hra.calculation_type, CalculationType::Percentage);
/// assert_eq!(hra.base_component.as_deref(), Some("BASIC"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Unique identifier for the component.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Short reference key used by other components' `base_component`.
    pub code: String,
    /// Earning or deduction.
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Flat amount or percentage of a base.
    pub calculation_type: CalculationType,
    /// The amount (flat) or percentage (0-100).
    pub value: Decimal,
    /// Reference used as the percentage base: another component's code or id,
    /// or one of the `BASIC` / `GROSS` anchors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_component: Option<String>,
    /// Whether the component is mandated by law. Display only.
    #[serde(default)]
    pub is_statutory: bool,
    /// Whether the component is subject to income tax. Display only.
    #[serde(default)]
    pub is_taxable: bool,
    /// Whether the component counts toward PF wages. Display only.
    #[serde(default)]
    pub is_pf_applicable: bool,
    /// Whether the component counts toward ESI wages. Display only.
    #[serde(default)]
    pub is_esi_applicable: bool,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SalaryComponent {
    /// Creates a flat-amount component with all display flags cleared.
    pub fn flat(
        id: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
        component_type: ComponentType,
        value: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            component_type,
            calculation_type: CalculationType::Flat,
            value,
            base_component: None,
            is_statutory: false,
            is_taxable: false,
            is_pf_applicable: false,
            is_esi_applicable: false,
            description: None,
        }
    }

    /// Creates a percentage component computed against `base`.
    pub fn percentage(
        id: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
        component_type: ComponentType,
        value: Decimal,
        base: impl Into<String>,
    ) -> Self {
        Self {
            calculation_type: CalculationType::Percentage,
            base_component: Some(base.into()),
            ..Self::flat(id, name, code, component_type, value)
        }
    }

    /// Marks the component as statutory.
    pub fn statutory(mut self) -> Self {
        self.is_statutory = true;
        self
    }

    /// Returns true if this component is an earning.
    pub fn is_earning(&self) -> bool {
        self.component_type == ComponentType::Earning
    }

    /// Returns true if this component is a deduction.
    pub fn is_deduction(&self) -> bool {
        self.component_type == ComponentType::Deduction
    }

    /// Returns true if this component is the basic-salary anchor itself.
    ///
    /// Only an earning coded `BASIC` is the anchor; a deduction with that
    /// code is an ordinary deduction.
    pub fn is_basic(&self) -> bool {
        self.is_earning() && self.code.eq_ignore_ascii_case(BASIC_ANCHOR)
    }

    /// Returns true if `reference` names this component by code or id.
    pub fn matches(&self, reference: &str) -> bool {
        self.code == reference || self.id == reference
    }
}
