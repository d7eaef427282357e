//! Saved salary structure model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SalaryBreakdown, SalaryComponent};

/// A named salary structure, optionally assigned to an employee.
///
/// Structures snapshot the totals of the breakdown they were built from so
/// they can be listed without re-resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// Unique identifier for this structure.
    pub id: Uuid,
    /// Display name (e.g. "Engineering L2").
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The employee this structure is assigned to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// The basic salary anchor.
    pub basic: Decimal,
    /// The selected components.
    pub components: Vec<SalaryComponent>,
    /// Monthly cost to company.
    pub ctc: Decimal,
    /// Monthly gross salary.
    pub gross: Decimal,
    /// Monthly net salary.
    pub net: Decimal,
    /// The date from which the structure applies.
    pub effective_from: NaiveDate,
    /// Whether the structure is currently in use.
    pub is_active: bool,
    /// When the structure was created.
    pub created_at: DateTime<Utc>,
}

impl SalaryStructure {
    /// Builds an active structure from a resolved breakdown and the selection it came from.
    pub fn from_breakdown(
        name: impl Into<String>,
        components: Vec<SalaryComponent>,
        breakdown: &SalaryBreakdown,
        effective_from: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            employee_id: None,
            basic: breakdown.basic,
            components,
            ctc: breakdown.ctc,
            gross: breakdown.gross,
            net: breakdown.net,
            effective_from,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Assigns the structure to an employee.
    pub fn for_employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    /// Returns true if the structure is active and in effect on `date`.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.is_active && self.effective_from <= date
    }
}
