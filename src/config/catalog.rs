//! The immutable catalog of predefined salary components.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{ComponentType, GROSS_ANCHOR, SalaryComponent};

/// The set of components a salary structure can be built from.
///
/// # Example
///
/// ```
/// use salary_engine::config::ComponentCatalog;
///
/// let catalog = ComponentCatalog::standard();
/// let hra = catalog.get("HRA").unwrap();
/// assert_eq!(hra.name, "House Rent Allowance");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentCatalog {
    components: Vec<SalaryComponent>,
}

impl ComponentCatalog {
    /// Creates a catalog from a list of components, preserving order.
    pub fn new(components: Vec<SalaryComponent>) -> Self {
        Self { components }
    }

    /// The built-in Indian salary components.
    pub fn standard() -> Self {
        use ComponentType::{Deduction, Earning};

        let mut basic = SalaryComponent::flat("1", "Basic Salary", "BASIC", Earning, Decimal::ZERO);
        basic.is_taxable = true;
        basic.is_pf_applicable = true;
        basic.is_esi_applicable = true;

        let mut hra = SalaryComponent::percentage(
            "2",
            "House Rent Allowance",
            "HRA",
            Earning,
            Decimal::from(40),
            "BASIC",
        );
        hra.is_taxable = true;

        let mut da = SalaryComponent::percentage(
            "3",
            "Dearness Allowance",
            "DA",
            Earning,
            Decimal::from(20),
            "BASIC",
        );
        da.is_taxable = true;
        da.is_pf_applicable = true;
        da.is_esi_applicable = true;

        let conveyance = SalaryComponent::flat(
            "4",
            "Conveyance Allowance",
            "CONVEYANCE",
            Earning,
            Decimal::from(1600),
        );
        let medical = SalaryComponent::flat(
            "5",
            "Medical Allowance",
            "MEDICAL",
            Earning,
            Decimal::from(1250),
        );

        let mut special =
            SalaryComponent::flat("6", "Special Allowance", "SPECIAL", Earning, Decimal::ZERO);
        special.is_taxable = true;

        let pf = SalaryComponent::percentage(
            "7",
            "Provident Fund (Employee)",
            "PF_EMPLOYEE",
            Deduction,
            Decimal::from(12),
            "BASIC",
        )
        .statutory();
        let esi = SalaryComponent::percentage(
            "8",
            "ESI (Employee)",
            "ESI_EMPLOYEE",
            Deduction,
            Decimal::new(75, 2),
            GROSS_ANCHOR,
        )
        .statutory();
        let pt = SalaryComponent::flat("9", "Professional Tax", "PT", Deduction, Decimal::from(200))
            .statutory();
        let tds = SalaryComponent::flat("10", "Income Tax (TDS)", "TDS", Deduction, Decimal::ZERO)
            .statutory();

        Self::new(vec![
            basic, hra, da, conveyance, medical, special, pf, esi, pt, tds,
        ])
    }

    /// Returns all components in catalog order.
    pub fn components(&self) -> &[SalaryComponent] {
        &self.components
    }

    /// Returns the earning components.
    pub fn earnings(&self) -> impl Iterator<Item = &SalaryComponent> {
        self.components.iter().filter(|c| c.is_earning())
    }

    /// Returns the deduction components.
    pub fn deductions(&self) -> impl Iterator<Item = &SalaryComponent> {
        self.components.iter().filter(|c| c.is_deduction())
    }

    /// Looks up a component by code or id.
    pub fn get(&self, code: &str) -> EngineResult<&SalaryComponent> {
        self.components
            .iter()
            .find(|c| c.matches(code))
            .ok_or_else(|| EngineError::ComponentNotFound {
                code: code.to_string(),
            })
    }

    /// Clones the named components, in the order given, into a selection.
    ///
    /// Fails on the first code that is not in the catalog.
    pub fn select<S: AsRef<str>>(&self, codes: &[S]) -> EngineResult<Vec<SalaryComponent>> {
        codes
            .iter()
            .map(|code| self.get(code.as_ref()).cloned())
            .collect()
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the catalog has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalculationType;

    #[test]
    fn test_standard_catalog_has_ten_components() {
        let catalog = ComponentCatalog::standard();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.earnings().count(), 6);
        assert_eq!(catalog.deductions().count(), 4);
    }

    #[test]
    fn test_standard_esi_is_percentage_of_gross() {
        let catalog = ComponentCatalog::standard();
        let esi = catalog.get("ESI_EMPLOYEE").unwrap();
        assert_eq!(esi.calculation_type, CalculationType::Percentage);
        assert_eq!(esi.value, Decimal::new(75, 2));
        assert_eq!(esi.base_component.as_deref(), Some("GROSS"));
        assert!(esi.is_statutory);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = ComponentCatalog::standard();
        assert_eq!(catalog.get("7").unwrap().code, "PF_EMPLOYEE");
    }

    #[test]
    fn test_select_preserves_requested_order() {
        let catalog = ComponentCatalog::standard();
        let selection = catalog.select(&["PT", "HRA"]).unwrap();
        assert_eq!(selection[0].code, "PT");
        assert_eq!(selection[1].code, "HRA");
    }

    #[test]
    fn test_select_unknown_code_returns_error() {
        let catalog = ComponentCatalog::standard();
        match catalog.select(&["HRA", "LTA"]) {
            Err(EngineError::ComponentNotFound { code }) => assert_eq!(code, "LTA"),
            _ => panic!("Expected ComponentNotFound error"),
        }
    }
}
