//! Salary structure resolution.
//!
//! This module turns a basic salary plus a selection of salary components
//! into resolved per-component amounts and the gross, net, and CTC totals.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ComponentCatalog, StatutoryPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, CalculationType, ComponentType, MONTHS_PER_YEAR, ResolvedComponent, SalaryBreakdown,
    SalaryComponent,
};

use super::amount::{checked_sum, percent_of};
use super::dependency::{BaseRef, DependencyGraph};
use super::statutory::employer_contributions;

/// Resolves salary selections against a statutory policy.
///
/// The resolver holds no state besides its policy; every call to
/// [`SalaryResolver::resolve`] is independent and deterministic.
#[derive(Debug, Clone, Default)]
pub struct SalaryResolver {
    policy: StatutoryPolicy,
}

impl SalaryResolver {
    /// Creates a resolver with the given statutory policy.
    pub fn new(policy: StatutoryPolicy) -> Self {
        Self { policy }
    }

    /// Returns the statutory policy in use.
    pub fn policy(&self) -> &StatutoryPolicy {
        &self.policy
    }

    /// Resolves a basic salary and a selection of components into a breakdown.
    ///
    /// Components are resolved in dependency order:
    /// - flat components resolve to their value;
    /// - percentages of `BASIC` resolve to `basic * value / 100`;
    /// - percentages of another selected component use that component's resolved amount;
    /// - percentages of `GROSS` use basic plus all earnings.
    ///
    /// A percentage whose base is missing, and any negative value, resolves to zero
    /// and records an audit warning instead of failing. A selected `BASIC`
    /// component resolves to `basic` and is not counted twice in gross.
    ///
    /// `gross = basic + earnings`, `net = gross - deductions`,
    /// `ctc = gross + employer contributions`, `annual_ctc = ctc * 12`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidAmount`] if `basic` is negative.
    /// - [`EngineError::CircularReference`] if component bases form a cycle.
    /// - [`EngineError::InvalidAmount`] if an amount or total leaves the
    ///   decimal range.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::calculation::SalaryResolver;
    /// use salary_engine::models::{ComponentType, SalaryComponent};
    /// use rust_decimal::Decimal;
    ///
    /// let hra = Decimal::from(40);
    /// let pf = Decimal::from(1800);
    /// let selection = vec![
    ///     SalaryComponent::percentage("2", "HRA", "HRA", ComponentType::Earning, hra, "BASIC"),
    ///     SalaryComponent::flat("7", "PF", "PF_EMPLOYEE", ComponentType::Deduction, pf),
    /// ];
    /// let breakdown = SalaryResolver::default()
    ///     .resolve(Decimal::from(30000), &selection)
    ///     .unwrap();
    ///
    /// assert_eq!(breakdown.amount_of("HRA"), Some(Decimal::from(12000)));
    /// assert_eq!(breakdown.gross, Decimal::from(42000));
    /// assert_eq!(breakdown.net, Decimal::from(40200));
    /// assert_eq!(breakdown.annual_ctc, Decimal::from(504000));
    /// ```
    pub fn resolve(
        &self,
        basic: Decimal,
        selected: &[SalaryComponent],
    ) -> EngineResult<SalaryBreakdown> {
        if basic < Decimal::ZERO {
            return Err(EngineError::InvalidAmount {
                field: "basic_salary".to_string(),
                message: format!("must not be negative, got {}", basic),
            });
        }

        let graph = DependencyGraph::build(selected);
        let order = graph.order()?;
        let mut pass = ResolutionPass::new(basic, selected);

        for index in order {
            let amount = pass.resolve_one(index, graph.base_of(index))?;
            pass.amounts[index] = Some(amount);
        }

        let gross = pass.gross()?;
        let ResolutionPass { amounts, mut trace, .. } = pass;

        let components: Vec<ResolvedComponent> = selected
            .iter()
            .zip(&amounts)
            .map(|(component, amount)| ResolvedComponent {
                id: component.id.clone(),
                code: component.code.clone(),
                name: component.name.clone(),
                component_type: component.component_type,
                calculation_type: component.calculation_type,
                value: component.value,
                base_component: component.base_component.clone(),
                amount: amount.unwrap_or(Decimal::ZERO),
                is_statutory: component.is_statutory,
            })
            .collect();

        let total_deductions = checked_sum(
            components
                .iter()
                .filter(|c| c.component_type == ComponentType::Deduction)
                .map(|c| c.amount),
        )
        .ok_or_else(|| overflow("total deductions"))?;
        let net = gross
            .checked_sub(total_deductions)
            .ok_or_else(|| overflow("net salary"))?;

        let employer_contributions = employer_contributions(basic, gross, &self.policy)?;
        let contributions_total = checked_sum(employer_contributions.iter().map(|c| c.amount))
            .ok_or_else(|| overflow("employer contributions"))?;
        let ctc = gross
            .checked_add(contributions_total)
            .ok_or_else(|| overflow("CTC"))?;
        let annual_ctc = ctc
            .checked_mul(Decimal::from(MONTHS_PER_YEAR))
            .ok_or_else(|| overflow("annual CTC"))?;

        trace.push_step(
            "salary_totals",
            "Salary Totals",
            serde_json::json!({
                "basic": basic.normalize().to_string(),
                "components": selected.len(),
                "employer_contributions": contributions_total.normalize().to_string()
            }),
            serde_json::json!({
                "gross": gross.normalize().to_string(),
                "total_deductions": total_deductions.normalize().to_string(),
                "net": net.normalize().to_string(),
                "ctc": ctc.normalize().to_string(),
                "annual_ctc": annual_ctc.normalize().to_string()
            }),
            format!(
                "Gross {} - deductions {} = net {}; CTC {} x {} = {}",
                gross.normalize(),
                total_deductions.normalize(),
                net.normalize(),
                ctc.normalize(),
                MONTHS_PER_YEAR,
                annual_ctc.normalize()
            ),
        );

        debug!(
            basic = %basic,
            components = selected.len(),
            gross = %gross,
            net = %net,
            ctc = %ctc,
            warnings = trace.warnings.len(),
            "Resolved salary structure"
        );

        Ok(SalaryBreakdown {
            basic,
            components,
            gross,
            total_deductions,
            net,
            employer_contributions,
            ctc,
            annual_ctc,
            audit_trace: trace,
        })
    }

    /// Selects `codes` from `catalog` and resolves them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ComponentNotFound`] for the first unknown code,
    /// plus any error from [`SalaryResolver::resolve`].
    pub fn resolve_codes<S: AsRef<str>>(
        &self,
        basic: Decimal,
        catalog: &ComponentCatalog,
        codes: &[S],
    ) -> EngineResult<SalaryBreakdown> {
        let selected = catalog.select(codes)?;
        self.resolve(basic, &selected)
    }
}

/// Working state while one selection is resolved in dependency order.
struct ResolutionPass<'a> {
    basic: Decimal,
    selected: &'a [SalaryComponent],
    amounts: Vec<Option<Decimal>>,
    // Earnings never depend on GROSS, so once read it stays fixed
    gross: Option<Decimal>,
    trace: AuditTrace,
}

impl<'a> ResolutionPass<'a> {
    fn new(basic: Decimal, selected: &'a [SalaryComponent]) -> Self {
        Self {
            basic,
            selected,
            amounts: vec![None; selected.len()],
            gross: None,
            trace: AuditTrace::default(),
        }
    }

    /// Basic plus every resolved earning other than the basic anchor.
    fn gross(&mut self) -> EngineResult<Decimal> {
        if let Some(gross) = self.gross {
            return Ok(gross);
        }

        let earnings = self
            .selected
            .iter()
            .zip(&self.amounts)
            .filter(|(c, _)| c.is_earning() && !c.is_basic())
            .filter_map(|(_, amount)| *amount);
        let gross = checked_sum(std::iter::once(self.basic).chain(earnings))
            .ok_or_else(|| overflow("gross salary"))?;
        self.gross = Some(gross);
        Ok(gross)
    }

    fn resolve_one(&mut self, index: usize, base: BaseRef) -> EngineResult<Decimal> {
        let selected = self.selected;
        let component = &selected[index];
        let basic = self.basic;

        if component.is_basic() {
            self.trace.push_step(
                "basic_anchor",
                "Basic Salary Anchor",
                serde_json::json!({
                    "code": component.code,
                    "basic": basic.normalize().to_string()
                }),
                serde_json::json!({ "amount": basic.normalize().to_string() }),
                format!(
                    "{} is the basic salary anchor: {}",
                    component.code,
                    basic.normalize()
                ),
            );
            return Ok(basic);
        }

        if component.value < Decimal::ZERO {
            self.trace.warn(
                "NEGATIVE_VALUE",
                format!(
                    "Component {} has negative value {}; resolved to 0",
                    component.code, component.value
                ),
                "medium",
            );
            return Ok(Decimal::ZERO);
        }

        let (rule_id, rule_name, base_label, base_amount) =
            match (component.calculation_type, base) {
                (CalculationType::Flat, _) => {
                    self.trace.push_step(
                        "flat_component",
                        "Flat Component",
                        serde_json::json!({
                            "code": component.code,
                            "value": component.value.normalize().to_string()
                        }),
                        serde_json::json!({ "amount": component.value.normalize().to_string() }),
                        format!("{} is a flat {}", component.code, component.value.normalize()),
                    );
                    return Ok(component.value);
                }
                (CalculationType::Percentage, BaseRef::Basic) => {
                    ("percentage_of_basic", "Percentage of Basic", "BASIC".to_string(), basic)
                }
                (CalculationType::Percentage, BaseRef::Gross) => (
                    "percentage_of_gross",
                    "Percentage of Gross",
                    "GROSS".to_string(),
                    self.gross()?,
                ),
                (CalculationType::Percentage, BaseRef::Component(base_index)) => (
                    "percentage_of_component",
                    "Percentage of Component",
                    selected[base_index].code.clone(),
                    self.amounts[base_index].unwrap_or(Decimal::ZERO),
                ),
                (CalculationType::Percentage, BaseRef::Missing | BaseRef::None) => {
                    let reference = component.base_component.as_deref().unwrap_or("<none>");
                    self.trace.warn(
                        "UNRESOLVED_BASE",
                        format!(
                            "Component {} is a percentage of '{}', which is not selected; \
                             resolved to 0",
                            component.code, reference
                        ),
                        "low",
                    );
                    return Ok(Decimal::ZERO);
                }
            };

        let amount = percent_of(base_amount, component.value)
            .ok_or_else(|| overflow(&format!("component {}", component.code)))?;
        self.trace.push_step(
            rule_id,
            rule_name,
            serde_json::json!({
                "code": component.code,
                "base_component": base_label,
                "base_amount": base_amount.normalize().to_string(),
                "percentage": component.value.normalize().to_string()
            }),
            serde_json::json!({ "amount": amount.normalize().to_string() }),
            format!(
                "{}% of {} ({}) = {}",
                component.value.normalize(),
                base_label,
                base_amount.normalize(),
                amount.normalize()
            ),
        );
        Ok(amount)
    }
}

fn overflow(quantity: &str) -> EngineError {
    EngineError::overflow("basic_salary", quantity)
}

/// Resolves a selection with the default policy, where CTC equals gross.
///
/// See [`SalaryResolver::resolve`].
pub fn resolve(basic: Decimal, selected: &[SalaryComponent]) -> EngineResult<SalaryBreakdown> {
    SalaryResolver::default().resolve(basic, selected)
}
