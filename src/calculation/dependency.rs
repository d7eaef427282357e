//! Dependency ordering for percentage-based salary components.
//!
//! A percentage component depends on whatever its `base_component` names:
//! the basic anchor, the gross anchor, or another selected component.
//! Components must be resolved after everything they depend on, so this
//! module builds that graph and orders it topologically, rejecting cycles.
//!
//! The gross anchor is modelled as a virtual node that depends on every
//! earning, which makes an earning based on gross (directly or through a
//! chain) a cycle.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{BASIC_ANCHOR, CalculationType, GROSS_ANCHOR, SalaryComponent};

/// What a component's amount is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseRef {
    /// Flat components and the basic anchor itself have no base.
    None,
    /// A percentage of the basic salary.
    Basic,
    /// A percentage of the resolved gross salary.
    Gross,
    /// A percentage of another selected component, by index.
    Component(usize),
    /// A percentage whose base is absent or names nothing in the selection.
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Active,
    Done,
}

/// The base references of a selection, indexed like the selection itself.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::DependencyGraph;
/// use salary_engine::models::{ComponentType, SalaryComponent};
/// use rust_decimal::Decimal;
///
/// let earning = ComponentType::Earning;
/// let selection = vec![
///     SalaryComponent::percentage("b", "Bonus", "BONUS", earning, Decimal::from(10), "HRA"),
///     SalaryComponent::percentage("h", "HRA", "HRA", earning, Decimal::from(40), "BASIC"),
/// ];
/// let order = DependencyGraph::build(&selection).order().unwrap();
/// assert_eq!(order, vec![1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    components: &'a [SalaryComponent],
    bases: Vec<BaseRef>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds the graph for a selection.
    ///
    /// A reference resolves to the first selected component whose code or id
    /// equals it.
    pub fn build(components: &'a [SalaryComponent]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(components.len() * 2);
        for (i, component) in components.iter().enumerate() {
            index.entry(component.code.as_str()).or_insert(i);
            index.entry(component.id.as_str()).or_insert(i);
        }

        let bases = components
            .iter()
            .map(|component| Self::base_ref(component, &index))
            .collect();
        Self { components, bases }
    }

    fn base_ref(component: &SalaryComponent, index: &HashMap<&str, usize>) -> BaseRef {
        if component.is_basic() || component.calculation_type == CalculationType::Flat {
            return BaseRef::None;
        }

        match component.base_component.as_deref() {
            None => BaseRef::Missing,
            Some(BASIC_ANCHOR) => BaseRef::Basic,
            Some(GROSS_ANCHOR) => BaseRef::Gross,
            Some(reference) => index
                .get(reference)
                .copied()
                .map_or(BaseRef::Missing, BaseRef::Component),
        }
    }

    /// Returns the base reference of the component at `index`.
    pub fn base_of(&self, index: usize) -> BaseRef {
        self.bases.get(index).copied().unwrap_or(BaseRef::None)
    }

    /// Returns component indices such that every component comes after its base.
    ///
    /// Components with no ordering constraint between them keep their
    /// selection order. The walk uses an explicit stack, so chain length is
    /// bounded by memory rather than by the thread's call stack.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CircularReference`] naming the cycle if the
    /// references loop back on themselves.
    pub fn order(&self) -> EngineResult<Vec<usize>> {
        let len = self.components.len();
        let mut visits = vec![Visit::New; len + 1];
        let mut order = Vec::with_capacity(len + 1);
        // (node, its dependencies, next dependency to visit)
        let mut stack: Vec<(usize, Vec<usize>, usize)> = Vec::new();

        for root in 0..len {
            if visits[root] != Visit::New {
                continue;
            }
            visits[root] = Visit::Active;
            stack.push((root, self.dependencies(root), 0));

            while let Some((node, dependencies, next)) = stack.last_mut() {
                let Some(&dependency) = dependencies.get(*next) else {
                    visits[*node] = Visit::Done;
                    order.push(*node);
                    stack.pop();
                    continue;
                };
                *next += 1;

                match visits[dependency] {
                    Visit::Done => {}
                    Visit::Active => return Err(self.cycle(&stack, dependency)),
                    Visit::New => {
                        visits[dependency] = Visit::Active;
                        stack.push((dependency, self.dependencies(dependency), 0));
                    }
                }
            }
        }

        order.retain(|&node| node < len);
        Ok(order)
    }

    fn cycle(&self, stack: &[(usize, Vec<usize>, usize)], repeated: usize) -> EngineError {
        let start = stack
            .iter()
            .position(|(node, _, _)| *node == repeated)
            .unwrap_or(0);
        let mut path: Vec<String> = stack[start..]
            .iter()
            .map(|(node, _, _)| self.label(*node))
            .collect();
        path.push(self.label(repeated));
        EngineError::CircularReference { path }
    }

    fn dependencies(&self, node: usize) -> Vec<usize> {
        let gross_node = self.components.len();
        if node == gross_node {
            return self
                .components
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_earning() && !c.is_basic())
                .map(|(i, _)| i)
                .collect();
        }

        match self.bases[node] {
            BaseRef::Component(index) => vec![index],
            BaseRef::Gross => vec![gross_node],
            BaseRef::None | BaseRef::Basic | BaseRef::Missing => Vec::new(),
        }
    }

    fn label(&self, node: usize) -> String {
        self.components
            .get(node)
            .map_or_else(|| GROSS_ANCHOR.to_string(), |c| c.code.clone())
    }
}
