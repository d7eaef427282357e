//! Annual income tax estimation for TDS.
//!
//! Tax is charged band by band on taxable income, a section 87A rebate
//! removes it entirely for low incomes, and a 4% cess is added on top.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{MONTHS_PER_YEAR, TaxAssessment, TaxProfile, TaxRegime};

use super::amount::{checked_sum, percent_of};

/// Upper bound of a band (`None` for the top band) and its rate in percent.
type Band = (Option<i64>, i64);

const NEW_REGIME_BANDS: [Band; 6] = [
    (Some(300_000), 0),
    (Some(700_000), 5),
    (Some(1_000_000), 10),
    (Some(1_200_000), 15),
    (Some(1_500_000), 20),
    (None, 30),
];

const NEW_REGIME_REBATE_LIMIT: i64 = 700_000;
const OLD_REGIME_REBATE_LIMIT: i64 = 500_000;
const SENIOR_CITIZEN_AGE: u32 = 60;
const CESS_PERCENT: i64 = 4;

impl TaxRegime {
    /// Standard deduction from annual salary income.
    pub fn standard_deduction(&self) -> Decimal {
        match self {
            TaxRegime::New => Decimal::from(75_000),
            TaxRegime::Old => Decimal::from(50_000),
        }
    }

    fn bands(&self, age: u32) -> Vec<Band> {
        match self {
            TaxRegime::New => NEW_REGIME_BANDS.to_vec(),
            TaxRegime::Old => {
                let exempt = if age >= SENIOR_CITIZEN_AGE { 300_000 } else { 250_000 };
                vec![
                    (Some(exempt), 0),
                    (Some(500_000), 5),
                    (Some(1_000_000), 20),
                    (None, 30),
                ]
            }
        }
    }

    fn rebate_limit(&self) -> Decimal {
        match self {
            TaxRegime::New => Decimal::from(NEW_REGIME_REBATE_LIMIT),
            TaxRegime::Old => Decimal::from(OLD_REGIME_REBATE_LIMIT),
        }
    }
}

/// Slab tax on `taxable_income` after the 87A rebate, before cess.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] if the tax overflows.
pub fn slab_tax(taxable_income: Decimal, profile: &TaxProfile) -> EngineResult<Decimal> {
    let regime = profile.regime;
    if taxable_income <= regime.rebate_limit() {
        return Ok(Decimal::ZERO);
    }

    let mut lower = Decimal::ZERO;
    let mut charges = Vec::new();
    for (upper, rate) in regime.bands(profile.age) {
        if taxable_income <= lower {
            break;
        }
        let top = upper.map_or(taxable_income, |upper| taxable_income.min(Decimal::from(upper)));
        let charge = percent_of(top - lower, Decimal::from(rate)).ok_or_else(overflow)?;
        charges.push(charge);
        if let Some(upper) = upper {
            lower = Decimal::from(upper);
        }
    }

    checked_sum(charges).ok_or_else(overflow)
}

/// Total annual tax, cess included, on `taxable_income`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::income_tax;
/// use salary_engine::models::{TaxProfile, TaxRegime};
/// use rust_decimal::Decimal;
///
/// let new = TaxProfile::default();
/// assert_eq!(income_tax(Decimal::from(1_000_000), &new).unwrap(), Decimal::from(52_000));
/// // Rebated in full
/// assert_eq!(income_tax(Decimal::from(700_000), &new).unwrap(), Decimal::ZERO);
///
/// let old = TaxProfile { regime: TaxRegime::Old, age: 30 };
/// assert_eq!(income_tax(Decimal::from(1_000_000), &old).unwrap(), Decimal::from(117_000));
/// ```
pub fn income_tax(taxable_income: Decimal, profile: &TaxProfile) -> EngineResult<Decimal> {
    let tax = slab_tax(taxable_income, profile)?;
    let cess = percent_of(tax, Decimal::from(CESS_PERCENT)).ok_or_else(overflow)?;
    tax.checked_add(cess).ok_or_else(overflow)
}

/// Estimates a year's income tax on annual gross salary income.
///
/// The regime's standard deduction comes off first; the monthly figure is
/// what a payroll run withholds as TDS.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] if `gross_income` is negative or
/// the tax overflows.
pub fn assess_income_tax(
    gross_income: Decimal,
    profile: &TaxProfile,
) -> EngineResult<TaxAssessment> {
    if gross_income < Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            field: "annual_income".to_string(),
            message: format!("must not be negative, got {}", gross_income),
        });
    }

    let standard_deduction = profile.regime.standard_deduction();
    let taxable_income = (gross_income - standard_deduction).max(Decimal::ZERO);
    let tax = slab_tax(taxable_income, profile)?;
    let cess = percent_of(tax, Decimal::from(CESS_PERCENT)).ok_or_else(overflow)?;
    let total = tax.checked_add(cess).ok_or_else(overflow)?;
    let monthly = (total / Decimal::from(MONTHS_PER_YEAR))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(TaxAssessment {
        regime: profile.regime,
        gross_income,
        standard_deduction,
        taxable_income,
        tax,
        cess,
        total,
        monthly,
    })
}

fn overflow() -> EngineError {
    EngineError::overflow("annual_income", "income tax")
}
