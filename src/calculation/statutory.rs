//! Employer-side statutory contributions.
//!
//! Employer PF and ESI are paid on top of gross salary and therefore belong in
//! CTC, not in gross or net. They are only computed when the statutory policy
//! enables them.

use rust_decimal::Decimal;

use crate::config::StatutoryPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::EmployerContribution;

use super::amount::percent_of;

/// Contribution code for the employer's provident fund share.
pub const EMPLOYER_PF_CODE: &str = "PF_EMPLOYER";

/// Contribution code for the employer's ESI share.
pub const EMPLOYER_ESI_CODE: &str = "ESI_EMPLOYER";

/// Computes employer contributions for a monthly basic and gross.
///
/// Returns an empty list when `include_employer_contributions` is off.
/// Employer PF is a percentage of basic. Employer ESI is a percentage of
/// gross and only applies while gross is at or below the ESI wage ceiling.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] if a contribution overflows.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::employer_contributions;
/// use salary_engine::config::StatutoryPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = StatutoryPolicy { include_employer_contributions: true, ..Default::default() };
/// let contributions =
///     employer_contributions(Decimal::from(10000), Decimal::from(20000), &policy).unwrap();
/// assert_eq!(contributions[0].amount, Decimal::from(1200));
/// assert_eq!(contributions[1].amount, Decimal::from(650));
/// ```
pub fn employer_contributions(
    basic: Decimal,
    gross: Decimal,
    policy: &StatutoryPolicy,
) -> EngineResult<Vec<EmployerContribution>> {
    if !policy.include_employer_contributions {
        return Ok(Vec::new());
    }

    let mut contributions = vec![employer_pf(basic, policy)?];
    contributions.extend(employer_esi(gross, policy)?);
    Ok(contributions)
}

/// Employer PF on `basic`, regardless of whether CTC includes it.
pub fn employer_pf(basic: Decimal, policy: &StatutoryPolicy) -> EngineResult<EmployerContribution> {
    let amount = percent_of(basic, policy.employer_pf_rate)
        .ok_or_else(|| EngineError::overflow("basic_salary", "employer PF"))?;

    Ok(EmployerContribution {
        code: EMPLOYER_PF_CODE.to_string(),
        description: "Provident Fund (Employer)".to_string(),
        wages: basic,
        rate: policy.employer_pf_rate,
        amount,
    })
}

/// Employer ESI on `gross`, or `None` above the wage ceiling.
pub fn employer_esi(
    gross: Decimal,
    policy: &StatutoryPolicy,
) -> EngineResult<Option<EmployerContribution>> {
    if gross > policy.esi_wage_ceiling {
        return Ok(None);
    }

    let amount = percent_of(gross, policy.employer_esi_rate)
        .ok_or_else(|| EngineError::overflow("basic_salary", "employer ESI"))?;

    Ok(Some(EmployerContribution {
        code: EMPLOYER_ESI_CODE.to_string(),
        description: "ESI (Employer)".to_string(),
        wages: gross,
        rate: policy.employer_esi_rate,
        amount,
    }))
}
