//! Overflow-checked money arithmetic shared by the calculations.

use rust_decimal::Decimal;

/// Sums `amounts`, or `None` if the total leaves the decimal range.
pub(crate) fn checked_sum<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

/// `amount * rate / 100`, dividing first so large amounts keep headroom.
pub(crate) fn percent_of(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    rate.checked_div(Decimal::ONE_HUNDRED)?.checked_mul(amount)
}
