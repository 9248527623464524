//! Overflow-checked decimal arithmetic.
//!
//! Stored quantities and prices can be large enough that their product or
//! sum leaves the `Decimal` range. Every report figure goes through these
//! helpers and fails with [`LedgerError::Overflow`] instead of panicking.

use rust_decimal::Decimal;

use super::error::LedgerError;

/// `a + b`.
pub fn add(what: &'static str, a: Decimal, b: Decimal) -> Result<Decimal, LedgerError> {
    a.checked_add(b).ok_or(LedgerError::Overflow(what))
}

/// `a - b`.
pub fn sub(what: &'static str, a: Decimal, b: Decimal) -> Result<Decimal, LedgerError> {
    a.checked_sub(b).ok_or(LedgerError::Overflow(what))
}

/// `a × b`.
pub fn mul(what: &'static str, a: Decimal, b: Decimal) -> Result<Decimal, LedgerError> {
    a.checked_mul(b).ok_or(LedgerError::Overflow(what))
}

/// Sum of `values`.
pub fn sum<I>(what: &'static str, values: I) -> Result<Decimal, LedgerError>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| add(what, acc, value))
}

/// Sum of fallible `values`; the first error wins.
pub fn try_sum<I>(what: &'static str, values: I) -> Result<Decimal, LedgerError>
where
    I: IntoIterator<Item = Result<Decimal, LedgerError>>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| add(what, acc, value?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sum_in_range() {
        assert_eq!(sum("total", [dec!(1.5), dec!(2), dec!(-0.5)]), Ok(dec!(3)));
        assert_eq!(sum("total", []), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = Decimal::from(1_000_000_000_000_000_i64);
        assert_eq!(
            sum("total", [Decimal::MAX, Decimal::ONE]),
            Err(LedgerError::Overflow("total"))
        );
        assert_eq!(
            sub("net", Decimal::MIN, Decimal::ONE),
            Err(LedgerError::Overflow("net"))
        );
        assert_eq!(
            mul("item", huge, huge),
            Err(LedgerError::Overflow("item"))
        );
    }

    #[test]
    fn test_try_sum_propagates_first_error() {
        let values = [Ok(dec!(1)), Err(LedgerError::Overflow("item")), Ok(dec!(2))];
        assert_eq!(try_sum("total", values), Err(LedgerError::Overflow("item")));
    }
}
