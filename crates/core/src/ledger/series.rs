//! Dense monthly series.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::checked;
use super::error::LedgerError;

/// Total for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// `YYYY-MM`.
    pub month: String,
    /// Sum for the month.
    pub total: Decimal,
}

/// Builds `months` consecutive buckets ending with the month of `today`.
///
/// Every bucket is present, zero-filled when nothing happened in that month,
/// and values dated outside the window are ignored. `months == 0` yields an
/// empty series.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if a monthly total leaves the decimal range.
pub fn monthly_series<I>(
    today: NaiveDate,
    months: u32,
    values: I,
) -> Result<Vec<MonthlyTotal>, LedgerError>
where
    I: IntoIterator<Item = (NaiveDate, Decimal)>,
{
    let current = today.with_day(1).unwrap_or(today);
    let mut buckets: BTreeMap<NaiveDate, Decimal> = (0..months)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .map(|month| (month, Decimal::ZERO))
        .collect();

    for (date, value) in values {
        let Some(month) = date.with_day(1) else {
            continue;
        };
        if let Some(total) = buckets.get_mut(&month) {
            *total = checked::add("monthly total", *total, value)?;
        }
    }

    Ok(buckets
        .into_iter()
        .map(|(month, total)| MonthlyTotal {
            month: month.format("%Y-%m").to_string(),
            total,
        })
        .collect())
}
