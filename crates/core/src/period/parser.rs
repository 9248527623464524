//! Parsing of user supplied `from`/`to` query values.

use chrono::{Months, NaiveDate, NaiveDateTime};

use super::error::PeriodError;
use super::range::{DateRange, Period, end_of_day, start_of_day};

/// One parsed endpoint.
#[derive(Debug, Clone, Copy)]
enum Bound {
    /// `YYYY-MM`, stored as the first day of the month.
    Month(NaiveDate),
    /// `YYYY-MM-DD`.
    Day(NaiveDate),
}

impl Bound {
    fn start(self) -> NaiveDateTime {
        match self {
            Self::Month(first) | Self::Day(first) => start_of_day(first),
        }
    }

    fn end(self) -> Option<NaiveDateTime> {
        match self {
            Self::Month(first) => first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .map(end_of_day),
            Self::Day(day) => Some(end_of_day(day)),
        }
    }
}

/// Parses the endpoints of a month-range report.
///
/// Returns `Ok(None)` when either endpoint is blank or missing: the caller
/// asks for a period instead of defaulting to all time. Months round
/// outward, so `2024-01`..`2024-03` covers `2024-01-01T00:00:00.000` through
/// `2024-03-31T23:59:59.999`.
///
/// # Errors
///
/// Returns [`PeriodError::Unparseable`] for malformed input (checked before
/// blankness of the other endpoint) and [`PeriodError::Reversed`] when the
/// start lies after the end.
pub fn parse_period(from: Option<&str>, to: Option<&str>) -> Result<Option<Period>, PeriodError> {
    let from = parse_bound("from", from)?;
    let to = parse_bound("to", to)?;

    let (Some(from), Some(to)) = (from, to) else {
        return Ok(None);
    };

    let start = from.start();
    let end = end_of("to", to)?;
    if start > end {
        return Err(PeriodError::Reversed { start, end });
    }

    Ok(Some(Period { start, end }))
}

/// Parses an open-ended range for the summary report.
///
/// Each endpoint is optional; a missing endpoint leaves that side unbounded,
/// so no input at all means all time.
///
/// # Errors
///
/// Same as [`parse_period`].
pub fn parse_open_range(from: Option<&str>, to: Option<&str>) -> Result<DateRange, PeriodError> {
    let start = parse_bound("from", from)?.map(Bound::start);
    let end = match parse_bound("to", to)? {
        Some(bound) => Some(end_of("to", bound)?),
        None => None,
    };

    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Err(PeriodError::Reversed { start, end });
    }

    Ok(DateRange { start, end })
}

fn end_of(field: &'static str, bound: Bound) -> Result<NaiveDateTime, PeriodError> {
    bound.end().ok_or_else(|| PeriodError::Unparseable {
        field,
        value: format!("{bound:?}"),
    })
}

fn parse_bound(field: &'static str, raw: Option<&str>) -> Result<Option<Bound>, PeriodError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let unparseable = || PeriodError::Unparseable {
        field,
        value: raw.to_string(),
    };

    let bytes = raw.as_bytes();
    let bound = match bytes.len() {
        7 if bytes[4] == b'-' => {
            let first = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
                .map_err(|_| unparseable())?;
            Bound::Month(first)
        }
        10 => Bound::Day(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| unparseable())?),
        // ISO timestamps contribute their calendar day.
        n if n > 10 && matches!(bytes[10], b'T' | b' ') => Bound::Day(
            NaiveDate::parse_from_str(&raw[..10], "%Y-%m-%d").map_err(|_| unparseable())?,
        ),
        _ => return Err(unparseable()),
    };

    Ok(Some(bound))
}
