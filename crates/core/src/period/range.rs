//! Inclusive reporting intervals.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A closed interval `[start, end]` with both endpoints known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// First instant of the period.
    pub start: NaiveDateTime,
    /// Last instant of the period.
    pub end: NaiveDateTime,
}

impl Period {
    /// Returns true if `at` lies inside the period (both ends inclusive).
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }
}

/// A possibly open interval used to filter flow records.
///
/// - `start: None, end: Some(_)` is a cumulative "as at" snapshot.
/// - both set is a period flow.
/// - both `None` is all time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub start: Option<NaiveDateTime>,
    /// Inclusive upper bound.
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// No date predicate.
    #[must_use]
    pub const fn all_time() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Everything up to and including `end`.
    #[must_use]
    pub const fn as_at(end: NaiveDateTime) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Exactly the given period.
    #[must_use]
    pub const fn within(period: &Period) -> Self {
        Self {
            start: Some(period.start),
            end: Some(period.end),
        }
    }

    /// Returns true if `at` satisfies both bounds.
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start.is_none_or(|start| at >= start) && self.end.is_none_or(|end| at <= end)
    }
}

impl From<Period> for DateRange {
    fn from(period: Period) -> Self {
        Self::within(&period)
    }
}

/// First instant of `date`.
pub(crate) fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last millisecond of `date`.
pub(crate) fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(LAST_MILLISECOND)
}

const LAST_MILLISECOND: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(time) => time,
    None => unreachable!(),
};
