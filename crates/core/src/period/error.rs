//! Period error types.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors produced while parsing a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// An endpoint is neither `YYYY-MM` nor `YYYY-MM-DD`.
    #[error("Invalid {field} value '{value}': expected YYYY-MM or YYYY-MM-DD")]
    Unparseable {
        /// Which endpoint (`from` or `to`).
        field: &'static str,
        /// The raw input.
        value: String,
    },

    /// The start lies after the end.
    #[error("Invalid period: start {start} is after end {end}")]
    Reversed {
        /// Parsed start.
        start: NaiveDateTime,
        /// Parsed end.
        end: NaiveDateTime,
    },
}
