//! Reporting period parsing.
//!
//! Month-range reports (balance sheet, profit & loss, financial report) need
//! both endpoints and otherwise wait for input. The simple summary accepts
//! open-ended ranges and falls back to all time.

pub mod error;
pub mod parser;
pub mod range;


pub use error::PeriodError;
pub use parser::{parse_open_range, parse_period};
pub use range::{DateRange, Period};
