//! Ledger aggregation over construction project records.
//!
//! This module provides:
//! - Record types loaded for one tenant ([`LedgerSnapshot`])
//! - Dimensional filters (project, client, category, material)
//! - Sums and groupings under a [`DateRange`](crate::period::DateRange)
//! - Line-item expansion and dense monthly series
//! - Overflow-checked arithmetic ([`LedgerError`])

pub mod aggregator;
pub mod checked;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod series;
pub mod types;


pub use aggregator::{CategoryTotal, LedgerAggregator};
pub use error::LedgerError;
pub use expansion::{ExpenseLine, expand_expense};
pub use filter::ReportFilter;
pub use series::{MonthlyTotal, monthly_series};
pub use types::*;
