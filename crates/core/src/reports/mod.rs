//! Financial reports.
//!
//! - Balance sheet: cumulative snapshot as at the end of a period
//! - Profit & loss: flow within a period, by expense category
//! - Financial report: per-project sections with expanded expense rows
//! - Summary: all-time fallback figures for the simple reports page

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
