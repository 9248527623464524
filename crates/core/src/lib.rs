//! Core business logic for Buildbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here. Every
//! function takes the tenant context and "now" explicitly.
//!
//! # Modules
//!
//! - `tenant` - Host based tenant selection and subscription gating
//! - `period` - Reporting period parsing
//! - `ledger` - Expense, deposit and budget aggregation
//! - `reports` - Balance sheet, profit & loss and financial reports
//! - `dashboard` - Tenant dashboard metrics

pub mod dashboard;
pub mod ledger;
pub mod period;
pub mod reports;
pub mod tenant;

#[cfg(test)]
pub(crate) mod testing;
