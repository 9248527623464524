//! Dashboard metrics.
//!
//! Project counts, all-time totals, per-project maps and a dense monthly
//! expense trend.

pub mod service;
pub mod types;

pub use service::DashboardService;
pub use types::*;
