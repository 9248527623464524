//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod report;
pub mod scoped;
pub mod tenant;

pub use report::{ReportError, ReportRepository};
pub use scoped::{NewDeposit, ProjectDetail, ScopeError, TenantScope};
pub use tenant::{TenantDirectory, TenantLookupError, TenantRepository};
