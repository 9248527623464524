//! Request middleware.

pub mod tenant;

pub use tenant::{CurrentTenant, TenantContext, tenant_middleware};
