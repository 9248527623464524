//! Tenant selection and access rules.
//!
//! A request reaches a tenant through its host name (`acme.example.com`) or an
//! explicit slug. This module turns that input into a [`TenantSelector`] and
//! decides whether a resolved [`Tenant`] may be served.

pub mod error;
pub mod resolver;
pub mod subscription;
pub mod types;

pub use error::TenantError;
pub use resolver::{HostResolver, TenantSelector, is_valid_subdomain};
pub use subscription::is_subscription_active;
pub use types::{Tenant, TenantStatus};
