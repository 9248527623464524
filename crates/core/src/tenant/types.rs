//! Tenant domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use buildbook_shared::types::TenantId;

use super::error::TenantError;
use super::subscription::is_subscription_active;

/// Subscription status of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantStatus {
    /// Evaluation period.
    Trial,
    /// Paying customer.
    Active,
    /// Access revoked by the platform.
    Suspended,
    /// Subscription lapsed.
    Expired,
}

impl TenantStatus {
    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trial => "TRIAL",
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl std::fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A live (non-deleted) tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique identifier.
    pub id: TenantId,
    /// Lower-case subdomain, unique among live tenants.
    pub subdomain: String,
    /// Company name.
    pub name: String,
    /// Subscription status.
    pub status: TenantStatus,
    /// End of the paid subscription, if any.
    pub subscription_expiry_at: Option<DateTime<Utc>>,
    /// End of the trial, if any.
    pub trial_ends_at: Option<DateTime<Utc>>,
}

impl Tenant {
    /// Returns the date that bounds access for the current status.
    ///
    /// Trials are bounded by `trial_ends_at`; every other status by the
    /// subscription expiry. Each falls back to the other date when unset.
    #[must_use]
    pub fn access_expiry(&self) -> Option<DateTime<Utc>> {
        match self.status {
            TenantStatus::Trial => self.trial_ends_at.or(self.subscription_expiry_at),
            _ => self.subscription_expiry_at.or(self.trial_ends_at),
        }
    }

    /// Returns true if the tenant may use non-admin routes at `now`.
    #[must_use]
    pub fn is_subscription_active(&self, now: DateTime<Utc>) -> bool {
        is_subscription_active(self.status, self.access_expiry(), now)
    }

    /// Fails with [`TenantError::Suspended`] when access is not allowed at `now`.
    pub fn ensure_access(&self, now: DateTime<Utc>) -> Result<(), TenantError> {
        if self.is_subscription_active(now) {
            Ok(())
        } else {
            let status = match self.status {
                // A lapsed date turns an otherwise valid tenant into an expired one.
                TenantStatus::Trial | TenantStatus::Active => TenantStatus::Expired,
                other => other,
            };
            Err(TenantError::Suspended {
                subdomain: self.subdomain.clone(),
                status,
            })
        }
    }
}
