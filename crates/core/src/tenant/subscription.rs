//! Subscription gating.

use chrono::{DateTime, Utc};

use super::types::TenantStatus;

/// Returns true if a tenant with `status` and access bound `expiry` may be served at `now`.
///
/// Suspended and expired tenants are always rejected. Otherwise access is
/// allowed unless a known expiry lies strictly before `now`.
#[must_use]
pub fn is_subscription_active(
    status: TenantStatus,
    expiry: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    match status {
        TenantStatus::Suspended | TenantStatus::Expired => false,
        TenantStatus::Trial | TenantStatus::Active => expiry.is_none_or(|at| at >= now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    #[rstest]
    #[case(TenantStatus::Active, None, true)]
    #[case(TenantStatus::Trial, None, true)]
    #[case(TenantStatus::Suspended, None, false)]
    #[case(TenantStatus::Expired, None, false)]
    #[case(TenantStatus::Active, Some(1), true)]
    #[case(TenantStatus::Active, Some(-1), false)]
    #[case(TenantStatus::Trial, Some(-1), false)]
    #[case(TenantStatus::Suspended, Some(10), false)]
    fn test_subscription_matrix(
        #[case] status: TenantStatus,
        #[case] offset_days: Option<i64>,
        #[case] expected: bool,
    ) {
        let expiry = offset_days.map(|d| now() + Duration::days(d));
        assert_eq!(is_subscription_active(status, expiry, now()), expected);
    }

    #[test]
    fn test_expiry_exactly_now_is_still_active() {
        assert!(is_subscription_active(
            TenantStatus::Active,
            Some(now()),
            now()
        ));
    }
}
