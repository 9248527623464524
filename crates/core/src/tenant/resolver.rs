//! Host name to tenant selection.

use super::error::TenantError;

/// Label that always addresses the platform itself.
const PLATFORM_LABEL: &str = "www";

/// What a request host addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantSelector {
    /// The platform/admin surface; no tenant context.
    Platform,
    /// A tenant workspace, by lower-case subdomain.
    Subdomain(String),
}

/// Derives tenant selectors from request hosts under a fixed base domain.
#[derive(Debug, Clone)]
pub struct HostResolver {
    base_domain: String,
}

impl HostResolver {
    /// Creates a resolver for `base_domain` (e.g. `buildbook.app`).
    #[must_use]
    pub fn new(base_domain: &str) -> Self {
        Self {
            base_domain: normalize_host(base_domain),
        }
    }

    /// Returns the normalized base domain.
    #[must_use]
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Selects the tenant addressed by `host` (a `Host` header value, port allowed).
    ///
    /// An empty host, the base domain itself and `www.<base>` address the
    /// platform. Hosts outside the base domain, nested subdomains and
    /// malformed labels fail with [`TenantError::NotFound`].
    pub fn select(&self, host: &str) -> Result<TenantSelector, TenantError> {
        let host = normalize_host(host);
        if host.is_empty() || host == self.base_domain {
            return Ok(TenantSelector::Platform);
        }

        let label = host
            .strip_suffix(&self.base_domain)
            .and_then(|prefix| prefix.strip_suffix('.'))
            .ok_or_else(|| TenantError::NotFound(host.clone()))?;

        if label == PLATFORM_LABEL {
            return Ok(TenantSelector::Platform);
        }

        Self::select_slug(label)
    }

    /// Selects a tenant by an explicit slug.
    pub fn select_slug(slug: &str) -> Result<TenantSelector, TenantError> {
        let slug = slug.trim().to_ascii_lowercase();
        if is_valid_subdomain(&slug) {
            Ok(TenantSelector::Subdomain(slug))
        } else {
            Err(TenantError::NotFound(slug))
        }
    }
}

/// Returns true if `label` is a single DNS label usable as a tenant subdomain.
#[must_use]
pub fn is_valid_subdomain(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Lower-cases a host and strips the port and any trailing dot.
fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let without_port = match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    };
    without_port.trim_end_matches('.').to_ascii_lowercase()
}
