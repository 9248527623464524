//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Tenant resolution configuration.
    #[serde(default)]
    pub tenancy: TenancyConfig,
    /// Report configuration.
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Optional capabilities, decided once at startup.
    #[serde(default)]
    pub features: FeatureFlags,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Tenant resolution configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TenancyConfig {
    /// Platform base domain; tenants live at `<subdomain>.<base_domain>`.
    #[serde(default = "default_base_domain")]
    pub base_domain: String,
    /// Accept an explicit `X-Tenant-Slug` header instead of the host.
    #[serde(default)]
    pub allow_slug_header: bool,
    /// Time-to-live of cached tenant lookups, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Maximum number of cached tenant lookups.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            base_domain: default_base_domain(),
            allow_slug_header: false,
            cache_ttl_secs: default_cache_ttl(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_base_domain() -> String {
    "localhost".to_string()
}

fn default_cache_ttl() -> u64 {
    30
}

fn default_cache_capacity() -> u64 {
    1_000
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Number of months in the dashboard expense trend.
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            trend_months: default_trend_months(),
        }
    }
}

fn default_trend_months() -> u32 {
    6
}

/// Optional collaborators that may not exist in every deployment.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FeatureFlags {
    /// Whether the `project_documents` table is available.
    #[serde(default)]
    pub project_documents: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BUILDBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
