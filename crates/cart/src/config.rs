//! Catalog client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STRIDE_CATALOG_URL` - Base URL of the catalog REST service
//!
//! ## Optional
//! - `STRIDE_CATALOG_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `STRIDE_CATALOG_CACHE_TTL_SECS` - Product cache TTL (default: 300)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog REST client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Time-to-live for cached product lookups. Stock is never cached.
    pub product_cache_ttl: Duration,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_required_env("STRIDE_CATALOG_URL")?)
            .map_err(|reason| ConfigError::InvalidEnvVar("STRIDE_CATALOG_URL".to_string(), reason))?;
        let timeout = parse_secs("STRIDE_CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let product_cache_ttl = parse_secs("STRIDE_CATALOG_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;

        Ok(Self {
            base_url,
            timeout,
            product_cache_ttl,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a duration-in-seconds variable with a default.
fn parse_secs(key: &str, default: &str) -> Result<Duration, ConfigError> {
    get_env_or_default(key, default)
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse and validate a catalog base URL. Must be http(s).
fn parse_base_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}
