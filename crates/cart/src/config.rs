//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_BASE_URL` - Base URL of the catalog service (e.g.,
//!   `https://api.velvetorris.com/catalog/`)
//!
//! ## Optional
//! - `CATALOG_ACCESS_TOKEN` - Bearer token for the catalog service
//! - `CATALOG_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
//! - `CATALOG_CACHE_TTL_SECS` - Product list cache TTL (default: 300)
//! - `VELVET_STORAGE_DIR` - Directory for durable local state
//!   (default: `.velvet-orris`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_STORAGE_DIR: &str = ".velvet-orris";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog service configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service. Always ends with a slash so
    /// relative endpoint paths join correctly.
    pub base_url: Url,
    /// Optional bearer token for the catalog service.
    pub access_token: Option<SecretString>,
    /// Per-request timeout in seconds. A timed-out rehydration fetch is
    /// treated identically to any other fetch failure.
    pub timeout_secs: u64,
    /// Product list cache TTL in seconds.
    pub cache_ttl_secs: u64,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
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

        let base_url = parse_base_url(&get_required_env("CATALOG_BASE_URL")?)?;
        let access_token = get_optional_env("CATALOG_ACCESS_TOKEN").map(SecretString::from);
        let timeout_secs = get_u64_or_default("CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let cache_ttl_secs = get_u64_or_default("CATALOG_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;

        Ok(Self {
            base_url,
            access_token,
            timeout_secs,
            cache_ttl_secs,
        })
    }
}

/// Durable local storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per storage key.
    pub dir: PathBuf,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let dir = get_optional_env("VELVET_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);
        Self { dir }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get a u64 environment variable with a default value.
fn get_u64_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Parse and normalize the catalog base URL to end with a slash.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://api.example.com/catalog").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/catalog/");
        // Relative joins now resolve under the catalog path
        assert_eq!(
            url.join("products").unwrap().as_str(),
            "https://api.example.com/catalog/products"
        );
    }

    #[test]
    fn test_parse_base_url_keeps_existing_slash() {
        let url = parse_base_url("https://api.example.com/catalog/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/catalog/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_debug_redacts_access_token() {
        let config = CatalogConfig {
            base_url: Url::parse("https://api.example.com/").unwrap(),
            access_token: Some(SecretString::from("super_secret_token")),
            timeout_secs: 10,
            cache_ttl_secs: 300,
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
        // Token still accessible through the typed API
        assert_eq!(
            config.access_token.unwrap().expose_secret(),
            "super_secret_token"
        );
    }

    #[test]
    fn test_get_u64_or_default_uses_default_when_unset() {
        assert_eq!(
            get_u64_or_default("VELVET_TEST_UNSET_VAR", 42).unwrap(),
            42
        );
    }
}
