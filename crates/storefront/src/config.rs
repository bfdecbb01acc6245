//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! Everything is optional; the defaults point at the shop's published sheet
//! and a `cart.json` in the working directory.
//!
//! - `FARMSTAND_SHEET_URL` - JSON endpoint serving the product sheet tab
//! - `FARMSTAND_CART_PATH` - Path of the persisted cart blob
//! - `FARMSTAND_CACHE_TTL_SECS` - Catalog cache lifetime in seconds

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Published sheet tab holding the product catalog.
pub const DEFAULT_SHEET_URL: &str =
    "https://opensheet.elk.sh/15wr4ZZbQEA1dDQIdALdmFW2Cjmt1nlJ9woiSPNBnhOA/products";

/// Default location of the persisted cart blob.
pub const DEFAULT_CART_PATH: &str = "cart.json";

const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Sheet endpoint configuration
    pub sheet: SheetConfig,
    /// Where the cart blob is persisted
    pub cart_path: PathBuf,
}

/// Sheet endpoint configuration.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Endpoint returning the sheet tab as a JSON array
    pub endpoint: Url,
    /// How long a fetched catalog stays served from cache
    pub cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse. Unset
    /// variables fall back to their defaults and never error.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            sheet: SheetConfig::from_env()?,
            cart_path: PathBuf::from(get_env_or_default(
                "FARMSTAND_CART_PATH",
                DEFAULT_CART_PATH,
            )),
        })
    }
}

impl SheetConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(
            "FARMSTAND_SHEET_URL",
            &get_env_or_default("FARMSTAND_SHEET_URL", DEFAULT_SHEET_URL),
        )?;
        let cache_ttl = parse_ttl_secs(
            "FARMSTAND_CACHE_TTL_SECS",
            &get_env_or_default(
                "FARMSTAND_CACHE_TTL_SECS",
                &DEFAULT_CACHE_TTL_SECS.to_string(),
            ),
        )?;

        Ok(Self {
            endpoint,
            cache_ttl,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a sheet endpoint URL.
fn parse_endpoint(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a cache TTL given in whole seconds.
fn parse_ttl_secs(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sheet_url_parses() {
        let url = parse_endpoint("FARMSTAND_SHEET_URL", DEFAULT_SHEET_URL).unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("opensheet.elk.sh"));
    }

    #[test]
    fn test_parse_endpoint_rejects_garbage() {
        let result = parse_endpoint("FARMSTAND_SHEET_URL", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_ttl_secs() {
        let ttl = parse_ttl_secs("FARMSTAND_CACHE_TTL_SECS", "300").unwrap();
        assert_eq!(ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_parse_ttl_rejects_non_numeric() {
        let result = parse_ttl_secs("FARMSTAND_CACHE_TTL_SECS", "5 minutes");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}
