//! Bridge configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SOURCE_SHOPIFY_STORE` - Source store domain (e.g., source-shop.myshopify.com)
//! - `SOURCE_SHOPIFY_ACCESS_TOKEN` - Source store Admin API access token
//! - `TARGET_SHOPIFY_STORE` - Target store domain
//! - `TARGET_SHOPIFY_ACCESS_TOKEN` - Target store Admin API access token
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - Admin API version for both stores (default: 2024-10)
//! - `BRIDGE_HOST` - Bind address (default: 127.0.0.1)
//! - `BRIDGE_PORT` - Listen port (default: 3000)
//! - `SKU_CACHE_TTL_SECS` - SKU resolution cache TTL in seconds (default: 3600)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_VERSION: &str = "2024-10";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Bridge application configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Store whose identifiers appear in carts
    pub source: StoreConfig,
    /// Store where checkouts are created
    pub target: StoreConfig,
    /// How long a SKU resolution stays cached
    pub cache_ttl: Duration,
    /// Emit JSON logs instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Credentials and location of one store's Admin API.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct StoreConfig {
    /// Bare store domain (e.g., your-store.myshopify.com)
    pub domain: String,
    /// Admin API version (e.g., 2024-10)
    pub api_version: String,
    /// Admin API access token
    pub access_token: SecretString,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("domain", &self.domain)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if access tokens fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("BRIDGE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BRIDGE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("BRIDGE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BRIDGE_PORT".to_string(), e.to_string()))?;

        let api_version = get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION);
        let source = StoreConfig::from_env("SOURCE", &api_version)?;
        let target = StoreConfig::from_env("TARGET", &api_version)?;

        let cache_ttl = parse_cache_ttl(
            &get_env_or_default("SKU_CACHE_TTL_SECS", &DEFAULT_CACHE_TTL_SECS.to_string()),
        )?;

        Ok(Self {
            host,
            port,
            source,
            target,
            cache_ttl,
            log_json: get_optional_env("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StoreConfig {
    fn from_env(prefix: &str, api_version: &str) -> Result<Self, ConfigError> {
        let store_key = format!("{prefix}_SHOPIFY_STORE");
        let domain = normalize_domain(&get_required_env(&store_key)?, &store_key)?;
        let access_token = get_access_token(&format!("{prefix}_SHOPIFY_ACCESS_TOKEN"))?;

        Ok(Self {
            domain,
            api_version: api_version.to_string(),
            access_token,
        })
    }

    /// Base URL of the store's REST Admin API, without trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        format!("https://{}/admin/api/{}", self.domain, self.api_version)
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
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reduce a store setting to a bare host name.
///
/// Accepts `shop.myshopify.com`, `https://shop.myshopify.com/` and similar.
fn normalize_domain(raw: &str, var_name: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.path() != "/" {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be a bare store domain without a path".to_string(),
        ));
    }

    url.host_str()
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ConfigError::InvalidEnvVar(var_name.to_string(), "missing host".to_string()))
}

/// Parse the cache TTL in seconds; zero is rejected.
fn parse_cache_ttl(raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw.trim().parse::<u64>().map_err(|e| {
        ConfigError::InvalidEnvVar("SKU_CACHE_TTL_SECS".to_string(), e.to_string())
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "SKU_CACHE_TTL_SECS".to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

/// Prefixes Shopify puts in front of the random part of an access token.
const TOKEN_PREFIXES: &[&str] = &["shpat_", "shpca_", "shppa_", "shpss_"];

/// Bits of entropy per character, from the character frequencies of `token`.
fn entropy_per_char(token: &str) -> f64 {
    let mut counts: HashMap<char, u32> = HashMap::new();
    let mut total = 0_u32;
    for c in token.chars() {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = f64::from(total);
    counts
        .values()
        .map(|&n| {
            let p = f64::from(n) / total;
            -p * p.log2()
        })
        .sum()
}

/// Reject access tokens that are placeholders or obviously not issued by Shopify.
///
/// Entropy is measured on the random part only, so a known prefix cannot
/// carry a repetitive body past the check.
fn check_access_token(token: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = token.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("looks like a placeholder (contains '{pattern}')"),
        ));
    }

    let random_part = TOKEN_PREFIXES
        .iter()
        .find_map(|prefix| token.strip_prefix(prefix))
        .unwrap_or(token);
    let entropy = entropy_per_char(random_part);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "token body has {entropy:.2} bits/char (need {MIN_ENTROPY_BITS_PER_CHAR:.1}); copy the Admin API token from the store's app settings"
            ),
        ));
    }

    Ok(())
}

/// Load an access token and check it before wrapping it in a secret.
fn get_access_token(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    check_access_token(&value, key)?;
    Ok(SecretString::from(value))
}
