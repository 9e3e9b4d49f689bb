//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATABASE_URL` / `DATABASE_URL` - `PostgreSQL` catalog; when
//!   unset the catalog is held in memory and seeded from `CATALOG_SEED_PATH`
//! - `CATALOG_SEED_PATH` - JSON product list (default: crates/storefront/content/products.json)
//! - `TECHPULSE_DATA_DIR` - Client storage directory (default: .techpulse)
//! - `ANTHROPIC_API_KEY` - Generative model key; AI features degrade when unset
//! - `ANTHROPIC_MODEL` - Model name (default: claude-sonnet-4-20250514)
//! - `ANTHROPIC_API_URL` - Messages endpoint override
//! - `AI_TIMEOUT_SECS` - Upper bound on one model call (default: 30)
//! - `AI_MAX_TOKENS` - Response token budget (default: 2048)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default Messages API endpoint.
pub const DEFAULT_MODEL_API_URL: &str = "https://api.anthropic.com/v1/messages";
/// Default model.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

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
    "enter-",
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

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// `PostgreSQL` catalog connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// Seed file for the in-memory catalog
    pub catalog_seed_path: PathBuf,
    /// Directory backing client-local storage
    pub data_dir: PathBuf,
    /// Generative model settings
    pub ai: AiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Generative model configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AiConfig {
    /// API key; `None` disables model calls
    pub api_key: Option<SecretString>,
    /// Model name
    pub model: String,
    /// Messages endpoint
    pub api_url: String,
    /// Bound on a single model call
    pub timeout: Duration,
    /// Response token budget
    pub max_tokens: u32,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_MODEL_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_tokens: 2048,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or a secret fails
    /// validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;

        Ok(Self {
            host,
            port,
            database_url: get_database_url("STOREFRONT_DATABASE_URL"),
            catalog_seed_path: PathBuf::from(get_env_or_default(
                "CATALOG_SEED_PATH",
                "crates/storefront/content/products.json",
            )),
            data_dir: PathBuf::from(get_env_or_default("TECHPULSE_DATA_DIR", ".techpulse")),
            ai: AiConfig::from_env()?,
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

impl AiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = get_optional_env("ANTHROPIC_API_KEY")
            .map(|key| {
                validate_secret_strength(&key, "ANTHROPIC_API_KEY")?;
                Ok(SecretString::from(key))
            })
            .transpose()?;

        Ok(Self {
            api_key,
            model: get_env_or_default("ANTHROPIC_MODEL", DEFAULT_MODEL),
            api_url: get_env_or_default("ANTHROPIC_API_URL", DEFAULT_MODEL_API_URL),
            timeout: Duration::from_secs(parse_env("AI_TIMEOUT_SECS", "30")?),
            max_tokens: parse_env("AI_MAX_TOKENS", "2048")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Option<SecretString> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real API keys are long random strings
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
