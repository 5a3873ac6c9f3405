//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_API_URL` - Base URL of the catalog REST API
//!   (default: <https://dummyjson.com>)
//! - `CATALOG_PAGE_LIMIT` - Products requested per full catalog load
//!   (default: 100)
//! - `SOUQ_STATE_DIR` - Directory for persisted cart/favorites state
//!   (default: .souq-state)
//! - `MAIL_RELAY_URL` - Transactional-email relay endpoint; when unset the
//!   contact-form mailer is disabled
//! - `MAIL_RELAY_SERVICE_ID` - Relay service identifier (required with
//!   `MAIL_RELAY_URL`)
//! - `MAIL_RELAY_TEMPLATE_ID` - Relay template identifier (required with
//!   `MAIL_RELAY_URL`)
//! - `MAIL_RELAY_API_KEY` - Relay API key (required with `MAIL_RELAY_URL`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory holding persisted cart/favorites snapshots
    pub state_dir: PathBuf,
    /// Mail relay configuration, if the contact form is enabled
    pub mail: Option<MailRelayConfig>,
}

/// Catalog REST API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API (no trailing slash)
    pub base_url: String,
    /// Number of products requested by a full catalog load
    pub page_limit: u32,
}

/// Transactional-email relay configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct MailRelayConfig {
    /// Relay endpoint URL
    pub endpoint: String,
    /// Relay service identifier
    pub service_id: String,
    /// Relay template identifier
    pub template_id: String,
    /// Relay API key
    pub api_key: SecretString,
}

impl std::fmt::Debug for MailRelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailRelayConfig")
            .field("endpoint", &self.endpoint)
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// mail relay is enabled without its required companion variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig::from_env()?;
        let state_dir = PathBuf::from(get_env_or_default("SOUQ_STATE_DIR", ".souq-state"));
        let mail = MailRelayConfig::from_env()?;

        Ok(Self {
            catalog,
            state_dir,
            mail,
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("CATALOG_API_URL", "https://dummyjson.com");
        let base_url = validate_base_url("CATALOG_API_URL", &base_url)?;

        let page_limit = get_env_or_default("CATALOG_PAGE_LIMIT", "100")
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_PAGE_LIMIT".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            page_limit,
        })
    }
}

impl MailRelayConfig {
    /// Present only when `MAIL_RELAY_URL` is set; the companion variables
    /// then become required.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(endpoint) = get_optional_env("MAIL_RELAY_URL") else {
            return Ok(None);
        };
        let endpoint = validate_base_url("MAIL_RELAY_URL", &endpoint)?;

        Ok(Some(Self {
            endpoint,
            service_id: get_required_env("MAIL_RELAY_SERVICE_ID")?,
            template_id: get_required_env("MAIL_RELAY_TEMPLATE_ID")?,
            api_key: SecretString::from(get_required_env("MAIL_RELAY_API_KEY")?),
        }))
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

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a URL parses and has a host; trailing slashes are trimmed
/// so path joining stays predictable.
fn validate_base_url(var_name: &str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "URL must have a host".to_string(),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_trims_trailing_slash() {
        let url = validate_base_url("TEST_VAR", "https://dummyjson.com/").unwrap();
        assert_eq!(url, "https://dummyjson.com");
    }

    #[test]
    fn test_validate_base_url_rejects_garbage() {
        let result = validate_base_url("TEST_VAR", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_validate_base_url_requires_host() {
        let result = validate_base_url("TEST_VAR", "data:text/plain,hello");
        assert!(result.is_err());
    }

    #[test]
    fn test_mail_config_debug_redacts_api_key() {
        let config = MailRelayConfig {
            endpoint: "https://relay.example.com/send".to_string(),
            service_id: "service_abc".to_string(),
            template_id: "template_xyz".to_string(),
            api_key: SecretString::from("super_secret_key"),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("service_abc"));
        assert!(debug_output.contains("template_xyz"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_key"));
    }
}
