//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Configuration for the backend REST client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the platform API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Optional bearer token attached to every request.
    pub auth_token: Option<SecretString>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(30),
            auth_token: None,
        }
    }
}

impl ApiConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults: `BIZREG_API_URL`, `BIZREG_API_TOKEN`,
    /// `BIZREG_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("BIZREG_API_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(token) = std::env::var("BIZREG_API_TOKEN") {
            config.auth_token = Some(SecretString::from(token));
        }

        if let Ok(secs) = std::env::var("BIZREG_API_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| ConfigError::InvalidValue {
                key: "BIZREG_API_TIMEOUT_SECS".to_string(),
                message: format!("expected an integer number of seconds, got {secs:?}"),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
