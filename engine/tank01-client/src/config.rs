use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{API_KEY_ENV, DEFAULT_HOST, DEFAULT_TIMEOUT_SECS};

/// Configuration for the Tank01 client
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL, without trailing slash
    pub base_url: String,

    /// Value of the `x-rapidapi-host` header
    pub host: String,

    /// RapidAPI key sent as `x-rapidapi-key`
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Build a configuration with the default Tank01 host and the given key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            base_url: format!("https://{DEFAULT_HOST}"),
            host: DEFAULT_HOST.to_string(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_ENV))?;

        let mut config = Self::with_api_key(api_key);

        if let Some(base_url) = lookup("TANK01_BASE_URL") {
            let base_url = base_url.trim().trim_end_matches('/').to_string();
            let host = base_url
                .split("://")
                .nth(1)
                .map(|rest| rest.split('/').next().unwrap_or(rest).to_string())
                .filter(|host| !host.is_empty())
                .ok_or_else(|| ConfigError::Invalid {
                    name: "TANK01_BASE_URL",
                    value: base_url.clone(),
                })?;
            config.base_url = base_url;
            config.host = host;
        }

        if let Some(timeout) = lookup("TANK01_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid { name: "TANK01_TIMEOUT_SECS", value: timeout })?;
        }

        Ok(config)
    }

    /// Full URL for an endpoint name
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}
