//! Client configuration
//!
//! Credentials and transport settings live in one [`ClientConfig`] that is
//! built once and handed to [`crate::http::HttpClient`]. It can be assembled
//! in code, read from the environment, or loaded from YAML.

use crate::error::{Error, Result};
use crate::http::DEFAULT_REQUESTS_PER_MINUTE;
use crate::types::AuthFailurePolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API token
pub const ENV_API_KEY: &str = "ESCAVADOR_API_KEY";
/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "ESCAVADOR_BASE_URL";
/// Environment variable overriding the per-minute request quota
pub const ENV_REQUESTS_PER_MINUTE: &str = "ESCAVADOR_REQUESTS_PER_MINUTE";
/// Environment variable overriding the request timeout, in seconds
pub const ENV_TIMEOUT_SECS: &str = "ESCAVADOR_TIMEOUT_SECS";

/// Base URL of the public API, without the version segment
pub const DEFAULT_BASE_URL: &str = "https://api.escavador.com/api";

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for an Escavador client
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bearer token sent in `Authorization`
    pub api_key: String,

    /// Base URL; requests go to `<base_url>/<version>/<path>`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Calls admitted in any 60 second window
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Value of the `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How a 401 answer is reported
    #[serde(default)]
    pub auth_failure_policy: AuthFailurePolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_requests_per_minute() -> u32 {
    DEFAULT_REQUESTS_PER_MINUTE
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("escavador-sdk/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Create a config with defaults for everything but the token
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            requests_per_minute: default_requests_per_minute(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            auth_failure_policy: AuthFailurePolicy::default(),
        }
    }

    /// Create a new config builder
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(api_key),
        }
    }

    /// Read the config from `ESCAVADOR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::missing_config(ENV_API_KEY))?;

        let mut config = Self::new(api_key);

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_REQUESTS_PER_MINUTE) {
            config.requests_per_minute = raw.trim().parse().map_err(|_| {
                Error::invalid_config(ENV_REQUESTS_PER_MINUTE, format!("not a number: {raw}"))
            })?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                Error::invalid_config(ENV_TIMEOUT_SECS, format!("not a number: {raw}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config(format!("config file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_config("api_key"));
        }

        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.requests_per_minute == 0 {
            return Err(Error::invalid_config(
                "requests_per_minute",
                "must be greater than zero",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config("timeout_secs", "must be greater than zero"));
        }

        Ok(())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("requests_per_minute", &self.requests_per_minute)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("auth_failure_policy", &self.auth_failure_policy)
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the per-minute request quota
    pub fn requests_per_minute(mut self, n: u32) -> Self {
        self.config.requests_per_minute = n;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set how 401 answers are reported
    pub fn auth_failure_policy(mut self, policy: AuthFailurePolicy) -> Self {
        self.config.auth_failure_policy = policy;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
