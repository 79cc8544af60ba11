//! Configuration for the execution-service client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::OffsiteError;

/// Environment variable holding the service API token.
pub const TOKEN_ENV: &str = "OFFSITE_API_TOKEN";

/// Environment variable overriding the service base URL.
pub const URL_ENV: &str = "OFFSITE_API_URL";

/// Configuration for the HTTP execution-service client.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the execution service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// Interval between task status polls in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// API token. Never serialized.
    #[serde(skip)]
    pub token: String,
}

fn default_base_url() -> String {
    "https://compute.offsite.dev/v1".to_string()
}

fn default_timeout() -> f64 {
    30.0
}

fn default_poll_interval() -> f64 {
    5.0
}

fn default_user_agent() -> String {
    "offsite/0.1".to_string()
}

// The token must not leak through debug-formatted configs or executors.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("poll_interval_seconds", &self.poll_interval_seconds)
            .field("user_agent", &self.user_agent)
            .field("token", &"[redacted]")
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            poll_interval_seconds: default_poll_interval(),
            user_agent: default_user_agent(),
            token: String::new(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration with the given token and defaults otherwise.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Builds a configuration from the environment.
    ///
    /// Reads the API token from `OFFSITE_API_TOKEN` and an optional base-URL
    /// override from `OFFSITE_API_URL`. A missing or empty token is a
    /// [`OffsiteError::Credentials`] error, surfaced before any network
    /// traffic happens.
    pub fn from_env() -> Result<Self, OffsiteError> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                OffsiteError::credentials(format!("{TOKEN_ENV} is not set"))
            })?;

        let mut config = Self::new(token);
        if let Ok(url) = std::env::var(URL_ENV) {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        Ok(config)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, seconds: f64) -> Self {
        self.poll_interval_seconds = seconds;
        self
    }

    /// Gets the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }

    /// Gets the poll interval as a Duration.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(self.poll_interval_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("tok");
        assert_eq!(config.base_url, "https://compute.offsite.dev/v1");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.token, "tok");
    }

    #[test]
    fn test_builder_setters() {
        let config = ClientConfig::new("tok")
            .with_base_url("http://localhost:8080")
            .with_timeout(2.5)
            .with_poll_interval(0.1);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_token_is_not_serialized() {
        let config = ClientConfig::new("secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_token_is_redacted_in_debug_output() {
        let config = ClientConfig::new("secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[redacted]"));
    }
}
