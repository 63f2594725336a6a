//! Static configuration, loaded once at startup and shared read-only.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default PagerDuty REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.pagerduty.com";

/// Default description attached to every window.
pub const DEFAULT_DESCRIPTION: &str = "Scheduled maintenance window";

/// Default upper bound on a window's length.
pub const DEFAULT_MAX_DURATION_MINUTES: u32 = 30;

/// Default timeout for a single outbound API call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration problems detected at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No API token supplied.
    #[error("PagerDuty API token is not set")]
    MissingToken,

    /// Base URL does not parse or is not http(s).
    #[error("Invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Max duration of zero would reject every request.
    #[error("Maximum duration must be at least 1 minute")]
    InvalidMaxDuration,

    /// Outbound calls must have a bounded duration.
    #[error("Request timeout must be greater than zero")]
    InvalidTimeout,
}

/// Service configuration.
#[derive(Clone)]
pub struct Config {
    /// PagerDuty REST API token. Never logged.
    pub api_token: String,
    /// API base URL without a trailing slash.
    pub api_base_url: String,
    /// Description attached to created windows.
    pub description: String,
    /// Longest window a caller may request.
    pub max_duration_minutes: u32,
    /// Timeout for each outbound call.
    pub request_timeout: Duration,
}

impl Config {
    /// Create a configuration with defaults for everything but the token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_max_duration_minutes(mut self, minutes: u32) -> Self {
        self.max_duration_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Check the configuration before the service starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let url = Url::parse(&self.api_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.api_base_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }

        if self.max_duration_minutes == 0 {
            return Err(ConfigError::InvalidMaxDuration);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("description", &self.description)
            .field("max_duration_minutes", &self.max_duration_minutes)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("secret");
        assert_eq!(config.api_base_url, "https://api.pagerduty.com");
        assert_eq!(config.description, "Scheduled maintenance window");
        assert_eq!(config.max_duration_minutes, 30);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::new("secret").with_base_url("http://localhost:9000/");
        assert_eq!(config.api_base_url, "http://localhost:9000");
    }

    #[test]
    fn test_rejects_empty_token() {
        assert_eq!(Config::new("  ").validate(), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = Config::new("secret").with_base_url("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        let config = Config::new("secret").with_base_url("ftp://api.pagerduty.com");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_limits() {
        let config = Config::new("secret").with_max_duration_minutes(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxDuration));

        let config = Config::new("secret").with_request_timeout(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeout));
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", Config::new("super-secret-token"));
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
