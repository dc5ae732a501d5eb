//! Client configuration.
//!
//! The base URL is baked in at build time from `BEACON_API_BASE_URL`; an
//! empty base URL means requests go to the same origin that served the app.

use std::time::Duration;

/// Fixed timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(20_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Build the configuration from the environment captured at compile time.
    pub fn from_build_env() -> Self {
        Self::default().with_base_url(option_env!("BEACON_API_BASE_URL").unwrap_or_default())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Join an endpoint path onto the base URL.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_same_origin_with_fixed_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "");
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.url("/api/channels"), "/api/channels");
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let config = ClientConfig::default().with_base_url("http://localhost:8000/");
        assert_eq!(config.url("/api/logs/3"), "http://localhost:8000/api/logs/3");
    }
}
