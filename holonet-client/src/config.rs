//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use holonet_core::constants::{
    DEFAULT_BACKOFF_MS, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_MAX_RETRIES,
    DEFAULT_REQUESTS_PER_SECOND, DEFAULT_TIMEOUT_SECONDS, DEFAULT_UPSTREAM_BASE_URL,
    UPSTREAM_PAGE_SIZE,
};
use holonet_core::error::{HolonetError, Result};

/// Upstream access configuration.
///
/// Plain values, read once when the client is built.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Upstream base address, e.g. `https://swapi.dev/api`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: f64,
    /// Attempts per fetch (timeouts and unreachable upstream only)
    pub max_retries: u32,
    /// Backoff unit in milliseconds; attempt n sleeps `2^(n-1)` units
    pub backoff_ms: u64,
    /// Cache time-to-live in seconds
    pub cache_ttl_seconds: u64,
    /// Outbound requests per second
    pub requests_per_second: f64,
    /// Items per upstream listing page
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_ms: DEFAULT_BACKOFF_MS,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            page_size: UPSTREAM_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at the given upstream.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout_seconds(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the number of attempts per fetch.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff unit.
    pub fn with_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.backoff_ms = backoff_ms;
        self
    }

    /// Sets the cache time-to-live.
    pub fn with_cache_ttl_seconds(mut self, seconds: u64) -> Self {
        self.cache_ttl_seconds = seconds;
        self
    }

    /// Sets the outbound rate.
    pub fn with_requests_per_second(mut self, rate: f64) -> Self {
        self.requests_per_second = rate;
        self
    }

    /// Per-request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }

    /// Backoff before the retry that follows `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.backoff_ms.saturating_mul(factor))
    }

    /// Checks the values that would otherwise break the client at runtime.
    pub fn validate(&self) -> Result<()> {
        if !(self.timeout_seconds.is_finite() && self.timeout_seconds > 0.0) {
            return Err(HolonetError::Config(format!(
                "timeout must be a positive number of seconds, got {}",
                self.timeout_seconds
            )));
        }
        if !(self.requests_per_second.is_finite() && self.requests_per_second > 0.0) {
            return Err(HolonetError::Config(format!(
                "rate limit must be positive, got {}",
                self.requests_per_second
            )));
        }
        if self.max_retries == 0 {
            return Err(HolonetError::Config("max_retries must be at least 1".into()));
        }
        if self.page_size == 0 {
            return Err(HolonetError::Config("page_size must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://swapi.dev/api");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backoff_doubles() {
        let config = ClientConfig::default();
        assert_eq!(config.backoff_for(1), Duration::from_secs(1));
        assert_eq!(config.backoff_for(2), Duration::from_secs(2));
        assert_eq!(config.backoff_for(3), Duration::from_secs(4));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClientConfig::default().with_requests_per_second(0.0).validate().is_err());
        assert!(ClientConfig::default().with_timeout_seconds(-1.0).validate().is_err());
        assert!(ClientConfig::default().with_max_retries(0).validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_value(serde_json::json!({"max_retries": 5})).unwrap();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.cache_ttl_seconds, 300);
    }
}
