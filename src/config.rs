//! Runtime configuration.
//!
//! [`FeedConfig`] carries the endpoint, paging and gesture tuning shared by
//! the feed core and the terminal front-end. Values come from defaults,
//! overridden by `HOTNEWS_*` environment variables, overridden by the
//! builder methods.

use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Hot news list endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api-hot.imsyy.top/toutiao";
/// Daily digest endpoint.
pub const DEFAULT_DIGEST_ENDPOINT: &str = "https://api.03c3.cn/api/zb?type=jsonImg";
/// Items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Busy overlay message shown while a page is loading.
pub const DEFAULT_LOADING_MESSAGE: &str = "Loading...";

/// Configuration for the feed and its presentation.
///
/// # Example
///
/// ```
/// use hotnews::config::FeedConfig;
///
/// let config = FeedConfig::default()
///     .with_api_key("secret")
///     .with_page_size(20);
/// assert_eq!(config.page_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Paginated hot-news endpoint
    pub endpoint: String,
    /// Daily digest endpoint
    pub digest_endpoint: String,
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Items per page (`page_size` query parameter)
    pub page_size: u32,
    /// Transport ceiling; slower requests settle as a timeout
    pub request_timeout: Duration,
    /// Height of the refresh header when fully open, in rows
    pub header_height: f32,
    /// Drag distance at which releasing triggers a refresh, in rows
    pub refresh_threshold: f32,
    /// Remaining distance, as a fraction of the viewport, that triggers an append
    pub end_reached_threshold: f32,
    /// Message handed to the busy indicator on dispatch
    pub loading_message: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            digest_endpoint: DEFAULT_DIGEST_ENDPOINT.to_string(),
            api_key: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(10),
            header_height: 3.0,
            refresh_threshold: 3.0,
            end_reached_threshold: 0.1,
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
        }
    }
}

impl FeedConfig {
    /// Create a new FeedConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hot-news endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the daily digest endpoint.
    pub fn with_digest_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.digest_endpoint = endpoint.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set the page size. Zero is bumped to one.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set header height and refresh threshold together.
    pub fn with_gesture(mut self, header_height: f32, refresh_threshold: f32) -> Self {
        self.header_height = header_height.max(0.0);
        self.refresh_threshold = refresh_threshold.max(0.0);
        self
    }

    /// Set the near-end threshold (fraction of the viewport).
    pub fn with_end_reached_threshold(mut self, fraction: f32) -> Self {
        self.end_reached_threshold = fraction.max(0.0);
        self
    }

    /// Set the busy overlay message.
    pub fn with_loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("HOTNEWS_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(endpoint) = lookup("HOTNEWS_DIGEST_ENDPOINT") {
            config.digest_endpoint = endpoint;
        }
        if let Some(key) = lookup("HOTNEWS_API_KEY") {
            config.api_key = key;
        }
        if let Some(raw) = lookup("HOTNEWS_PAGE_SIZE") {
            match raw.trim().parse::<u32>() {
                Ok(size) => config = config.with_page_size(size),
                Err(_) => tracing::warn!(value = %raw, "ignoring malformed HOTNEWS_PAGE_SIZE"),
            }
        }
        if let Some(raw) = lookup("HOTNEWS_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "ignoring malformed HOTNEWS_TIMEOUT_SECS"),
            }
        }

        config
    }

    /// Reject settings the feed cannot work with.
    ///
    /// Endpoints must be http(s) URLs, and the refresh threshold must be
    /// reachable within the largest accepted drag (1.5 header heights).
    pub fn validate(&self) -> AppResult<()> {
        let endpoints = [
            ("endpoint", &self.endpoint),
            ("digest endpoint", &self.digest_endpoint),
        ];
        for (name, url) in endpoints {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::Config(format!(
                    "{} is not an http(s) URL: {:?}",
                    name, url
                )));
            }
        }
        if self.refresh_threshold <= 0.0 || self.refresh_threshold > self.header_height * 1.5 {
            return Err(AppError::Config(format!(
                "refresh threshold {} is out of reach for a header of {}",
                self.refresh_threshold, self.header_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_feed_config_default() {
        let config = FeedConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.end_reached_threshold, 0.1);
        assert_eq!(config.loading_message, "Loading...");
    }

    #[test]
    fn test_builder_chain() {
        let config = FeedConfig::new()
            .with_endpoint("http://localhost:9000/news")
            .with_api_key("k")
            .with_page_size(0)
            .with_gesture(60.0, 60.0)
            .with_end_reached_threshold(0.25);

        assert_eq!(config.endpoint, "http://localhost:9000/news");
        assert_eq!(config.api_key, "k");
        assert_eq!(config.page_size, 1);
        assert_eq!(config.header_height, 60.0);
        assert_eq!(config.refresh_threshold, 60.0);
        assert_eq!(config.end_reached_threshold, 0.25);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = FeedConfig::from_lookup(lookup_from(&[
            ("HOTNEWS_ENDPOINT", "http://example.test/hot"),
            ("HOTNEWS_API_KEY", "abc"),
            ("HOTNEWS_PAGE_SIZE", "25"),
            ("HOTNEWS_TIMEOUT_SECS", "3"),
        ]));

        assert_eq!(config.endpoint, "http://example.test/hot");
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.digest_endpoint, DEFAULT_DIGEST_ENDPOINT);
    }

    #[test]
    fn test_validate() {
        assert!(FeedConfig::default().validate().is_ok());
        assert!(FeedConfig::default().with_gesture(60.0, 90.0).validate().is_ok());

        let err = FeedConfig::default().with_endpoint("ftp://x").validate().unwrap_err();
        assert!(err.to_string().contains("endpoint"));

        assert!(FeedConfig::default().with_gesture(2.0, 4.0).validate().is_err());
        assert!(FeedConfig::default().with_gesture(2.0, 0.0).validate().is_err());
    }

    #[test]
    fn test_from_lookup_ignores_malformed_numbers() {
        let config = FeedConfig::from_lookup(lookup_from(&[
            ("HOTNEWS_PAGE_SIZE", "lots"),
            ("HOTNEWS_TIMEOUT_SECS", "0"),
        ]));

        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
