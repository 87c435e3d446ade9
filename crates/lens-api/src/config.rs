//! Configuration for the API clients

use crate::error::{ApiError, Result};
use lens_utils::env_var;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TEXT_ANALYTICS_ENDPOINT: &str = "https://eastus.api.cognitive.microsoft.com";
pub const DEFAULT_FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

pub const ENV_TEXT_ANALYTICS_ENDPOINT: &str = "TEXT_ANALYTICS_ENDPOINT";
pub const ENV_TEXT_ANALYTICS_KEY: &str = "TEXT_ANALYTICS_KEY";
pub const ENV_FINNHUB_BASE_URL: &str = "FINNHUB_BASE_URL";
pub const ENV_FINNHUB_API_KEY: &str = "FINNHUB_API_KEY";
pub const ENV_TEXT_LANGUAGE: &str = "TEXT_LANGUAGE";

/// Settings for the text-analytics and market-data clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LensConfig {
    /// Base URL of the text-analytics resource
    pub text_analytics_endpoint: String,

    /// Subscription key for the text-analytics resource
    pub text_analytics_key: Option<String>,

    /// Base URL of the Finnhub REST API
    pub finnhub_base_url: String,

    /// Finnhub API token (needed for enrichment only)
    pub finnhub_api_key: Option<String>,

    /// Document language sent with every analysis request
    pub language: String,

    /// Maximum market-data requests per minute
    pub rate_limit_per_minute: u32,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// How long market-data responses are reused
    pub cache_ttl: Duration,

    /// Days of social-sentiment history to request
    pub social_lookback_days: u32,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            text_analytics_endpoint: DEFAULT_TEXT_ANALYTICS_ENDPOINT.to_string(),
            text_analytics_key: None,
            finnhub_base_url: DEFAULT_FINNHUB_BASE_URL.to_string(),
            finnhub_api_key: None,
            language: "en".to_string(),
            rate_limit_per_minute: 60,               // Finnhub free tier
            request_timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(300),      // 5 minutes
            social_lookback_days: 7,
        }
    }
}

impl LensConfig {
    /// Create a new configuration builder
    pub fn builder() -> LensConfigBuilder {
        LensConfigBuilder::default()
    }

    /// Defaults overridden by whatever the environment provides
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env_keys().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.text_analytics_key.is_none() {
            return Err(ApiError::Config(format!(
                "text analytics key required (set {ENV_TEXT_ANALYTICS_KEY})"
            )));
        }

        if self.rate_limit_per_minute == 0 {
            return Err(ApiError::Config(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        if self.language.trim().is_empty() {
            return Err(ApiError::Config("language must not be empty".to_string()));
        }

        Url::parse(&self.text_analytics_endpoint)?;
        Url::parse(&self.finnhub_base_url)?;
        Ok(())
    }

    /// Finnhub key, or a configuration error naming the variable to set
    pub fn require_finnhub_key(&self) -> Result<&str> {
        self.finnhub_api_key.as_deref().ok_or_else(|| {
            ApiError::Config(format!(
                "Finnhub API key required for enrichment (set {ENV_FINNHUB_API_KEY})"
            ))
        })
    }
}

/// Builder for LensConfig
#[derive(Debug, Default)]
pub struct LensConfigBuilder {
    text_analytics_endpoint: Option<String>,
    text_analytics_key: Option<String>,
    finnhub_base_url: Option<String>,
    finnhub_api_key: Option<String>,
    language: Option<String>,
    rate_limit_per_minute: Option<u32>,
    request_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
    social_lookback_days: Option<u32>,
}

impl LensConfigBuilder {
    /// Set the text-analytics endpoint
    pub fn text_analytics_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.text_analytics_endpoint = Some(endpoint.into());
        self
    }

    /// Set the text-analytics subscription key
    pub fn text_analytics_key(mut self, key: impl Into<String>) -> Self {
        self.text_analytics_key = Some(key.into());
        self
    }

    /// Set the Finnhub base URL
    pub fn finnhub_base_url(mut self, url: impl Into<String>) -> Self {
        self.finnhub_base_url = Some(url.into());
        self
    }

    /// Set the Finnhub API key
    pub fn finnhub_api_key(mut self, key: impl Into<String>) -> Self {
        self.finnhub_api_key = Some(key.into());
        self
    }

    /// Set the document language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the market-data rate limit
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set market-data cache TTL
    pub fn cache_ttl(mut self, duration: Duration) -> Self {
        self.cache_ttl = Some(duration);
        self
    }

    /// Set the social-sentiment lookback window
    pub fn social_lookback_days(mut self, days: u32) -> Self {
        self.social_lookback_days = Some(days);
        self
    }

    /// Fill unset endpoints, keys and language from the environment
    ///
    /// Values set explicitly on the builder win.
    pub fn with_env_keys(mut self) -> Self {
        self.text_analytics_endpoint = self
            .text_analytics_endpoint
            .or_else(|| env_var(ENV_TEXT_ANALYTICS_ENDPOINT));
        self.text_analytics_key = self
            .text_analytics_key
            .or_else(|| env_var(ENV_TEXT_ANALYTICS_KEY));
        self.finnhub_base_url = self
            .finnhub_base_url
            .or_else(|| env_var(ENV_FINNHUB_BASE_URL));
        self.finnhub_api_key = self
            .finnhub_api_key
            .or_else(|| env_var(ENV_FINNHUB_API_KEY));
        self.language = self.language.or_else(|| env_var(ENV_TEXT_LANGUAGE));
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<LensConfig> {
        let defaults = LensConfig::default();

        let config = LensConfig {
            text_analytics_endpoint: self
                .text_analytics_endpoint
                .unwrap_or(defaults.text_analytics_endpoint),
            text_analytics_key: self.text_analytics_key,
            finnhub_base_url: self.finnhub_base_url.unwrap_or(defaults.finnhub_base_url),
            finnhub_api_key: self.finnhub_api_key,
            language: self.language.unwrap_or(defaults.language),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            social_lookback_days: self
                .social_lookback_days
                .unwrap_or(defaults.social_lookback_days),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_needs_key() {
        let config = LensConfig::default();
        assert_eq!(config.language, "en");
        assert_eq!(config.rate_limit_per_minute, 60);
        assert!(matches!(config.validate(), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_config_builder() {
        let config = LensConfig::builder()
            .text_analytics_key("ta-key")
            .finnhub_api_key("fh-key")
            .language("de")
            .request_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.text_analytics_key.as_deref(), Some("ta-key"));
        assert_eq!(config.language, "de");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.finnhub_base_url, DEFAULT_FINNHUB_BASE_URL);
        assert_eq!(config.require_finnhub_key().unwrap(), "fh-key");
    }

    #[test]
    fn test_validation_zero_rate_limit() {
        let result = LensConfig::builder()
            .text_analytics_key("ta-key")
            .rate_limit_per_minute(0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_bad_url() {
        let result = LensConfig::builder()
            .text_analytics_key("ta-key")
            .finnhub_base_url("not a url")
            .build();
        assert!(matches!(result, Err(ApiError::Url(_))));
    }

    #[test]
    fn test_missing_finnhub_key() {
        let config = LensConfig {
            text_analytics_key: Some("ta-key".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.require_finnhub_key().is_err());
    }
}
