//! HTTP clients for thesis-lens
//!
//! - [`TextAnalyticsClient`]: sentence sentiment and entity recognition,
//!   implementing [`lens_core::TextAnalyzer`]
//! - [`FinnhubClient`]: symbol search, quote, fundamentals, recommendation
//!   trends and social sentiment, implementing [`lens_core::MarketData`];
//!   rate limited and backed by a TTL cache
//!
//! Keys and endpoints come from [`LensConfig`], usually loaded from the
//! environment with [`LensConfig::from_env`].

pub mod cache;
pub mod config;
pub mod error;
pub mod finnhub;
pub mod text_analytics;

pub use cache::{CacheKey, MarketCache};
pub use config::{LensConfig, LensConfigBuilder};
pub use error::{ApiError, Result};
pub use finnhub::FinnhubClient;
pub use text_analytics::TextAnalyticsClient;
