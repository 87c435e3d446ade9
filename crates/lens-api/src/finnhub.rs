//! Finnhub API client for symbol search, quotes, fundamentals,
//! recommendation trends and social sentiment

use crate::cache::{CacheKey, MarketCache};
use crate::config::LensConfig;
use crate::error::{ApiError, Result, check_status};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDateTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use lens_core::{
    Fundamentals, MarketData, Quote, RecommendationTrend, SocialMention, SymbolMatch,
};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

const PROVIDER: &str = "Finnhub";
const SOCIAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<WireSymbol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSymbol {
    symbol: String,
    description: Option<String>,
    display_symbol: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Quote fields are single letters on the wire
#[derive(Debug, Deserialize)]
struct WireQuote {
    c: Option<f64>,
    d: Option<f64>,
    dp: Option<f64>,
    h: Option<f64>,
    l: Option<f64>,
    o: Option<f64>,
    pc: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MetricResponse {
    metric: Option<WireMetric>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMetric {
    #[serde(rename = "peBasicExclExtraTTM")]
    pe_basic_excl_extra_ttm: Option<f64>,
    free_cash_flow_annual: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTrend {
    #[serde(default)]
    buy: u32,
    #[serde(default)]
    strong_buy: u32,
    #[serde(default)]
    sell: u32,
    #[serde(default)]
    strong_sell: u32,
    #[serde(default)]
    hold: u32,
    period: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SocialResponse {
    #[serde(default)]
    reddit: Vec<WireSocial>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSocial {
    at_time: String,
    #[serde(default)]
    mention: u64,
}

impl From<WireSymbol> for SymbolMatch {
    fn from(wire: WireSymbol) -> Self {
        SymbolMatch {
            symbol: wire.symbol,
            description: wire.description,
            display_symbol: wire.display_symbol,
            kind: wire.kind,
        }
    }
}

impl From<WireQuote> for Quote {
    fn from(wire: WireQuote) -> Self {
        Quote {
            current: wire.c.unwrap_or_default(),
            change: wire.d,
            percent_change: wire.dp,
            high: wire.h,
            low: wire.l,
            open: wire.o,
            previous_close: wire.pc,
        }
    }
}

impl From<MetricResponse> for Fundamentals {
    fn from(wire: MetricResponse) -> Self {
        let Some(metric) = wire.metric else {
            return Fundamentals::default();
        };
        Fundamentals {
            pe_ratio: metric.pe_basic_excl_extra_ttm.unwrap_or_default(),
            free_cash_flow_annual: metric.free_cash_flow_annual.unwrap_or_default(),
        }
    }
}

impl From<WireTrend> for RecommendationTrend {
    fn from(wire: WireTrend) -> Self {
        RecommendationTrend {
            buy: wire.buy,
            strong_buy: wire.strong_buy,
            sell: wire.sell,
            strong_sell: wire.strong_sell,
            hold: wire.hold,
            period: wire.period,
        }
    }
}

/// Reddit entries, most recent first
///
/// Entries whose timestamp does not parse keep their relative order after
/// the parsed ones.
fn latest_first(reddit: Vec<WireSocial>) -> Vec<SocialMention> {
    let mut entries: Vec<(Option<NaiveDateTime>, SocialMention)> = reddit
        .into_iter()
        .map(|wire| {
            let parsed = NaiveDateTime::parse_from_str(&wire.at_time, SOCIAL_TIME_FORMAT).ok();
            (
                parsed,
                SocialMention {
                    at_time: wire.at_time,
                    mention: wire.mention,
                },
            )
        })
        .collect();
    entries.sort_by(|a, b| b.0.cmp(&a.0));
    entries.into_iter().map(|(_, mention)| mention).collect()
}

/// Finnhub REST client with rate limiting and response caching
#[derive(Clone)]
pub struct FinnhubClient {
    client: Client,
    base_url: String,
    api_key: String,
    rate_limiter: SharedRateLimiter,
    cache: MarketCache,
    social_lookback_days: u32,
}

impl FinnhubClient {
    /// Create a new Finnhub client with rate limiting
    ///
    /// # Arguments
    /// * `api_key` - Finnhub API key
    /// * `rate_limit` - Requests per minute (free tier: 60)
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Self {
        Self::with_parts(
            Client::new(),
            crate::config::DEFAULT_FINNHUB_BASE_URL,
            api_key,
            rate_limit,
            Duration::from_secs(300),
            7,
        )
    }

    /// Create from configuration; fails when no Finnhub key is set
    pub fn from_config(config: &LensConfig) -> Result<Self> {
        let api_key = config.require_finnhub_key()?;
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self::with_parts(
            client,
            &config.finnhub_base_url,
            api_key,
            config.rate_limit_per_minute,
            config.cache_ttl,
            config.social_lookback_days,
        ))
    }

    fn with_parts(
        client: Client,
        base_url: &str,
        api_key: impl Into<String>,
        rate_limit: u32,
        cache_ttl: Duration,
        social_lookback_days: u32,
    ) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            cache: MarketCache::new(cache_ttl),
            social_lookback_days,
        }
    }

    /// Response cache shared by all clones of this client
    pub fn cache(&self) -> &MarketCache {
        &self.cache
    }

    /// GET `{base}/{endpoint}` and decode the body, going through the cache
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        let key = CacheKey::new(endpoint, params);

        let value = self
            .cache
            .get_or_fetch(key, || async {
                self.rate_limiter.until_ready().await;

                let url = format!("{}/{}", self.base_url, endpoint);
                tracing::debug!("GET {} {:?}", url, params);

                let response = self
                    .client
                    .get(&url)
                    .query(params)
                    .query(&[("token", self.api_key.as_str())])
                    .send()
                    .await?;
                let response = check_status(PROVIDER, response).await?;

                Ok::<_, ApiError>(response.json::<serde_json::Value>().await?)
            })
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Search symbols matching a company name
    pub async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        let response: SearchResponse = self.get("search", &[("q", query)]).await?;
        Ok(response.result.into_iter().map(SymbolMatch::from).collect())
    }

    /// Get the real-time quote for a symbol
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let quote: WireQuote = self.get("quote", &[("symbol", symbol)]).await?;
        Ok(quote.into())
    }

    /// Get P/E and free cash flow for a symbol
    pub async fn get_fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        let response: MetricResponse = self
            .get("stock/metric", &[("metric", "all"), ("symbol", symbol)])
            .await?;
        Ok(response.into())
    }

    /// Get analyst recommendation trends, most recent period first
    pub async fn get_recommendation_trends(&self, symbol: &str) -> Result<Vec<RecommendationTrend>> {
        let trends: Vec<WireTrend> = self
            .get("stock/recommendation", &[("symbol", symbol)])
            .await?;
        Ok(trends.into_iter().map(RecommendationTrend::from).collect())
    }

    /// Get Reddit mention counts within the lookback window, most recent first
    pub async fn get_social_sentiment(&self, symbol: &str) -> Result<Vec<SocialMention>> {
        let from = (Utc::now() - ChronoDuration::days(i64::from(self.social_lookback_days)))
            .format("%Y-%m-%d")
            .to_string();
        let response: SocialResponse = self
            .get(
                "stock/social-sentiment",
                &[("symbol", symbol), ("from", from.as_str())],
            )
            .await?;
        Ok(latest_first(response.reddit))
    }
}

#[async_trait]
impl MarketData for FinnhubClient {
    async fn search_symbols(&self, query: &str) -> lens_core::Result<Vec<SymbolMatch>> {
        Ok(self.search(query).await?)
    }

    async fn quote(&self, symbol: &str) -> lens_core::Result<Quote> {
        Ok(self.get_quote(symbol).await?)
    }

    async fn fundamentals(&self, symbol: &str) -> lens_core::Result<Fundamentals> {
        Ok(self.get_fundamentals(symbol).await?)
    }

    async fn recommendation_trends(
        &self,
        symbol: &str,
    ) -> lens_core::Result<Vec<RecommendationTrend>> {
        Ok(self.get_recommendation_trends(symbol).await?)
    }

    async fn social_sentiment(&self, symbol: &str) -> lens_core::Result<Vec<SocialMention>> {
        Ok(self.get_social_sentiment(symbol).await?)
    }
}
