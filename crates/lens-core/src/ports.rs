//! Traits for the external services the pipeline depends on
//!
//! The HTTP implementations live in `lens-api`; tests substitute mocks.

use crate::Result;
use crate::model::{
    EntityCandidate, Fundamentals, Quote, RecommendationTrend, Sentence, SocialMention,
    SymbolMatch,
};
use async_trait::async_trait;

/// Sentence-level sentiment and entity recognition over one document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    /// Split `text` into sentences, each with a sentiment label and span
    async fn classify_sentences(&self, text: &str) -> Result<Vec<Sentence>>;

    /// Recognize named entities of every category in `text`
    async fn recognize_entities(&self, text: &str) -> Result<Vec<EntityCandidate>>;
}

/// Market data lookups keyed by ticker symbol
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Free-text symbol search, best match first
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>>;

    /// Latest quote
    async fn quote(&self, symbol: &str) -> Result<Quote>;

    /// Basic valuation metrics
    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals>;

    /// Analyst recommendation trends, most recent period first
    async fn recommendation_trends(&self, symbol: &str) -> Result<Vec<RecommendationTrend>>;

    /// Reddit mention counts, most recent first
    async fn social_sentiment(&self, symbol: &str) -> Result<Vec<SocialMention>>;
}
