//! Market-data enrichment of organization mentions

use crate::Result;
use crate::model::{EnrichedOrganization, Fundamentals, OrganizationMention};
use crate::ports::MarketData;
use crate::recommendation::aggregate_recommendation;
use std::sync::Arc;

/// Attaches quote, fundamentals, recommendation and social data to mentions
#[derive(Clone)]
pub struct Enricher {
    market: Arc<dyn MarketData>,
}

impl Enricher {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }

    /// Enrich a single mention
    ///
    /// Symbol resolution must succeed before anything else is fetched. When
    /// the search returns nothing the unresolved placeholder is returned.
    /// The four per-symbol lookups run concurrently and each falls back to a
    /// default on failure, so only a failed symbol search is an error.
    pub async fn enrich(&self, mention: &OrganizationMention) -> Result<EnrichedOrganization> {
        let matches = self.market.search_symbols(&mention.name).await?;

        let Some(symbol) = matches
            .into_iter()
            .next()
            .map(|m| m.symbol)
            .filter(|s| !s.is_empty())
        else {
            tracing::info!("No tradable symbol for {}", mention.name);
            return Ok(EnrichedOrganization::unresolved(mention.clone()));
        };

        tracing::debug!("Resolved {} to {}", mention.name, symbol);

        let (quote, fundamentals, trends, social) = tokio::join!(
            self.market.quote(&symbol),
            self.market.fundamentals(&symbol),
            self.market.recommendation_trends(&symbol),
            self.market.social_sentiment(&symbol),
        );

        let quote = quote
            .inspect_err(|e| tracing::warn!("Quote lookup failed for {}: {}", symbol, e))
            .ok();

        let fundamentals = fundamentals.unwrap_or_else(|e| {
            tracing::warn!("Fundamentals lookup failed for {}: {}", symbol, e);
            Fundamentals::default()
        });

        let trends = trends.unwrap_or_else(|e| {
            tracing::warn!("Recommendation lookup failed for {}: {}", symbol, e);
            Vec::new()
        });
        let recommendation = aggregate_recommendation(trends.first());

        let social = social
            .inspect_err(|e| tracing::warn!("Social sentiment lookup failed for {}: {}", symbol, e))
            .ok()
            .and_then(|mentions| mentions.into_iter().next());

        Ok(EnrichedOrganization {
            mention: mention.clone(),
            symbol,
            quote,
            fundamentals: Some(fundamentals),
            recommendation: Some(recommendation),
            social,
        })
    }

    /// Enrich several mentions; results line up with `mentions`
    pub async fn enrich_all(
        &self,
        mentions: &[OrganizationMention],
    ) -> Vec<Result<EnrichedOrganization>> {
        futures::future::join_all(mentions.iter().map(|mention| self.enrich(mention))).await
    }
}
