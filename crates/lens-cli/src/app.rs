//! Wiring of configuration, clients and the view state

use anyhow::Result;
use lens_api::{FinnhubClient, LensConfig, TextAnalyticsClient};
use lens_core::{Effect, Enricher, PageView, SegmentEvent, Segmenter};
use std::sync::Arc;
use tracing::{info, warn};

/// Pipeline handles for one CLI session
pub struct Lens {
    segmenter: Segmenter,
    enricher: Option<Enricher>,
    finnhub: Option<FinnhubClient>,
}

impl Lens {
    /// Build clients from configuration
    ///
    /// Enrichment is optional: without a Finnhub key, expanding a sentence
    /// reports the missing key in each info box instead of failing the run.
    pub fn from_config(config: &LensConfig) -> Result<Self> {
        let analyzer = TextAnalyticsClient::from_config(config)?;

        let finnhub = match FinnhubClient::from_config(config) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Market data disabled: {}", e);
                None
            },
        };

        Ok(Self {
            segmenter: Segmenter::new(Arc::new(analyzer)),
            enricher: finnhub
                .clone()
                .map(|client| Enricher::new(Arc::new(client))),
            finnhub,
        })
    }

    /// Segment `text` into a fresh page
    pub async fn load(&self, text: &str) -> PageView {
        PageView::from_result(self.segmenter.segment(text).await)
    }

    /// Apply an event and carry out whatever loading it triggers
    pub async fn dispatch(
        &self,
        page: &mut PageView,
        index: usize,
        event: SegmentEvent,
    ) -> lens_core::Result<()> {
        if let Some(effect) = page.dispatch(index, event)? {
            self.perform(page, effect).await?;
        }
        Ok(())
    }

    async fn perform(&self, page: &mut PageView, effect: Effect) -> lens_core::Result<()> {
        match effect {
            Effect::LoadOrganizations { segment, mentions } => {
                info!("Loading {} organizations for sentence {}", mentions.len(), segment);
                let results = match &self.enricher {
                    Some(enricher) => enricher.enrich_all(&mentions).await,
                    None => mentions
                        .iter()
                        .map(|_| {
                            Err(lens_core::Error::Config(
                                "market data unavailable: FINNHUB_API_KEY not set".to_string(),
                            ))
                        })
                        .collect(),
                };
                page.resolve(segment, results)
            },
        }
    }

    /// Drop cached market data so the next expansion refetches
    pub async fn clear_cache(&self) -> usize {
        let Some(finnhub) = &self.finnhub else {
            return 0;
        };
        let cleared = finnhub.cache().len().await;
        finnhub.cache().clear().await;
        cleared
    }
}
