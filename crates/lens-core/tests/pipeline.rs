//! End-to-end pipeline tests against in-memory stand-ins for the APIs

use async_trait::async_trait;
use lens_core::{
    Effect, EntityCandidate, Enricher, Error, Fundamentals, MarketData, OrganizationView,
    PageView, Quote, RecommendationLabel, RecommendationTrend, Result, SegmentEvent, Segmenter,
    Sentence, Sentiment, SocialMention, SymbolMatch, TextAnalyzer, render_html, render_text,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const EARNINGS_TEXT: &str = include_str!("../../../fixtures/earnings.txt");

/// Replays canned sentences and entities
struct CannedAnalyzer {
    sentences: Vec<Sentence>,
    entities: Vec<EntityCandidate>,
}

#[async_trait]
impl TextAnalyzer for CannedAnalyzer {
    async fn classify_sentences(&self, _text: &str) -> Result<Vec<Sentence>> {
        Ok(self.sentences.clone())
    }

    async fn recognize_entities(&self, _text: &str) -> Result<Vec<EntityCandidate>> {
        Ok(self.entities.clone())
    }
}

/// Market data keyed by company name, counting symbol searches
#[derive(Default)]
struct TableMarket {
    symbols: HashMap<String, String>,
    prices: HashMap<String, f64>,
    searches: AtomicUsize,
}

#[async_trait]
impl MarketData for TableMarket {
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .symbols
            .get(query)
            .map(|s| vec![SymbolMatch::new(s.clone())])
            .unwrap_or_default())
    }

    async fn quote(&self, symbol: &str) -> Result<Quote> {
        self.prices
            .get(symbol)
            .map(|p| Quote::with_price(*p))
            .ok_or_else(|| Error::Upstream(format!("no quote for {symbol}")))
    }

    async fn fundamentals(&self, _symbol: &str) -> Result<Fundamentals> {
        Ok(Fundamentals {
            pe_ratio: 30.0,
            free_cash_flow_annual: 1000.0,
        })
    }

    async fn recommendation_trends(&self, _symbol: &str) -> Result<Vec<RecommendationTrend>> {
        Ok(vec![RecommendationTrend {
            buy: 5,
            strong_buy: 3,
            sell: 1,
            strong_sell: 0,
            hold: 7,
            period: None,
        }])
    }

    async fn social_sentiment(&self, _symbol: &str) -> Result<Vec<SocialMention>> {
        Ok(vec![])
    }
}

fn entity(text: &str, confidence: f64, offset: usize) -> EntityCandidate {
    EntityCandidate {
        text: text.to_string(),
        category: "Organization".to_string(),
        subcategory: None,
        confidence_score: confidence,
        offset,
        length: text.chars().count(),
    }
}

fn earnings_analyzer() -> CannedAnalyzer {
    let text = EARNINGS_TEXT.trim_end();
    CannedAnalyzer {
        sentences: vec![Sentence::new(
            text,
            Sentiment::Positive,
            0,
            text.chars().count(),
        )],
        entities: vec![entity("Microsoft", 0.99, 0), entity("Google", 0.98, 14)],
    }
}

fn earnings_market() -> TableMarket {
    TableMarket {
        symbols: HashMap::from([("Microsoft".to_string(), "MSFT".to_string())]),
        prices: HashMap::from([("MSFT".to_string(), 289.67)]),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_both_organizations_align_to_single_sentence() {
    let segmenter = Segmenter::new(Arc::new(earnings_analyzer()));
    let segments = segmenter.segment(EARNINGS_TEXT).await.unwrap();

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].sentence.sentiment, Sentiment::Positive);
    let names: Vec<_> = segments[0]
        .organizations
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(names, ["Microsoft", "Google"]);
}

#[tokio::test]
async fn test_segmentation_is_repeatable() {
    let segmenter = Segmenter::new(Arc::new(earnings_analyzer()));
    let first = segmenter.segment(EARNINGS_TEXT).await.unwrap();
    let second = segmenter.segment(EARNINGS_TEXT).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_expand_enrich_and_render() {
    let segmenter = Segmenter::new(Arc::new(earnings_analyzer()));
    let market = Arc::new(earnings_market());
    let enricher = Enricher::new(market.clone());

    let mut page = PageView::from_result(segmenter.segment(EARNINGS_TEXT).await);

    let effect = page.dispatch(0, SegmentEvent::Click).unwrap();
    let Some(Effect::LoadOrganizations { segment, mentions }) = effect else {
        panic!("expanding a sentence with organizations must request data");
    };
    assert!(render_text(&page).contains("Loading..."));

    let results = enricher.enrich_all(&mentions).await;
    page.resolve(segment, results).unwrap();

    let orgs = &page.entries()[0].organizations;
    let OrganizationView::Loaded(msft) = &orgs[0] else {
        panic!("Microsoft should be loaded");
    };
    assert_eq!(msft.symbol, "MSFT");
    assert_eq!(
        msft.recommendation.map(|r| (r.label, r.count)),
        Some((RecommendationLabel::Buy, 8))
    );
    let OrganizationView::Loaded(google) = &orgs[1] else {
        panic!("Google should be loaded");
    };
    assert!(!google.is_resolved());

    let html = render_html(&page, &Default::default()).unwrap();
    assert!(html.contains("Stock: MSFT"));
    assert!(html.contains("Current Price: 289.67"));
    assert!(!html.contains("Loading..."));

    // collapsing and expanding again reuses the loaded data
    assert!(page.dispatch(0, SegmentEvent::Click).unwrap().is_none());
    assert!(page.dispatch(0, SegmentEvent::Click).unwrap().is_none());
    assert_eq!(market.searches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_low_confidence_organizations_are_ignored() {
    let mut analyzer = earnings_analyzer();
    analyzer.entities = vec![entity("Microsoft", 0.6, 0), entity("Google", 0.95, 14)];

    let segmenter = Segmenter::new(Arc::new(analyzer));
    let segments = segmenter.segment(EARNINGS_TEXT).await.unwrap();
    assert_eq!(segments[0].organizations.len(), 1);
    assert_eq!(segments[0].organizations[0].name, "Google");
}
