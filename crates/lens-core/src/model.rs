//! Domain types shared by every stage of the pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment label assigned to a sentence by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

impl Sentiment {
    /// Lower-case label, also used as the CSS class of a highlighted sentence
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified sentence of the submitted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub sentiment: Sentiment,
    /// Start offset in the submitted text, in code points
    pub offset: usize,
    /// Length in code points
    pub length: usize,
}

impl Sentence {
    pub fn new(text: impl Into<String>, sentiment: Sentiment, offset: usize, length: usize) -> Self {
        Self {
            text: text.into(),
            sentiment,
            offset,
            length,
        }
    }
}

/// Raw entity as returned by the entity-recognition endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCandidate {
    pub text: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub confidence_score: f64,
    pub offset: usize,
    pub length: usize,
}

/// An organization detected in the submitted text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationMention {
    pub name: String,
    pub offset: usize,
}

impl OrganizationMention {
    pub fn new(name: impl Into<String>, offset: usize) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }

    /// Stable display key: the same name can appear at several offsets
    pub fn key(&self) -> String {
        format!("{}{}", self.name, self.offset)
    }
}

/// A sentence together with the organizations mentioned inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub sentence: Sentence,
    pub organizations: Vec<OrganizationMention>,
}

/// Symbol search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub description: Option<String>,
    pub display_symbol: Option<String>,
    pub kind: Option<String>,
}

impl SymbolMatch {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            description: None,
            display_symbol: None,
            kind: None,
        }
    }
}

/// Real-time quote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub current: f64,
    pub change: Option<f64>,
    pub percent_change: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub open: Option<f64>,
    pub previous_close: Option<f64>,
}

impl Quote {
    pub fn with_price(current: f64) -> Self {
        Self {
            current,
            ..Default::default()
        }
    }
}

/// Valuation metrics; missing values are zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    /// Basic P/E excluding extraordinary items, trailing twelve months
    pub pe_ratio: f64,
    /// Annual free cash flow, in millions
    pub free_cash_flow_annual: f64,
}

/// Analyst recommendation counts for one period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationTrend {
    pub buy: u32,
    pub strong_buy: u32,
    pub sell: u32,
    pub strong_sell: u32,
    pub hold: u32,
    pub period: Option<String>,
}

/// Aggregated recommendation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationLabel {
    Buy,
    Sell,
    Hold,
    Unknown,
}

impl RecommendationLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Hold => "hold",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RecommendationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Winning recommendation category and its analyst count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub label: RecommendationLabel,
    pub count: u32,
}

impl Recommendation {
    pub fn unknown() -> Self {
        Self {
            label: RecommendationLabel::Unknown,
            count: 0,
        }
    }
}

/// Social media mention count at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMention {
    pub at_time: String,
    pub mention: u64,
}

/// An organization mention with whatever market data could be attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedOrganization {
    pub mention: OrganizationMention,
    /// Empty when no tradable symbol was found
    pub symbol: String,
    pub quote: Option<Quote>,
    pub fundamentals: Option<Fundamentals>,
    pub recommendation: Option<Recommendation>,
    pub social: Option<SocialMention>,
}

impl EnrichedOrganization {
    /// Placeholder for an organization without a tradable symbol
    pub fn unresolved(mention: OrganizationMention) -> Self {
        Self {
            mention,
            symbol: String::new(),
            quote: None,
            fundamentals: None,
            recommendation: None,
            social: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.symbol.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_wire_format() {
        let sentiment: Sentiment = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(sentiment, Sentiment::Negative);
        assert_eq!(sentiment.to_string(), "negative");
    }

    #[test]
    fn test_mention_key() {
        assert_eq!(OrganizationMention::new("Tesla", 42).key(), "Tesla42");
    }

    #[test]
    fn test_unresolved_placeholder() {
        let org = EnrichedOrganization::unresolved(OrganizationMention::new("Eagle Tree", 3));
        assert!(!org.is_resolved());
        assert!(org.symbol.is_empty());
        assert!(org.quote.is_none());
        assert!(org.social.is_none());
    }
}
