//! Core pipeline for thesis-lens
//!
//! Takes free-form text through four stages:
//!
//! - sentence classification (sentiment per sentence, via [`TextAnalyzer`])
//! - entity extraction, filtered to confident organization mentions
//! - alignment of organizations to the sentence whose span contains them
//! - enrichment of each organization with market data (via [`MarketData`])
//!
//! The [`view`] module holds the display state of the resulting document
//! (which sentences are expanded or hovered, which organizations are still
//! loading) and renders it to HTML or plain text.
//!
//! # Example
//!
//! ```rust,ignore
//! use lens_core::{Enricher, PageView, Segmenter, SegmentEvent, Effect};
//! use std::sync::Arc;
//!
//! let segmenter = Segmenter::new(Arc::new(analyzer));
//! let enricher = Enricher::new(Arc::new(market));
//!
//! let mut page = PageView::from_result(segmenter.segment(&text).await);
//! if let Some(Effect::LoadOrganizations { segment, mentions }) =
//!     page.dispatch(0, SegmentEvent::Click)?
//! {
//!     let results = enricher.enrich_all(&mentions).await;
//!     page.resolve(segment, results)?;
//! }
//! println!("{}", lens_core::render_text(&page));
//! ```

pub mod align;
pub mod enrich;
pub mod entities;
pub mod error;
pub mod model;
pub mod ports;
pub mod recommendation;
pub mod segment;
pub mod view;

pub use align::{align, contained_orgs, offset_mismatches};
pub use enrich::Enricher;
pub use entities::{ORGANIZATION_CONFIDENCE_THRESHOLD, filter_organizations};
pub use error::{Error, Result};
pub use model::{
    EnrichedOrganization, EntityCandidate, Fundamentals, OrganizationMention, Quote,
    Recommendation, RecommendationLabel, RecommendationTrend, Segment, Sentence, Sentiment,
    SocialMention, SymbolMatch,
};
pub use ports::{MarketData, TextAnalyzer};
pub use recommendation::aggregate_recommendation;
pub use segment::Segmenter;
pub use view::{
    Effect, HtmlOptions, OrganizationView, PageView, SegmentEvent, SegmentView, render_html,
    render_text,
};
