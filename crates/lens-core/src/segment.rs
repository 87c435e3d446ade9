//! Pipeline driver: classify, extract, filter, align

use crate::align::{align, offset_mismatches};
use crate::entities::filter_organizations;
use crate::model::Segment;
use crate::ports::TextAnalyzer;
use crate::{Error, Result};
use std::sync::Arc;

/// Turns submitted text into sentiment-tagged segments with their organizations
#[derive(Clone)]
pub struct Segmenter {
    analyzer: Arc<dyn TextAnalyzer>,
}

impl Segmenter {
    pub fn new(analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Run the sentence and entity stages over `text` and align the results
    pub async fn segment(&self, text: &str) -> Result<Vec<Segment>> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let sentences = self.analyzer.classify_sentences(text).await?;
        tracing::debug!("Classified {} sentences", sentences.len());

        let candidates = self.analyzer.recognize_entities(text).await?;
        let orgs = filter_organizations(&candidates);
        tracing::debug!(
            "Kept {} of {} entities as organizations",
            orgs.len(),
            candidates.len()
        );

        for org in offset_mismatches(text, &orgs) {
            tracing::warn!(
                "Entity '{}' not found at offset {}; sentence alignment may be wrong",
                org.name,
                org.offset
            );
        }

        let segments = align(&sentences, &orgs);
        tracing::info!(
            "Segmented text into {} sentences with {} organizations",
            segments.len(),
            orgs.len()
        );
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityCandidate, Sentence, Sentiment};
    use crate::ports::MockTextAnalyzer;

    fn entity(text: &str, category: &str, confidence: f64, offset: usize) -> EntityCandidate {
        EntityCandidate {
            text: text.to_string(),
            category: category.to_string(),
            subcategory: None,
            confidence_score: confidence,
            offset,
            length: text.chars().count(),
        }
    }

    #[test]
    fn test_empty_input_rejected_without_calls() {
        let mut analyzer = MockTextAnalyzer::new();
        analyzer.expect_classify_sentences().never();
        analyzer.expect_recognize_entities().never();

        let segmenter = Segmenter::new(Arc::new(analyzer));
        let result = tokio_test::block_on(segmenter.segment("   \n"));
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[tokio::test]
    async fn test_segments_filter_and_align() {
        let text = "Tesla beat estimates. Investors in Reddit cheered.";
        let mut analyzer = MockTextAnalyzer::new();
        analyzer.expect_classify_sentences().returning(|_| {
            Ok(vec![
                Sentence::new("Tesla beat estimates. ", Sentiment::Positive, 0, 22),
                Sentence::new("Investors in Reddit cheered.", Sentiment::Positive, 22, 28),
            ])
        });
        analyzer.expect_recognize_entities().returning(|_| {
            Ok(vec![
                entity("Tesla", "Organization", 0.92, 0),
                entity("Reddit", "Organization", 0.6, 35),
            ])
        });

        let segmenter = Segmenter::new(Arc::new(analyzer));
        let segments = segmenter.segment(text).await.unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].organizations.len(), 1);
        assert_eq!(segments[0].organizations[0].name, "Tesla");
        // Reddit sits exactly on the threshold
        assert!(segments[1].organizations.is_empty());
    }

    #[tokio::test]
    async fn test_classifier_error_propagates() {
        let mut analyzer = MockTextAnalyzer::new();
        analyzer
            .expect_classify_sentences()
            .returning(|_| Err(Error::Upstream("401 Unauthorized".to_string())));
        analyzer.expect_recognize_entities().never();

        let segmenter = Segmenter::new(Arc::new(analyzer));
        let result = segmenter.segment("Some text.").await;
        assert!(matches!(result, Err(Error::Upstream(_))));
    }
}
