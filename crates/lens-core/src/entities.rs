//! Organization filtering over raw entity-recognition output

use crate::model::{EntityCandidate, OrganizationMention};

/// Entity category the extractor uses for companies and institutions
pub const ORGANIZATION_CATEGORY: &str = "Organization";

/// Candidates at or below this confidence are discarded
pub const ORGANIZATION_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Keep organizations with confidence strictly above the threshold
pub fn filter_organizations(candidates: &[EntityCandidate]) -> Vec<OrganizationMention> {
    candidates
        .iter()
        .filter(|entity| {
            entity.category == ORGANIZATION_CATEGORY
                && entity.confidence_score > ORGANIZATION_CONFIDENCE_THRESHOLD
        })
        .map(|entity| OrganizationMention::new(entity.text.clone(), entity.offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, category: &str, confidence: f64, offset: usize) -> EntityCandidate {
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
    fn test_threshold_is_strict() {
        let candidates = vec![
            candidate("Corsair", "Organization", 0.6, 0),
            candidate("Elgato", "Organization", 0.61, 10),
        ];

        let orgs = filter_organizations(&candidates);
        assert_eq!(orgs, vec![OrganizationMention::new("Elgato", 10)]);
    }

    #[test]
    fn test_non_organizations_dropped() {
        let candidates = vec![
            candidate("July 15th", "DateTime", 0.99, 0),
            candidate("Reddit", "Product", 0.95, 20),
            candidate("CEO", "PersonType", 0.9, 40),
            candidate("Amazon", "Organization", 0.97, 60),
        ];

        let orgs = filter_organizations(&candidates);
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].name, "Amazon");
    }

    #[test]
    fn test_category_match_is_exact() {
        let candidates = vec![candidate("Tesla", "organization", 0.99, 0)];
        assert!(filter_organizations(&candidates).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let candidates = vec![
            candidate("Microsoft", "Organization", 0.9, 0),
            candidate("Google", "Organization", 0.8, 14),
        ];
        assert_eq!(
            filter_organizations(&candidates),
            filter_organizations(&candidates)
        );
    }
}
