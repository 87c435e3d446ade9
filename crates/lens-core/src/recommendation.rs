//! Analyst recommendation aggregation

use crate::model::{Recommendation, RecommendationLabel, RecommendationTrend};

/// Pick the recommendation category with the most analysts
///
/// Categories are checked in the order buy (buy + strong buy), sell
/// (sell + strong sell), hold. A later category only wins when its count is
/// strictly greater, so ties keep the earlier one. Without data, or when
/// every count is zero, the result is `unknown` with count 0.
pub fn aggregate_recommendation(trend: Option<&RecommendationTrend>) -> Recommendation {
    let Some(trend) = trend else {
        return Recommendation::unknown();
    };

    let candidates = [
        (RecommendationLabel::Buy, trend.buy + trend.strong_buy),
        (RecommendationLabel::Sell, trend.sell + trend.strong_sell),
        (RecommendationLabel::Hold, trend.hold),
    ];

    candidates
        .into_iter()
        .fold(Recommendation::unknown(), |best, (label, count)| {
            if count > best.count {
                Recommendation { label, count }
            } else {
                best
            }
        })
}
