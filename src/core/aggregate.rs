use crate::models::domain::{RankingWeights, SignalScores};

/// Combine signal scores into a single ranking score (0-1)
///
/// Scoring formula:
/// score = (
///     vibe_similarity * 0.30 +      # best reference match
///     product_similarity * 0.25 +   # query vs item embedding
///     style_taxonomy * 0.25 +       # affinity table
///     occasion_match * 0.12 +       # requested occasions
///     price_compatibility * 0.05    # budget tier
/// )
///
/// The `diversity_bonus` weight does not take part in the sum: diversity is
/// applied as a multiplier on this score during re-ranking.
#[inline]
pub fn aggregate_score(signals: &SignalScores, weights: &RankingWeights) -> f64 {
    let total = signals.vibe_similarity * weights.vibe_similarity
        + signals.product_similarity * weights.product_similarity
        + signals.style_taxonomy * weights.style_taxonomy
        + signals.occasion_match * weights.occasion_match
        + signals.price_compatibility * weights.price_compatibility;

    total.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(value: f64) -> SignalScores {
        SignalScores {
            vibe_similarity: value,
            product_similarity: value,
            style_taxonomy: value,
            occasion_match: value,
            price_compatibility: value,
        }
    }

    #[test]
    fn test_all_ones_excludes_diversity_weight() {
        let weights = RankingWeights::default();
        let score = aggregate_score(&signals(1.0), &weights);

        // 1.0 - diversity_bonus
        assert!((score - 0.97).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn test_all_zeros() {
        assert_eq!(aggregate_score(&signals(0.0), &RankingWeights::default()), 0.0);
    }

    #[test]
    fn test_weighted_combination() {
        let weights = RankingWeights::default();
        let scores = SignalScores {
            vibe_similarity: 0.95,
            product_similarity: 0.8,
            style_taxonomy: 0.855,
            occasion_match: 0.68,
            price_compatibility: 1.0,
        };

        let expected = 0.95 * 0.30 + 0.8 * 0.25 + 0.855 * 0.25 + 0.68 * 0.12 + 1.0 * 0.05;
        assert!((aggregate_score(&scores, &weights) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_diversity_weight_has_no_effect() {
        let scores = signals(0.6);
        let base = RankingWeights::default();
        let shifted = RankingWeights {
            diversity_bonus: 0.0,
            ..base
        };

        assert_eq!(aggregate_score(&scores, &base), aggregate_score(&scores, &shifted));
    }
}
