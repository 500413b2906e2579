use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::RankQuery;
use crate::models::vocabulary::{BudgetTier, Label, Occasion};

/// Request for ranked catalog recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    /// Embedded user style profile
    #[validate(length(min = 1))]
    #[serde(alias = "query_vector", rename = "queryVector")]
    pub query_vector: Vec<f32>,
    #[serde(default)]
    pub occasions: Vec<Label<Occasion>>,
    /// Budget tier name or questionnaire label; missing means moderate
    #[serde(default)]
    pub budget: Option<String>,
    /// Missing means the configured default
    #[validate(range(min = 1, max = 50))]
    #[serde(default)]
    #[serde(alias = "top_n", rename = "topN")]
    pub top_n: Option<usize>,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    #[serde(alias = "include_scores", rename = "includeScores")]
    pub include_scores: bool,
}

impl RecommendationRequest {
    /// Engine query for this request, filling unset fields from the defaults
    pub fn to_query(&self, default_top_n: usize, default_threshold: f64) -> RankQuery {
        RankQuery {
            vector: self.query_vector.clone(),
            occasions: self.occasions.clone(),
            budget: Label::Known(BudgetTier::from_label(self.budget.as_deref())),
            top_n: self.top_n.unwrap_or(default_top_n),
            threshold: self.threshold.unwrap_or(default_threshold),
            explain: self.include_scores,
        }
    }
}

/// Request to match a query vector against reference profiles only
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchReferencesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "query_vector", rename = "queryVector")]
    pub query_vector: Vec<f32>,
    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_top_k")]
    #[serde(alias = "top_k", rename = "topK")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_request_defaults() {
        let req: RecommendationRequest =
            serde_json::from_str(r#"{"queryVector": [0.6, 0.8]}"#).unwrap();

        assert_eq!(req.top_n, None);
        assert_eq!(req.threshold, None);
        assert!(!req.include_scores);
        assert!(req.validate().is_ok());

        let query = req.to_query(10, 0.4);
        assert_eq!(query.top_n, 10);
        assert_eq!(query.threshold, 0.4);
        assert_eq!(query.budget, Label::Known(BudgetTier::Moderate));
        assert!(!query.explain);
    }

    #[test]
    fn test_recommendation_request_labels() {
        let req: RecommendationRequest = serde_json::from_str(
            r#"{
                "queryVector": [1.0],
                "occasions": ["Weddings", "Beach Party"],
                "budget": "luxury",
                "topN": 5,
                "includeScores": true
            }"#,
        )
        .unwrap();

        assert_eq!(req.occasions[0], Label::Known(Occasion::Weddings));
        assert!(!req.occasions[1].is_known());

        let query = req.to_query(10, 0.4);
        assert_eq!(query.budget, Label::Known(BudgetTier::Luxury));
        assert_eq!(query.top_n, 5);
        assert!(query.explain);
    }

    #[test]
    fn test_recommendation_request_validation() {
        let req: RecommendationRequest =
            serde_json::from_str(r#"{"queryVector": [1.0], "topN": 51}"#).unwrap();
        assert!(req.validate().is_err());

        let req: RecommendationRequest =
            serde_json::from_str(r#"{"queryVector": [], "topN": 5}"#).unwrap();
        assert!(req.validate().is_err());

        let req: RecommendationRequest =
            serde_json::from_str(r#"{"queryVector": [1.0], "threshold": 1.2}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_match_request_top_k_bounds() {
        let req: MatchReferencesRequest =
            serde_json::from_str(r#"{"queryVector": [1.0]}"#).unwrap();
        assert_eq!(req.top_k, 3);
        assert!(req.validate().is_ok());

        let req: MatchReferencesRequest =
            serde_json::from_str(r#"{"queryVector": [1.0], "topK": 11}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
