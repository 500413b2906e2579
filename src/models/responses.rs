use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{MatchedReference, RankQuery, Recommendations, ScoredCandidate, SignalScores};

/// Reference profile matched for a query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceMatch {
    pub id: String,
    pub name: String,
    pub similarity: f64,
    pub primary_tags: Vec<String>,
    pub secondary_tags: Vec<String>,
    pub description: String,
    pub image_url: Option<String>,
}

impl From<&MatchedReference<'_>> for ReferenceMatch {
    fn from(m: &MatchedReference<'_>) -> Self {
        Self {
            id: m.profile.id.clone(),
            name: m.profile.name.clone(),
            similarity: m.similarity,
            primary_tags: m.profile.primary_tags.iter().map(|t| t.to_string()).collect(),
            secondary_tags: m.profile.secondary_tags.iter().map(|t| t.to_string()).collect(),
            description: m.profile.description.clone(),
            image_url: m.profile.image_url.clone(),
        }
    }
}

/// One ranked catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecommendation {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub primary_tags: Vec<String>,
    pub secondary_tags: Vec<String>,
    pub occasions: Vec<String>,
    pub description: String,
    pub vibe_description: String,
    pub image_url: Option<String>,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversity_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signals: Option<SignalScores>,
}

impl ItemRecommendation {
    fn new(rank: usize, candidate: &ScoredCandidate<'_>) -> Self {
        let item = candidate.item;
        let explained = candidate.breakdown.is_some();

        Self {
            rank,
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.to_string(),
            price: item.price.raw.clone(),
            primary_tags: item.primary_tags.iter().map(|t| t.to_string()).collect(),
            secondary_tags: item.secondary_tags.iter().map(|t| t.to_string()).collect(),
            occasions: item.occasions.iter().map(|o| o.to_string()).collect(),
            description: item.description.clone(),
            vibe_description: item.vibe_description.clone(),
            image_url: item.image_url.clone(),
            score: candidate.final_score,
            aggregate_score: explained.then_some(candidate.aggregate_score),
            diversity_multiplier: explained.then_some(candidate.diversity_multiplier),
            signals: candidate.breakdown,
        }
    }
}

/// Slice of the ranked list presented under one matched reference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceGroup {
    pub reference: ReferenceMatch,
    pub items: Vec<ItemRecommendation>,
}

/// Split the ranked list into contiguous groups, one per matched reference
///
/// With `n` items and `k` references, each of the first `k - 1` references
/// gets `n / k` items and the last one gets the remainder.
pub fn group_by_reference(
    references: &[ReferenceMatch],
    items: &[ItemRecommendation],
) -> Vec<ReferenceGroup> {
    let k = references.len();
    if k == 0 {
        return Vec::new();
    }

    let per_group = items.len() / k;
    references
        .iter()
        .enumerate()
        .map(|(i, reference)| {
            let start = (i * per_group).min(items.len());
            let end = if i + 1 == k { items.len() } else { start + per_group };
            ReferenceGroup {
                reference: reference.clone(),
                items: items[start..end].to_vec(),
            }
        })
        .collect()
}

/// Echo of the parameters a recommendation was computed with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    pub occasions: Vec<String>,
    pub budget: String,
    pub top_n: usize,
    pub threshold: f64,
}

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub status: String,
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub matched_references: Vec<ReferenceMatch>,
    pub reference_groups: Vec<ReferenceGroup>,
    pub recommendations: Vec<ItemRecommendation>,
    pub total_recommendations: usize,
    pub candidates_scored: usize,
    pub request_params: RequestParams,
}

impl RecommendationResponse {
    pub fn new(query: &RankQuery, result: &Recommendations<'_>) -> Self {
        let matched_references: Vec<ReferenceMatch> =
            result.matched_references.iter().map(ReferenceMatch::from).collect();
        let recommendations: Vec<ItemRecommendation> = result
            .items
            .iter()
            .enumerate()
            .map(|(i, candidate)| ItemRecommendation::new(i + 1, candidate))
            .collect();

        Self {
            status: "success".to_string(),
            request_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            reference_groups: group_by_reference(&matched_references, &recommendations),
            total_recommendations: recommendations.len(),
            candidates_scored: result.candidates_scored,
            matched_references,
            recommendations,
            request_params: RequestParams {
                occasions: query.occasions.iter().map(|o| o.to_string()).collect(),
                budget: query.budget.to_string(),
                top_n: query.top_n,
                threshold: query.threshold,
            },
        }
    }
}

/// Response for the reference matching endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReferencesResponse {
    pub status: String,
    pub matches: Vec<ReferenceMatch>,
    pub total_matches: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub engine_loaded: bool,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
