// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod vocabulary;

pub use domain::{
    CatalogItem, MatchedReference, Price, PriceRange, RankQuery, RankingWeights, Recommendations,
    ReferenceProfile, ScoredCandidate, SignalScores,
};
pub use requests::{MatchReferencesRequest, RecommendationRequest};
pub use responses::{
    group_by_reference, ErrorResponse, HealthResponse, ItemRecommendation, MatchReferencesResponse,
    RecommendationResponse, ReferenceGroup, ReferenceMatch,
};
pub use vocabulary::{BudgetTier, Category, Label, Occasion, StyleTag, Vocabulary};
