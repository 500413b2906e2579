//! Style Rank - Multi-signal style recommendation engine
//!
//! Ranks a fixed catalog of items for an embedded user profile by matching
//! the profile against curated style references, scoring every item on
//! five signals and re-ranking the best candidates for diversity.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{EngineError, RankError, RankingOptions, Recommender};
pub use models::{
    CatalogItem, Label, RankQuery, RankingWeights, Recommendations, ReferenceProfile,
    RecommendationRequest, RecommendationResponse,
};
pub use services::{LoadError, ReferenceData};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let options = RankingOptions::default();
        assert_eq!(options.embedding_dimension, 384);
        assert!(RankingWeights::default().is_valid());
    }
}
