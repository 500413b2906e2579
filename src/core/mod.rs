// Core algorithm exports
pub mod aggregate;
pub mod recommender;
pub mod signals;
pub mod similarity;
pub mod taxonomy;

pub use aggregate::aggregate_score;
pub use recommender::{rerank, EngineError, RankError, RankingOptions, Recommender};
pub use signals::{
    diversity_multiplier, occasion_score, price_score, product_similarity, style_taxonomy_score,
    vibe_similarity, weighted_style_score,
};
pub use similarity::{cosine_similarity, match_references};
pub use taxonomy::{occasion_compatibility, price_range, style_affinity};
