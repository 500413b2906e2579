use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::{
    aggregate::aggregate_score,
    signals::{
        best_reference, diversity_multiplier, occasion_score, price_score, product_similarity,
        vibe_similarity, weighted_style_score,
    },
    similarity::{l2_norm, match_references},
};
use crate::models::domain::{
    CatalogItem, MatchedReference, RankQuery, RankingWeights, Recommendations, ReferenceProfile,
    ScoredCandidate, SignalScores,
};
use crate::models::vocabulary::count_unknown;

/// Tolerance on the norm of supposedly unit-normalized embeddings
const UNIT_NORM_TOLERANCE: f64 = 1e-3;

/// Errors that prevent an engine from being constructed
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Reference set is empty")]
    EmptyReferenceSet,

    #[error("{dataset} '{id}' has embedding dimension {actual}, expected {expected}")]
    DimensionMismatch {
        dataset: &'static str,
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid ranking weights (each must be in [0, 1] and sum to 1.0): {0:?}")]
    InvalidWeights(RankingWeights),

    #[error("Invalid ranking options: {0}")]
    InvalidOptions(String),
}

/// Caller-visible errors of a ranking call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("Query vector has dimension {actual}, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("topN {requested} is out of range 1..={max}")]
    TopNOutOfRange { requested: usize, max: usize },

    #[error("topK must be at least 1")]
    InvalidTopK,

    #[error("Threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),
}

/// Tunable knobs of the ranking pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingOptions {
    /// Dimension every embedding must have
    pub embedding_dimension: usize,
    /// References matched per call
    pub reference_top_k: usize,
    /// Re-ranking looks at the best `top_n * rerank_window_factor` candidates.
    /// Larger windows let diversity promote items from further down the
    /// aggregate ranking at the cost of more bookkeeping.
    pub rerank_window_factor: usize,
    pub max_top_n: usize,
    /// Default similarity thresholds used by the transport, in `[0, 1]`
    pub recommend_threshold: f64,
    pub match_threshold: f64,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            embedding_dimension: 384,
            reference_top_k: 3,
            rerank_window_factor: 2,
            max_top_n: 50,
            recommend_threshold: 0.4,
            match_threshold: 0.3,
        }
    }
}

/// Immutable recommendation engine
///
/// Holds the loaded reference profiles and catalog. Built once at startup
/// and shared read-only by every ranking call.
///
/// # Pipeline Stages
/// 1. Match the query against reference profiles
/// 2. Score every catalog item on five signals and aggregate
/// 3. Sort by aggregate score, then re-rank a bounded window for diversity
#[derive(Debug)]
pub struct Recommender {
    references: Vec<ReferenceProfile>,
    catalog: Vec<CatalogItem>,
    weights: RankingWeights,
    options: RankingOptions,
}

impl Recommender {
    /// Validate the reference data and build the engine
    pub fn new(
        references: Vec<ReferenceProfile>,
        catalog: Vec<CatalogItem>,
        weights: RankingWeights,
        options: RankingOptions,
    ) -> Result<Self, EngineError> {
        if !weights.is_valid() {
            return Err(EngineError::InvalidWeights(weights));
        }
        validate_options(&options)?;

        if references.is_empty() {
            return Err(EngineError::EmptyReferenceSet);
        }

        let dimension = options.embedding_dimension;
        for profile in &references {
            check_dimension("Reference profile", &profile.id, &profile.embedding, dimension)?;
        }
        for item in &catalog {
            check_dimension("Catalog item", &item.id, &item.embedding, dimension)?;
        }

        report_data_quality(&references, &catalog);

        info!(
            "Recommender ready: {} references, {} catalog items, dimension {}",
            references.len(),
            catalog.len(),
            dimension
        );

        Ok(Self {
            references,
            catalog,
            weights,
            options,
        })
    }

    pub fn references(&self) -> &[ReferenceProfile] {
        &self.references
    }

    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    pub fn options(&self) -> &RankingOptions {
        &self.options
    }

    /// Match a query vector against the reference profiles
    pub fn match_references(
        &self,
        vector: &[f32],
        top_k: usize,
        threshold: f64,
    ) -> Result<Vec<MatchedReference<'_>>, RankError> {
        self.check_query_vector(vector)?;
        check_threshold(threshold)?;
        if top_k == 0 {
            return Err(RankError::InvalidTopK);
        }

        Ok(match_references(vector, &self.references, top_k, threshold))
    }

    /// Rank the catalog for a query
    ///
    /// # Arguments
    /// * `query` - Query vector, requested occasions, budget and result size
    ///
    /// # Returns
    /// At most `query.top_n` items ordered by final score, together with the
    /// references they were scored against
    pub fn recommend(&self, query: &RankQuery) -> Result<Recommendations<'_>, RankError> {
        self.check_query_vector(&query.vector)?;
        check_threshold(query.threshold)?;
        if query.top_n == 0 || query.top_n > self.options.max_top_n {
            return Err(RankError::TopNOutOfRange {
                requested: query.top_n,
                max: self.options.max_top_n,
            });
        }

        // Stage 1: reference matching
        let matched = match_references(
            &query.vector,
            &self.references,
            self.options.reference_top_k,
            query.threshold,
        );

        for m in &matched {
            debug!("Matched reference {} ({:.3})", m.profile.name, m.similarity);
        }

        // Stage 2: signal scoring
        let scored = self.score_candidates(query, &matched);
        let candidates_scored = scored.len();

        // Stage 3: diversity re-ranking
        let window = query.top_n.saturating_mul(self.options.rerank_window_factor);
        let items = rerank(scored, query.top_n, window);

        info!(
            "Ranked {} candidates against {} references, returning {}",
            candidates_scored,
            matched.len(),
            items.len()
        );

        Ok(Recommendations {
            items,
            matched_references: matched,
            candidates_scored,
        })
    }

    fn score_candidates<'a>(
        &'a self,
        query: &RankQuery,
        matched: &[MatchedReference<'a>],
    ) -> Vec<ScoredCandidate<'a>> {
        let vibe = vibe_similarity(matched);
        let best = best_reference(matched);

        self.catalog
            .iter()
            .map(|item| {
                let signals = SignalScores {
                    vibe_similarity: vibe,
                    product_similarity: product_similarity(&query.vector, item),
                    style_taxonomy: weighted_style_score(matched, item),
                    occasion_match: occasion_score(&query.occasions, item, best),
                    price_compatibility: price_score(&query.budget, &item.price),
                };
                let aggregate = aggregate_score(&signals, &self.weights);

                ScoredCandidate {
                    item,
                    breakdown: query.explain.then_some(signals),
                    aggregate_score: aggregate,
                    diversity_multiplier: 1.0,
                    final_score: aggregate,
                }
            })
            .collect()
    }

    fn check_query_vector(&self, vector: &[f32]) -> Result<(), RankError> {
        if vector.len() != self.options.embedding_dimension {
            return Err(RankError::DimensionMismatch {
                expected: self.options.embedding_dimension,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

/// Greedy diversity re-ranking over a bounded window
///
/// Candidates are sorted by aggregate score (stable, so ties keep catalog
/// order). The first `window` of them are walked in order; each gets a
/// diversity multiplier against the ones walked before it. The window is
/// then sorted by final score and cut to `top_n`.
pub fn rerank<'a>(
    mut scored: Vec<ScoredCandidate<'a>>,
    top_n: usize,
    window: usize,
) -> Vec<ScoredCandidate<'a>> {
    scored.sort_by(|a, b| b.aggregate_score.total_cmp(&a.aggregate_score));

    let window = window.max(top_n);
    let mut selected: Vec<ScoredCandidate<'a>> = Vec::with_capacity(window.min(scored.len()));
    let mut selected_items: Vec<&'a CatalogItem> = Vec::with_capacity(selected.capacity());

    for mut candidate in scored.into_iter().take(window) {
        let multiplier = diversity_multiplier(&selected_items, candidate.item);
        candidate.diversity_multiplier = multiplier;
        candidate.final_score = candidate.aggregate_score * multiplier;

        selected_items.push(candidate.item);
        selected.push(candidate);
    }

    selected.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    selected.truncate(top_n);
    selected
}

fn validate_options(options: &RankingOptions) -> Result<(), EngineError> {
    if options.embedding_dimension == 0 {
        return Err(EngineError::InvalidOptions("embedding dimension must be positive".into()));
    }
    if options.reference_top_k == 0 {
        return Err(EngineError::InvalidOptions("reference_top_k must be at least 1".into()));
    }
    if options.rerank_window_factor == 0 {
        return Err(EngineError::InvalidOptions("rerank_window_factor must be at least 1".into()));
    }
    if options.max_top_n == 0 {
        return Err(EngineError::InvalidOptions("max_top_n must be at least 1".into()));
    }
    for (name, threshold) in [
        ("recommend_threshold", options.recommend_threshold),
        ("match_threshold", options.match_threshold),
    ] {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(EngineError::InvalidOptions(format!(
                "{} must be in [0, 1], got {}",
                name, threshold
            )));
        }
    }
    Ok(())
}

fn check_threshold(threshold: f64) -> Result<(), RankError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(RankError::InvalidThreshold(threshold));
    }
    Ok(())
}

fn check_dimension(
    dataset: &'static str,
    id: &str,
    embedding: &[f32],
    expected: usize,
) -> Result<(), EngineError> {
    if embedding.len() != expected {
        return Err(EngineError::DimensionMismatch {
            dataset,
            id: id.to_string(),
            expected,
            actual: embedding.len(),
        });
    }
    Ok(())
}

/// Log vectors that are not unit length and labels outside the vocabularies
fn report_data_quality(references: &[ReferenceProfile], catalog: &[CatalogItem]) {
    let off_unit = references
        .iter()
        .map(|p| &p.embedding)
        .chain(catalog.iter().map(|i| &i.embedding))
        .filter(|v| (l2_norm(v) - 1.0).abs() > UNIT_NORM_TOLERANCE)
        .count();
    if off_unit > 0 {
        warn!("{} embeddings are not unit-normalized", off_unit);
    }

    let unknown_reference_tags: usize = references
        .iter()
        .map(|p| count_unknown(&p.primary_tags) + count_unknown(&p.secondary_tags))
        .sum();
    let unknown_item_tags: usize = catalog
        .iter()
        .map(|i| count_unknown(&i.primary_tags) + count_unknown(&i.secondary_tags))
        .sum();
    let unknown_occasions: usize = catalog.iter().map(|i| count_unknown(&i.occasions)).sum();
    let unparsed_prices = catalog.iter().filter(|i| i.price.amount.is_none()).count();

    if unknown_reference_tags + unknown_item_tags + unknown_occasions + unparsed_prices > 0 {
        warn!(
            "Unrecognized metadata scores neutral: {} reference tags, {} item tags, {} occasions, {} prices",
            unknown_reference_tags, unknown_item_tags, unknown_occasions, unparsed_prices
        );
    }

    if catalog.is_empty() {
        warn!("Catalog is empty, every ranking call will return no items");
    }
}
