use crate::models::domain::{MatchedReference, ReferenceProfile};

/// Magnitude below which a vector is treated as zero
const NORM_EPSILON: f64 = 1e-12;

/// Cosine similarity between two vectors of equal length
///
/// Embeddings are unit-normalized upstream, so this is effectively a dot
/// product; the norms are still divided out to stay correct for slightly
/// denormalized input. Returns `0.0` if either vector has zero magnitude.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a < NORM_EPSILON || norm_b < NORM_EPSILON {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Euclidean norm of a vector
#[inline]
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt()
}

/// Match the query against every reference profile
///
/// References are ordered by similarity (descending, ties kept in load
/// order) and those at or above `threshold` are returned, at most `top_k`.
/// When none clears the threshold the best `top_k` are returned anyway, so
/// a non-empty reference set always yields a non-empty match list.
pub fn match_references<'a>(
    query: &[f32],
    references: &'a [ReferenceProfile],
    top_k: usize,
    threshold: f64,
) -> Vec<MatchedReference<'a>> {
    let mut ranked: Vec<MatchedReference<'a>> = references
        .iter()
        .map(|profile| MatchedReference {
            profile,
            similarity: cosine_similarity(query, &profile.embedding),
        })
        .collect();

    // Stable: equal similarities keep load order
    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    let above: Vec<MatchedReference<'a>> = ranked
        .iter()
        .filter(|m| m.similarity >= threshold)
        .take(top_k)
        .copied()
        .collect();

    if !above.is_empty() {
        return above;
    }

    tracing::debug!(
        threshold,
        "No reference cleared the similarity threshold, falling back to top {}",
        top_k
    );

    ranked.truncate(top_k);
    ranked
}
