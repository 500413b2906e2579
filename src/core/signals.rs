//! Per-candidate scoring signals.
//!
//! Every scorer is a pure function of the ranking context and one candidate.
//! Metadata problems (unknown tier, unknown occasion, unparseable price,
//! unknown tag) resolve to neutral values rather than errors.

use crate::core::similarity::cosine_similarity;
use crate::core::taxonomy::{occasion_compatibility, price_range, style_affinity};
use crate::models::domain::{CatalogItem, MatchedReference, Price, ReferenceProfile};
use crate::models::vocabulary::{BudgetTier, Category, Label, Occasion};

/// Score used when a signal has nothing to go on
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Share of the style blend given to positive affinities
const POSITIVE_BLEND: f64 = 0.8;
const NON_POSITIVE_BLEND: f64 = 0.2;

/// Occasion score split between direct tag overlap and the compatibility table
const DIRECT_OCCASION_SHARE: f64 = 0.6;
const TAXONOMY_OCCASION_SHARE: f64 = 0.4;

/// Relative distance outside a tier still treated as a near miss
const PRICE_FLEXIBILITY: f64 = 0.2;
const PRICE_NEAR_MISS: f64 = 0.7;
const PRICE_FLOOR: f64 = 0.3;

pub const MIN_DIVERSITY: f64 = 0.8;
pub const MAX_DIVERSITY: f64 = 1.3;
const NEW_CATEGORY_DIVERSITY: f64 = 1.2;
const REPEAT_CATEGORY_PENALTY: f64 = 0.1;
const NEW_STYLE_BONUS: f64 = 0.05;

/// Similarity between the query vector and the item embedding, clamped to `[0, 1]`
#[inline]
pub fn product_similarity(query: &[f32], item: &CatalogItem) -> f64 {
    cosine_similarity(query, &item.embedding).clamp(0.0, 1.0)
}

/// Best similarity among the matched references, clamped to `[0, 1]`
#[inline]
pub fn vibe_similarity(matched: &[MatchedReference<'_>]) -> f64 {
    matched
        .iter()
        .map(|m| m.similarity)
        .fold(f64::NEG_INFINITY, f64::max)
        .clamp(0.0, 1.0)
}

/// Taxonomy affinity between one reference profile and one item, in `[0, 1]`
///
/// Every (archetype tag, item tag) pair is scored. Without any positive pair
/// the result is the non-negative mean of all pairs; otherwise positive and
/// non-positive means are blended 80/20 and mapped from `[-1, 1]` to `[0, 1]`.
pub fn style_taxonomy_score(reference: &ReferenceProfile, item: &CatalogItem) -> f64 {
    let mut positive_sum = 0.0;
    let mut positive_count = 0usize;
    let mut rest_sum = 0.0;
    let mut rest_count = 0usize;

    for archetype_tag in reference.tags() {
        for item_tag in item.tags() {
            let score = style_affinity(archetype_tag, item_tag);
            if score > 0.0 {
                positive_sum += score;
                positive_count += 1;
            } else {
                rest_sum += score;
                rest_count += 1;
            }
        }
    }

    let total_count = positive_count + rest_count;
    if total_count == 0 {
        return 0.0;
    }

    if positive_count == 0 {
        return (rest_sum / rest_count as f64).max(0.0);
    }

    let positive_avg = positive_sum / positive_count as f64;
    let rest_avg = if rest_count > 0 {
        rest_sum / rest_count as f64
    } else {
        0.0
    };

    let blend = POSITIVE_BLEND * positive_avg + NON_POSITIVE_BLEND * rest_avg;
    ((blend + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Style score of an item against the whole match set
///
/// Each reference's taxonomy score is weighted by that reference's
/// similarity and the best one wins.
pub fn weighted_style_score(matched: &[MatchedReference<'_>], item: &CatalogItem) -> f64 {
    matched
        .iter()
        .map(|m| style_taxonomy_score(m.profile, item) * m.similarity)
        .fold(f64::NEG_INFINITY, f64::max)
        .clamp(0.0, 1.0)
}

/// Occasion fit of an item, in `[0, 1]`
///
/// Combines direct overlap between requested and item occasions (60%) with
/// the compatibility table evaluated for the item tags and the tags of the
/// best matched reference (40%). No requested occasions scores neutral.
pub fn occasion_score(
    requested: &[Label<Occasion>],
    item: &CatalogItem,
    best_reference: Option<&ReferenceProfile>,
) -> f64 {
    let requested = distinct(requested);
    if requested.is_empty() {
        return NEUTRAL_SCORE;
    }

    let direct_hits = requested
        .iter()
        .filter(|occasion| item.occasions.contains(**occasion))
        .count();
    let direct = direct_hits as f64 / requested.len() as f64;

    let taxonomy_sum: f64 = requested
        .iter()
        .map(|occasion| match best_reference {
            Some(reference) => occasion_compatibility(occasion, item.tags(), reference.tags()),
            None => occasion_compatibility(occasion, item.tags(), std::iter::empty()),
        })
        .sum();
    let taxonomy_avg = taxonomy_sum / requested.len() as f64;

    DIRECT_OCCASION_SHARE * direct + TAXONOMY_OCCASION_SHARE * taxonomy_avg
}

/// Budget fit of an item price, in `[0.3, 1]` (or neutral 0.5)
///
/// Prices inside the tier score 1.0. Up to 20% outside either boundary
/// scores 0.7; further out the score decays linearly with the relative
/// distance to the boundary, floored at 0.3. Open-ended tiers accept any
/// price above their minimum.
pub fn price_score(budget: &Label<BudgetTier>, price: &Price) -> f64 {
    let Some(tier) = budget.known() else {
        return NEUTRAL_SCORE;
    };
    let Some(amount) = price.amount else {
        return NEUTRAL_SCORE;
    };

    let range = price_range(tier);

    if range.contains(amount) {
        return 1.0;
    }

    if amount < range.min {
        if amount >= range.min * (1.0 - PRICE_FLEXIBILITY) {
            return PRICE_NEAR_MISS;
        }
        return (PRICE_NEAR_MISS - (range.min - amount) / range.min).max(PRICE_FLOOR);
    }

    if range.is_unbounded() {
        return 1.0;
    }

    if amount <= range.max * (1.0 + PRICE_FLEXIBILITY) {
        return PRICE_NEAR_MISS;
    }

    (PRICE_NEAR_MISS - (amount - range.max) / range.max).max(PRICE_FLOOR)
}

/// Re-ranking multiplier for a candidate given the items already selected
///
/// A category not yet selected earns 1.2; a repeated one is penalised 0.1
/// per earlier occurrence down to 0.8. Each primary tag not yet seen among
/// the selected items adds 0.05. The result is clamped to `[0.8, 1.3]` and
/// is exactly 1.0 when nothing has been selected.
pub fn diversity_multiplier(selected: &[&CatalogItem], candidate: &CatalogItem) -> f64 {
    if selected.is_empty() {
        return 1.0;
    }

    let repeat_count = category_count(selected, candidate.category);
    let category_score = if repeat_count == 0 {
        NEW_CATEGORY_DIVERSITY
    } else {
        (1.0 - REPEAT_CATEGORY_PENALTY * repeat_count as f64).max(MIN_DIVERSITY)
    };

    let new_styles = distinct(&candidate.primary_tags)
        .into_iter()
        .filter(|tag| {
            !selected
                .iter()
                .any(|item| item.primary_tags.contains(tag))
        })
        .count();

    (category_score + NEW_STYLE_BONUS * new_styles as f64).clamp(MIN_DIVERSITY, MAX_DIVERSITY)
}

#[inline]
fn category_count(selected: &[&CatalogItem], category: Category) -> usize {
    selected.iter().filter(|item| item.category == category).count()
}

/// Distinct labels in first-seen order
///
/// Order matters: sums over the result must be reproducible bit for bit.
fn distinct<T: PartialEq>(labels: &[T]) -> Vec<&T> {
    let mut seen: Vec<&T> = Vec::with_capacity(labels.len());
    for label in labels {
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    seen
}

/// Best matched reference; matches are ordered by similarity
pub fn best_reference<'a>(matched: &[MatchedReference<'a>]) -> Option<&'a ReferenceProfile> {
    matched.first().map(|m| m.profile)
}
