//! Hand-authored style affinity, occasion compatibility and price tier tables.

use crate::models::domain::PriceRange;
use crate::models::vocabulary::{BudgetTier, Label, Occasion, StyleTag};

use StyleTag::*;

/// How an archetype tag relates to item tags
#[derive(Debug, Clone, Copy)]
pub struct AffinityEntry {
    pub primary_match: &'static [StyleTag],
    pub secondary_match: &'static [StyleTag],
    pub avoid: &'static [StyleTag],
    pub weight: f64,
}

/// Which item and archetype tags suit an occasion
#[derive(Debug, Clone, Copy)]
pub struct OccasionEntry {
    pub compatible_item_tags: &'static [StyleTag],
    pub compatible_archetype_tags: &'static [StyleTag],
    pub weight: f64,
}

const fn entry(
    primary_match: &'static [StyleTag],
    secondary_match: &'static [StyleTag],
    avoid: &'static [StyleTag],
    weight: f64,
) -> AffinityEntry {
    AffinityEntry {
        primary_match,
        secondary_match,
        avoid,
        weight,
    }
}

pub static STYLE_TAXONOMY: &[(StyleTag, AffinityEntry)] = &[
    (Elegant, entry(&[Classic, Timeless, Elegant, Refined], &[Sophisticated, Delicate, VintageInspired], &[Bold, Eclectic, Playful], 1.0)),
    (Modern, entry(&[Modern, Contemporary, Minimalist, Sleek], &[Geometric, Chic, Refined], &[VintageInspired, Ornate, Traditional], 1.0)),
    (Contemporary, entry(&[Modern, Contemporary, Chic], &[Minimalist, Geometric, Sleek], &[VintageInspired, Heritage], 1.0)),
    (Minimal, entry(&[Minimalist, Delicate, Refined, Sleek], &[Modern, Elegant, Subtle], &[Ornate, Layered, Bold, Statement], 1.0)),
    (Understated, entry(&[Minimalist, Delicate, Refined], &[Elegant, Subtle, Classic], &[Bold, Statement, Glamorous], 0.9)),
    (Statement, entry(&[Statement, Bold, Luxury], &[Glamorous, Ornate, Layered], &[Minimal, Delicate, Understated], 1.0)),
    (Bold, entry(&[Bold, Statement, Glamorous], &[Luxury, Ornate, Modern], &[Delicate, Minimal, Subtle], 1.0)),
    (Classic, entry(&[Classic, Timeless, Elegant], &[VintageInspired, Sophisticated, Refined], &[AvantGarde, Eclectic, Trendy], 1.0)),
    (Timeless, entry(&[Timeless, Classic, Elegant], &[Refined, Sophisticated, Traditional], &[Trendy, FashionForward, Eclectic], 1.0)),
    (Glamorous, entry(&[Glamorous, Luxury, Statement], &[Bold, Ornate, Elegant], &[Minimal, Understated, Delicate], 1.0)),
    (Luxury, entry(&[Luxury, Statement, Ornate], &[Glamorous, Elegant, Timeless], &[Minimal, Casual], 1.0)),
    (Delicate, entry(&[Delicate, Minimalist, Refined], &[Elegant, Subtle, NatureInspired], &[Bold, Statement, Ornate], 1.0)),
    (Chic, entry(&[Chic, Modern, Contemporary], &[Elegant, Minimalist, Sophisticated], &[Traditional, VintageInspired], 0.9)),
    (Trendy, entry(&[Modern, Contemporary, Chic], &[Bold, Statement, Geometric], &[Classic, Timeless, VintageInspired], 0.9)),
    (FashionForward, entry(&[Modern, Contemporary, Statement], &[Bold, Geometric, AvantGarde], &[Classic, Traditional, Timeless], 0.9)),
    (Eclectic, entry(&[Bold, Statement, Modern], &[Geometric, Layered, MultiStone], &[Classic, Minimal, Timeless], 0.8)),
    (Playful, entry(&[Modern, Contemporary, Chic], &[Bold, Geometric, NatureInspired], &[Formal, Classic, Timeless], 0.8)),
    (Regal, entry(&[Luxury, Ornate, Statement], &[Classic, Timeless, Elegant], &[Minimal, Modern, Casual], 1.0)),
    (Heritage, entry(&[Classic, Timeless, VintageInspired], &[Ornate, Traditional, Elegant], &[Modern, Contemporary, Minimal], 0.9)),
    (AvantGarde, entry(&[Statement, Bold, Modern], &[Geometric, Contemporary, Ornate], &[Classic, Traditional, Minimal], 0.9)),
    (Versatile, entry(&[Classic, Elegant, Timeless], &[Modern, Chic, Refined], &[], 0.8)),
    (Refined, entry(&[Refined, Elegant, Classic], &[Sophisticated, Timeless, Delicate], &[Bold, Eclectic, Playful], 0.9)),
    (Sophisticated, entry(&[Elegant, Refined, Classic], &[Luxury, Timeless, Modern], &[Playful, Casual, Eclectic], 0.9)),
];

const fn occasion(
    compatible_item_tags: &'static [StyleTag],
    compatible_archetype_tags: &'static [StyleTag],
    weight: f64,
) -> OccasionEntry {
    OccasionEntry {
        compatible_item_tags,
        compatible_archetype_tags,
        weight,
    }
}

pub static OCCASION_COMPATIBILITY: &[(Occasion, OccasionEntry)] = &[
    (Occasion::Weddings, occasion(&[Luxury, Statement, Ornate, Elegant, Classic], &[Regal, Elegant, Timeless, Glamorous, Statement], 1.0)),
    (Occasion::FormalEvents, occasion(&[Elegant, Classic, Luxury, Statement, Timeless], &[Elegant, Sophisticated, Classic, Glamorous], 1.0)),
    (Occasion::Engagement, occasion(&[Classic, Timeless, Romantic, Elegant], &[Romantic, Elegant, Classic, Timeless], 1.0)),
    (Occasion::Anniversary, occasion(&[Romantic, Timeless, Classic, Elegant], &[Romantic, Elegant, Timeless, Classic], 1.0)),
    (Occasion::ValentinesDay, occasion(&[Romantic, Delicate, Elegant], &[Romantic, Delicate, Elegant], 0.9)),
    (Occasion::DailyWear, occasion(&[Minimalist, Delicate, Modern, Classic], &[Minimal, Understated, Modern, Chic], 0.8)),
    (Occasion::OfficeWear, occasion(&[Minimalist, Delicate, Classic, Refined], &[Minimal, Refined, Elegant, Sophisticated], 0.8)),
    (Occasion::CocktailParties, occasion(&[Statement, Bold, Glamorous, Modern], &[Bold, Glamorous, Statement, FashionForward], 0.9)),
    (Occasion::RedCarpet, occasion(&[Luxury, Statement, Bold, Glamorous], &[Glamorous, Statement, Bold, Luxury], 1.0)),
    (Occasion::SpecialCelebrations, occasion(&[Elegant, Statement, Classic, Luxury], &[Elegant, Glamorous, Classic, Sophisticated], 0.9)),
    (Occasion::CasualEvents, occasion(&[Modern, Chic, Minimalist, Delicate], &[Chic, Modern, Minimal, Playful], 0.7)),
];

/// Neutral occasion score for occasions the table does not model
pub const NEUTRAL_OCCASION_SCORE: f64 = 0.5;

/// Affinity entry for an archetype tag
pub fn affinity_entry(tag: StyleTag) -> Option<&'static AffinityEntry> {
    STYLE_TAXONOMY
        .iter()
        .find(|(key, _)| *key == tag)
        .map(|(_, entry)| entry)
}

/// Compatibility entry for an occasion
pub fn occasion_entry(occasion: Occasion) -> Option<&'static OccasionEntry> {
    OCCASION_COMPATIBILITY
        .iter()
        .find(|(key, _)| *key == occasion)
        .map(|(_, entry)| entry)
}

/// Affinity of an archetype tag for an item tag, in `[-0.5·w, 1.0·w]`.
///
/// Unknown archetype tags (or tags without a taxonomy entry) score `0.0`.
#[inline]
pub fn style_affinity(archetype_tag: &Label<StyleTag>, item_tag: &Label<StyleTag>) -> f64 {
    let Some(entry) = archetype_tag.known().and_then(affinity_entry) else {
        return 0.0;
    };
    let Some(item_tag) = item_tag.known() else {
        return 0.0;
    };

    if entry.primary_match.contains(&item_tag) {
        1.0 * entry.weight
    } else if entry.secondary_match.contains(&item_tag) {
        0.6 * entry.weight
    } else if entry.avoid.contains(&item_tag) {
        -0.5 * entry.weight
    } else {
        0.0
    }
}

/// How well a set of item and archetype tags suits an occasion, in `[0, 1]`
pub fn occasion_compatibility<'t>(
    occasion: &Label<Occasion>,
    item_tags: impl Iterator<Item = &'t Label<StyleTag>> + Clone,
    archetype_tags: impl Iterator<Item = &'t Label<StyleTag>> + Clone,
) -> f64 {
    let Some(entry) = occasion.known().and_then(occasion_entry) else {
        return NEUTRAL_OCCASION_SCORE;
    };

    let item_overlap = overlap_ratio(entry.compatible_item_tags, item_tags);
    let archetype_overlap = overlap_ratio(entry.compatible_archetype_tags, archetype_tags);

    ((item_overlap + archetype_overlap) / 2.0) * entry.weight
}

/// `|tags ∩ compatible| / |compatible|`, zero for an empty compatible set
fn overlap_ratio<'t>(
    compatible: &[StyleTag],
    tags: impl Iterator<Item = &'t Label<StyleTag>> + Clone,
) -> f64 {
    if compatible.is_empty() {
        return 0.0;
    }

    let matched = compatible
        .iter()
        .filter(|wanted| tags.clone().any(|tag| tag.known() == Some(**wanted)))
        .count();

    matched as f64 / compatible.len() as f64
}

/// Inclusive price range for a budget tier
pub fn price_range(tier: BudgetTier) -> PriceRange {
    match tier {
        BudgetTier::Affordable => PriceRange { min: 0.0, max: 50_000.0 },
        BudgetTier::Moderate => PriceRange { min: 40_000.0, max: 150_000.0 },
        BudgetTier::Luxury => PriceRange { min: 120_000.0, max: 300_000.0 },
        BudgetTier::UltraLuxury => PriceRange { min: 250_000.0, max: f64::INFINITY },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(raw: &str) -> Label<StyleTag> {
        Label::parse(raw)
    }

    #[test]
    fn test_affinity_sets_are_disjoint() {
        for (tag, entry) in STYLE_TAXONOMY {
            for t in entry.primary_match {
                assert!(!entry.secondary_match.contains(t), "{tag}: {t} in primary and secondary");
                assert!(!entry.avoid.contains(t), "{tag}: {t} in primary and avoid");
            }
            for t in entry.secondary_match {
                assert!(!entry.avoid.contains(t), "{tag}: {t} in secondary and avoid");
            }
            assert!(entry.weight > 0.0 && entry.weight <= 1.0);
        }
    }

    #[test]
    fn test_occasion_weights_in_range() {
        for (occasion, entry) in OCCASION_COMPATIBILITY {
            assert!(entry.weight > 0.0 && entry.weight <= 1.0, "{occasion}");
        }
    }

    #[test]
    fn test_style_affinity_levels() {
        assert_eq!(style_affinity(&label("Modern"), &label("Sleek")), 1.0);
        assert_eq!(style_affinity(&label("Modern"), &label("Chic")), 0.6);
        assert_eq!(style_affinity(&label("Modern"), &label("Ornate")), -0.5);
        assert_eq!(style_affinity(&label("Modern"), &label("Luxury")), 0.0);
    }

    #[test]
    fn test_style_affinity_weighted() {
        // Understated carries a 0.9 weight
        assert!((style_affinity(&label("Understated"), &label("Minimalist")) - 0.9).abs() < 1e-12);
        assert!((style_affinity(&label("Understated"), &label("Bold")) + 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_style_affinity_unknown_archetype_tag() {
        // Not in the vocabulary at all
        assert_eq!(style_affinity(&label("Edgy"), &label("Modern")), 0.0);
        // In the vocabulary but without a taxonomy entry
        assert_eq!(style_affinity(&label("Romantic"), &label("Romantic")), 0.0);
        assert_eq!(style_affinity(&label("Modern"), &label("Edgy")), 0.0);
    }

    #[test]
    fn test_occasion_compatibility_unknown_is_neutral() {
        let tags = [label("Modern")];
        let score = occasion_compatibility(&Label::parse("Beach Party"), tags.iter(), tags.iter());
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_occasion_compatibility_overlap() {
        let item_tags = [label("Minimalist"), label("Modern"), label("Modern")];
        let archetype_tags = [label("Modern")];

        // item overlap 2/4, archetype overlap 1/4, weight 0.8
        let score = occasion_compatibility(
            &Label::Known(Occasion::DailyWear),
            item_tags.iter(),
            archetype_tags.iter(),
        );
        assert!((score - 0.3).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn test_price_ranges() {
        assert_eq!(price_range(BudgetTier::Affordable), PriceRange { min: 0.0, max: 50_000.0 });
        assert!(price_range(BudgetTier::UltraLuxury).is_unbounded());
        assert!(!price_range(BudgetTier::Luxury).is_unbounded());
    }
}
