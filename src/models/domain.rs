use serde::{Deserialize, Deserializer, Serialize};

use crate::models::vocabulary::{BudgetTier, Category, Label, Occasion, StyleTag};

/// Style archetype (an influencer profile) used as an intermediate match target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "primary_vibe_tags", alias = "primary_tags", default)]
    pub primary_tags: Vec<Label<StyleTag>>,
    #[serde(rename = "secondary_vibe_tags", alias = "secondary_tags", default)]
    pub secondary_tags: Vec<Label<StyleTag>>,
    #[serde(rename = "vibe_description", alias = "description", default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(rename = "vibe_vector", alias = "embedding")]
    pub embedding: Vec<f32>,
}

impl ReferenceProfile {
    /// Primary tags followed by secondary tags
    pub fn tags(&self) -> impl Iterator<Item = &Label<StyleTag>> + Clone {
        self.primary_tags.iter().chain(self.secondary_tags.iter())
    }
}

/// Purchasable catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub price: Price,
    #[serde(rename = "primary_style_tags", alias = "primary_tags", default)]
    pub primary_tags: Vec<Label<StyleTag>>,
    #[serde(rename = "secondary_style_tags", alias = "secondary_tags", default)]
    pub secondary_tags: Vec<Label<StyleTag>>,
    #[serde(default)]
    pub occasions: Vec<Label<Occasion>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vibe_description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(rename = "style_vector", alias = "embedding")]
    pub embedding: Vec<f32>,
}

impl CatalogItem {
    /// Primary tags followed by secondary tags
    pub fn tags(&self) -> impl Iterator<Item = &Label<StyleTag>> + Clone {
        self.primary_tags.iter().chain(self.secondary_tags.iter())
    }
}

/// Item price as published by the catalog feed.
///
/// The feed carries display strings such as `"45,000 INR"`; the numeric
/// amount is parsed once on load and is `None` when the text is not a
/// nonnegative number. A record without a price gets an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(into = "String")]
pub struct Price {
    pub raw: String,
    pub amount: Option<f64>,
}

impl Price {
    pub fn parse(raw: &str) -> Self {
        let cleaned: String = raw
            .replace("INR", "")
            .replace('₹', "")
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        let amount = cleaned
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount >= 0.0);

        Self {
            raw: raw.to_string(),
            amount,
        }
    }

    pub fn amount(amount: f64) -> Self {
        Self {
            raw: amount.to_string(),
            amount: (amount.is_finite() && amount >= 0.0).then_some(amount),
        }
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.raw
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPrice {
            Text(String),
            Number(f64),
            Null,
        }

        Ok(match RawPrice::deserialize(deserializer)? {
            RawPrice::Text(text) => Price::parse(&text),
            RawPrice::Number(number) => Price::amount(number),
            RawPrice::Null => Price::default(),
        })
    }
}

/// Accept identifiers published either as strings or as integers
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(number) => number.to_string(),
    })
}

/// Inclusive price range of a budget tier; `max` is infinite for open-ended tiers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max.is_infinite()
    }
}

/// A single ranking request against the engine
#[derive(Debug, Clone)]
pub struct RankQuery {
    /// Embedded user profile, unit-normalized
    pub vector: Vec<f32>,
    pub occasions: Vec<Label<Occasion>>,
    pub budget: Label<BudgetTier>,
    pub top_n: usize,
    pub threshold: f64,
    /// Keep the per-signal breakdown on every returned item
    pub explain: bool,
}

impl RankQuery {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            occasions: Vec::new(),
            budget: Label::Known(BudgetTier::Moderate),
            top_n: 10,
            threshold: 0.4,
            explain: false,
        }
    }
}

/// Reference profile matched against the current query
#[derive(Debug, Clone, Copy)]
pub struct MatchedReference<'a> {
    pub profile: &'a ReferenceProfile,
    pub similarity: f64,
}

/// Individual signal values that enter the aggregate score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    pub vibe_similarity: f64,
    pub product_similarity: f64,
    pub style_taxonomy: f64,
    pub occasion_match: f64,
    pub price_compatibility: f64,
}

impl SignalScores {
    /// Signal name and value pairs, in weight-table order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("vibe_similarity", self.vibe_similarity),
            ("product_similarity", self.product_similarity),
            ("style_taxonomy", self.style_taxonomy),
            ("occasion_match", self.occasion_match),
            ("price_compatibility", self.price_compatibility),
        ]
    }
}

/// Catalog item scored during one ranking call
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub item: &'a CatalogItem,
    /// Only kept when the caller asked for explanations
    pub breakdown: Option<SignalScores>,
    pub aggregate_score: f64,
    pub diversity_multiplier: f64,
    pub final_score: f64,
}

/// Ordered result of a ranking call
#[derive(Debug, Clone)]
pub struct Recommendations<'a> {
    pub items: Vec<ScoredCandidate<'a>>,
    pub matched_references: Vec<MatchedReference<'a>>,
    pub candidates_scored: usize,
}

/// Weight vector of the aggregator
///
/// `diversity_bonus` is part of the table but does not enter the linear sum;
/// diversity is applied as a multiplier during re-ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub vibe_similarity: f64,
    pub product_similarity: f64,
    pub style_taxonomy: f64,
    pub occasion_match: f64,
    pub price_compatibility: f64,
    pub diversity_bonus: f64,
}

impl RankingWeights {
    pub fn total(&self) -> f64 {
        self.vibe_similarity
            + self.product_similarity
            + self.style_taxonomy
            + self.occasion_match
            + self.price_compatibility
            + self.diversity_bonus
    }

    /// Every weight in `[0, 1]` and the table summing to 1.0 (±0.01)
    pub fn is_valid(&self) -> bool {
        let entries = [
            self.vibe_similarity,
            self.product_similarity,
            self.style_taxonomy,
            self.occasion_match,
            self.price_compatibility,
            self.diversity_bonus,
        ];

        entries.iter().all(|w| (0.0..=1.0).contains(w)) && (self.total() - 1.0).abs() <= 0.01
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            vibe_similarity: 0.30,
            product_similarity: 0.25,
            style_taxonomy: 0.25,
            occasion_match: 0.12,
            price_compatibility: 0.05,
            diversity_bonus: 0.03,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parsing() {
        assert_eq!(Price::parse("45,000 INR").amount, Some(45000.0));
        assert_eq!(Price::parse("₹1,25,000").amount, Some(125000.0));
        assert_eq!(Price::parse("1500.50").amount, Some(1500.5));
        assert_eq!(Price::parse("Price on request").amount, None);
        assert_eq!(Price::parse("-300").amount, None);
        assert_eq!(Price::parse("45,000 INR").raw, "45,000 INR");
    }

    #[test]
    fn test_catalog_item_from_feed_json() {
        let json = r#"{
            "id": 17,
            "name": "Solitaire Band",
            "category": "rings-catalog",
            "price": "40,000 INR",
            "primary_style_tags": ["Modern", "Sleek"],
            "secondary_style_tags": ["Edgy"],
            "occasions": ["Daily Wear"],
            "style_vector": [1.0, 0.0]
        }"#;

        let item: CatalogItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, "17");
        assert_eq!(item.category, Category::Rings);
        assert_eq!(item.price.amount, Some(40000.0));
        assert_eq!(item.tags().count(), 3);
        assert_eq!(item.secondary_tags[0], Label::Unknown("Edgy".to_string()));
    }

    #[test]
    fn test_default_weights_are_valid() {
        let weights = RankingWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-9);
        assert!(weights.is_valid());

        let skewed = RankingWeights {
            vibe_similarity: 0.9,
            ..RankingWeights::default()
        };
        assert!(!skewed.is_valid());
    }

    #[test]
    fn test_price_range() {
        let open = PriceRange { min: 250000.0, max: f64::INFINITY };
        assert!(open.is_unbounded());
        assert!(open.contains(1e9));
        assert!(!open.contains(1.0));
    }
}
