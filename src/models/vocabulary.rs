//! Closed vocabularies for tags, occasions, categories and budget tiers.
//!
//! Free-form strings coming from the reference data feed or from callers are
//! classified exactly once, when they are deserialized, into a [`Label`]:
//! either a known vocabulary term or an unknown raw string. Unknown labels are
//! never an error; scoring treats them as neutral.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;

/// A closed set of terms with a canonical text form
pub trait Vocabulary: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Parse the canonical text form, `None` for anything outside the vocabulary
    fn parse(raw: &str) -> Option<Self>;

    /// Canonical text form
    fn as_str(&self) -> &'static str;
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl Vocabulary for $name {
            fn parse(raw: &str) -> Option<Self> {
                match raw.trim() {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Style and vibe tags shared by reference profiles and catalog items
    pub enum StyleTag {
        Elegant => "Elegant",
        Modern => "Modern",
        Contemporary => "Contemporary",
        Minimal => "Minimal",
        Minimalist => "Minimalist",
        Understated => "Understated",
        Statement => "Statement",
        Bold => "Bold",
        Classic => "Classic",
        Timeless => "Timeless",
        Glamorous => "Glamorous",
        Luxury => "Luxury",
        Delicate => "Delicate",
        Chic => "Chic",
        Trendy => "Trendy",
        FashionForward => "Fashion-forward",
        Eclectic => "Eclectic",
        Playful => "Playful",
        Regal => "Regal",
        Heritage => "Heritage",
        AvantGarde => "Avant-garde",
        Versatile => "Versatile",
        Refined => "Refined",
        Sophisticated => "Sophisticated",
        Sleek => "Sleek",
        Geometric => "Geometric",
        VintageInspired => "Vintage-inspired",
        Ornate => "Ornate",
        Traditional => "Traditional",
        Subtle => "Subtle",
        Layered => "Layered",
        Casual => "Casual",
        NatureInspired => "Nature-inspired",
        MultiStone => "Multi-stone",
        Formal => "Formal",
        Romantic => "Romantic",
    }
}

vocabulary! {
    /// Occasions modelled by the occasion compatibility table
    pub enum Occasion {
        Weddings => "Weddings",
        FormalEvents => "Formal Events",
        Engagement => "Engagement",
        Anniversary => "Anniversary",
        ValentinesDay => "Valentine's Day",
        DailyWear => "Daily Wear",
        OfficeWear => "Office Wear",
        CocktailParties => "Cocktail Parties",
        RedCarpet => "Red Carpet",
        SpecialCelebrations => "Special Celebrations",
        CasualEvents => "Casual Events",
    }
}

vocabulary! {
    /// Budget tiers used for price matching
    pub enum BudgetTier {
        Affordable => "affordable",
        Moderate => "moderate",
        Luxury => "luxury",
        UltraLuxury => "ultra-luxury",
    }
}

impl BudgetTier {
    /// Map a tier name or a questionnaire budget label to a tier.
    ///
    /// Matching is case-insensitive. Anything unrecognized (or an absent
    /// label) falls back to [`BudgetTier::Moderate`].
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return BudgetTier::Moderate;
        };

        if let Some(tier) = BudgetTier::parse(&label.trim().to_lowercase()) {
            return tier;
        }

        const BUDGET_LABELS: &[(&str, BudgetTier)] = &[
            ("under ₹50,000 (accessible luxury)", BudgetTier::Affordable),
            ("under ₹50,000", BudgetTier::Affordable),
            ("₹50,000 - ₹1,50,000 (premium)", BudgetTier::Moderate),
            ("₹50,000 - ₹1,50,000", BudgetTier::Moderate),
            ("₹1,50,000 - ₹3,00,000 (luxury)", BudgetTier::Luxury),
            ("₹1,50,000 - ₹3,00,000", BudgetTier::Luxury),
            ("above ₹3,00,000 (ultra-luxury)", BudgetTier::UltraLuxury),
            ("above ₹3,00,000", BudgetTier::UltraLuxury),
        ];

        let normalized = label.trim().to_lowercase();
        BUDGET_LABELS
            .iter()
            .find(|(text, _)| *text == normalized)
            .map(|(_, tier)| *tier)
            .unwrap_or(BudgetTier::Moderate)
    }
}

/// Product categories in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "necklaces")]
    Necklaces,
    #[serde(rename = "earrings-catalog", alias = "earrings")]
    Earrings,
    #[serde(rename = "rings-catalog", alias = "rings")]
    Rings,
    #[serde(rename = "pendants-catalog", alias = "pendants")]
    Pendants,
    #[serde(rename = "bracelets-catalog", alias = "bracelets")]
    Bracelets,
}

impl Category {
    /// Feed name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Necklaces => "necklaces",
            Category::Earrings => "earrings-catalog",
            Category::Rings => "rings-catalog",
            Category::Pendants => "pendants-catalog",
            Category::Bracelets => "bracelets-catalog",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vocabulary term as it appeared in the data, classified on the way in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label<T> {
    Known(T),
    Unknown(String),
}

impl<T: Vocabulary> Label<T> {
    pub fn parse(raw: &str) -> Self {
        match T::parse(raw) {
            Some(term) => Label::Known(term),
            None => Label::Unknown(raw.trim().to_string()),
        }
    }

    /// The known term, if any
    #[inline]
    pub fn known(&self) -> Option<T> {
        match self {
            Label::Known(term) => Some(*term),
            Label::Unknown(_) => None,
        }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        matches!(self, Label::Known(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Label::Known(term) => term.as_str(),
            Label::Unknown(raw) => raw,
        }
    }
}

impl<T: Vocabulary> From<T> for Label<T> {
    fn from(term: T) -> Self {
        Label::Known(term)
    }
}

impl<T: Vocabulary> From<&str> for Label<T> {
    fn from(raw: &str) -> Self {
        Label::parse(raw)
    }
}

impl<T: Vocabulary> fmt::Display for Label<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: Vocabulary> Serialize for Label<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: Vocabulary> Deserialize<'de> for Label<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Label::parse(&raw))
    }
}

/// Count the unknown labels in a list
pub fn count_unknown<T: Vocabulary>(labels: &[Label<T>]) -> usize {
    labels.iter().filter(|label| !label.is_known()).count()
}
