use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::config::Settings;
use crate::core::{EngineError, RankingOptions, Recommender};
use crate::models::domain::{CatalogItem, RankingWeights, ReferenceProfile};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid reference data: {0}")]
    Engine(#[from] EngineError),
}

/// Reference profiles and catalog items as published by the vectorizer jobs
///
/// Both feeds are JSON arrays of records that already carry their
/// embeddings (`vibe_vector` for references, `style_vector` for items).
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub references: Vec<ReferenceProfile>,
    pub catalog: Vec<CatalogItem>,
}

impl ReferenceData {
    /// Read both feeds from disk
    pub fn load<P: AsRef<Path>>(references_path: P, catalog_path: P) -> Result<Self, LoadError> {
        let references: Vec<ReferenceProfile> = read_feed(references_path.as_ref())?;
        let catalog: Vec<CatalogItem> = read_feed(catalog_path.as_ref())?;

        info!(
            "Loaded {} reference profiles and {} catalog items",
            references.len(),
            catalog.len()
        );

        Ok(Self { references, catalog })
    }

    /// Parse both feeds from in-memory JSON
    pub fn from_json_str(references: &str, catalog: &str) -> Result<Self, LoadError> {
        let references = serde_json::from_str(references).map_err(|source| LoadError::Json {
            path: PathBuf::from("<references>"),
            source,
        })?;
        let catalog = serde_json::from_str(catalog).map_err(|source| LoadError::Json {
            path: PathBuf::from("<catalog>"),
            source,
        })?;

        Ok(Self { references, catalog })
    }

    /// Validate the data and build the engine
    pub fn into_engine(
        self,
        weights: RankingWeights,
        options: RankingOptions,
    ) -> Result<Recommender, LoadError> {
        Ok(Recommender::new(self.references, self.catalog, weights, options)?)
    }
}

/// Load the configured feeds and build the engine
pub fn load_engine(settings: &Settings) -> Result<Recommender, LoadError> {
    let data = ReferenceData::load(&settings.data.references_path, &settings.data.catalog_path)?;
    data.into_engine(settings.ranking.weights.into(), settings.ranking_options())
}

fn read_feed<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCES: &str = r#"[
        {
            "id": 1,
            "name": "Minimal Muse",
            "primary_vibe_tags": ["Minimalist", "Modern"],
            "secondary_vibe_tags": ["Chic"],
            "vibe_description": "Clean lines",
            "vibe_vector": [1.0, 0.0]
        }
    ]"#;

    const CATALOG: &str = r#"[
        {
            "id": 10,
            "name": "Bar Pendant",
            "category": "pendants-catalog",
            "price": "45,000 INR",
            "primary_style_tags": ["Minimalist"],
            "secondary_style_tags": [],
            "occasions": ["Daily Wear", "Office Wear"],
            "style_vector": [0.8, 0.6]
        }
    ]"#;

    fn options() -> RankingOptions {
        RankingOptions {
            embedding_dimension: 2,
            ..RankingOptions::default()
        }
    }

    #[test]
    fn test_from_json_str() {
        let data = ReferenceData::from_json_str(REFERENCES, CATALOG).unwrap();

        assert_eq!(data.references.len(), 1);
        assert_eq!(data.references[0].id, "1");
        assert_eq!(data.catalog[0].price.amount, Some(45_000.0));
    }

    #[test]
    fn test_unknown_category_is_fatal() {
        let catalog = CATALOG.replace("pendants-catalog", "anklets");
        let result = ReferenceData::from_json_str(REFERENCES, &catalog);

        assert!(matches!(result, Err(LoadError::Json { .. })));
    }

    #[test]
    fn test_into_engine_checks_dimension() {
        let data = ReferenceData::from_json_str(REFERENCES, CATALOG).unwrap();
        let options = RankingOptions {
            embedding_dimension: 384,
            ..RankingOptions::default()
        };

        let result = data.into_engine(RankingWeights::default(), options);
        assert!(matches!(
            result,
            Err(LoadError::Engine(EngineError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_into_engine() {
        let engine = ReferenceData::from_json_str(REFERENCES, CATALOG)
            .unwrap()
            .into_engine(RankingWeights::default(), options())
            .unwrap();

        assert_eq!(engine.catalog().len(), 1);
    }

    #[test]
    fn test_missing_or_null_price_scores_neutral() {
        let catalog = r#"[
            {"id": 20, "name": "Unpriced Hoops", "category": "earrings-catalog",
             "primary_style_tags": ["Minimalist"], "style_vector": [1.0, 0.0]},
            {"id": 21, "name": "Null Price Cuff", "category": "bracelets-catalog", "price": null,
             "primary_style_tags": ["Minimalist"], "style_vector": [0.8, 0.6]}
        ]"#;

        let data = ReferenceData::from_json_str(REFERENCES, catalog).unwrap();
        assert!(data.catalog.iter().all(|item| item.price.amount.is_none()));

        let engine = data.into_engine(RankingWeights::default(), options()).unwrap();
        let mut query = crate::models::domain::RankQuery::new(vec![1.0, 0.0]);
        query.explain = true;

        let result = engine.recommend(&query).unwrap();
        assert_eq!(result.items.len(), 2);
        for ranked in &result.items {
            assert_eq!(ranked.breakdown.unwrap().price_compatibility, 0.5);
        }
    }

    #[test]
    fn test_missing_file() {
        let result = ReferenceData::load("does/not/exist.json", "does/not/exist.json");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
