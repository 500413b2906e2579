use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::RankingOptions;
use crate::models::domain::RankingWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

/// Location and shape of the reference data feeds
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_references_path")]
    pub references_path: String,
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            references_path: default_references_path(),
            catalog_path: default_catalog_path(),
            embedding_dimension: default_embedding_dimension(),
        }
    }
}

fn default_references_path() -> String { "data/references_with_vectors.json".to_string() }
fn default_catalog_path() -> String { "data/catalog_with_vectors.json".to_string() }
fn default_embedding_dimension() -> usize { 384 }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_reference_top_k")]
    pub reference_top_k: usize,
    #[serde(default = "default_recommend_threshold")]
    pub recommend_threshold: f64,
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,
    #[serde(default = "default_rerank_window_factor")]
    pub rerank_window_factor: usize,
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            reference_top_k: default_reference_top_k(),
            recommend_threshold: default_recommend_threshold(),
            match_threshold: default_match_threshold(),
            rerank_window_factor: default_rerank_window_factor(),
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_reference_top_k() -> usize { 3 }
fn default_recommend_threshold() -> f64 { 0.4 }
fn default_match_threshold() -> f64 { 0.3 }
fn default_rerank_window_factor() -> usize { 2 }
fn default_top_n() -> usize { 10 }
fn default_max_top_n() -> usize { 50 }

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_vibe_weight")]
    pub vibe_similarity: f64,
    #[serde(default = "default_product_weight")]
    pub product_similarity: f64,
    #[serde(default = "default_style_weight")]
    pub style_taxonomy: f64,
    #[serde(default = "default_occasion_weight")]
    pub occasion_match: f64,
    #[serde(default = "default_price_weight")]
    pub price_compatibility: f64,
    #[serde(default = "default_diversity_weight")]
    pub diversity_bonus: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            vibe_similarity: default_vibe_weight(),
            product_similarity: default_product_weight(),
            style_taxonomy: default_style_weight(),
            occasion_match: default_occasion_weight(),
            price_compatibility: default_price_weight(),
            diversity_bonus: default_diversity_weight(),
        }
    }
}

impl From<WeightsConfig> for RankingWeights {
    fn from(config: WeightsConfig) -> Self {
        Self {
            vibe_similarity: config.vibe_similarity,
            product_similarity: config.product_similarity,
            style_taxonomy: config.style_taxonomy,
            occasion_match: config.occasion_match,
            price_compatibility: config.price_compatibility,
            diversity_bonus: config.diversity_bonus,
        }
    }
}

fn default_vibe_weight() -> f64 { 0.30 }
fn default_product_weight() -> f64 { 0.25 }
fn default_style_weight() -> f64 { 0.25 }
fn default_occasion_weight() -> f64 { 0.12 }
fn default_price_weight() -> f64 { 0.05 }
fn default_diversity_weight() -> f64 { 0.03 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with STYLE_RANK__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., STYLE_RANK__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Engine options derived from the data and ranking sections
    pub fn ranking_options(&self) -> RankingOptions {
        RankingOptions {
            embedding_dimension: self.data.embedding_dimension,
            reference_top_k: self.ranking.reference_top_k,
            rerank_window_factor: self.ranking.rerank_window_factor,
            max_top_n: self.ranking.max_top_n,
            recommend_threshold: self.ranking.recommend_threshold,
            match_threshold: self.ranking.match_threshold,
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("STYLE_RANK")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
