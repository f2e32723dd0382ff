//! Configuration file parsing for the engine.
//!
//! Loads score-fusion settings from TOML. All of the fusion formula is
//! configuration: the keyword and reasoning weights, the keyword score
//! normalization scale, and how many index hits to pull per query.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration loaded from TOML.
///
/// The hybrid score of an answer is
/// `keyword_weight * min(top_hit_score / keyword_scale, 1) +
/// reasoning_weight * reasoning_confidence`, which stays in [0, 1] as long
/// as the two weights sum to at most 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Weight of the keyword-retrieval component
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,

    /// Weight of the reasoning-confidence component
    #[serde(default = "default_reasoning_weight")]
    pub reasoning_weight: f64,

    /// Keyword score at which the normalized component saturates at 1.0.
    /// Backends report un-normalized scores, so this is backend-dependent.
    #[serde(default = "default_keyword_scale")]
    pub keyword_scale: f64,

    /// How many index hits to request per query
    #[serde(default = "default_keyword_top_k")]
    pub keyword_top_k: usize,
}

fn default_keyword_weight() -> f64 {
    0.4
}

fn default_reasoning_weight() -> f64 {
    0.6
}

fn default_keyword_scale() -> f64 {
    10.0
}

fn default_keyword_top_k() -> usize {
    10
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keyword_weight: default_keyword_weight(),
            reasoning_weight: default_reasoning_weight(),
            keyword_scale: default_keyword_scale(),
            keyword_top_k: default_keyword_top_k(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the fusion formula cannot leave [0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.keyword_weight) {
            return Err(ConfigError::InvalidValue(format!(
                "keyword_weight must be in [0, 1], got {}",
                self.keyword_weight
            )));
        }
        if !(0.0..=1.0).contains(&self.reasoning_weight) {
            return Err(ConfigError::InvalidValue(format!(
                "reasoning_weight must be in [0, 1], got {}",
                self.reasoning_weight
            )));
        }
        if self.keyword_weight + self.reasoning_weight > 1.0 + f64::EPSILON {
            return Err(ConfigError::InvalidValue(format!(
                "weights must sum to at most 1, got {}",
                self.keyword_weight + self.reasoning_weight
            )));
        }
        if self.keyword_scale <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "keyword_scale must be positive, got {}",
                self.keyword_scale
            )));
        }
        if self.keyword_top_k == 0 {
            return Err(ConfigError::InvalidValue(
                "keyword_top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
