//! Forest Hyperparameters

use crate::ClassifierError;
use serde::{Deserialize, Serialize};

/// Number of features considered at each split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// floor(sqrt(n_features)), at least one
    Sqrt,
    /// All features
    All,
    /// Fixed count, clamped to [1, n_features]
    Count(usize),
}

impl MaxFeatures {
    /// Resolve to a concrete feature count
    pub fn resolve(self, n_features: usize) -> usize {
        let n = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().floor() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Count(n) => n,
        };
        n.clamp(1, n_features.max(1))
    }
}

/// Random forest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Seed for bootstrap sampling and feature selection
    pub seed: u64,
    /// Draw a bootstrap sample per tree instead of using every row
    pub bootstrap: bool,
    /// Features evaluated per split
    pub max_features: MaxFeatures,
    /// Maximum tree depth (None = grow until pure)
    pub max_depth: Option<usize>,
    /// Minimum rows a node needs before it may split
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            bootstrap: true,
            max_features: MaxFeatures::Sqrt,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

impl ForestConfig {
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.n_trees == 0 {
            return Err(ClassifierError::InvalidConfig(
                "n_trees must be at least 1".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(ClassifierError::InvalidConfig(format!(
                "min_samples_split must be at least 2, got {}",
                self.min_samples_split
            )));
        }
        if let MaxFeatures::Count(0) = self.max_features {
            return Err(ClassifierError::InvalidConfig(
                "max_features count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
