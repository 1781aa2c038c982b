//! Fault Classifier Service
//!
//! Trains a seeded random forest over labelled fault samples and maps a
//! measurement triple to one of the fixed fault categories. Training is
//! reproducible: the same seed and samples always yield the same model.

mod config;
mod forest;
mod split;
mod tree;

pub use config::{ForestConfig, MaxFeatures};
pub use forest::{classify, evaluate, train, train_with, Evaluation, Prediction, TrainedModel};
pub use split::{train_test_split, HoldoutConfig, HoldoutSplit, MIN_MEANINGFUL_TEST_SIZE};

use fault_types::FaultCategory;
use thiserror::Error;

/// Errors during classifier training
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("Insufficient training data: no samples provided")]
    EmptyTrainingSet,
    #[error("Insufficient training data: no samples labelled {missing:?}")]
    MissingCategories { missing: Vec<FaultCategory> },
    #[error("Training sample {index} has a non-finite feature")]
    NonFiniteSample { index: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClassifierError {
    /// Whether the training set cannot produce a model covering all categories
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            ClassifierError::EmptyTrainingSet | ClassifierError::MissingCategories { .. }
        )
    }
}
