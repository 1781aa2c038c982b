//! Seeded Train/Test Holdout Split
//!
//! With the four-row training set an 80/20 split holds out a single row. The
//! resulting accuracy figure carries no statistical meaning, and the training
//! half no longer covers every category, so serving models are trained on the
//! full set and the split is only used for reporting.

use crate::ClassifierError;
use fault_types::{FaultCategory, FaultSample};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Smallest test set whose accuracy is worth reading
pub const MIN_MEANINGFUL_TEST_SIZE: usize = 30;

/// Holdout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldoutConfig {
    /// Fraction of rows held out, rounded up to whole rows
    pub test_fraction: f64,
    /// Seed for the row permutation
    pub seed: u64,
}

impl Default for HoldoutConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Rows partitioned into training and test sets
#[derive(Debug, Clone, PartialEq)]
pub struct HoldoutSplit {
    pub train: Vec<FaultSample>,
    pub test: Vec<FaultSample>,
}

impl HoldoutSplit {
    pub fn is_statistically_meaningful(&self) -> bool {
        self.test.len() >= MIN_MEANINGFUL_TEST_SIZE
    }

    /// Categories with no row left in the training half
    pub fn missing_train_categories(&self) -> Vec<FaultCategory> {
        FaultCategory::ALL
            .into_iter()
            .filter(|c| !self.train.iter().any(|s| s.label == *c))
            .collect()
    }
}

/// Shuffle rows with a seeded permutation and hold out `ceil(n * test_fraction)`
pub fn train_test_split(
    samples: &[FaultSample],
    config: &HoldoutConfig,
) -> Result<HoldoutSplit, ClassifierError> {
    if samples.is_empty() {
        return Err(ClassifierError::EmptyTrainingSet);
    }
    if !(config.test_fraction > 0.0 && config.test_fraction < 1.0) {
        return Err(ClassifierError::InvalidConfig(format!(
            "test_fraction must be in (0, 1), got {}",
            config.test_fraction
        )));
    }

    let n = samples.len();
    let n_test = (n as f64 * config.test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(ClassifierError::InvalidConfig(format!(
            "test_fraction {} leaves no training rows out of {}",
            config.test_fraction, n
        )));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut ChaCha8Rng::seed_from_u64(config.seed));

    let (test_idx, train_idx) = order.split_at(n_test);
    Ok(HoldoutSplit {
        train: train_idx.iter().map(|&i| samples[i]).collect(),
        test: test_idx.iter().map(|&i| samples[i]).collect(),
    })
}
