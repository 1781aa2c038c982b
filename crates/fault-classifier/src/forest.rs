//! Random Forest Training and Classification

use crate::config::ForestConfig;
use crate::tree::{argmax, DecisionTree, TreeParams};
use crate::ClassifierError;
use fault_types::{FaultCategory, FaultSample, Measurement};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Prediction result from the forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted fault category
    pub category: FaultCategory,
    /// Mean probability of the predicted category (0.0 to 1.0)
    pub confidence: f64,
    /// Mean probabilities per category, in index order
    pub probabilities: [f64; FaultCategory::COUNT],
}

/// Accuracy of a model over a labelled set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {
    /// Fraction of correct predictions, None for an empty set
    pub fn accuracy(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct as f64 / self.total as f64)
    }
}

/// Immutable random forest produced by [`train`]
///
/// Never mutated after training, so it can be shared behind an `Arc` by any
/// number of readers once training has completed.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    trees: Vec<DecisionTree>,
    config: ForestConfig,
    training_size: usize,
}

impl TrainedModel {
    /// Classify a measurement, averaging leaf distributions across trees
    pub fn predict(&self, measurement: &Measurement) -> Prediction {
        let mut probabilities = [0.0; FaultCategory::COUNT];
        for tree in &self.trees {
            for (acc, p) in probabilities.iter_mut().zip(tree.probabilities(measurement)) {
                *acc += p;
            }
        }
        let n = self.trees.len().max(1) as f64;
        for p in probabilities.iter_mut() {
            *p /= n;
        }

        let idx = argmax(&probabilities);
        Prediction {
            category: FaultCategory::from_index(idx).unwrap_or(FaultCategory::NoFault),
            confidence: probabilities[idx],
            probabilities,
        }
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Configuration the model was trained with
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Number of rows the model was trained on
    pub fn training_size(&self) -> usize {
        self.training_size
    }
}

/// Train a forest with the default configuration
pub fn train(samples: &[FaultSample]) -> Result<TrainedModel, ClassifierError> {
    train_with(samples, &ForestConfig::default())
}

/// Train a forest. Every category must have at least one sample.
pub fn train_with(
    samples: &[FaultSample],
    config: &ForestConfig,
) -> Result<TrainedModel, ClassifierError> {
    config.validate()?;

    if samples.is_empty() {
        return Err(ClassifierError::EmptyTrainingSet);
    }
    if let Some(index) = samples.iter().position(|s| !s.measurement().is_finite()) {
        return Err(ClassifierError::NonFiniteSample { index });
    }

    let missing: Vec<FaultCategory> = FaultCategory::ALL
        .into_iter()
        .filter(|c| !samples.iter().any(|s| s.label == *c))
        .collect();
    if !missing.is_empty() {
        return Err(ClassifierError::MissingCategories { missing });
    }

    let params = TreeParams {
        max_features: config.max_features.resolve(Measurement::DIMENSION),
        max_depth: config.max_depth,
        min_samples_split: config.min_samples_split,
    };

    let n = samples.len();
    let mut master = ChaCha8Rng::seed_from_u64(config.seed);
    let trees: Vec<DecisionTree> = (0..config.n_trees)
        .map(|i| {
            let mut rng = ChaCha8Rng::seed_from_u64(master.gen::<u64>());
            let rows: Vec<usize> = if config.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };
            let tree = DecisionTree::fit(samples, rows, &params, &mut rng);
            debug!(tree = i, nodes = tree.node_count(), depth = tree.depth(), "Grew decision tree");
            tree
        })
        .collect();

    info!(
        trees = trees.len(),
        samples = n,
        seed = config.seed,
        "Random forest trained"
    );

    Ok(TrainedModel {
        trees,
        config: config.clone(),
        training_size: n,
    })
}

/// Predicted category for a measurement triple. No range validation.
pub fn classify(
    model: &TrainedModel,
    voltage_drop_ratio: f64,
    current_spike_factor: f64,
    duration_seconds: f64,
) -> FaultCategory {
    model
        .predict(&Measurement::new(
            voltage_drop_ratio,
            current_spike_factor,
            duration_seconds,
        ))
        .category
}

/// Count correct predictions over labelled samples
pub fn evaluate(model: &TrainedModel, samples: &[FaultSample]) -> Evaluation {
    let correct = samples
        .iter()
        .filter(|s| model.predict(&s.measurement()).category == s.label)
        .count();
    Evaluation {
        correct,
        total: samples.len(),
    }
}
