//! Detection commands dispatched to the classifier and synthesizer

use crate::config::AppConfig;
use anyhow::Context;
use fault_classifier::{
    evaluate, train_test_split, train_with, Evaluation, Prediction, TrainedModel,
};
use fault_types::{Measurement, TRAINING_SET};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use waveform::{Waveform, WaveformSynthesizer};

/// What the caller asks for. Classification and synthesis are independent.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionCommand {
    /// Predict a category only
    Classify(Measurement),
    /// Draw the waveform for a category label (unknown labels mean no fault)
    Synthesize(String),
    /// Predict, then draw the waveform of the predicted category
    Detect(Measurement),
}

/// Result of one command
#[derive(Debug, Clone, Serialize)]
pub struct DetectionOutcome {
    pub measurement: Option<Measurement>,
    pub prediction: Option<Prediction>,
    pub waveform: Option<Waveform>,
}

/// Trained model and synthesizer, built once at startup
pub struct DetectionContext {
    model: Arc<TrainedModel>,
    synthesizer: WaveformSynthesizer,
    holdout: Option<Evaluation>,
}

impl DetectionContext {
    pub fn new(model: Arc<TrainedModel>, synthesizer: WaveformSynthesizer) -> Self {
        Self {
            model,
            synthesizer,
            holdout: None,
        }
    }

    /// Train on the built-in training set and report the holdout figure
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let model = train_with(&TRAINING_SET, &config.forest)
            .context("training set cannot produce a model covering every fault category")?;
        let synthesizer = WaveformSynthesizer::new(config.synth.clone())
            .context("invalid waveform configuration")?;

        let split = train_test_split(&TRAINING_SET, &config.holdout)
            .context("invalid holdout configuration")?;
        let holdout = evaluate(&model, &split.test);
        if !split.is_statistically_meaningful() {
            warn!(
                test_rows = split.test.len(),
                train_rows = split.train.len(),
                "Holdout accuracy is not statistically meaningful at this sample size"
            );
        }
        info!(
            correct = holdout.correct,
            total = holdout.total,
            "Holdout evaluation of serving model"
        );

        Ok(Self {
            model: Arc::new(model),
            synthesizer,
            holdout: Some(holdout),
        })
    }

    pub fn model(&self) -> &Arc<TrainedModel> {
        &self.model
    }

    /// Holdout evaluation recorded at startup, if any
    pub fn holdout(&self) -> Option<Evaluation> {
        self.holdout
    }

    pub fn execute(&self, command: DetectionCommand) -> DetectionOutcome {
        match command {
            DetectionCommand::Classify(measurement) => DetectionOutcome {
                measurement: Some(measurement),
                prediction: Some(self.model.predict(&measurement)),
                waveform: None,
            },
            DetectionCommand::Synthesize(label) => DetectionOutcome {
                measurement: None,
                prediction: None,
                waveform: Some(self.synthesizer.synthesize_label(&label)),
            },
            DetectionCommand::Detect(measurement) => {
                let prediction = self.model.predict(&measurement);
                info!(
                    category = prediction.category.as_str(),
                    confidence = prediction.confidence,
                    "Fault classified"
                );
                let waveform = self.synthesizer.synthesize(prediction.category);
                DetectionOutcome {
                    measurement: Some(measurement),
                    prediction: Some(prediction),
                    waveform: Some(waveform),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fault_classifier::train;
    use fault_types::FaultCategory;

    fn context() -> DetectionContext {
        DetectionContext::from_config(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_detect_draws_predicted_category() {
        let outcome = context().execute(DetectionCommand::Detect(Measurement::new(0.5, 2.5, 0.2)));
        let prediction = outcome.prediction.unwrap();
        assert_eq!(prediction.category, FaultCategory::DoubleLineToGround);
        assert_eq!(outcome.waveform.unwrap().category, FaultCategory::DoubleLineToGround);
    }

    #[test]
    fn test_classify_skips_synthesis() {
        let outcome = context().execute(DetectionCommand::Classify(Measurement::new(0.2, 5.0, 0.3)));
        assert_eq!(outcome.prediction.unwrap().category, FaultCategory::ThreePhase);
        assert!(outcome.waveform.is_none());
    }

    #[test]
    fn test_synthesize_unknown_label() {
        let outcome = context().execute(DetectionCommand::Synthesize("mystery".to_string()));
        assert!(outcome.prediction.is_none());
        assert_eq!(outcome.waveform.unwrap().category, FaultCategory::NoFault);
    }

    #[test]
    fn test_startup_records_single_row_holdout() {
        let holdout = context().holdout().unwrap();
        assert_eq!(holdout.total, 1);
        // The serving model has seen the held-out row
        assert_eq!(holdout.correct, 1);
    }

    #[test]
    fn test_startup_fails_on_bad_config() {
        let mut config = AppConfig::default();
        config.forest.n_trees = 0;
        assert!(DetectionContext::from_config(&config).is_err());

        let mut config = AppConfig::default();
        config.synth.sample_count = 1;
        assert!(DetectionContext::from_config(&config).is_err());
    }

    #[test]
    fn test_explicit_model() {
        let model = Arc::new(train(&TRAINING_SET).unwrap());
        let ctx = DetectionContext::new(Arc::clone(&model), WaveformSynthesizer::default());
        assert!(ctx.holdout().is_none());
        assert!(Arc::ptr_eq(ctx.model(), &model));
    }
}
