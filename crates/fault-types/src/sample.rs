//! Measurements and Labelled Training Samples

use crate::FaultCategory;
use serde::{Deserialize, Serialize};

/// Unlabelled measurement triple fed to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Normalized voltage drop, expected in [0, 1]
    pub voltage_drop_ratio: f64,
    /// Abnormal current rise factor, expected >= 0
    pub current_spike_factor: f64,
    /// Disturbance duration in seconds, expected >= 0
    pub duration_seconds: f64,
}

impl Measurement {
    /// Number of features per measurement
    pub const DIMENSION: usize = 3;

    pub const fn new(voltage_drop_ratio: f64, current_spike_factor: f64, duration_seconds: f64) -> Self {
        Self {
            voltage_drop_ratio,
            current_spike_factor,
            duration_seconds,
        }
    }

    /// Feature vector in training column order
    pub fn features(&self) -> [f64; Self::DIMENSION] {
        [
            self.voltage_drop_ratio,
            self.current_spike_factor,
            self.duration_seconds,
        ]
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.features().iter().all(|v| v.is_finite())
    }
}

/// Labelled training row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaultSample {
    pub voltage_drop_ratio: f64,
    pub current_spike_factor: f64,
    pub duration_seconds: f64,
    pub label: FaultCategory,
}

impl FaultSample {
    pub const fn new(
        voltage_drop_ratio: f64,
        current_spike_factor: f64,
        duration_seconds: f64,
        label: FaultCategory,
    ) -> Self {
        Self {
            voltage_drop_ratio,
            current_spike_factor,
            duration_seconds,
            label,
        }
    }

    /// Measurement part of the row
    pub fn measurement(&self) -> Measurement {
        Measurement::new(
            self.voltage_drop_ratio,
            self.current_spike_factor,
            self.duration_seconds,
        )
    }

    pub fn features(&self) -> [f64; Measurement::DIMENSION] {
        self.measurement().features()
    }
}

/// The fixed synthetic training set, one row per category
pub const TRAINING_SET: [FaultSample; FaultCategory::COUNT] = [
    FaultSample::new(0.95, 1.2, 0.05, FaultCategory::NoFault),
    FaultSample::new(0.7, 1.5, 0.1, FaultCategory::SingleLineToGround),
    FaultSample::new(0.5, 2.5, 0.2, FaultCategory::DoubleLineToGround),
    FaultSample::new(0.2, 5.0, 0.3, FaultCategory::ThreePhase),
];

/// Owned copy of [`TRAINING_SET`]
pub fn training_set() -> Vec<FaultSample> {
    TRAINING_SET.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_set_covers_every_category_once() {
        for category in FaultCategory::ALL {
            let count = TRAINING_SET.iter().filter(|s| s.label == category).count();
            assert_eq!(count, 1, "{category} should appear exactly once");
        }
    }

    #[test]
    fn test_feature_order() {
        let sample = TRAINING_SET[3];
        assert_eq!(sample.features(), [0.2, 5.0, 0.3]);
        assert_eq!(sample.measurement(), Measurement::new(0.2, 5.0, 0.3));
    }

    #[test]
    fn test_non_finite_measurement() {
        assert!(Measurement::new(0.5, 1.0, 0.1).is_finite());
        assert!(!Measurement::new(f64::NAN, 1.0, 0.1).is_finite());
        assert!(!Measurement::new(0.5, f64::INFINITY, 0.1).is_finite());
    }
}
