//! Synthesis parameters

use crate::SynthError;
use serde::{Deserialize, Serialize};

/// Fixed synthesis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Samples per trace (N)
    pub sample_count: usize,
    /// Trace length in seconds
    pub duration_s: f64,
    /// Nominal grid frequency (Hz)
    pub nominal_frequency_hz: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_count: 1000,
            duration_s: 1.0,
            nominal_frequency_hz: 50.0,
        }
    }
}

impl SynthConfig {
    /// Sampling rate used for the spectrum frequency axis
    pub fn sample_rate(&self) -> f64 {
        self.sample_count as f64 / self.duration_s
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if self.sample_count < 2 {
            return Err(SynthError::InvalidConfig(format!(
                "sample_count must be at least 2, got {}",
                self.sample_count
            )));
        }
        if !(self.duration_s.is_finite() && self.duration_s > 0.0) {
            return Err(SynthError::InvalidConfig(format!(
                "duration_s must be positive, got {}",
                self.duration_s
            )));
        }
        if !(self.nominal_frequency_hz.is_finite() && self.nominal_frequency_hz > 0.0) {
            return Err(SynthError::InvalidConfig(format!(
                "nominal_frequency_hz must be positive, got {}",
                self.nominal_frequency_hz
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rate() {
        let config = SynthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sample_rate(), 1000.0);
    }

    #[test]
    fn test_rejects_degenerate_configs() {
        let bad = [
            SynthConfig { sample_count: 1, ..Default::default() },
            SynthConfig { duration_s: 0.0, ..Default::default() },
            SynthConfig { nominal_frequency_hz: f64::NAN, ..Default::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }
}
