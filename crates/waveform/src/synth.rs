//! Sinusoidal trace synthesis

use crate::amplitude::AmplitudeTable;
use crate::config::SynthConfig;
use crate::spectrum::{SpectralSummary, SpectrumAnalyzer, SpectrumBin};
use crate::SynthError;
use fault_types::FaultCategory;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Synthesized traces for one fault category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    /// Category the traces were drawn for
    pub category: FaultCategory,
    /// Sample times (s), evenly spaced with both endpoints included
    pub time: Vec<f64>,
    /// Voltage trace (V)
    pub voltage: Vec<f64>,
    /// Current trace (A)
    pub current: Vec<f64>,
    /// Magnitude spectrum of the voltage trace, non-negative frequencies only
    pub spectrum: Vec<SpectrumBin>,
}

impl Waveform {
    pub fn summary(&self) -> SpectralSummary {
        SpectralSummary::from_bins(&self.spectrum)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Stateless synthesizer over a validated configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformSynthesizer {
    config: SynthConfig,
    table: AmplitudeTable,
}

impl Default for WaveformSynthesizer {
    fn default() -> Self {
        Self {
            config: SynthConfig::default(),
            table: AmplitudeTable::default(),
        }
    }
}

impl WaveformSynthesizer {
    pub fn new(config: SynthConfig) -> Result<Self, SynthError> {
        Self::with_table(config, AmplitudeTable::default())
    }

    pub fn with_table(config: SynthConfig, table: AmplitudeTable) -> Result<Self, SynthError> {
        config.validate()?;
        Ok(Self { config, table })
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Draw the voltage/current traces and voltage spectrum for a category
    pub fn synthesize(&self, category: FaultCategory) -> Waveform {
        let n = self.config.sample_count;
        let amps = self.table.get(category);
        let omega = 2.0 * PI * self.config.nominal_frequency_hz;
        let step = self.config.duration_s / (n - 1) as f64;

        let time: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
        let voltage: Vec<f64> = time.iter().map(|t| amps.voltage * (omega * t).sin()).collect();
        let current: Vec<f64> = time.iter().map(|t| amps.current * (omega * t).sin()).collect();

        let spectrum = SpectrumAnalyzer::new(self.config.sample_rate()).magnitude_spectrum(&voltage);

        debug!(
            category = category.as_str(),
            samples = n,
            bins = spectrum.len(),
            "Synthesized waveform"
        );

        Waveform {
            category,
            time,
            voltage,
            current,
            spectrum,
        }
    }

    /// Synthesize by label; unrecognized labels yield the no-fault waveform
    pub fn synthesize_label(&self, label: &str) -> Waveform {
        let (category, _) = self.table.resolve(label);
        self.synthesize(category)
    }
}

/// Synthesize with the default configuration
pub fn synthesize(category: FaultCategory) -> Waveform {
    WaveformSynthesizer::default().synthesize(category)
}

/// Synthesize a label with the default configuration, falling back to no-fault
pub fn synthesize_label(label: &str) -> Waveform {
    WaveformSynthesizer::default().synthesize_label(label)
}
