//! Waveform Synthesizer
//!
//! Produces deterministic illustrative voltage/current traces for a fault
//! category together with the magnitude spectrum of the voltage trace. Output
//! is for display only and is never fed back into the classifier.

mod amplitude;
mod config;
mod spectrum;
mod synth;

pub use amplitude::{AmplitudeTable, Amplitudes};
pub use config::SynthConfig;
pub use spectrum::{SpectralSummary, SpectrumAnalyzer, SpectrumBin};
pub use synth::{synthesize, synthesize_label, Waveform, WaveformSynthesizer};

use thiserror::Error;

/// Errors during synthesizer setup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    #[error("Invalid synthesis configuration: {0}")]
    InvalidConfig(String),
}
