//! FFT-based Magnitude Spectrum

use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

/// One non-negative frequency bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumBin {
    /// Bin centre frequency (Hz)
    pub frequency_hz: f64,
    /// Unnormalized DFT magnitude
    pub magnitude: f64,
}

/// Headline figures of a magnitude spectrum
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralSummary {
    /// Frequency of the largest bin
    pub dominant_frequency_hz: f64,
    /// Magnitude of the largest bin
    pub peak_magnitude: f64,
    /// Sum of squared magnitudes, normalized by bin count
    pub total_power: f64,
}

impl SpectralSummary {
    pub fn from_bins(bins: &[SpectrumBin]) -> Self {
        if bins.is_empty() {
            return Self::default();
        }

        let mut peak = bins[0];
        for bin in &bins[1..] {
            if bin.magnitude > peak.magnitude {
                peak = *bin;
            }
        }

        let total_power = bins.iter().map(|b| b.magnitude * b.magnitude).sum::<f64>() / bins.len() as f64;

        Self {
            dominant_frequency_hz: peak.frequency_hz,
            peak_magnitude: peak.magnitude,
            total_power,
        }
    }
}

/// FFT analyzer producing the first-half magnitude spectrum
pub struct SpectrumAnalyzer {
    /// FFT planner for efficient computation
    planner: FftPlanner<f64>,
    /// Sampling frequency (Hz)
    sample_rate: f64,
}

impl SpectrumAnalyzer {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            planner: FftPlanner::new(),
            sample_rate,
        }
    }

    /// Magnitudes of bins `0..n/2`, paired with `k * sample_rate / n`
    pub fn magnitude_spectrum(&mut self, signal: &[f64]) -> Vec<SpectrumBin> {
        let n = signal.len();
        if n == 0 {
            return Vec::new();
        }

        let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&v| Complex::new(v, 0.0)).collect();

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let freq_resolution = self.sample_rate / n as f64;
        buffer
            .iter()
            .take(n / 2) // Only non-negative frequencies
            .enumerate()
            .map(|(k, c)| SpectrumBin {
                frequency_hz: k as f64 * freq_resolution,
                magnitude: c.norm(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_sine_wave() {
        let mut analyzer = SpectrumAnalyzer::new(100.0); // 100 Hz sample rate

        // 2 Hz sine over exactly 2 seconds
        let signal: Vec<f64> = (0..200)
            .map(|i| (2.0 * std::f64::consts::PI * 2.0 * i as f64 / 100.0).sin())
            .collect();

        let bins = analyzer.magnitude_spectrum(&signal);
        assert_eq!(bins.len(), 100);

        let summary = SpectralSummary::from_bins(&bins);
        assert!((summary.dominant_frequency_hz - 2.0).abs() < 1e-9);
        // A full-cycle sine of amplitude 1 puts n/2 into its bin
        assert!((summary.peak_magnitude - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_odd_length_keeps_floor_half() {
        let mut analyzer = SpectrumAnalyzer::new(10.0);
        let bins = analyzer.magnitude_spectrum(&[1.0; 7]);
        assert_eq!(bins.len(), 3);
        assert!((bins[0].magnitude - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_signal() {
        let mut analyzer = SpectrumAnalyzer::new(100.0);
        assert!(analyzer.magnitude_spectrum(&[]).is_empty());
        assert_eq!(SpectralSummary::from_bins(&[]), SpectralSummary::default());
    }
}
