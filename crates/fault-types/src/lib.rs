//! Fault Domain Types
//!
//! Closed set of electrical fault categories and the labelled measurement
//! samples the classifier is trained on. Shared by the classifier and the
//! waveform synthesizer so neither depends on the other.

mod category;
mod sample;

pub use category::{FaultCategory, UnknownCategory};
pub use sample::{training_set, FaultSample, Measurement, TRAINING_SET};
