//! Per-category signal amplitudes

use fault_types::FaultCategory;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Peak voltage (V) and current (A) of a synthesized trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amplitudes {
    pub voltage: f64,
    pub current: f64,
}

/// Lookup table from fault category to trace amplitudes
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeTable {
    entries: [Amplitudes; FaultCategory::COUNT],
}

impl Default for AmplitudeTable {
    fn default() -> Self {
        Self {
            entries: [
                Amplitudes { voltage: 230.0, current: 10.0 },
                Amplitudes { voltage: 180.0, current: 15.0 },
                Amplitudes { voltage: 120.0, current: 25.0 },
                Amplitudes { voltage: 50.0, current: 50.0 },
            ],
        }
    }
}

impl AmplitudeTable {
    pub fn get(&self, category: FaultCategory) -> Amplitudes {
        self.entries[category.index()]
    }

    /// Resolve a category label, falling back to the no-fault row when unknown
    pub fn resolve(&self, label: &str) -> (FaultCategory, Amplitudes) {
        let category = FaultCategory::from_label(label).unwrap_or_else(|| {
            debug!(label, "Unrecognized fault category, using no-fault amplitudes");
            FaultCategory::NoFault
        });
        (category, self.get(category))
    }
}
