//! Fault Category Enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Electrical fault category a measurement is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultCategory {
    /// Normal operation
    NoFault,
    /// Single line-to-ground fault
    SingleLineToGround,
    /// Double line-to-ground fault
    DoubleLineToGround,
    /// Balanced three-phase fault
    ThreePhase,
}

/// Returned when a label does not name any fault category
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown fault category: {0:?}")]
pub struct UnknownCategory(pub String);

impl FaultCategory {
    /// Number of categories
    pub const COUNT: usize = 4;

    /// All categories in index order
    pub const ALL: [FaultCategory; Self::COUNT] = [
        FaultCategory::NoFault,
        FaultCategory::SingleLineToGround,
        FaultCategory::DoubleLineToGround,
        FaultCategory::ThreePhase,
    ];

    /// Class index used by the classifier
    pub fn index(self) -> usize {
        match self {
            FaultCategory::NoFault => 0,
            FaultCategory::SingleLineToGround => 1,
            FaultCategory::DoubleLineToGround => 2,
            FaultCategory::ThreePhase => 3,
        }
    }

    /// Reverse of [`FaultCategory::index`]
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            FaultCategory::NoFault => "No Fault",
            FaultCategory::SingleLineToGround => "SLG Fault",
            FaultCategory::DoubleLineToGround => "DLG Fault",
            FaultCategory::ThreePhase => "Three-Phase Fault",
        }
    }

    /// Machine name, same as the serde representation
    pub fn as_str(self) -> &'static str {
        match self {
            FaultCategory::NoFault => "no_fault",
            FaultCategory::SingleLineToGround => "single_line_to_ground",
            FaultCategory::DoubleLineToGround => "double_line_to_ground",
            FaultCategory::ThreePhase => "three_phase",
        }
    }

    /// Short operator-facing description
    pub fn description(self) -> &'static str {
        match self {
            FaultCategory::NoFault => "Nominal voltage and current, no protection action required",
            FaultCategory::SingleLineToGround => "One phase shorted to ground, moderate voltage sag",
            FaultCategory::DoubleLineToGround => "Two phases shorted to ground, deep sag and high current",
            FaultCategory::ThreePhase => "All phases shorted, severe sag and maximum fault current",
        }
    }

    /// Resolve a label, machine name or short alias (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace(|c: char| c == '-' || c == ' ', "_");
        match normalized.as_str() {
            "no_fault" | "none" | "normal" => Some(FaultCategory::NoFault),
            "slg_fault" | "slg" | "single_line_to_ground" => Some(FaultCategory::SingleLineToGround),
            "dlg_fault" | "dlg" | "double_line_to_ground" => Some(FaultCategory::DoubleLineToGround),
            "three_phase_fault" | "three_phase" | "3ph" => Some(FaultCategory::ThreePhase),
            _ => None,
        }
    }
}

impl fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FaultCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
