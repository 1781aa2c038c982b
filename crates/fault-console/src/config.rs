//! Layered application configuration
//!
//! Defaults, then an optional TOML file, then `FAULT_DETECT_*` environment
//! variables (`__` separates sections, e.g. `FAULT_DETECT_FOREST__SEED=7`).

use config::{Config, ConfigError, Environment, File, FileFormat};
use fault_classifier::{ForestConfig, HoldoutConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use waveform::SynthConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "FAULT_DETECT";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub forest: ForestConfig,
    pub holdout: HoldoutConfig,
    pub synth: SynthConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load defaults, the optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fault_classifier::MaxFeatures;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.forest.n_trees, 100);
        assert_eq!(config.holdout.test_fraction, 0.2);
        assert_eq!(config.synth.sample_count, 1000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections_override() {
        let config = AppConfig::from_toml(
            r#"
            [forest]
            n_trees = 25
            seed = 7
            max_features = "all"

            [synth]
            nominal_frequency_hz = 60.0

            [logging]
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.forest.n_trees, 25);
        assert_eq!(config.forest.seed, 7);
        assert_eq!(config.forest.max_features, MaxFeatures::All);
        assert!(config.forest.bootstrap);
        assert_eq!(config.synth.nominal_frequency_hz, 60.0);
        assert_eq!(config.synth.sample_count, 1000);
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("fault-detect-{}.toml", std::process::id()));
        std::fs::write(&path, "[holdout]\nseed = 3\n").unwrap();

        let config = AppConfig::load(Some(&path));
        std::fs::remove_file(&path).ok();

        assert_eq!(config.unwrap().holdout.seed, 3);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        std::env::set_var("FAULT_DETECT_FOREST__SEED", "7");
        std::env::set_var("FAULT_DETECT_SYNTH__SAMPLE_COUNT", "512");
        std::env::set_var("FAULT_DETECT_CONFIG", "ignored.toml");

        let config = AppConfig::load(None);

        std::env::remove_var("FAULT_DETECT_FOREST__SEED");
        std::env::remove_var("FAULT_DETECT_SYNTH__SAMPLE_COUNT");
        std::env::remove_var("FAULT_DETECT_CONFIG");

        let config = config.unwrap();
        assert_eq!(config.forest.seed, 7);
        assert_eq!(config.synth.sample_count, 512);
        assert_eq!(config.forest.n_trees, 100);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("fault-detect-does-not-exist.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
