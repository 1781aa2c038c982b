//! Fault Detection Console
//!
//! Command-line caller for the classifier and waveform services: loads
//! layered configuration, trains the model once at startup, parses user
//! input and dispatches detection commands.

mod command;
mod config;
mod input;
mod report;

pub use command::{DetectionCommand, DetectionContext, DetectionOutcome};
pub use config::{AppConfig, LoggingConfig, ENV_PREFIX};
pub use input::{parse_line, parse_measurement, InputError};
pub use report::{render, run_interactive, run_once, OutputFormat, EXIT_INVALID_INPUT};

use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {e}");
    }
}
