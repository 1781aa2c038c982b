//! Fault Detection - Main Entry Point

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use fault_console::{
    init_logging, parse_measurement, run_interactive, run_once, AppConfig, DetectionCommand,
    DetectionContext, InputError, OutputFormat,
};
use fault_types::Measurement;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "fault-detect")]
#[command(about = "Classify electrical fault measurements and synthesize illustrative waveforms")]
#[command(version)]
struct Cli {
    /// TOML configuration file (FAULT_DETECT_* variables override it)
    #[arg(short, long, env = "FAULT_DETECT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Include every sample of the waveform in JSON output
    #[arg(long)]
    full: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a measurement and synthesize the predicted fault's waveform
    Detect(MeasurementArgs),
    /// Classify a measurement only
    Classify(MeasurementArgs),
    /// Synthesize the waveform of a fault category (unknown names mean "No Fault")
    Synthesize {
        /// Category label, e.g. "SLG Fault", dlg, three_phase
        category: String,
    },
    /// Read "voltage_drop current_spike duration" lines from stdin until a blank line
    Interactive,
}

#[derive(Args, Debug)]
struct MeasurementArgs {
    /// Voltage drop ratio (0-1)
    #[arg(allow_hyphen_values = true)]
    voltage_drop: String,
    /// Current spike factor
    #[arg(allow_hyphen_values = true)]
    current_spike: String,
    /// Fault duration in seconds
    #[arg(allow_hyphen_values = true)]
    duration: String,
}

impl MeasurementArgs {
    fn parse(&self) -> Result<Measurement, InputError> {
        parse_measurement(&self.voltage_drop, &self.current_spike, &self.duration)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(&config.logging);

    info!("=== Fault Detection v{} ===", env!("CARGO_PKG_VERSION"));
    let ctx = DetectionContext::from_config(&config)?;

    let command = match cli.command {
        Command::Detect(args) => args.parse().map(DetectionCommand::Detect),
        Command::Classify(args) => args.parse().map(DetectionCommand::Classify),
        Command::Synthesize { category } => Ok(DetectionCommand::Synthesize(category)),
        Command::Interactive => {
            eprintln!("Enter: voltage_drop current_spike duration (blank line to quit)");
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let mut stderr = io::stderr();
            let detections =
                run_interactive(&ctx, stdin.lock(), &mut stdout, &mut stderr, cli.format, cli.full)?;
            info!(detections, "Interactive session ended");
            return Ok(ExitCode::SUCCESS);
        }
    };

    let code = run_once(
        &ctx,
        command,
        &mut io::stdout(),
        &mut io::stderr(),
        cli.format,
        cli.full,
    )?;
    Ok(ExitCode::from(code))
}
