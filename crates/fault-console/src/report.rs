//! Outcome rendering and the interactive loop

use crate::command::{DetectionCommand, DetectionContext, DetectionOutcome};
use crate::input::{parse_line, InputError};
use clap::ValueEnum;
use fault_classifier::Prediction;
use fault_types::{FaultCategory, Measurement};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use waveform::{SpectralSummary, SpectrumBin, Waveform};

/// Exit code for unparseable user input
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct PredictionView<'a> {
    category: FaultCategory,
    label: &'static str,
    confidence: f64,
    probabilities: &'a [f64; FaultCategory::COUNT],
}

#[derive(Serialize)]
struct Traces<'a> {
    time: &'a [f64],
    voltage: &'a [f64],
    current: &'a [f64],
    spectrum: &'a [SpectrumBin],
}

#[derive(Serialize)]
struct WaveformView<'a> {
    category: FaultCategory,
    label: &'static str,
    samples: usize,
    bins: usize,
    summary: SpectralSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    traces: Option<Traces<'a>>,
}

#[derive(Serialize)]
struct OutcomeView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    measurement: Option<&'a Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prediction: Option<PredictionView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    waveform: Option<WaveformView<'a>>,
}

fn prediction_view(prediction: &Prediction) -> PredictionView<'_> {
    PredictionView {
        category: prediction.category,
        label: prediction.category.label(),
        confidence: prediction.confidence,
        probabilities: &prediction.probabilities,
    }
}

fn waveform_view(waveform: &Waveform, full: bool) -> WaveformView<'_> {
    WaveformView {
        category: waveform.category,
        label: waveform.category.label(),
        samples: waveform.len(),
        bins: waveform.spectrum.len(),
        summary: waveform.summary(),
        traces: full.then(|| Traces {
            time: &waveform.time,
            voltage: &waveform.voltage,
            current: &waveform.current,
            spectrum: &waveform.spectrum,
        }),
    }
}

fn render_text(outcome: &DetectionOutcome) -> String {
    let mut out = String::new();
    if let Some(prediction) = &outcome.prediction {
        out.push_str(&format!(
            "Predicted Fault: {} (confidence {:.2})\n  {}\n",
            prediction.category,
            prediction.confidence,
            prediction.category.description()
        ));
    }
    if let Some(waveform) = &outcome.waveform {
        let summary = waveform.summary();
        out.push_str(&format!(
            "Waveforms - {}\n  samples: {} voltage, {} current, {} spectrum bins\n  dominant frequency: {:.1} Hz, peak magnitude: {:.1}\n",
            waveform.category,
            waveform.voltage.len(),
            waveform.current.len(),
            waveform.spectrum.len(),
            summary.dominant_frequency_hz,
            summary.peak_magnitude
        ));
    }
    out
}

/// Render an outcome. `full` adds every sample to JSON output.
pub fn render(
    outcome: &DetectionOutcome,
    format: OutputFormat,
    full: bool,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(outcome)),
        OutputFormat::Json => {
            let view = OutcomeView {
                measurement: outcome.measurement.as_ref(),
                prediction: outcome.prediction.as_ref().map(prediction_view),
                waveform: outcome.waveform.as_ref().map(|w| waveform_view(w, full)),
            };
            let mut json = serde_json::to_string_pretty(&view)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Run a single command whose input may have failed to parse. Results go to
/// `out`, input errors to `err`. Returns the process exit code.
pub fn run_once<W: Write, E: Write>(
    ctx: &DetectionContext,
    command: Result<DetectionCommand, InputError>,
    out: &mut W,
    err: &mut E,
    format: OutputFormat,
    full: bool,
) -> io::Result<u8> {
    match command {
        Ok(command) => {
            let outcome = ctx.execute(command);
            let rendered = render(&outcome, format, full)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            out.write_all(rendered.as_bytes())?;
            out.flush()?;
            Ok(0)
        }
        Err(e) => {
            writeln!(err, "Input Error: {e}. Please enter valid numbers.")?;
            Ok(EXIT_INVALID_INPUT)
        }
    }
}

/// Run `detect` for each input line until a blank line or EOF.
/// Invalid lines are reported on `err` and skipped, so `out` only carries
/// results. Returns the number of detections.
pub fn run_interactive<R: BufRead, W: Write, E: Write>(
    ctx: &DetectionContext,
    input: R,
    out: &mut W,
    err: &mut E,
    format: OutputFormat,
    full: bool,
) -> io::Result<usize> {
    let mut detections = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }

        match parse_line(&line) {
            Ok(measurement) => {
                let outcome = ctx.execute(DetectionCommand::Detect(measurement));
                let rendered = render(&outcome, format, full)
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                out.write_all(rendered.as_bytes())?;
                detections += 1;
            }
            Err(e) => writeln!(err, "Input Error: {e}")?,
        }
    }
    out.flush()?;
    Ok(detections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::input::parse_measurement;
    use std::io::Cursor;

    fn context() -> DetectionContext {
        DetectionContext::from_config(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_text_report() {
        let outcome = context().execute(DetectionCommand::Detect(Measurement::new(0.95, 1.2, 0.05)));
        let text = render(&outcome, OutputFormat::Text, false).unwrap();
        assert!(text.starts_with("Predicted Fault: No Fault"));
        assert!(text.contains("Waveforms - No Fault"));
        assert!(text.contains("1000 voltage, 1000 current, 500 spectrum bins"));
        assert!(text.contains("dominant frequency: 50.0 Hz"));
    }

    #[test]
    fn test_json_summary_omits_traces() {
        let outcome = context().execute(DetectionCommand::Detect(Measurement::new(0.7, 1.5, 0.1)));
        let json = render(&outcome, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["prediction"]["category"], "single_line_to_ground");
        assert_eq!(value["prediction"]["label"], "SLG Fault");
        assert_eq!(value["waveform"]["samples"], 1000);
        assert_eq!(value["waveform"]["bins"], 500);
        assert!(value["waveform"].get("traces").is_none());
    }

    #[test]
    fn test_json_full_includes_traces() {
        let outcome = context().execute(DetectionCommand::Synthesize("dlg".to_string()));
        let json = render(&outcome, OutputFormat::Json, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("prediction").is_none());
        assert_eq!(value["waveform"]["traces"]["voltage"].as_array().unwrap().len(), 1000);
        assert_eq!(value["waveform"]["traces"]["spectrum"].as_array().unwrap().len(), 500);
    }

    #[test]
    fn test_interactive_skips_bad_lines() {
        let input = Cursor::new("0.95 1.2 0.05\nabc 1 2\n0.2,5.0,0.3\n\n0.5 2.5 0.2\n");
        let mut out = Vec::new();
        let mut err = Vec::new();

        let detections =
            run_interactive(&context(), input, &mut out, &mut err, OutputFormat::Text, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let errors = String::from_utf8(err).unwrap();

        assert_eq!(detections, 2);
        assert!(text.contains("Predicted Fault: No Fault"));
        assert!(text.contains("Predicted Fault: Three-Phase Fault"));
        assert!(!text.contains("DLG Fault"));
        assert!(!text.contains("Input Error"));
        assert!(errors.contains("Input Error: voltage drop must be a number"));
    }

    #[test]
    fn test_interactive_json_stream_stays_parseable() {
        let input = Cursor::new("0.7 1.5 0.1\nnot numbers\n0.5,2.5,0.2\n");
        let mut out = Vec::new();
        let mut err = Vec::new();

        run_interactive(&context(), input, &mut out, &mut err, OutputFormat::Json, false).unwrap();
        let text = String::from_utf8(out).unwrap();

        let documents: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&text)
            .into_iter::<serde_json::Value>()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1]["prediction"]["label"], "DLG Fault");
        assert!(String::from_utf8(err).unwrap().contains("Input Error"));
    }

    #[test]
    fn test_run_once_success() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let command = Ok(DetectionCommand::Classify(Measurement::new(0.2, 5.0, 0.3)));

        let code = run_once(&context(), command, &mut out, &mut err, OutputFormat::Text, false).unwrap();

        assert_eq!(code, 0);
        assert!(String::from_utf8(out).unwrap().starts_with("Predicted Fault: Three-Phase Fault"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_once_invalid_input_exit_code() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let command = parse_measurement("0.5", "spike", "0.2").map(DetectionCommand::Detect);

        let code = run_once(&context(), command, &mut out, &mut err, OutputFormat::Text, false).unwrap();

        assert_eq!(code, EXIT_INVALID_INPUT);
        assert!(out.is_empty());
        let errors = String::from_utf8(err).unwrap();
        assert!(errors.starts_with("Input Error: current spike must be a number"));
    }
}
