//! User input parsing

use fault_types::Measurement;
use thiserror::Error;

/// User-supplied text that cannot be turned into a measurement
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("expected 3 values (voltage drop, current spike, duration), got {0}")]
    WrongArity(usize),
}

fn parse_value(field: &'static str, text: &str) -> Result<f64, InputError> {
    let value: f64 = text.trim().parse().map_err(|_| InputError::InvalidNumber {
        field,
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(InputError::NonFinite { field });
    }
    Ok(value)
}

/// Parse the three form fields
pub fn parse_measurement(
    voltage_drop: &str,
    current_spike: &str,
    duration: &str,
) -> Result<Measurement, InputError> {
    Ok(Measurement::new(
        parse_value("voltage drop", voltage_drop)?,
        parse_value("current spike", current_spike)?,
        parse_value("duration", duration)?,
    ))
}

/// Parse a line of three values separated by whitespace and/or commas
pub fn parse_line(line: &str) -> Result<Measurement, InputError> {
    let fields: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    match fields.as_slice() {
        [v, i, d] => parse_measurement(v, i, d),
        other => Err(InputError::WrongArity(other.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields() {
        let m = parse_measurement("0.7", " 1.5 ", "0.1").unwrap();
        assert_eq!(m, Measurement::new(0.7, 1.5, 0.1));
    }

    #[test]
    fn test_rejects_text() {
        let err = parse_measurement("0.7", "high", "0.1").unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidNumber {
                field: "current spike",
                value: "high".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(
            parse_measurement("nan", "1", "1").unwrap_err(),
            InputError::NonFinite { field: "voltage drop" }
        );
        assert_eq!(
            parse_measurement("0.5", "1", "inf").unwrap_err(),
            InputError::NonFinite { field: "duration" }
        );
    }

    #[test]
    fn test_out_of_range_is_accepted() {
        assert_eq!(
            parse_measurement("-3", "100", "0").unwrap(),
            Measurement::new(-3.0, 100.0, 0.0)
        );
    }

    #[test]
    fn test_parse_line_separators() {
        assert_eq!(parse_line("0.2, 5.0, 0.3").unwrap(), Measurement::new(0.2, 5.0, 0.3));
        assert_eq!(parse_line("0.2\t5.0 0.3").unwrap(), Measurement::new(0.2, 5.0, 0.3));
        assert_eq!(parse_line("0.2 5.0").unwrap_err(), InputError::WrongArity(2));
        assert_eq!(parse_line("1 2 3 4").unwrap_err(), InputError::WrongArity(4));
    }
}
