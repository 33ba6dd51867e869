//! # Line Parser
//!
//! Parses one line of sensor telemetry into a [`Reading`].
//!
//! Expected wire format, four `|`-separated fields of `label:value`:
//!
//! ```text
//! Time:12 | Raw:512 | Voltage:1.50V | CO2:400.00ppm
//! ```
//!
//! Labels are never inspected; only field position decides meaning. Extra
//! fields past the fourth are ignored. The unit suffixes `V` and `ppm` are
//! stripped before numeric conversion.

use thiserror::Error;

use crate::reading::Reading;

/// Number of `|`-separated fields a record must carry
pub const RECORD_FIELDS: usize = 4;

/// Reasons a line can fail to parse
///
/// The acquisition loop treats every variant identically (drop the line);
/// the distinctions exist so tests can pin down the failure mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Fewer than four `|`-separated fields
    #[error("expected 4 fields, found {found}")]
    TooFewFields {
        /// Fields present on the line
        found: usize,
    },

    /// A field carries no `:`-separated value part
    #[error("field {index} has no value after ':'")]
    MissingValue {
        /// Zero-based field position
        index: usize,
    },

    /// An integer field failed to convert
    #[error("field {index}: invalid integer {value:?}")]
    InvalidInt {
        /// Zero-based field position
        index: usize,
        /// The offending value text
        value: String,
    },

    /// A float field failed to convert
    #[error("field {index}: invalid number {value:?}")]
    InvalidFloat {
        /// Zero-based field position
        index: usize,
        /// The offending value text
        value: String,
    },
}

/// Parse one line of telemetry into a [`Reading`]
///
/// # Arguments
///
/// * `line` - A single line with trailing newline already removed
///
/// # Returns
///
/// The parsed reading, or the first [`ParseError`] encountered scanning
/// fields left to right.
///
/// # Examples
///
/// ```
/// use co2_logger::parser::parse_line;
///
/// let reading = parse_line("Time:12 | Raw:512 | Voltage:1.50V | CO2:400.00ppm").unwrap();
/// assert_eq!(reading.time_seconds, 12);
/// assert_eq!(reading.raw_value, 512);
/// ```
pub fn parse_line(line: &str) -> Result<Reading, ParseError> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < RECORD_FIELDS {
        return Err(ParseError::TooFewFields {
            found: fields.len(),
        });
    }

    Ok(Reading {
        time_seconds: parse_int(fields[0], 0)?,
        raw_value: parse_int(fields[1], 1)?,
        voltage: parse_float(fields[2], 2, "V")?,
        co2_ppm: parse_float(fields[3], 3, "ppm")?,
    })
}

/// Extract the trimmed value part of a `label:value` field
///
/// The value is the text between the first and second colon, so a stray
/// extra colon truncates the value rather than failing the field.
fn field_value(field: &str, index: usize) -> Result<&str, ParseError> {
    field
        .split(':')
        .nth(1)
        .map(str::trim)
        .ok_or(ParseError::MissingValue { index })
}

fn parse_int(field: &str, index: usize) -> Result<i64, ParseError> {
    let value = field_value(field, index)?;
    value.parse().map_err(|_| ParseError::InvalidInt {
        index,
        value: value.to_string(),
    })
}

fn parse_float(field: &str, index: usize, unit: &str) -> Result<f64, ParseError> {
    let value = field_value(field, index)?;
    let stripped = value.replace(unit, "");
    stripped
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFloat {
            index,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_line() {
        let reading = parse_line("Time:12 | Raw:512 | Voltage:1.50V | CO2:400.00ppm").unwrap();

        assert_eq!(reading.time_seconds, 12);
        assert_eq!(reading.raw_value, 512);
        assert!((reading.voltage - 1.5).abs() < f64::EPSILON);
        assert!((reading.co2_ppm - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_without_spaces() {
        let reading = parse_line("Time:7|Raw:301|Voltage:0.48V|CO2:399.05ppm").unwrap();

        assert_eq!(reading.time_seconds, 7);
        assert_eq!(reading.raw_value, 301);
        assert!((reading.voltage - 0.48).abs() < f64::EPSILON);
        assert!((reading.co2_ppm - 399.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_space_before_unit() {
        let reading = parse_line("Time:12 | Raw:512 | Voltage:1.50 V | CO2:400.00 ppm").unwrap();

        assert!((reading.voltage - 1.5).abs() < f64::EPSILON);
        assert!((reading.co2_ppm - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_negative_values() {
        let reading = parse_line("Time:-3 | Raw:-8 | Voltage:-0.02V | CO2:-1.50ppm").unwrap();

        assert_eq!(reading.time_seconds, -3);
        assert_eq!(reading.raw_value, -8);
        assert!((reading.voltage + 0.02).abs() < f64::EPSILON);
        assert!((reading.co2_ppm + 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_extra_fields_ignored() {
        let reading =
            parse_line("Time:1 | Raw:2 | Voltage:0.1V | CO2:350ppm | Checksum:ab").unwrap();

        assert_eq!(reading.time_seconds, 1);
        assert!((reading.co2_ppm - 350.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_value_after_first_colon_only() {
        // An extra colon truncates the value at the second colon.
        let reading = parse_line("Time:12:30 | Raw:512 | Voltage:1.5V | CO2:400ppm").unwrap();

        assert_eq!(reading.time_seconds, 12);
    }

    #[test]
    fn test_parse_too_few_fields() {
        let result = parse_line("Time:12 | Raw:512 | Voltage:1.50V");
        assert_eq!(result.unwrap_err(), ParseError::TooFewFields { found: 3 });
    }

    #[test]
    fn test_parse_no_separators() {
        let result = parse_line("Initializing MQ135 sensor...");
        assert_eq!(result.unwrap_err(), ParseError::TooFewFields { found: 1 });
    }

    #[test]
    fn test_parse_field_without_colon() {
        let result = parse_line("Time 12 | Raw:512 | Voltage:1.50V | CO2:400.00ppm");
        assert_eq!(result.unwrap_err(), ParseError::MissingValue { index: 0 });
    }

    #[test]
    fn test_parse_empty_value() {
        let result = parse_line("Time: | Raw:512 | Voltage:1.50V | CO2:400.00ppm");
        assert_eq!(
            result.unwrap_err(),
            ParseError::InvalidInt {
                index: 0,
                value: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_non_numeric_int() {
        let result = parse_line("Time:twelve | Raw:512 | Voltage:1.50V | CO2:400.00ppm");
        assert_eq!(
            result.unwrap_err(),
            ParseError::InvalidInt {
                index: 0,
                value: "twelve".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_fractional_int_rejected() {
        let result = parse_line("Time:1.5 | Raw:512 | Voltage:1.50V | CO2:400.00ppm");
        assert_eq!(
            result.unwrap_err(),
            ParseError::InvalidInt {
                index: 0,
                value: "1.5".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_non_numeric_float() {
        let result = parse_line("Time:12 | Raw:512 | Voltage:bad | CO2:400.00ppm");
        assert_eq!(
            result.unwrap_err(),
            ParseError::InvalidFloat {
                index: 2,
                value: "bad".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_unit_stripped_everywhere() {
        // The unit suffix is removed wherever it appears in the value.
        let reading = parse_line("Time:12 | Raw:512 | Voltage:V1.5 | CO2:400ppmppm").unwrap();

        assert!((reading.voltage - 1.5).abs() < f64::EPSILON);
        assert!((reading.co2_ppm - 400.0).abs() < f64::EPSILON);
    }
}
