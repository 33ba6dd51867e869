//! # Telemetry Reading
//!
//! The record produced by one serial line and persisted as one CSV row.

use serde::{Deserialize, Serialize};

/// CSV header row, in persisted column order
pub const CSV_HEADER: [&str; 4] = [
    "Time (s)",
    "Raw Sensor Value",
    "Voltage (V)",
    "Estimated CO2 (ppm)",
];

/// One parsed telemetry sample
///
/// Field order matches the CSV column order, and the serde renames bind each
/// field to its header name so rows written by [`crate::storage::CsvLog`]
/// deserialize back through [`crate::analysis::load_series`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Seconds since the sensor board booted, as reported on the wire
    #[serde(rename = "Time (s)")]
    pub time_seconds: i64,

    /// Raw ADC value from the gas sensor
    #[serde(rename = "Raw Sensor Value")]
    pub raw_value: i64,

    /// Sensor output voltage in volts
    #[serde(rename = "Voltage (V)")]
    pub voltage: f64,

    /// Estimated CO2 concentration in parts per million
    #[serde(rename = "Estimated CO2 (ppm)")]
    pub co2_ppm: f64,
}
