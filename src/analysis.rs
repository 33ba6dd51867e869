//! # Analysis Module
//!
//! Offline analysis over a previously logged CSV file: load the
//! (time, CO2) series and estimate the concentration at an arbitrary clock
//! time with Lagrange interpolation through the samples nearest to it.
//!
//! The time column is treated as minutes-of-day here, so `785` renders as
//! `13:05`. Interpolating through more than a handful of noisy samples
//! oscillates wildly, hence the small fixed window rather than a polynomial
//! through the whole series.

use std::path::Path;

use chrono::{NaiveTime, Timelike};
use tracing::warn;

use crate::error::{Co2LoggerError, Result};
use crate::reading::Reading;

/// Number of nearest samples the interpolation window holds
pub const LAGRANGE_WINDOW: usize = 4;

/// Denominators closer to zero than this are skipped to avoid blow-ups
const DIVISION_EPSILON: f64 = 1e-6;

/// One (time, CO2) sample projected out of a logged CSV row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    /// Sample time in minutes-of-day
    pub minutes: f64,
    /// Estimated CO2 concentration in ppm
    pub co2_ppm: f64,
}

/// Outcome of one prediction against the logged series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Interpolated CO2 at the requested time
    pub predicted_ppm: f64,
    /// CO2 of the sample nearest to the requested time
    pub nearest_ppm: f64,
    /// Absolute difference between predicted and nearest
    pub absolute_error: f64,
    /// Relative error against the nearest sample, in percent
    pub relative_error_pct: f64,
}

/// Load the (time, CO2) series from a logged CSV file
///
/// Reads the file through its header, taking the time and CO2 columns of
/// each row and ignoring the raw value and voltage columns.
///
/// # Errors
///
/// Returns error if the file cannot be opened or any row fails to
/// deserialize against the expected four columns.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<Vec<SeriesPoint>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut points = Vec::new();

    for record in reader.deserialize() {
        let reading: Reading = record?;
        points.push(SeriesPoint {
            minutes: reading.time_seconds as f64,
            co2_ppm: reading.co2_ppm,
        });
    }

    Ok(points)
}

/// Interpolate the series at `target` with up to `window` nearest samples
///
/// Picks the run of consecutive samples centered on the one closest to
/// `target`, clamped to the series bounds, then evaluates the Lagrange
/// polynomial through them. A term whose denominator is nearly zero, which
/// happens when two samples share a time, is skipped with a warning instead
/// of poisoning the sum.
///
/// Returns `0.0` for an empty series or a zero window; [`predict_at`]
/// rejects the empty case up front.
///
/// # Examples
///
/// ```
/// use co2_logger::analysis::{lagrange_interpolate, SeriesPoint};
///
/// let points = vec![
///     SeriesPoint { minutes: 0.0, co2_ppm: 400.0 },
///     SeriesPoint { minutes: 10.0, co2_ppm: 420.0 },
/// ];
/// let estimate = lagrange_interpolate(&points, 5.0, 4);
/// assert!((estimate - 410.0).abs() < 1e-9);
/// ```
pub fn lagrange_interpolate(points: &[SeriesPoint], target: f64, window: usize) -> f64 {
    if points.is_empty() || window == 0 {
        return 0.0;
    }

    let count = window.min(points.len());
    let start = nearest_index(points, target)
        .saturating_sub(window / 2)
        .min(points.len() - count);
    let samples = &points[start..start + count];

    let mut result = 0.0;
    for (i, pi) in samples.iter().enumerate() {
        let mut numerator = 1.0;
        let mut denominator = 1.0;
        for (j, pj) in samples.iter().enumerate() {
            if i != j {
                numerator *= target - pj.minutes;
                denominator *= pi.minutes - pj.minutes;
            }
        }

        if denominator.abs() < DIVISION_EPSILON {
            warn!("Skipping interpolation term {}: near-zero denominator", i);
            continue;
        }

        result += pi.co2_ppm * (numerator / denominator);
    }

    result
}

/// Predict the CO2 concentration at `minutes` minutes-of-day
///
/// Interpolates with [`LAGRANGE_WINDOW`] nearest samples and reports the
/// error against the single nearest sample as a sanity reference.
///
/// # Errors
///
/// Returns [`Co2LoggerError::EmptySeries`] if the series has no samples.
pub fn predict_at(points: &[SeriesPoint], minutes: f64) -> Result<Prediction> {
    if points.is_empty() {
        return Err(Co2LoggerError::EmptySeries);
    }

    let predicted_ppm = lagrange_interpolate(points, minutes, LAGRANGE_WINDOW);
    let nearest_ppm = points[nearest_index(points, minutes)].co2_ppm;
    let absolute_error = (predicted_ppm - nearest_ppm).abs();
    let relative_error_pct = (absolute_error / nearest_ppm).abs() * 100.0;

    Ok(Prediction {
        predicted_ppm,
        nearest_ppm,
        absolute_error,
        relative_error_pct,
    })
}

/// Index of the sample closest to `target`, the earliest one on ties
fn nearest_index(points: &[SeriesPoint], target: f64) -> usize {
    let mut best = 0;
    let mut best_distance = (target - points[0].minutes).abs();

    for (i, point) in points.iter().enumerate().skip(1) {
        let distance = (target - point.minutes).abs();
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }

    best
}

/// Parse an `HH:MM` string into a clock time
///
/// # Errors
///
/// Returns [`Co2LoggerError::InvalidTime`] for anything that is not a
/// two-part `HH:MM` with hours 0-23 and minutes 0-59.
pub fn parse_hhmm(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| Co2LoggerError::InvalidTime(input.to_string()))
}

/// Convert a clock time to minutes-of-day
pub fn minutes_of_day(time: NaiveTime) -> f64 {
    f64::from(time.hour() * 60 + time.minute())
}

/// Format minutes-of-day as `HH:MM`, truncating fractions and wrapping past
/// midnight
///
/// # Examples
///
/// ```
/// use co2_logger::analysis::format_minutes;
///
/// assert_eq!(format_minutes(785.0), "13:05");
/// assert_eq!(format_minutes(1500.0), "01:00");
/// ```
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes as i64;
    let hours = (total / 60).rem_euclid(24);
    let mins = total.rem_euclid(60);
    format!("{:02}:{:02}", hours, mins)
}
