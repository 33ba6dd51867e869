//! # CO2 Predictor
//!
//! Estimate the CO2 concentration at a given clock time from a previously
//! logged CSV file, using Lagrange interpolation over the nearest samples.
//!
//! Usage:
//! ```bash
//! co2-predict [csv-path] [HH:MM]
//! ```
//!
//! With no arguments the default data file is read and the time is prompted
//! for interactively.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use co2_logger::analysis;
use co2_logger::config::Config;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let csv_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Config::default().csv_path());

    let points = analysis::load_series(&csv_path)
        .with_context(|| format!("Unable to load data from {}", csv_path.display()))?;

    println!("Loaded {} data points from {}.", points.len(), csv_path.display());
    if points.is_empty() {
        bail!("no data points to interpolate");
    }

    println!("Time\t\tCO2 (ppm)");
    for point in &points {
        println!(
            "{}\t\t{:.2}",
            analysis::format_minutes(point.minutes),
            point.co2_ppm
        );
    }

    let first = points[0].minutes;
    let last = points[points.len() - 1].minutes;
    println!(
        "\nData time range: {} to {}",
        analysis::format_minutes(first),
        analysis::format_minutes(last)
    );

    let input = match std::env::args().nth(2) {
        Some(arg) => arg,
        None => prompt_for_time()?,
    };
    let time = analysis::parse_hhmm(&input)?;
    let target = analysis::minutes_of_day(time);

    println!("Time entered: {} ({:.0} minutes)", time.format("%H:%M"), target);
    if target < first || target > last {
        println!(
            "Warning: requested time is outside the data range, extrapolating"
        );
    }

    let prediction = analysis::predict_at(&points, target)?;

    println!("\n========== RESULT ==========");
    println!(
        "Predicted CO2 at {}: {:.2} ppm",
        time.format("%H:%M"),
        prediction.predicted_ppm
    );
    println!("Nearest actual CO2: {:.2} ppm", prediction.nearest_ppm);
    println!("Absolute Error: {:.2} ppm", prediction.absolute_error);
    println!("Relative Error: {:.2}%", prediction.relative_error_pct);

    Ok(())
}

/// Ask on stdout and read one line from stdin
fn prompt_for_time() -> Result<String> {
    print!("\nEnter the time in 24-hour format (HH:MM) to predict CO2 level: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
