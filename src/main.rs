//! # CO2 Logger
//!
//! Log CO2 telemetry from a serial-connected sensor board into a CSV file.
//!
//! This application reads pipe-separated sensor lines from the serial port,
//! parses them into readings, and appends each reading as one CSV row,
//! flushed immediately so nothing is lost on interrupt.

use anyhow::{Context, Result};
use tracing::{error, info};

use co2_logger::acquisition;
use co2_logger::config::Config;

/// Configuration file consulted when no path argument is given
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for the CO2 logger
///
/// Loads the configuration, then hands control to the acquisition loop,
/// which runs until interrupted or until the serial stream fails.
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration from the path argument if one is given, else
///      from the default file when present, else built-in defaults
///
/// 2. **Acquisition**
///    - Create the data directory and CSV file with header if missing
///    - Open the serial port and wait out the board reset delay
///    - Read lines, parse them, append rows, flush after every row
///
/// 3. **Shutdown**
///    - Ctrl+C stops the loop cleanly and logs the session counters
///    - A serial failure is logged and exits with status 1
///
/// # Errors
///
/// Returns error if a configuration file named on the command line cannot
/// be read, or if any configuration file fails to parse or validate.
///
/// # Examples
///
/// Run the application:
/// ```bash
/// cargo run --release --bin co2-logger
/// ```
///
/// Expected output:
/// ```text
/// INFO co2_logger: CO2 logger v0.1.0 starting...
/// INFO co2_logger::storage: Created folder: data
/// INFO co2_logger::storage: Created file with header: data/pollution_data.csv
/// INFO co2_logger::serial: Connected to /dev/ttyACM0
/// INFO co2_logger::acquisition: Writing data to: data/pollution_data.csv
/// INFO co2_logger::acquisition: Reading data... Press Ctrl+C to stop
/// INFO co2_logger::acquisition: Time:12 | Raw:512 | Voltage:1.50V | CO2:400.00ppm
/// ```
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("CO2 logger v{} starting...", env!("CARGO_PKG_VERSION"));

    // A path named on the command line must exist; only the implicit
    // default file is allowed to be absent.
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH)?,
    };

    if let Err(e) = acquisition::run(&config).await {
        error!("Serial error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
