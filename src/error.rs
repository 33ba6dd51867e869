//! # Error Types
//!
//! Custom error types for the CO2 logger using `thiserror`.

use thiserror::Error;

/// Main error type for the CO2 logger
#[derive(Debug, Error)]
pub enum Co2LoggerError {
    /// Serial port errors (open or configuration)
    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// The serial stream ended; the device was unplugged or reset
    #[error("serial stream closed on {0}")]
    Disconnected(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// CSV encoding or decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A clock time that is not `HH:MM` with hours 0-23 and minutes 0-59
    #[error("invalid time {0:?}: expected HH:MM")]
    InvalidTime(String),

    /// Prediction requested against a series with no data rows
    #[error("no data points to interpolate")]
    EmptySeries,
}

/// Result type alias for the CO2 logger
pub type Result<T> = std::result::Result<T, Co2LoggerError>;
