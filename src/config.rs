//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every field has a built-in default, so a missing file or a partial file
//! still yields a usable configuration.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Serial port configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Upper bound on one wait for the next line; expiry is not an error
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Pause after opening the port so the board can finish resetting
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

/// Output file configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_file_name")]
    pub file_name: String,
}

// Default value functions
fn default_serial_port() -> String { "/dev/ttyACM0".to_string() }
fn default_baud_rate() -> u32 { 9600 }
fn default_read_timeout_ms() -> u64 { 1000 }
fn default_settle_delay_ms() -> u64 { 2000 }

fn default_data_dir() -> String { "data".to_string() }
fn default_file_name() -> String { "pollution_data.csv".to_string() }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
            read_timeout_ms: default_read_timeout_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use co2_logger::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or fall back to built-in defaults
    /// when the file does not exist
    ///
    /// Meant for the implicit default file. A path the user named should go
    /// through [`Config::load`] so a missing file surfaces as an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Full path of the output CSV file
    pub fn csv_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join(&self.storage.file_name)
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        // Validate serial port configuration
        if self.serial.port.is_empty() {
            return Err(crate::error::Co2LoggerError::Config(
                toml::de::Error::custom("serial port cannot be empty")
            ));
        }

        if self.serial.baud_rate == 0 {
            return Err(crate::error::Co2LoggerError::Config(
                toml::de::Error::custom("baud_rate must be greater than 0")
            ));
        }

        // Validate timing fields
        if self.serial.read_timeout_ms == 0 || self.serial.read_timeout_ms > 10000 {
            return Err(crate::error::Co2LoggerError::Config(
                toml::de::Error::custom("read_timeout_ms must be between 1 and 10000")
            ));
        }

        if self.serial.settle_delay_ms > 60000 {
            return Err(crate::error::Co2LoggerError::Config(
                toml::de::Error::custom("settle_delay_ms must be at most 60000")
            ));
        }

        // Validate storage configuration
        if self.storage.data_dir.is_empty() {
            return Err(crate::error::Co2LoggerError::Config(
                toml::de::Error::custom("data_dir cannot be empty")
            ));
        }

        if self.storage.file_name.is_empty() {
            return Err(crate::error::Co2LoggerError::Config(
                toml::de::Error::custom("file_name cannot be empty")
            ));
        }

        Ok(())
    }
}
