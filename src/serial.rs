//! # Serial Port Module
//!
//! Opens the serial connection to the sensor board.

use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::info;

use crate::config::SerialConfig;
use crate::error::Result;

/// Open the configured serial port as an async byte stream
///
/// The port is opened with 8N1 framing and no flow control, which is what
/// USB-serial sensor boards present.
///
/// # Arguments
///
/// * `config` - Serial section of the configuration
///
/// # Errors
///
/// Returns error if the device does not exist, is already held by another
/// process, or rejects the settings.
pub fn open_stream(config: &SerialConfig) -> Result<SerialStream> {
    let stream = tokio_serial::new(config.port.as_str(), config.baud_rate)
        .data_bits(tokio_serial::DataBits::Eight)
        .parity(tokio_serial::Parity::None)
        .stop_bits(tokio_serial::StopBits::One)
        .flow_control(tokio_serial::FlowControl::None)
        .open_native_async()?;

    info!("Connected to {}", config.port);
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_stream_with_invalid_path_returns_error() {
        let config = SerialConfig {
            port: "/dev/nonexistent_device_12345".to_string(),
            ..SerialConfig::default()
        };

        let result = open_stream(&config);
        assert!(result.is_err());
    }
}
