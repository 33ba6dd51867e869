//! # Acquisition Loop
//!
//! The heart of the logger: read a line from the serial stream, echo it,
//! parse it, append the reading to the CSV file, flush, repeat.
//!
//! Lines that fail to parse are dropped without any diagnostic output; the
//! skip counter in the shutdown summary is the only trace they leave.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{sleep, timeout};
use tracing::info;

use crate::config::Config;
use crate::error::{Co2LoggerError, Result};
use crate::parser::parse_line;
use crate::serial::open_stream;
use crate::storage::CsvLog;

/// Counters accumulated over one acquisition run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionStats {
    /// Non-empty lines received from the stream
    pub lines_received: u64,
    /// Rows appended to the CSV file
    pub rows_written: u64,
    /// Non-empty lines the parser rejected
    pub lines_skipped: u64,
}

/// Why the acquisition loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The shutdown future completed (user interrupt)
    Interrupted,
    /// The line source reached end of stream
    SourceClosed,
}

/// Drive the acquisition loop over an arbitrary line source
///
/// Generic over the reader so tests can substitute an in-memory stream for
/// the serial port, and over the shutdown future so tests can trigger a stop
/// deterministically. Each iteration waits up to `read_timeout` for the next
/// line; expiry is not an error, the loop simply waits again. Lines are
/// trimmed before inspection and empty ones are ignored.
///
/// Every exit path, success or error, logs the accumulated counters as a
/// one-line summary before returning.
///
/// # Returns
///
/// The reason the loop stopped plus the accumulated counters.
///
/// # Errors
///
/// Read errors from the source and write errors from the CSV log are fatal
/// and propagate after the summary is logged.
pub async fn acquire<R, S>(
    reader: R,
    log: &mut CsvLog,
    read_timeout: Duration,
    shutdown: S,
) -> Result<(StopReason, AcquisitionStats)>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut lines = reader.lines();
    let mut stats = AcquisitionStats::default();
    tokio::pin!(shutdown);

    let outcome = loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Stopping data collection");
                break Ok(StopReason::Interrupted);
            }
            read = timeout(read_timeout, lines.next_line()) => {
                let line = match read {
                    // Nothing arrived in time; keep waiting.
                    Err(_) => continue,
                    Ok(Ok(Some(line))) => line,
                    Ok(Ok(None)) => break Ok(StopReason::SourceClosed),
                    Ok(Err(e)) => break Err(Co2LoggerError::Io(e)),
                };

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                stats.lines_received += 1;
                info!("{}", line);

                match parse_line(line) {
                    Ok(reading) => match log.append(&reading) {
                        Ok(()) => stats.rows_written += 1,
                        Err(e) => break Err(e),
                    },
                    Err(_) => stats.lines_skipped += 1,
                }
            }
        }
    };

    info!(
        "{} lines received, {} rows written, {} skipped",
        stats.lines_received, stats.rows_written, stats.lines_skipped
    );

    outcome.map(|reason| (reason, stats))
}

/// Run the full acquisition pipeline against the configured serial port
///
/// Bootstraps the data directory and CSV file, opens the serial port, waits
/// out the settle delay so the board can finish resetting, then loops until
/// Ctrl+C or a stream error. The serial and file handles are closed on every
/// exit path when they drop.
///
/// # Errors
///
/// Returns error if bootstrap or the port open fails, if the stream reports
/// a read error, or if the stream ends, which is reported as
/// [`Co2LoggerError::Disconnected`].
pub async fn run(config: &Config) -> Result<()> {
    let data_dir = Path::new(&config.storage.data_dir);
    let csv_path = config.csv_path();
    CsvLog::ensure(data_dir, &csv_path)?;

    let stream = open_stream(&config.serial)?;
    sleep(Duration::from_millis(config.serial.settle_delay_ms)).await;

    let mut log = CsvLog::open_append(data_dir, &csv_path)?;
    info!("Writing data to: {}", log.path().display());
    let reader = BufReader::new(stream);
    let read_timeout = Duration::from_millis(config.serial.read_timeout_ms);
    info!("Reading data... Press Ctrl+C to stop");

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let (reason, _) = acquire(reader, &mut log, read_timeout, shutdown).await?;

    match reason {
        StopReason::Interrupted => Ok(()),
        StopReason::SourceClosed => {
            Err(Co2LoggerError::Disconnected(config.serial.port.clone()))
        }
    }
}
