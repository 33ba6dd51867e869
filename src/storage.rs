//! # CSV Storage
//!
//! Append-only CSV persistence for telemetry readings.
//!
//! One file, a fixed four-column header, one row per reading. Every append
//! is flushed straight through so a crash or unplugged board never loses a
//! row that was already acknowledged.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::reading::{Reading, CSV_HEADER};

/// Append-only CSV sink for readings
///
/// Construction guarantees the data directory and the header row exist, so
/// every handle points at a well-formed file. The underlying file handle is
/// closed when the value is dropped.
pub struct CsvLog {
    writer: csv::Writer<std::fs::File>,
    path: PathBuf,
}

impl CsvLog {
    /// Ensure the data directory and CSV file exist
    ///
    /// Creates the directory (and any parents) if absent, then creates the
    /// file with the header row if absent. An existing file is left exactly
    /// as it is, so repeated runs keep appending to one history.
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created.
    pub fn ensure(dir: &Path, file: &Path) -> Result<()> {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            info!("Created folder: {}", dir.display());
        }

        if !file.exists() {
            let mut writer = csv::Writer::from_path(file)?;
            writer.write_record(CSV_HEADER)?;
            writer.flush()?;
            info!("Created file with header: {}", file.display());
        }

        Ok(())
    }

    /// Open the log for appending, ensuring directory and header first
    pub fn open_append(dir: &Path, file: &Path) -> Result<Self> {
        Self::ensure(dir, file)?;

        let handle = OpenOptions::new().append(true).open(file)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(handle);

        Ok(Self {
            writer,
            path: file.to_path_buf(),
        })
    }

    /// Append one reading and flush it through to the OS
    ///
    /// # Errors
    ///
    /// Returns error if the row cannot be encoded or the file cannot be
    /// written, for example when the disk is full.
    pub fn append(&mut self, reading: &Reading) -> Result<()> {
        self.writer.serialize(reading)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Path of the underlying CSV file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const HEADER_LINE: &str = "Time (s),Raw Sensor Value,Voltage (V),Estimated CO2 (ppm)\n";

    fn sample_reading() -> Reading {
        Reading {
            time_seconds: 12,
            raw_value: 512,
            voltage: 1.5,
            co2_ppm: 400.0,
        }
    }

    #[test]
    fn test_ensure_creates_dir_and_header() {
        let root = tempdir().unwrap();
        let dir = root.path().join("data");
        let file = dir.join("pollution_data.csv");

        CsvLog::ensure(&dir, &file).unwrap();

        assert!(dir.is_dir());
        let contents = std::fs::read_to_string(&file).unwrap();
        assert_eq!(contents, HEADER_LINE);
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let root = tempdir().unwrap();
        let dir = root.path().join("data");
        let file = dir.join("pollution_data.csv");

        CsvLog::ensure(&dir, &file).unwrap();
        CsvLog::ensure(&dir, &file).unwrap();

        let contents = std::fs::read_to_string(&file).unwrap();
        assert_eq!(contents, HEADER_LINE);
    }

    #[test]
    fn test_append_writes_flushed_row() {
        let root = tempdir().unwrap();
        let dir = root.path().to_path_buf();
        let file = dir.join("out.csv");

        let mut log = CsvLog::open_append(&dir, &file).unwrap();
        log.append(&sample_reading()).unwrap();

        // Flushed without dropping the log, so the row must be on disk.
        let contents = std::fs::read_to_string(&file).unwrap();
        assert_eq!(contents, format!("{HEADER_LINE}12,512,1.5,400.0\n"));
    }

    #[test]
    fn test_reopen_appends_after_existing_rows() {
        let root = tempdir().unwrap();
        let dir = root.path().to_path_buf();
        let file = dir.join("out.csv");

        {
            let mut log = CsvLog::open_append(&dir, &file).unwrap();
            log.append(&sample_reading()).unwrap();
        }
        {
            let mut log = CsvLog::open_append(&dir, &file).unwrap();
            log.append(&Reading {
                time_seconds: 13,
                raw_value: 514,
                voltage: 1.51,
                co2_ppm: 401.2,
            })
            .unwrap();
        }

        let contents = std::fs::read_to_string(&file).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER_LINE.trim_end());
        assert_eq!(lines[1], "12,512,1.5,400.0");
        assert_eq!(lines[2], "13,514,1.51,401.2");
    }

    #[test]
    fn test_path_accessor() {
        let root = tempdir().unwrap();
        let dir = root.path().to_path_buf();
        let file = dir.join("out.csv");

        let log = CsvLog::open_append(&dir, &file).unwrap();
        assert_eq!(log.path(), file.as_path());
    }
}
