//! # CO2 Logger Library
//!
//! Log CO2 telemetry from a serial-connected sensor board into a CSV file,
//! and estimate past concentrations from the logged data.
//!
//! This library provides the serial acquisition loop that turns pipe-separated
//! sensor lines into CSV rows, plus the offline analysis used to interpolate
//! the recorded series at an arbitrary clock time.

pub mod acquisition;
pub mod analysis;
pub mod config;
pub mod error;
pub mod parser;
pub mod reading;
pub mod serial;
pub mod storage;
