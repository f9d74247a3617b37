//! Error taxonomy for the conversion pipeline
//!
//! Input-format and filesystem errors abort a run. Elevation errors are only
//! ever surfaced per lookup and never abort a day.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, building or exporting tracks
#[derive(Debug, Error)]
pub enum GyroError {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The CSV reader rejected a record (missing column, bad quoting, ...)
    #[error("CSV error at row {row}: {source}")]
    Csv {
        row: u64,
        #[source]
        source: csv::Error,
    },
    /// A date-time column could not be parsed
    #[error("row {row}: cannot parse {column} '{value}'")]
    InvalidDate {
        row: u64,
        column: &'static str,
        value: String,
    },
    /// The points column is not a list of `(lat, lon)` pairs
    #[error("row {row}: invalid points: {reason}")]
    InvalidPoints { row: u64, reason: String },
    /// Elevation tile could not be used
    #[error("elevation lookup failed: {0}")]
    Elevation(String),
    /// Timestamp outside the range representable in GPX output
    #[error("timestamp error: {0}")]
    Timestamp(String),
    /// GPX serialization failed
    #[error("GPX error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    /// Writing an output file failed
    #[error("cannot write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GyroError>;
