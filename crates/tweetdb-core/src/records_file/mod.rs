//! Record files. The format follows the file extension:
//!
//! - `.json`: an array of [`TweetRecord`] objects with nested
//!   sentiment/user/metrics/entities kept as structured JSON.
//! - `.csv`: one row per record; nested objects are stored as JSON text in
//!   their own cell.

mod csv_format;
mod json_format;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::records::TweetRecord;

#[derive(Debug, Error)]
pub enum RecordsFileError {
    #[error("failed to access records file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported records file '{path}': expected a .json or .csv extension")]
    UnsupportedFormat { path: String },
    #[error("failed to parse records file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode records for '{path}': {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed CSV in records file '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("invalid JSON in column '{column}' of record {index} in '{path}': {source}")]
    CsvCell {
        path: String,
        index: usize,
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordsFormat {
    Json,
    Csv,
}

impl RecordsFormat {
    /// Pick the format from the extension of `path`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsFileError::UnsupportedFormat`] for any extension other
    /// than `json` or `csv`.
    pub fn from_path(path: &Path) -> Result<Self, RecordsFileError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(RecordsFileError::UnsupportedFormat {
                path: display(path),
            }),
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn io_error(path: &Path, source: std::io::Error) -> RecordsFileError {
    RecordsFileError::Io {
        path: display(path),
        source,
    }
}

/// Serialization failures that are really I/O failures are reported as such.
fn encode_error(path: &Path, source: serde_json::Error) -> RecordsFileError {
    if source.is_io() {
        io_error(path, source.into())
    } else {
        RecordsFileError::Encode {
            path: display(path),
            source,
        }
    }
}

fn csv_error(path: &Path, source: csv::Error) -> RecordsFileError {
    if matches!(source.kind(), csv::ErrorKind::Io(_)) {
        io_error(path, source.into())
    } else {
        RecordsFileError::Csv {
            path: display(path),
            source,
        }
    }
}

/// Read every record from a `.json` or `.csv` file.
///
/// # Errors
///
/// Returns [`RecordsFileError::UnsupportedFormat`] for an unknown extension,
/// [`RecordsFileError::Io`] if the file cannot be opened, or a parse variant
/// if the contents do not decode into records.
pub fn read_records(path: &Path) -> Result<Vec<TweetRecord>, RecordsFileError> {
    let format = RecordsFormat::from_path(path)?;
    let file = File::open(path).map_err(|source| io_error(path, source))?;
    let reader = BufReader::new(file);

    match format {
        RecordsFormat::Json => json_format::read(reader, path),
        RecordsFormat::Csv => csv_format::read(reader, path),
    }
}

/// Write records in the format named by the extension of `path`, replacing
/// any existing file.
///
/// # Errors
///
/// Returns [`RecordsFileError::UnsupportedFormat`] for an unknown extension
/// (before the file is created), or [`RecordsFileError`] if the file cannot
/// be created or written.
pub fn write_records(path: &Path, records: &[TweetRecord]) -> Result<(), RecordsFileError> {
    let format = RecordsFormat::from_path(path)?;
    let file = File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer = BufWriter::new(file);

    match format {
        RecordsFormat::Json => json_format::write(&mut writer, path, records)?,
        RecordsFormat::Csv => csv_format::write(&mut writer, path, records)?,
    }
    writer.flush().map_err(|source| io_error(path, source))?;

    Ok(())
}

#[cfg(test)]
#[path = "records_file_test.rs"]
mod tests;
