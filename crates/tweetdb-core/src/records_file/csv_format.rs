//! CSV rows with JSON-encoded cells for the nested objects.
//!
//! Empty cells read back as absent keys, so an empty `text` is reported by
//! the flattener as missing.

use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{csv_error, display, encode_error, io_error, RecordsFileError};
use crate::records::TweetRecord;

const COLUMNS: [&str; 9] = [
    "id",
    "text",
    "created_at",
    "company",
    "sentiment",
    "user",
    "metrics",
    "entities",
    "hashtags",
];

/// Field order must match [`COLUMNS`]. Missing columns read as empty.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct CsvRow {
    id: Option<String>,
    text: Option<String>,
    created_at: Option<String>,
    company: Option<String>,
    sentiment: Option<String>,
    user: Option<String>,
    metrics: Option<String>,
    entities: Option<String>,
    hashtags: Option<String>,
}

fn encode_cell<T: Serialize>(
    value: Option<&T>,
    path: &Path,
) -> Result<Option<String>, RecordsFileError> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(|source| encode_error(path, source))
}

fn decode_cell<T: DeserializeOwned>(
    cell: Option<String>,
    path: &Path,
    index: usize,
    column: &'static str,
) -> Result<Option<T>, RecordsFileError> {
    cell.filter(|raw| !raw.trim().is_empty())
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(|source| RecordsFileError::CsvCell {
            path: display(path),
            index,
            column,
            source,
        })
}

impl CsvRow {
    fn from_record(record: &TweetRecord, path: &Path) -> Result<Self, RecordsFileError> {
        Ok(Self {
            id: record.id.clone(),
            text: record.text.clone(),
            created_at: record.created_at.clone(),
            company: record.company.clone(),
            sentiment: encode_cell(record.sentiment.as_ref(), path)?,
            user: encode_cell(record.user.as_ref(), path)?,
            metrics: encode_cell(record.metrics.as_ref(), path)?,
            entities: encode_cell(record.entities.as_ref(), path)?,
            hashtags: record.hashtags.clone(),
        })
    }

    fn into_record(self, path: &Path, index: usize) -> Result<TweetRecord, RecordsFileError> {
        Ok(TweetRecord {
            id: self.id,
            text: self.text,
            created_at: self.created_at,
            company: self.company,
            sentiment: decode_cell(self.sentiment, path, index, "sentiment")?,
            user: decode_cell(self.user, path, index, "user")?,
            metrics: decode_cell(self.metrics, path, index, "metrics")?,
            entities: decode_cell(self.entities, path, index, "entities")?,
            hashtags: self.hashtags,
        })
    }
}

pub(super) fn read<R: Read>(reader: R, path: &Path) -> Result<Vec<TweetRecord>, RecordsFileError> {
    let mut reader = csv::Reader::from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(index, row)| {
            row.map_err(|source| csv_error(path, source))?
                .into_record(path, index)
        })
        .collect()
}

pub(super) fn write<W: Write>(
    writer: W,
    path: &Path,
    records: &[TweetRecord],
) -> Result<(), RecordsFileError> {
    // The header is written explicitly so an empty file still has one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer
        .write_record(COLUMNS)
        .map_err(|source| csv_error(path, source))?;
    for record in records {
        writer
            .serialize(CsvRow::from_record(record, path)?)
            .map_err(|source| csv_error(path, source))?;
    }
    writer.flush().map_err(|source| io_error(path, source))?;

    Ok(())
}
