use std::io::{Read, Write};
use std::path::Path;

use super::{display, encode_error, io_error, RecordsFileError};
use crate::records::TweetRecord;

pub(super) fn read<R: Read>(reader: R, path: &Path) -> Result<Vec<TweetRecord>, RecordsFileError> {
    serde_json::from_reader(reader).map_err(|source| {
        if source.is_io() {
            io_error(path, source.into())
        } else {
            RecordsFileError::Parse {
                path: display(path),
                source,
            }
        }
    })
}

pub(super) fn write<W: Write>(
    writer: W,
    path: &Path,
    records: &[TweetRecord],
) -> Result<(), RecordsFileError> {
    serde_json::to_writer_pretty(writer, records).map_err(|source| encode_error(path, source))
}
