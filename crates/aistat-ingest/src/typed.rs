use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{IngestError, Result};

/// Write serde rows as CSV, headers derived from the row type.
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|err| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    for row in rows {
        writer.serialize(row).map_err(|err| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    }
    writer.flush().map_err(|err| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: err,
    })?;
    Ok(())
}

/// Read a CSV written by [`write_rows`] back into serde rows.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::Reader::from_path(path).map_err(|err| IngestError::CsvRead {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: T = record.map_err(|err| IngestError::CsvRead {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}
