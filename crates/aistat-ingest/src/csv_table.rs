use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// A CSV file held as strings, schema discovered at runtime.
///
/// Rows are padded or truncated to the header width on read, so indexing a
/// row by a header position never goes out of bounds.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Position of a header, matched exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV file with a header row into memory. Fully empty rows are
/// skipped; cells are trimmed and stripped of a BOM.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| IngestError::CsvRead {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| IngestError::CsvRead {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(|value| value.is_empty()) {
            continue;
        }
        if headers.is_empty() {
            headers = cells;
            continue;
        }
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = cells.get(idx).map(String::as_str).unwrap_or("");
            row.push(value.to_string());
        }
        rows.push(row);
    }

    Ok(CsvTable { headers, rows })
}

/// Write a table back out with its headers as the first record.
pub fn write_csv_table(path: &Path, table: &CsvTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|err| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let write_err = |err: csv::Error| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message: err.to_string(),
    };
    writer.write_record(&table.headers).map_err(write_err)?;
    for row in &table.rows {
        writer.write_record(row).map_err(write_err)?;
    }
    writer.flush().map_err(|err| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: err,
    })?;
    Ok(())
}
