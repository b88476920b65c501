//! Typed view over the cleaned dataset.

use std::collections::BTreeSet;
use std::path::Path;

use aistat_ingest::read_csv_table;
use aistat_model::codes;
use tracing::debug;

use crate::error::{Result, TablesError};

/// Columns every derived table depends on.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    codes::GEO,
    codes::YEAR,
    codes::VALUE,
    codes::INDICATOR,
    codes::ACTIVITY,
    codes::SIZE_CLASS,
];

/// One cleaned observation with its filter dimensions resolved.
#[derive(Debug, Clone)]
pub struct Observation {
    pub geo: String,
    pub year: i32,
    /// Non-finite when the value cell could not be parsed.
    pub value: f64,
    pub indicator: String,
    pub activity: String,
    pub size_class: String,
}

/// Cleaned dataset loaded into memory, rows without a year dropped.
#[derive(Debug)]
pub struct CleanDataset {
    rows: Vec<Observation>,
}

impl CleanDataset {
    pub fn load(path: &Path) -> Result<Self> {
        let table = read_csv_table(path)?;

        let mut missing = Vec::new();
        let mut indices = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for column in REQUIRED_COLUMNS {
            match table.column_index(column) {
                Some(idx) => indices.push(idx),
                None => missing.push(column.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(TablesError::MissingColumns { columns: missing });
        }
        let [geo, year, value, indicator, activity, size_class] = indices[..] else {
            return Err(TablesError::MissingColumns {
                columns: REQUIRED_COLUMNS.iter().map(ToString::to_string).collect(),
            });
        };

        let mut rows = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");
            let Ok(parsed_year) = cell(year).parse::<i32>() else {
                continue;
            };
            let parsed_value = cell(value).parse::<f64>().unwrap_or(f64::NAN);
            rows.push(Observation {
                geo: cell(geo).to_string(),
                year: parsed_year,
                value: parsed_value,
                indicator: cell(indicator).to_string(),
                activity: cell(activity).to_string(),
                size_class: cell(size_class).to_string(),
            });
        }
        debug!(rows = rows.len(), path = %path.display(), "cleaned dataset loaded");

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Inclusive year range over all observations.
    pub fn year_range(&self) -> Result<(i32, i32)> {
        let min = self.rows.iter().map(|row| row.year).min();
        let max = self.rows.iter().map(|row| row.year).max();
        match (min, max) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(TablesError::NoYears),
        }
    }

    pub fn distinct_geos(&self) -> BTreeSet<String> {
        self.rows.iter().map(|row| row.geo.clone()).collect()
    }
}
