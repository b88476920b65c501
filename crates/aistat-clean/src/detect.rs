//! Column-role detection over normalized headers.

use aistat_ingest::CsvTable;

use crate::coerce::coerce_value;
use crate::error::{CleanError, Result};

/// Time-column candidates, tried in priority order.
pub const TIME_CANDIDATES: [&str; 5] = ["time_period", "time", "year", "periode", "period"];
pub const GEO_CANDIDATES: [&str; 3] = ["geo", "country", "ref_area"];
pub const FREQ_CANDIDATES: [&str; 2] = ["freq", "frequency"];
pub const UNIT_CANDIDATES: [&str; 2] = ["unit", "unit_measure"];

/// Outcome of a column search. Callers decide whether `NotFound` is fatal
/// (time, value) or just narrows the cleaning (geo, freq, unit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnMatch {
    Found(String),
    NotFound,
}

impl ColumnMatch {
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Found(name) => Some(name),
            Self::NotFound => None,
        }
    }
}

/// Semantic roles resolved to actual column names, built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub time: String,
    pub value: String,
    pub geo: Option<String>,
    pub freq: Option<String>,
    pub unit: Option<String>,
}

/// First candidate present among the headers.
pub fn find_first(headers: &[String], candidates: &[&str]) -> ColumnMatch {
    for candidate in candidates {
        if headers.iter().any(|header| header == candidate) {
            return ColumnMatch::Found((*candidate).to_string());
        }
    }
    ColumnMatch::NotFound
}

/// Prefer an explicit `obs_value` column; otherwise pick the non-time
/// column with the most parseable values. Zero parseable values anywhere
/// means there is no value column.
pub fn detect_value_column(table: &CsvTable, time_column: &str) -> ColumnMatch {
    if table.headers.iter().any(|header| header == "obs_value") {
        return ColumnMatch::Found("obs_value".to_string());
    }

    let mut best: Option<(usize, usize)> = None;
    for (idx, header) in table.headers.iter().enumerate() {
        if header == time_column {
            continue;
        }
        let parseable = table
            .rows
            .iter()
            .filter(|row| {
                let cell = row.get(idx).map(String::as_str).unwrap_or("");
                coerce_value(cell).is_some()
            })
            .count();
        match best {
            Some((_, best_count)) if parseable <= best_count => {}
            _ => best = Some((idx, parseable)),
        }
    }

    match best {
        Some((idx, count)) if count > 0 => ColumnMatch::Found(table.headers[idx].clone()),
        _ => ColumnMatch::NotFound,
    }
}

/// Resolve every column role for a table with normalized headers.
pub fn detect_columns(table: &CsvTable) -> Result<ColumnMap> {
    let time = find_first(&table.headers, &TIME_CANDIDATES)
        .into_option()
        .ok_or(CleanError::NoTimeColumn)?;
    let value = detect_value_column(table, &time)
        .into_option()
        .ok_or(CleanError::NoValueColumn)?;
    let geo = find_first(&table.headers, &GEO_CANDIDATES).into_option();
    let freq = find_first(&table.headers, &FREQ_CANDIDATES).into_option();
    let unit = find_first(&table.headers, &UNIT_CANDIDATES).into_option();

    Ok(ColumnMap {
        time,
        value,
        geo,
        freq,
        unit,
    })
}
