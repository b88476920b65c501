//! The cleaning stage: apply the detected column map, coerce values,
//! filter to an annual percentage series, and report what happened.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::info;

use aistat_ingest::{CsvTable, ensure_dir, read_csv_table, write_csv_table, write_text};
use aistat_model::DataPaths;

use crate::coerce::{coerce_value, extract_year, format_value};
use crate::detect::{ColumnMap, detect_columns};
use crate::error::{CleanError, Result};

/// Annual frequency marker kept by the frequency filter.
const ANNUAL_FREQ: &str = "A";

/// Percentage unit codes, in preference order.
const PERCENT_UNITS: [&str; 4] = ["PC", "PCT", "PC_ENT", "PC_TOTAL"];

/// What a cleaning run did. Rendered into `clean_report.txt`; the counts
/// feed the CLI summary.
#[derive(Debug, Clone)]
pub struct CleanReport {
    pub input: PathBuf,
    pub rows_in: usize,
    pub cols_in: usize,
    pub columns: ColumnMap,
    /// Filter and drop decisions, in the order they were applied.
    pub notes: Vec<String>,
    pub rows_out: usize,
    pub year_range: Option<(i32, i32)>,
    pub distinct_geos: Option<usize>,
    pub final_columns: Vec<String>,
}

fn describe(column: &Option<String>) -> &str {
    column.as_deref().unwrap_or("(not detected)")
}

impl CleanReport {
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push("CLEANING REPORT".to_string());
        lines.push(format!("Input file: {}", self.input.display()));
        lines.push(format!(
            "Initial rows/columns: {} / {}",
            self.rows_in, self.cols_in
        ));
        lines.push(format!("Time column: {}", self.columns.time));
        lines.push(format!("Value column: {}", self.columns.value));
        lines.push(format!("Geo column: {}", describe(&self.columns.geo)));
        lines.push(format!("Freq column: {}", describe(&self.columns.freq)));
        lines.push(format!("Unit column: {}", describe(&self.columns.unit)));
        lines.push(String::new());
        lines.extend(self.notes.iter().cloned());
        lines.push(String::new());
        lines.push(format!("Final rows: {}", self.rows_out));
        if let Some((min, max)) = self.year_range {
            lines.push(format!("Year range (min/max): {min} / {max}"));
        }
        if let Some(count) = self.distinct_geos {
            lines.push(format!("Distinct geographies: {count}"));
        }
        lines.push("Final columns:".to_string());
        lines.push(self.final_columns.join(", "));
        lines.join("\n") + "\n"
    }
}

fn normalize_headers(table: &mut CsvTable) {
    for header in &mut table.headers {
        *header = header.trim().to_lowercase();
    }
}

/// Clean the raw download into `ai_clean.csv` plus a report.
pub fn run(paths: &DataPaths) -> Result<CleanReport> {
    let raw_path = paths.raw_csv();
    let mut table = read_csv_table(&raw_path)?;
    normalize_headers(&mut table);

    let rows_in = table.rows.len();
    let cols_in = table.headers.len();
    info!(rows = rows_in, columns = cols_in, "raw dataset loaded");

    let columns = detect_columns(&table)?;
    info!(
        time = %columns.time,
        value = %columns.value,
        geo = describe(&columns.geo),
        freq = describe(&columns.freq),
        unit = describe(&columns.unit),
        "columns detected"
    );

    let mut notes: Vec<String> = Vec::new();

    if let Some(freq_col) = &columns.freq {
        if let Some(idx) = table.column_index(freq_col) {
            let before = table.rows.len();
            table
                .rows
                .retain(|row| row.get(idx).map(String::as_str) == Some(ANNUAL_FREQ));
            let after = table.rows.len();
            info!(before, after, "annual frequency filter applied");
            notes.push(format!(
                "Filter applied on '{freq_col}': {before} -> {after} (allowed: [\"{ANNUAL_FREQ}\"])"
            ));
        }
    }

    if let Some(unit_col) = &columns.unit {
        if let Some(idx) = table.column_index(unit_col) {
            let units: Vec<String> = {
                let distinct: BTreeSet<&str> = table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(String::as_str)
                    .filter(|cell| !cell.is_empty())
                    .collect();
                distinct.into_iter().map(str::to_string).collect()
            };
            let preview: Vec<&String> = units.iter().take(30).collect();
            let suffix = if units.len() > 30 { " ..." } else { "" };
            notes.push(format!("Units detected (before filter): {preview:?}{suffix}"));

            let preferred = PERCENT_UNITS
                .iter()
                .copied()
                .find(|candidate| units.iter().any(|unit| unit == candidate));
            match preferred {
                Some(unit) => {
                    let before = table.rows.len();
                    table
                        .rows
                        .retain(|row| row.get(idx).map(String::as_str) == Some(unit));
                    let after = table.rows.len();
                    info!(before, after, unit, "percentage unit filter applied");
                    notes.push(format!(
                        "Filter applied on '{unit_col}' for percentage unit: {before} -> {after} (unit: {unit})"
                    ));
                }
                None => {
                    info!("no standard percentage unit present, unit filter skipped");
                    notes.push(
                        "Unit filter skipped (no standard percentage unit found).".to_string(),
                    );
                }
            }
        }
    }

    let time_idx = table
        .column_index(&columns.time)
        .ok_or(CleanError::NoTimeColumn)?;
    let value_idx = table
        .column_index(&columns.value)
        .ok_or(CleanError::NoValueColumn)?;
    // Columns already named year/value are superseded by the derived pair.
    let dim_indices: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(idx, header)| {
            *idx != time_idx
                && *idx != value_idx
                && header.as_str() != "year"
                && header.as_str() != "value"
        })
        .map(|(idx, _)| idx)
        .collect();

    let mut final_columns: Vec<String> = dim_indices
        .iter()
        .map(|idx| table.headers[*idx].clone())
        .collect();
    final_columns.push("year".to_string());
    final_columns.push("value".to_string());

    let before_drop = table.rows.len();
    let mut out_rows: Vec<Vec<String>> = Vec::new();
    let mut year_range: Option<(i32, i32)> = None;
    for row in &table.rows {
        let year = row.get(time_idx).and_then(|cell| extract_year(cell));
        let value = row.get(value_idx).and_then(|cell| coerce_value(cell));
        let (Some(year), Some(value)) = (year, value) else {
            continue;
        };
        let mut out = Vec::with_capacity(final_columns.len());
        for idx in &dim_indices {
            out.push(row.get(*idx).cloned().unwrap_or_default());
        }
        out.push(year.to_string());
        out.push(format_value(value));
        out_rows.push(out);
        year_range = Some(match year_range {
            Some((min, max)) => (min.min(year), max.max(year)),
            None => (year, year),
        });
    }
    let rows_out = out_rows.len();
    info!(before = before_drop, after = rows_out, "rows without year or value dropped");
    notes.push(format!(
        "Dropped rows without year or value: {before_drop} -> {rows_out}"
    ));

    let distinct_geos = columns.geo.as_ref().and_then(|geo_col| {
        let idx = final_columns.iter().position(|header| header == geo_col)?;
        let distinct: BTreeSet<&str> = out_rows
            .iter()
            .filter_map(|row| row.get(idx))
            .map(String::as_str)
            .collect();
        Some(distinct.len())
    });

    let out_path = paths.clean_csv();
    ensure_dir(&paths.processed_dir())?;
    write_csv_table(
        &out_path,
        &CsvTable {
            headers: final_columns.clone(),
            rows: out_rows,
        },
    )?;
    info!(path = %out_path.display(), rows = rows_out, "cleaned dataset written");

    let report = CleanReport {
        input: raw_path,
        rows_in,
        cols_in,
        columns,
        notes,
        rows_out,
        year_range,
        distinct_geos,
        final_columns,
    };
    write_text(&paths.clean_report(), &report.render())?;
    info!(path = %paths.clean_report().display(), "clean report written");

    Ok(report)
}
