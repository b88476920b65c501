//! Dimension profiling of the cleaned dataset.
//!
//! Profiling works on the stored text of each cell, so a malformed value
//! shows up in the counts instead of being coerced away.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use aistat_ingest::{CsvTable, ensure_dir, read_csv_table, write_csv_table, write_text};
use aistat_model::{DataPaths, codes};

use crate::error::{Result, TablesError};

/// Dimensions profiled, in report order.
pub const PROFILE_DIMENSIONS: [&str; 5] = [
    codes::INDICATOR,
    codes::ACTIVITY,
    codes::SIZE_CLASS,
    codes::GEO,
    codes::YEAR,
];

/// Dimensions whose distinct values are listed verbatim in the report.
const PREVIEW_DIMENSIONS: [&str; 3] = [codes::INDICATOR, codes::ACTIVITY, codes::SIZE_CLASS];

/// Stand-in for empty cells in the count tables.
const MISSING_MARKER: &str = "<NA>";

/// Cap on distinct values listed verbatim in the report.
const PREVIEW_CAP: usize = 200;

#[derive(Debug, Clone)]
pub struct DimensionProfile {
    pub column: String,
    pub distinct: usize,
    pub missing: usize,
}

/// What a profiling run observed. Rendered into `profile_report.txt`.
#[derive(Debug, Clone)]
pub struct ProfileReport {
    pub rows: usize,
    pub columns: usize,
    /// First and last year present, as stored in the dataset.
    pub year_span: Option<(String, String)>,
    pub year_count: usize,
    pub geo_count: usize,
    pub dimensions: Vec<DimensionProfile>,
    /// Rendered preview line per previewed dimension.
    pub previews: Vec<(String, String)>,
}

impl ProfileReport {
    pub fn render(&self, paths: &DataPaths) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push("PROFILE REPORT".to_string());
        lines.push(format!("Input file: {}", paths.clean_csv().display()));
        lines.push(format!("Rows: {}", self.rows));
        lines.push(format!("Columns: {}", self.columns));
        lines.push(String::new());
        match &self.year_span {
            Some((first, last)) => lines.push(format!(
                "Years available: {first} -> {last} (n={})",
                self.year_count
            )),
            None => lines.push("Years available: (no data)".to_string()),
        }
        lines.push(format!("Geographies: n={}", self.geo_count));
        lines.push(String::new());
        lines.push("Profiled dimensions:".to_string());
        for dim in &self.dimensions {
            lines.push(format!(
                "- {}: distinct={}, missing={} (csv: {})",
                dim.column,
                dim.distinct,
                dim.missing,
                paths.profile_counts_csv(&dim.column).display()
            ));
        }
        lines.push(String::new());
        for (column, preview) in &self.previews {
            lines.push(format!("Distinct values of '{column}':"));
            lines.push(preview.clone());
            lines.push(String::new());
        }
        lines.join("\n") + "\n"
    }
}

/// Distinct non-empty cell values of one column, sorted.
fn distinct_values(table: &CsvTable, idx: usize) -> Vec<String> {
    let distinct: BTreeSet<&str> = table
        .rows
        .iter()
        .filter_map(|row| row.get(idx))
        .map(String::as_str)
        .filter(|cell| !cell.is_empty())
        .collect();
    distinct.into_iter().map(str::to_string).collect()
}

fn preview_line(values: &[String]) -> String {
    if values.is_empty() {
        return "(none)".to_string();
    }
    let shown: Vec<&str> = values.iter().take(PREVIEW_CAP).map(String::as_str).collect();
    let suffix = if values.len() > shown.len() { " ..." } else { "" };
    format!("{}{suffix}", shown.join(", "))
}

/// Value counts of one column, empty cells counted under the missing
/// marker, ordered by count descending then value ascending.
fn value_counts(table: &CsvTable, idx: usize) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in &table.rows {
        let cell = row.get(idx).map(String::as_str).unwrap_or("");
        let key = if cell.is_empty() { MISSING_MARKER } else { cell };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    let mut ordered: Vec<(String, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ordered
}

/// Profile the cleaned dataset: one count table per dimension plus a
/// summary report.
pub fn run(paths: &DataPaths) -> Result<ProfileReport> {
    let table = read_csv_table(&paths.clean_csv())?;
    info!(
        rows = table.rows.len(),
        columns = table.headers.len(),
        "cleaned dataset loaded for profiling"
    );

    let mut missing = Vec::new();
    let mut indices = Vec::with_capacity(PROFILE_DIMENSIONS.len());
    for column in PROFILE_DIMENSIONS {
        match table.column_index(column) {
            Some(idx) => indices.push((column, idx)),
            None => missing.push(column.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(TablesError::MissingColumns { columns: missing });
    }

    ensure_dir(&paths.outputs_dir())?;

    let mut dimensions = Vec::with_capacity(indices.len());
    for &(column, idx) in &indices {
        let counts = value_counts(&table, idx);
        let missing_cells = counts
            .iter()
            .find(|(value, _)| value == MISSING_MARKER)
            .map(|(_, count)| *count)
            .unwrap_or(0);
        let distinct = counts.len() - usize::from(missing_cells > 0);

        let counts_table = CsvTable {
            headers: vec![column.to_string(), "count".to_string()],
            rows: counts
                .into_iter()
                .map(|(value, count)| vec![value, count.to_string()])
                .collect(),
        };
        write_csv_table(&paths.profile_counts_csv(column), &counts_table)?;
        info!(column, distinct, missing = missing_cells, "dimension profiled");

        dimensions.push(DimensionProfile {
            column: column.to_string(),
            distinct,
            missing: missing_cells,
        });
    }

    let column_index = |name: &str| {
        indices
            .iter()
            .find(|(column, _)| *column == name)
            .map(|&(_, idx)| idx)
    };
    let years = column_index(codes::YEAR)
        .map(|idx| distinct_values(&table, idx))
        .unwrap_or_default();
    let geo_count = column_index(codes::GEO)
        .map(|idx| distinct_values(&table, idx).len())
        .unwrap_or(0);
    let year_span = match (years.first(), years.last()) {
        (Some(first), Some(last)) => Some((first.clone(), last.clone())),
        _ => None,
    };

    let previews = PREVIEW_DIMENSIONS
        .iter()
        .filter_map(|&column| {
            column_index(column)
                .map(|idx| (column.to_string(), preview_line(&distinct_values(&table, idx))))
        })
        .collect();

    let report = ProfileReport {
        rows: table.rows.len(),
        columns: table.headers.len(),
        year_span,
        year_count: years.len(),
        geo_count,
        dimensions,
        previews,
    };
    write_text(&paths.profile_report(), &report.render(paths))?;
    info!(path = %paths.profile_report().display(), "profile report written");

    Ok(report)
}
