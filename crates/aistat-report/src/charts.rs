//! Chart stage: load the derived tables once, detect the focus set, and
//! render the three interactive views.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::info;

use aistat_ingest::{ensure_dir, read_rows};
use aistat_model::{AdoptionRow, DataPaths, FocusConfig, RankRow};

use crate::error::{ReportError, Result};
use crate::{ranking, top15, trend};

/// Derived tables and the detected focus set, shared by every view.
pub struct ViewInputs {
    pub series: Vec<AdoptionRow>,
    pub top15: Vec<AdoptionRow>,
    pub ranks: Vec<RankRow>,
    pub focus: FocusConfig,
}

/// Artifacts of one rendered view.
#[derive(Debug)]
pub struct ViewOutput {
    pub name: &'static str,
    pub title: String,
    pub html: PathBuf,
    pub table_rows: usize,
}

#[derive(Debug)]
pub struct ChartsReport {
    pub views: Vec<ViewOutput>,
}

/// Render all three views from the derived tables under `paths`.
///
/// The CSV mirror and text summary of each view are computed from the same
/// in-memory rows as its figure, never re-read from disk.
pub fn run(paths: &DataPaths, focus_country: &str) -> Result<ChartsReport> {
    let series: Vec<AdoptionRow> = load_table(paths.adoption_series_csv())?;
    let top15: Vec<AdoptionRow> = load_table(paths.adoption_top15_csv())?;
    let ranks: Vec<RankRow> = load_table(paths.adoption_rank_csv())?;

    let geos: BTreeSet<String> = series.iter().map(|row| row.geo.clone()).collect();
    let focus = FocusConfig::detect_with_country(&geos, focus_country);
    info!(
        series_rows = series.len(),
        rank_rows = ranks.len(),
        focus_geos = ?focus.focus_geos,
        "derived tables loaded"
    );

    ensure_dir(&paths.charts_dir())?;
    let inputs = ViewInputs {
        series,
        top15,
        ranks,
        focus,
    };
    let views = vec![
        top15::render(paths, &inputs)?,
        trend::render(paths, &inputs)?,
        ranking::render(paths, &inputs)?,
    ];
    Ok(ChartsReport { views })
}

fn load_table<T: DeserializeOwned>(path: PathBuf) -> Result<Vec<T>> {
    let rows: Vec<T> = read_rows(&path)?;
    if rows.is_empty() {
        return Err(ReportError::EmptyTable { path });
    }
    Ok(rows)
}

/// Finite value of one geography in one year, if present.
pub(crate) fn value_at(rows: &[AdoptionRow], geo: Option<&str>, year: i32) -> Option<f64> {
    let geo = geo?;
    rows.iter()
        .find(|row| row.geo == geo && row.year == year && row.value.is_finite())
        .map(|row| row.value)
}

pub(crate) fn rank_at(rows: &[RankRow], geo: Option<&str>, year: i32) -> Option<u32> {
    let geo = geo?;
    rows.iter()
        .find(|row| row.geo == geo && row.year == year)
        .and_then(|row| row.rank)
}

/// The view selector all three figures share: a dropdown to the right of
/// the plot area.
pub(crate) fn dropdown_menu(buttons: Vec<Value>) -> Value {
    json!({
        "type": "dropdown",
        "direction": "down",
        "x": 1.02,
        "y": 1.05,
        "xanchor": "left",
        "yanchor": "top",
        "buttons": buttons,
    })
}

/// A single reset button placed just below the dropdown.
pub(crate) fn reset_menu(button: Value) -> Value {
    json!({
        "type": "buttons",
        "direction": "left",
        "x": 1.02,
        "y": 0.95,
        "xanchor": "left",
        "yanchor": "top",
        "buttons": [button],
    })
}

/// A button that restyles trace visibility and retitles the figure.
pub(crate) fn update_button(label: &str, visible: &[bool], title: &str) -> Value {
    json!({
        "label": label,
        "method": "update",
        "args": [{"visible": visible}, {"title": title}],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(geo: &str, year: i32, value: f64) -> AdoptionRow {
        AdoptionRow {
            geo: geo.to_string(),
            year,
            value,
        }
    }

    #[test]
    fn value_lookup_skips_non_finite_and_missing_codes() {
        let rows = vec![row("ES", 2023, f64::NAN), row("ES", 2024, 27.2)];
        assert_eq!(value_at(&rows, Some("ES"), 2024), Some(27.2));
        assert_eq!(value_at(&rows, Some("ES"), 2023), None);
        assert_eq!(value_at(&rows, None, 2024), None);
    }

    #[test]
    fn rank_lookup_returns_the_stored_rank() {
        let rows = vec![RankRow {
            geo: "ES".to_string(),
            year: 2024,
            value: 27.2,
            rank: Some(4),
        }];
        assert_eq!(rank_at(&rows, Some("ES"), 2024), Some(4));
        assert_eq!(rank_at(&rows, Some("FR"), 2024), None);
    }

    #[test]
    fn update_button_carries_visibility_and_title() {
        let button = update_button("All", &[true, false], "Trend");
        assert_eq!(button["method"], "update");
        assert_eq!(button["args"][0]["visible"], json!([true, false]));
        assert_eq!(button["args"][1]["title"], "Trend");
    }
}
