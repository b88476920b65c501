//! View 2: adoption over time for the focus geographies, one line each.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;
use tracing::info;

use aistat_ingest::{write_rows, write_text};
use aistat_model::{AdoptionRow, DataPaths};

use crate::charts::{ViewInputs, ViewOutput, dropdown_menu, reset_menu, update_button, value_at};
use crate::error::{ReportError, Result};
use crate::html::{self, ChartPage};

#[derive(Debug, Serialize)]
struct TableRow<'a> {
    geo: &'a str,
    geo_label: String,
    year: i32,
    value: f64,
}

pub(crate) fn render(paths: &DataPaths, inputs: &ViewInputs) -> Result<ViewOutput> {
    let focus = &inputs.focus;
    let rows: Vec<&AdoptionRow> = inputs
        .series
        .iter()
        .filter(|row| focus.focus_geos.iter().any(|geo| geo == &row.geo) && row.value.is_finite())
        .collect();
    if rows.is_empty() {
        return Err(ReportError::NoFocusRows {
            geos: focus.focus_geos.clone(),
        });
    }

    let mut year_min = i32::MAX;
    let mut year_max = i32::MIN;
    for row in &rows {
        year_min = year_min.min(row.year);
        year_max = year_max.max(row.year);
    }

    let mut by_label: BTreeMap<String, Vec<&AdoptionRow>> = BTreeMap::new();
    for &row in &rows {
        by_label.entry(focus.geo_label(&row.geo)).or_default().push(row);
    }
    let labels: Vec<String> = by_label.keys().cloned().collect();

    let mut traces = Vec::new();
    for (label, mut geo_rows) in by_label {
        geo_rows.sort_by_key(|row| row.year);
        let years: Vec<i32> = geo_rows.iter().map(|row| row.year).collect();
        let values: Vec<f64> = geo_rows.iter().map(|row| row.value).collect();
        let hover = format!("{label} - Year: %{{x}}<br>Value: %{{y:.2f}}%<extra></extra>");
        traces.push(json!({
            "type": "scatter",
            "mode": "lines+markers",
            "x": years,
            "y": values,
            "name": label,
            "hovertemplate": hover,
        }));
    }

    let base_title = format!("AI adoption trend ({year_min}-{year_max}) - focus countries");
    let all_visible = vec![true; labels.len()];
    let mut buttons = vec![update_button("All", &all_visible, &base_title)];
    for label in &labels {
        let mask: Vec<bool> = labels.iter().map(|candidate| candidate == label).collect();
        let isolated = format!("AI adoption trend ({year_min}-{year_max}) - {label}");
        buttons.push(update_button(label, &mask, &isolated));
    }

    let figure = json!({
        "data": traces,
        "layout": {
            "title": &base_title,
            "xaxis": {"title": "Year", "dtick": 1},
            "yaxis": {"title": "Percentage of enterprises (%)", "tickformat": ".0f"},
            "legend": {"title": {"text": "Country/area (click to hide/show)"}},
            "margin": {"l": 40, "r": 40, "t": 80, "b": 40},
            "updatemenus": [
                dropdown_menu(buttons),
                reset_menu(update_button("Reset (show all)", &all_visible, &base_title)),
            ],
        },
    });

    let table: Vec<TableRow<'_>> = rows
        .iter()
        .map(|row| TableRow {
            geo: &row.geo,
            geo_label: focus.geo_label(&row.geo),
            year: row.year,
            value: row.value,
        })
        .collect();
    let table_path = paths.charts_dir().join("view2_table.csv");
    write_rows(&table_path, &table)?;

    let summary = summary_text(inputs, year_min, year_max);
    let summary_path = paths.charts_dir().join("view2_summary.txt");
    write_text(&summary_path, &summary)?;

    let intro = format!(
        "Adoption of AI technologies from {year_min} to {year_max} for the focus geographies. \
         The dropdown isolates a single country; the legend toggles individual lines."
    );
    let page = html::render_chart_page(&ChartPage {
        title: &base_title,
        intro: &intro,
        figure: &figure,
        csv_href: "view2_table.csv",
        summary: &summary,
    })?;
    let html_path = paths.charts_dir().join("view2_trend_focus_interactive.html");
    write_text(&html_path, &page)?;
    info!(rows = table.len(), path = %html_path.display(), "view 2 written");

    Ok(ViewOutput {
        name: "view2",
        title: base_title,
        html: html_path,
        table_rows: table.len(),
    })
}

/// First-to-latest movement of the focus country and the EU aggregate,
/// with the gap between them at both ends.
fn summary_text(inputs: &ViewInputs, year_min: i32, year_max: i32) -> String {
    let focus = &inputs.focus;
    let country = focus.country_code.as_deref();
    let eu = focus.eu_code.as_deref();
    let country_first = value_at(&inputs.series, country, year_min);
    let country_last = value_at(&inputs.series, country, year_max);
    let eu_first = value_at(&inputs.series, eu, year_min);
    let eu_last = value_at(&inputs.series, eu, year_max);

    let mut lines = vec![format!("View 2 (Trend, {year_min}-{year_max})")];
    if let (Some(code), Some(first), Some(last)) = (country, country_first, country_last) {
        let delta = last - first;
        lines.push(format!(
            "- {}: {first:.1}% -> {last:.1}% ({delta:+.1} p.p.).",
            focus.geo_label(code)
        ));
    }
    if let (Some(code), Some(first), Some(last)) = (eu, eu_first, eu_last) {
        let delta = last - first;
        lines.push(format!(
            "- {}: {first:.1}% -> {last:.1}% ({delta:+.1} p.p.).",
            focus.geo_label(code)
        ));
    }
    if let (Some(code), Some(cf), Some(cl), Some(ef), Some(el)) =
        (country, country_first, country_last, eu_first, eu_last)
    {
        let gap_first = cf - ef;
        let gap_last = cl - el;
        let change = gap_last - gap_first;
        lines.push(format!(
            "- Gap {code} vs EU: {gap_first:+.1} p.p. -> {gap_last:+.1} p.p. (change: {change:+.1} p.p.)."
        ));
    }
    lines.push(String::from(
        "- Interaction: use the dropdown to isolate a country or the legend to hide/show series.",
    ));
    format!("{}\n", lines.join("\n"))
}
