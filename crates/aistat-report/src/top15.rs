//! View 1: horizontal bar chart of the top-15 countries in the latest year.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use aistat_ingest::{write_rows, write_text};
use aistat_model::{AdoptionRow, DataPaths, FocusConfig};

use crate::charts::{ViewInputs, ViewOutput, dropdown_menu, rank_at, value_at};
use crate::error::{ReportError, Result};
use crate::html::{self, ChartPage};

const BASE_COLOR: &str = "#1f77b4";
const EU_COLOR: &str = "#ff7f0e";
const FOCUS_COLOR: &str = "#d62728";

#[derive(Debug, Serialize)]
struct TableRow<'a> {
    geo: &'a str,
    geo_label: String,
    year: i32,
    value: f64,
}

pub(crate) fn render(paths: &DataPaths, inputs: &ViewInputs) -> Result<ViewOutput> {
    let focus = &inputs.focus;
    let last_year = inputs
        .top15
        .iter()
        .map(|row| row.year)
        .max()
        .ok_or_else(|| ReportError::EmptyTable {
            path: paths.adoption_top15_csv(),
        })?;

    // Bars run bottom-up, so ascending value puts the leader on top.
    let mut ordered: Vec<&AdoptionRow> = inputs.top15.iter().collect();
    ordered.sort_by(|a, b| a.value.total_cmp(&b.value));

    let labels: Vec<String> = ordered.iter().map(|row| focus.geo_label(&row.geo)).collect();
    let values: Vec<f64> = ordered.iter().map(|row| row.value).collect();
    let texts: Vec<String> = values.iter().map(|value| format!("{value:.1}%")).collect();
    let colors: Vec<&str> = ordered.iter().map(|row| bar_color(focus, &row.geo)).collect();

    let by_value = labels.clone();
    let mut by_value_rev = labels.clone();
    by_value_rev.reverse();
    let mut by_name = labels.clone();
    by_name.sort();

    let title = format!("AI adoption (enterprises using AI) - Top 15 countries ({last_year})");
    let figure = json!({
        "data": [{
            "type": "bar",
            "orientation": "h",
            "x": &values,
            "y": &labels,
            "text": &texts,
            "textposition": "outside",
            "marker": {"color": &colors},
            "hovertemplate": "%{y}: %{x:.2f}%<extra></extra>",
        }],
        "layout": {
            "title": &title,
            "xaxis": {"title": "Percentage of enterprises (%)"},
            "yaxis": {"title": "Country/area", "categoryorder": "array", "categoryarray": &by_value},
            "margin": {"l": 40, "r": 40, "t": 80, "b": 40},
            "updatemenus": [dropdown_menu(vec![
                sort_button("Highest first", &by_value),
                sort_button("Lowest first", &by_value_rev),
                sort_button("By name", &by_name),
            ])],
        },
    });

    let table: Vec<TableRow<'_>> = ordered
        .iter()
        .map(|row| TableRow {
            geo: &row.geo,
            geo_label: focus.geo_label(&row.geo),
            year: row.year,
            value: row.value,
        })
        .collect();
    let table_path = paths.charts_dir().join("view1_table.csv");
    write_rows(&table_path, &table)?;

    let summary = summary_text(inputs, last_year);
    let summary_path = paths.charts_dir().join("view1_summary.txt");
    write_text(&summary_path, &summary)?;

    let intro = format!(
        "Share of enterprises using at least one AI technology in {last_year}, top 15 countries. \
         The menu reorders the bars; the table and summary below mirror the plotted data."
    );
    let page = html::render_chart_page(&ChartPage {
        title: &title,
        intro: &intro,
        figure: &figure,
        csv_href: "view1_table.csv",
        summary: &summary,
    })?;
    let html_path = paths.charts_dir().join("view1_top15_last_year_interactive.html");
    write_text(&html_path, &page)?;
    info!(rows = table.len(), path = %html_path.display(), "view 1 written");

    Ok(ViewOutput {
        name: "view1",
        title,
        html: html_path,
        table_rows: table.len(),
    })
}

fn bar_color(focus: &FocusConfig, geo: &str) -> &'static str {
    if focus.country_code.as_deref() == Some(geo) {
        return FOCUS_COLOR;
    }
    if focus.eu_code.as_deref() == Some(geo) {
        return EU_COLOR;
    }
    BASE_COLOR
}

fn sort_button(label: &str, order: &[String]) -> Value {
    json!({
        "label": label,
        "method": "relayout",
        "args": [{"yaxis.categoryorder": "array", "yaxis.categoryarray": order}],
    })
}

/// The text fallback reads from the full series, so the leader line covers
/// every geography of the latest year, not just the plotted fifteen.
fn summary_text(inputs: &ViewInputs, last_year: i32) -> String {
    let focus = &inputs.focus;
    let mut latest: Vec<&AdoptionRow> = inputs
        .series
        .iter()
        .filter(|row| row.year == last_year && row.value.is_finite())
        .collect();
    latest.sort_by(|a, b| b.value.total_cmp(&a.value));

    let country = focus.country_code.as_deref();
    let eu = focus.eu_code.as_deref();
    let country_value = value_at(&inputs.series, country, last_year);
    let eu_value = value_at(&inputs.series, eu, last_year);

    let mut lines = vec![format!("View 1 (Top 15, {last_year})")];
    if let Some(leader) = latest.first() {
        lines.push(format!(
            "- Leader (all available geographies): {} with {:.1}%.",
            leader.geo, leader.value
        ));
    }
    if let (Some(code), Some(value)) = (country, country_value) {
        lines.push(format!("- {}: {value:.1}%.", focus.geo_label(code)));
    }
    if let (Some(code), Some(value)) = (eu, eu_value) {
        lines.push(format!("- {}: {value:.1}%.", focus.geo_label(code)));
    }
    if let (Some(code), Some(country_value), Some(eu_value)) = (country, country_value, eu_value) {
        let gap = country_value - eu_value;
        lines.push(format!("- Gap {code} vs EU: {gap:+.1} percentage points."));
    }
    if let (Some(code), Some(rank)) = (country, rank_at(&inputs.ranks, country, last_year)) {
        lines.push(format!("- Rank of {code} in {last_year}: {rank}."));
    }
    lines.push(String::from("- Interaction: use the menu to reorder the bars."));
    format!("{}\n", lines.join("\n"))
}
