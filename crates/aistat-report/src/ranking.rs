//! View 3: per-year adoption ranks as a bump chart, rank 1 on top.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::json;
use tracing::info;

use aistat_ingest::{write_rows, write_text};
use aistat_model::{DataPaths, FocusConfig, RankRow};

use crate::charts::{ViewInputs, ViewOutput, dropdown_menu, reset_menu, update_button};
use crate::error::{ReportError, Result};
use crate::html::{self, ChartPage};

#[derive(Debug, Serialize)]
struct TableRow<'a> {
    geo: &'a str,
    geo_label: String,
    year: i32,
    value: f64,
    rank: Option<u32>,
}

pub(crate) fn render(paths: &DataPaths, inputs: &ViewInputs) -> Result<ViewOutput> {
    let focus = &inputs.focus;
    let ranked: Vec<&RankRow> = inputs
        .ranks
        .iter()
        .filter(|row| row.rank.is_some() && row.value.is_finite())
        .collect();
    let Some(last_year) = ranked.iter().map(|row| row.year).max() else {
        return Err(ReportError::EmptyTable {
            path: paths.adoption_rank_csv(),
        });
    };

    // The plotted geographies: the latest-year top 15 plus the focus set.
    let mut last_rows: Vec<&RankRow> = ranked
        .iter()
        .copied()
        .filter(|row| row.year == last_year)
        .collect();
    last_rows.sort_by_key(|row| row.rank.unwrap_or(u32::MAX));
    let mut keep: BTreeSet<&str> = last_rows
        .iter()
        .take(15)
        .map(|row| row.geo.as_str())
        .collect();
    for geo in &focus.focus_geos {
        keep.insert(geo.as_str());
    }
    let kept: Vec<&RankRow> = ranked
        .iter()
        .copied()
        .filter(|row| keep.contains(row.geo.as_str()))
        .collect();

    let mut kept_last: Vec<&RankRow> = kept
        .iter()
        .copied()
        .filter(|row| row.year == last_year)
        .collect();
    kept_last.sort_by_key(|row| row.rank.unwrap_or(u32::MAX));
    let top10: BTreeSet<&str> = kept_last
        .iter()
        .take(10)
        .map(|row| row.geo.as_str())
        .collect();
    let focus_set: BTreeSet<&str> = focus.focus_geos.iter().map(String::as_str).collect();

    let mut by_label: BTreeMap<String, (&str, Vec<&RankRow>)> = BTreeMap::new();
    for &row in &kept {
        by_label
            .entry(focus.geo_label(&row.geo))
            .or_insert_with(|| (row.geo.as_str(), Vec::new()))
            .1
            .push(row);
    }
    let trace_geos: Vec<&str> = by_label.values().map(|(geo, _)| *geo).collect();

    let mut traces = Vec::new();
    for (label, (_, mut geo_rows)) in by_label {
        geo_rows.sort_by_key(|row| row.year);
        let years: Vec<i32> = geo_rows.iter().map(|row| row.year).collect();
        let ranks: Vec<u32> = geo_rows.iter().filter_map(|row| row.rank).collect();
        let hover = format!("{label} - Year: %{{x}}<br>Rank: %{{y}}<extra></extra>");
        traces.push(json!({
            "type": "scatter",
            "mode": "lines+markers",
            "x": years,
            "y": ranks,
            "name": label,
            "hovertemplate": hover,
        }));
    }

    let visible_in = |set: &BTreeSet<&str>| -> Vec<bool> {
        trace_geos.iter().map(|geo| set.contains(geo)).collect()
    };
    let top10_title = format!("AI adoption ranking - Top 10 ({last_year})");
    let top15_title = format!("AI adoption ranking - Top 15 ({last_year})");
    let buttons = vec![
        update_button("Top 10 (latest year)", &visible_in(&top10), &top10_title),
        update_button("Top 15 (latest year)", &visible_in(&keep), &top15_title),
        update_button(
            "Focus countries",
            &visible_in(&focus_set),
            "AI adoption ranking - focus countries",
        ),
    ];

    let figure = json!({
        "data": traces,
        "layout": {
            "title": &top15_title,
            "xaxis": {"title": "Year", "dtick": 1},
            "yaxis": {"title": "Rank position (1 = best)", "autorange": "reversed", "dtick": 1},
            "legend": {"title": {"text": "Country/area (click to hide/show)"}},
            "margin": {"l": 40, "r": 40, "t": 80, "b": 40},
            "updatemenus": [
                dropdown_menu(buttons),
                reset_menu(update_button("Reset (Top 15)", &visible_in(&keep), &top15_title)),
            ],
        },
    });

    let table: Vec<TableRow<'_>> = kept
        .iter()
        .map(|row| TableRow {
            geo: &row.geo,
            geo_label: focus.geo_label(&row.geo),
            year: row.year,
            value: row.value,
            rank: row.rank,
        })
        .collect();
    let table_path = paths.charts_dir().join("view3_table.csv");
    write_rows(&table_path, &table)?;

    let summary = summary_text(&kept, focus);
    let summary_path = paths.charts_dir().join("view3_summary.txt");
    write_text(&summary_path, &summary)?;

    let intro = format!(
        "Yearly adoption rank of each country through {last_year}, rank 1 being the highest \
         share. The dropdown switches between the Top 10, Top 15 and focus country sets."
    );
    let page = html::render_chart_page(&ChartPage {
        title: &top15_title,
        intro: &intro,
        figure: &figure,
        csv_href: "view3_table.csv",
        summary: &summary,
    })?;
    let html_path = paths.charts_dir().join("view3_bump_ranking_interactive.html");
    write_text(&html_path, &page)?;
    info!(rows = table.len(), path = %html_path.display(), "view 3 written");

    Ok(ViewOutput {
        name: "view3",
        title: top15_title,
        html: html_path,
        table_rows: table.len(),
    })
}

fn summary_text(kept: &[&RankRow], focus: &FocusConfig) -> String {
    let mut year_min = i32::MAX;
    let mut year_max = i32::MIN;
    for row in kept {
        year_min = year_min.min(row.year);
        year_max = year_max.max(row.year);
    }
    let rank_of = |geo: Option<&str>, year: i32| -> Option<u32> {
        let geo = geo?;
        kept.iter()
            .find(|row| row.geo == geo && row.year == year)
            .and_then(|row| row.rank)
    };
    let country = focus.country_code.as_deref();
    let eu = focus.eu_code.as_deref();

    let mut lines = vec![format!("View 3 (Ranking / bump, {year_min}-{year_max})")];
    if let (Some(code), Some(first), Some(last)) =
        (country, rank_of(country, year_min), rank_of(country, year_max))
    {
        lines.push(format!(
            "- {}: rank {first} -> {last} (lower is better).",
            focus.geo_label(code)
        ));
    }
    if let (Some(code), Some(first), Some(last)) = (eu, rank_of(eu, year_min), rank_of(eu, year_max))
    {
        lines.push(format!("- {}: rank {first} -> {last}.", focus.geo_label(code)));
    }
    lines.push(String::from(
        "- Interaction: use the dropdown to switch the country set (Top 10, Top 15 or focus) \
         and the legend to filter manually.",
    ));
    format!("{}\n", lines.join("\n"))
}
