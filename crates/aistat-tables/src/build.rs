//! Derive the five summary tables from the cleaned dataset.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{info, warn};

use aistat_ingest::{ensure_dir, write_rows, write_text};
use aistat_model::{AdoptionRow, DataPaths, FocusConfig, RankRow, SectorRow, TechRow, codes};

use crate::dataset::{CleanDataset, Observation};
use crate::error::{Result, TablesError};
use crate::rank::min_ranks;

/// Row cap shared by the top-country and sector tables.
const TOP_N: usize = 15;

/// What a tables run produced. Rendered into `build_tables_report.txt`;
/// the counts feed the CLI summary.
#[derive(Debug, Clone)]
pub struct TablesReport {
    pub rows_in: usize,
    pub year_range: (i32, i32),
    pub focus: FocusConfig,
    pub series_rows: usize,
    pub top_rows: usize,
    pub rank_rows: usize,
    /// None when the focus country is absent from the data.
    pub sector_rows: Option<usize>,
    pub tech_rows: usize,
}

fn describe(column: &Option<String>) -> &str {
    column.as_deref().unwrap_or("(not detected)")
}

impl TablesReport {
    pub fn render(&self, paths: &DataPaths) -> String {
        let (year_min, year_max) = self.year_range;
        let mut lines: Vec<String> = Vec::new();
        lines.push("TABLES REPORT".to_string());
        lines.push(format!("Input file: {}", paths.clean_csv().display()));
        lines.push(format!("Rows: {}", self.rows_in));
        lines.push(format!("Year range (min/max): {year_min} / {year_max}"));
        lines.push(format!("EU aggregate: {}", describe(&self.focus.eu_code)));
        lines.push(format!("Focus country: {}", describe(&self.focus.country_code)));
        lines.push(format!(
            "Focus geographies: {}",
            self.focus.focus_geos.join(", ")
        ));
        lines.push(String::new());
        lines.push(format!(
            "Adoption series: {} rows -> {}",
            self.series_rows,
            paths.adoption_series_csv().display()
        ));
        lines.push(format!(
            "Top {TOP_N} adoption ({year_max}): {} rows -> {}",
            self.top_rows,
            paths.adoption_top15_csv().display()
        ));
        lines.push(format!(
            "Adoption ranks by year: {} rows -> {}",
            self.rank_rows,
            paths.adoption_rank_csv().display()
        ));
        match self.sector_rows {
            Some(rows) => lines.push(format!(
                "Focus sectors ({year_max}): {rows} rows -> {}",
                paths.sectors_focus_csv().display()
            )),
            None => {
                lines.push("Focus sectors: skipped (focus country not in data)".to_string());
            }
        }
        lines.push(format!(
            "Technology cross-section ({year_max}): {} rows -> {}",
            self.tech_rows,
            paths.tech_focus_csv().display()
        ));
        lines.join("\n") + "\n"
    }
}

/// Descending order with non-finite values last, like the rank treatment
/// in [`min_ranks`].
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Per-year competition ranks over the adoption series, in series order.
fn rank_by_year(series: &[AdoptionRow]) -> Vec<RankRow> {
    let mut by_year: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, row) in series.iter().enumerate() {
        by_year.entry(row.year).or_default().push(idx);
    }

    let mut ranks: Vec<Option<u32>> = vec![None; series.len()];
    for indices in by_year.values() {
        let values: Vec<f64> = indices.iter().map(|idx| series[*idx].value).collect();
        for (pos, rank) in min_ranks(&values).into_iter().enumerate() {
            ranks[indices[pos]] = rank;
        }
    }

    series
        .iter()
        .zip(ranks)
        .map(|(row, rank)| RankRow {
            geo: row.geo.clone(),
            year: row.year,
            value: row.value,
            rank,
        })
        .collect()
}

fn is_tech_indicator(code: &str) -> bool {
    codes::TECH_INDICATORS
        .iter()
        .any(|(candidate, _)| *candidate == code)
}

/// Build the five summary tables plus the tables report.
pub fn run(paths: &DataPaths, focus_country: &str) -> Result<TablesReport> {
    let dataset = CleanDataset::load(&paths.clean_csv())?;
    let (year_min, year_max) = dataset.year_range()?;
    info!(
        rows = dataset.len(),
        year_min, year_max, "building summary tables"
    );

    let focus = FocusConfig::detect_with_country(&dataset.distinct_geos(), focus_country);
    info!(
        eu = describe(&focus.eu_code),
        country = describe(&focus.country_code),
        geos = ?focus.focus_geos,
        "focus geographies detected"
    );

    let slice: Vec<&Observation> = dataset
        .rows()
        .iter()
        .filter(|row| {
            row.indicator == codes::ADOPTION_INDICATOR && row.activity == codes::ACTIVITY_TOTAL
        })
        .collect();
    if slice.is_empty() {
        return Err(TablesError::EmptyAdoptionSlice {
            indicator: codes::ADOPTION_INDICATOR.to_string(),
            activity: codes::ACTIVITY_TOTAL.to_string(),
        });
    }

    ensure_dir(&paths.outputs_dir())?;

    // Table 1: the full adoption series, in input order.
    let series: Vec<AdoptionRow> = slice
        .iter()
        .map(|row| AdoptionRow {
            geo: row.geo.clone(),
            year: row.year,
            value: row.value,
        })
        .collect();
    write_rows(&paths.adoption_series_csv(), &series)?;
    info!(rows = series.len(), "adoption series written");

    // Table 2: leading geographies in the latest year. The sort is stable,
    // so tied values keep their input order.
    let mut top: Vec<AdoptionRow> = series
        .iter()
        .filter(|row| row.year == year_max)
        .cloned()
        .collect();
    top.sort_by(|a, b| descending(a.value, b.value));
    top.truncate(TOP_N);
    write_rows(&paths.adoption_top15_csv(), &top)?;
    info!(rows = top.len(), year = year_max, "top adoption written");

    // Table 3: the series again, with a within-year rank attached.
    let ranks = rank_by_year(&series);
    write_rows(&paths.adoption_rank_csv(), &ranks)?;
    info!(rows = ranks.len(), "adoption ranks written");

    // Table 4: sector breakdown for the focus country in the latest year.
    let sector_rows = match &focus.country_code {
        Some(country) => {
            let mut sectors: Vec<SectorRow> = dataset
                .rows()
                .iter()
                .filter(|row| {
                    row.geo == *country
                        && row.year == year_max
                        && row.indicator == codes::ADOPTION_INDICATOR
                        && row.activity != codes::ACTIVITY_TOTAL
                })
                .map(|row| SectorRow {
                    nace_r2: row.activity.clone(),
                    value: row.value,
                })
                .collect();
            sectors.sort_by(|a, b| descending(a.value, b.value));
            sectors.truncate(TOP_N);
            write_rows(&paths.sectors_focus_csv(), &sectors)?;
            info!(rows = sectors.len(), country = %country, "focus sectors written");
            Some(sectors.len())
        }
        None => {
            warn!(
                country = focus_country,
                "focus country not in data, sector table skipped"
            );
            None
        }
    };

    // Table 5: technology indicators across the focus geographies.
    let tech: Vec<TechRow> = dataset
        .rows()
        .iter()
        .filter(|row| {
            row.year == year_max
                && row.activity == codes::ACTIVITY_TOTAL
                && is_tech_indicator(&row.indicator)
                && (focus.focus_geos.is_empty() || focus.focus_geos.contains(&row.geo))
        })
        .map(|row| TechRow {
            geo: row.geo.clone(),
            indic_is: row.indicator.clone(),
            value: row.value,
            indic_label: codes::tech_label(&row.indicator)
                .unwrap_or(&row.indicator)
                .to_string(),
        })
        .collect();
    write_rows(&paths.tech_focus_csv(), &tech)?;
    info!(rows = tech.len(), "technology cross-section written");

    let report = TablesReport {
        rows_in: dataset.len(),
        year_range: (year_min, year_max),
        focus,
        series_rows: series.len(),
        top_rows: top.len(),
        rank_rows: ranks.len(),
        sector_rows,
        tech_rows: tech.len(),
    };
    write_text(&paths.tables_report(), &report.render(paths))?;

    Ok(report)
}
