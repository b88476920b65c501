use std::fs;
use std::path::PathBuf;

use aistat_model::DataPaths;
use aistat_report::ReportError;
use serde_json::{Value, json};

fn temp_root(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{prefix}_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_tables(paths: &DataPaths, series: &str, top15: &str, ranks: &str) {
    fs::create_dir_all(paths.outputs_dir()).expect("create outputs dir");
    fs::write(paths.adoption_series_csv(), series).expect("write series");
    fs::write(paths.adoption_top15_csv(), top15).expect("write top15");
    fs::write(paths.adoption_rank_csv(), ranks).expect("write ranks");
}

/// The JSON document assigned to `figure` inside a rendered page.
fn figure_json(page: &str) -> Value {
    let marker = "var figure = ";
    let start = page.find(marker).expect("figure assignment") + marker.len();
    let end = start + page[start..].find(";\n").expect("statement end");
    serde_json::from_str(&page[start..end]).expect("figure json")
}

const SERIES: &str = "\
geo,year,value
EU27_2020,2023,30.0
EU27_2020,2024,33.9
ES,2023,25.0
ES,2024,27.2
DE,2023,35.0
DE,2024,36.7
AT,2023,38.0
AT,2024,45.4
";

const TOP15: &str = "\
geo,year,value
AT,2024,45.4
DE,2024,36.7
EU27_2020,2024,33.9
ES,2024,27.2
";

const RANKS: &str = "\
geo,year,value,rank
EU27_2020,2023,30.0,3
EU27_2020,2024,33.9,3
ES,2023,25.0,4
ES,2024,27.2,4
DE,2023,35.0,2
DE,2024,36.7,2
AT,2023,38.0,1
AT,2024,45.4,1
";

#[test]
fn renders_all_three_views_with_fallbacks() {
    let root = temp_root("aistat_charts_full");
    let paths = DataPaths::new(&root);
    write_tables(&paths, SERIES, TOP15, RANKS);

    let report = aistat_report::charts::run(&paths, "ES").expect("render charts");
    let names: Vec<&str> = report.views.iter().map(|view| view.name).collect();
    assert_eq!(names, vec!["view1", "view2", "view3"]);
    let rows: Vec<usize> = report.views.iter().map(|view| view.table_rows).collect();
    assert_eq!(rows, vec![4, 6, 8]);

    let charts = paths.charts_dir();
    for name in [
        "view1_top15_last_year_interactive.html",
        "view1_table.csv",
        "view1_summary.txt",
        "view2_trend_focus_interactive.html",
        "view2_table.csv",
        "view2_summary.txt",
        "view3_bump_ranking_interactive.html",
        "view3_table.csv",
        "view3_summary.txt",
    ] {
        assert!(charts.join(name).exists(), "missing artifact {name}");
    }
}

#[test]
fn top15_view_orders_bars_and_summarizes_the_gap() {
    let root = temp_root("aistat_charts_view1");
    let paths = DataPaths::new(&root);
    write_tables(&paths, SERIES, TOP15, RANKS);

    aistat_report::charts::run(&paths, "ES").expect("render charts");
    let charts = paths.charts_dir();

    let table = fs::read_to_string(charts.join("view1_table.csv")).expect("table");
    assert_eq!(
        table,
        "geo,geo_label,year,value\n\
         ES,ES (Spain),2024,27.2\n\
         EU27_2020,EU27_2020 (EU-27),2024,33.9\n\
         DE,DE,2024,36.7\n\
         AT,AT,2024,45.4\n"
    );

    let summary = fs::read_to_string(charts.join("view1_summary.txt")).expect("summary");
    insta::assert_snapshot!(summary, @r"
    View 1 (Top 15, 2024)
    - Leader (all available geographies): AT with 45.4%.
    - ES (Spain): 27.2%.
    - EU27_2020 (EU-27): 33.9%.
    - Gap ES vs EU: -6.7 percentage points.
    - Rank of ES in 2024: 4.
    - Interaction: use the menu to reorder the bars.
    ");

    let page = fs::read_to_string(charts.join("view1_top15_last_year_interactive.html"))
        .expect("page");
    assert!(page.contains("https://cdn.plot.ly/plotly-2.32.0.min.js"));
    assert!(page.contains("Plotly.newPlot"));
    assert!(page.contains(r#"<a href="view1_table.csv">Plotted data as CSV</a>"#));

    let figure = figure_json(&page);
    assert_eq!(figure["data"][0]["type"], "bar");
    assert_eq!(
        figure["layout"]["yaxis"]["categoryarray"],
        json!(["ES (Spain)", "EU27_2020 (EU-27)", "DE", "AT"])
    );
    // Focus country red, EU aggregate orange, everyone else the base blue.
    assert_eq!(
        figure["data"][0]["marker"]["color"],
        json!(["#d62728", "#ff7f0e", "#1f77b4", "#1f77b4"])
    );
    let buttons = figure["layout"]["updatemenus"][0]["buttons"]
        .as_array()
        .expect("sort buttons");
    assert_eq!(buttons.len(), 3);
    assert_eq!(buttons[2]["label"], "By name");
    assert_eq!(
        buttons[2]["args"][0]["yaxis.categoryarray"],
        json!(["AT", "DE", "ES (Spain)", "EU27_2020 (EU-27)"])
    );
}

#[test]
fn trend_view_isolates_focus_countries() {
    let root = temp_root("aistat_charts_view2");
    let paths = DataPaths::new(&root);
    write_tables(&paths, SERIES, TOP15, RANKS);

    aistat_report::charts::run(&paths, "ES").expect("render charts");
    let charts = paths.charts_dir();

    // AT is not a focus geography, so its rows stay out of the mirror.
    let table = fs::read_to_string(charts.join("view2_table.csv")).expect("table");
    assert_eq!(
        table,
        "geo,geo_label,year,value\n\
         EU27_2020,EU27_2020 (EU-27),2023,30.0\n\
         EU27_2020,EU27_2020 (EU-27),2024,33.9\n\
         ES,ES (Spain),2023,25.0\n\
         ES,ES (Spain),2024,27.2\n\
         DE,DE,2023,35.0\n\
         DE,DE,2024,36.7\n"
    );

    let summary = fs::read_to_string(charts.join("view2_summary.txt")).expect("summary");
    insta::assert_snapshot!(summary, @r"
    View 2 (Trend, 2023-2024)
    - ES (Spain): 25.0% -> 27.2% (+2.2 p.p.).
    - EU27_2020 (EU-27): 30.0% -> 33.9% (+3.9 p.p.).
    - Gap ES vs EU: -5.0 p.p. -> -6.7 p.p. (change: -1.7 p.p.).
    - Interaction: use the dropdown to isolate a country or the legend to hide/show series.
    ");

    let page = fs::read_to_string(charts.join("view2_trend_focus_interactive.html"))
        .expect("page");
    let figure = figure_json(&page);
    let traces = figure["data"].as_array().expect("traces");
    let names: Vec<&str> = traces
        .iter()
        .map(|trace| trace["name"].as_str().expect("trace name"))
        .collect();
    assert_eq!(names, vec!["DE", "ES (Spain)", "EU27_2020 (EU-27)"]);

    let menus = figure["layout"]["updatemenus"].as_array().expect("menus");
    let dropdown = menus[0]["buttons"].as_array().expect("dropdown buttons");
    assert_eq!(dropdown.len(), 4);
    assert_eq!(dropdown[0]["label"], "All");
    assert_eq!(dropdown[1]["args"][0]["visible"], json!([true, false, false]));
    assert_eq!(menus[1]["buttons"][0]["label"], "Reset (show all)");
}

#[test]
fn ranking_view_reverses_the_axis_and_tracks_ranks() {
    let root = temp_root("aistat_charts_view3");
    let paths = DataPaths::new(&root);
    write_tables(&paths, SERIES, TOP15, RANKS);

    aistat_report::charts::run(&paths, "ES").expect("render charts");
    let charts = paths.charts_dir();

    let table = fs::read_to_string(charts.join("view3_table.csv")).expect("table");
    assert_eq!(
        table,
        "geo,geo_label,year,value,rank\n\
         EU27_2020,EU27_2020 (EU-27),2023,30.0,3\n\
         EU27_2020,EU27_2020 (EU-27),2024,33.9,3\n\
         ES,ES (Spain),2023,25.0,4\n\
         ES,ES (Spain),2024,27.2,4\n\
         DE,DE,2023,35.0,2\n\
         DE,DE,2024,36.7,2\n\
         AT,AT,2023,38.0,1\n\
         AT,AT,2024,45.4,1\n"
    );

    let summary = fs::read_to_string(charts.join("view3_summary.txt")).expect("summary");
    insta::assert_snapshot!(summary, @r"
    View 3 (Ranking / bump, 2023-2024)
    - ES (Spain): rank 4 -> 4 (lower is better).
    - EU27_2020 (EU-27): rank 3 -> 3.
    - Interaction: use the dropdown to switch the country set (Top 10, Top 15 or focus) and the legend to filter manually.
    ");

    let page = fs::read_to_string(charts.join("view3_bump_ranking_interactive.html"))
        .expect("page");
    let figure = figure_json(&page);
    assert_eq!(figure["layout"]["yaxis"]["autorange"], "reversed");
    let dropdown = figure["layout"]["updatemenus"][0]["buttons"]
        .as_array()
        .expect("set buttons");
    assert_eq!(dropdown.len(), 3);
    assert_eq!(dropdown[0]["label"], "Top 10 (latest year)");
    // Four countries in play, so the top-10 set covers every trace.
    assert_eq!(
        dropdown[0]["args"][0]["visible"],
        json!([true, true, true, true])
    );
    assert_eq!(
        figure["layout"]["updatemenus"][1]["buttons"][0]["label"],
        "Reset (Top 15)"
    );
}

#[test]
fn empty_top15_table_is_rejected() {
    let root = temp_root("aistat_charts_empty");
    let paths = DataPaths::new(&root);
    write_tables(&paths, SERIES, "geo,year,value\n", RANKS);

    let err = aistat_report::charts::run(&paths, "ES").expect_err("empty table");
    assert!(matches!(err, ReportError::EmptyTable { .. }));
}

#[test]
fn missing_series_table_names_the_file() {
    let root = temp_root("aistat_charts_missing");
    let paths = DataPaths::new(&root);
    fs::create_dir_all(paths.outputs_dir()).expect("create outputs dir");

    let err = aistat_report::charts::run(&paths, "ES").expect_err("missing input");
    assert!(err.to_string().contains("adoption_country_year.csv"));
}
