use std::fs;
use std::path::PathBuf;

use aistat_clean::CleanError;
use aistat_model::DataPaths;

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

fn write_raw(paths: &DataPaths, contents: &str) {
    fs::create_dir_all(paths.raw_dir()).expect("create raw dir");
    fs::write(paths.raw_csv(), contents).expect("write raw csv");
}

#[test]
fn cleans_annual_percentage_row() {
    let root = temp_root("aistat_clean_scenario");
    let paths = DataPaths::new(&root);
    write_raw(&paths, "TIME_PERIOD,OBS_VALUE,geo,freq,unit\n2023,\"12,5\",ES,A,PC\n");

    let report = aistat_clean::run(&paths).expect("clean");
    assert_eq!(report.rows_in, 1);
    assert_eq!(report.rows_out, 1);
    assert_eq!(report.columns.time, "time_period");
    assert_eq!(report.columns.value, "obs_value");
    assert_eq!(report.year_range, Some((2023, 2023)));

    let cleaned = fs::read_to_string(paths.clean_csv()).expect("read cleaned");
    assert_eq!(cleaned, "geo,freq,unit,year,value\nES,A,PC,2023,12.5\n");

    let rendered = fs::read_to_string(paths.clean_report()).expect("read report");
    assert!(rendered.contains("Filter applied on 'freq': 1 -> 1"));
    assert!(rendered.contains("(unit: PC)"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn drops_rows_without_year_or_value() {
    let root = temp_root("aistat_clean_drop");
    let paths = DataPaths::new(&root);
    write_raw(
        &paths,
        "time_period,obs_value,geo\n\
         2021,10.0,ES\n\
         2022,:,ES\n\
         20,5.0,DE\n\
         2023,\"7,5\",DE\n",
    );

    let report = aistat_clean::run(&paths).expect("clean");
    assert_eq!(report.rows_in, 4);
    assert_eq!(report.rows_out, 2);
    assert!(report.rows_out <= report.rows_in);
    assert_eq!(report.year_range, Some((2021, 2023)));
    assert_eq!(report.distinct_geos, Some(2));

    let cleaned = fs::read_to_string(paths.clean_csv()).expect("read cleaned");
    assert_eq!(cleaned, "geo,year,value\nES,2021,10\nDE,2023,7.5\n");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn unit_fallback_skips_filter_with_note() {
    let root = temp_root("aistat_clean_unit");
    let paths = DataPaths::new(&root);
    write_raw(
        &paths,
        "time_period,obs_value,geo,unit\n2023,10.0,ES,EUR\n2023,11.0,DE,EUR\n",
    );

    let report = aistat_clean::run(&paths).expect("clean");
    assert_eq!(report.rows_out, 2);
    assert!(
        report
            .notes
            .iter()
            .any(|note| note.contains("Unit filter skipped"))
    );

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn fails_without_numeric_value_column() {
    let root = temp_root("aistat_clean_novalue");
    let paths = DataPaths::new(&root);
    write_raw(&paths, "time_period,geo\n2023,ES\n2024,DE\n");

    let err = aistat_clean::run(&paths).expect_err("no value column");
    assert!(matches!(err, CleanError::NoValueColumn));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn missing_raw_file_is_an_ingest_error() {
    let root = temp_root("aistat_clean_missing");
    let paths = DataPaths::new(&root);

    let err = aistat_clean::run(&paths).expect_err("missing input");
    assert!(matches!(err, CleanError::Ingest(_)));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn case_insensitive_headers_detected_in_priority_order() {
    let root = temp_root("aistat_clean_case");
    let paths = DataPaths::new(&root);
    write_raw(
        &paths,
        "  Time  ,Year,OBS_VALUE,GEO\n2021-S1,ignored,4.0,ES\n",
    );

    let report = aistat_clean::run(&paths).expect("clean");
    assert_eq!(report.columns.time, "time");
    assert_eq!(report.columns.geo.as_deref(), Some("geo"));

    // The raw "year" column is superseded by the derived one.
    let cleaned = fs::read_to_string(paths.clean_csv()).expect("read cleaned");
    assert_eq!(cleaned, "geo,year,value\nES,2021,4\n");

    let _ = fs::remove_dir_all(&root);
}
