use std::fs;
use std::path::PathBuf;

use aistat_model::DataPaths;
use aistat_tables::TablesError;

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

fn write_clean(paths: &DataPaths, contents: &str) {
    fs::create_dir_all(paths.processed_dir()).expect("create processed dir");
    fs::write(paths.clean_csv(), contents).expect("write clean csv");
}

/// Two survey years around one tied latest year, plus sector and
/// technology rows for the focus country.
const FIXTURE: &str = "\
indic_is,nace_r2,size_emp,geo,year,value
E_AI_TANY,C10-S951_X_K,GE10,EU27_2020,2023,10.5
E_AI_TANY,C10-S951_X_K,GE10,EU27_2020,2024,13.5
E_AI_TANY,C10-S951_X_K,GE10,ES,2023,9.5
E_AI_TANY,C10-S951_X_K,GE10,ES,2024,11.5
E_AI_TANY,C10-S951_X_K,GE10,DE,2023,11.5
E_AI_TANY,C10-S951_X_K,GE10,DE,2024,40.0
E_AI_TANY,C10-S951_X_K,GE10,FR,2024,40.0
E_AI_TANY,C10-S951_X_K,GE10,IT,2024,38.0
E_AI_TANY,C10-S951_X_K,GE250,ES,2024,30.0
E_AI_TANY,C10,GE10,ES,2024,22.0
E_AI_TANY,J,GE10,ES,2024,55.5
E_AI_TANY,M,GE10,ES,2024,33.0
E_AI_TML,C10-S951_X_K,GE10,ES,2024,6.5
E_AI_TTM,C10-S951_X_K,GE10,EU27_2020,2024,4.5
E_AI_TML,C10-S951_X_K,GE10,XX,2024,9.9
E_AI_TXX,C10-S951_X_K,GE10,ES,2024,1.0
E_AI_TML,C10-S951_X_K,GE10,ES,2023,5.0
";

#[test]
fn builds_all_five_tables() {
    let root = temp_root("aistat_tables_full");
    let paths = DataPaths::new(&root);
    write_clean(&paths, FIXTURE);

    let report = aistat_tables::build::run(&paths, "ES").expect("build tables");
    assert_eq!(report.rows_in, 17);
    assert_eq!(report.year_range, (2023, 2024));
    assert_eq!(report.focus.eu_code.as_deref(), Some("EU27_2020"));
    assert_eq!(
        report.focus.focus_geos,
        vec!["EU27_2020", "ES", "DE", "FR", "IT"]
    );
    assert_eq!(report.series_rows, 9);
    assert_eq!(report.top_rows, 6);
    assert_eq!(report.rank_rows, 9);
    assert_eq!(report.sector_rows, Some(3));
    assert_eq!(report.tech_rows, 2);

    // The series keeps every size class and the input row order.
    let series = fs::read_to_string(paths.adoption_series_csv()).expect("series");
    assert_eq!(
        series,
        "geo,year,value\n\
         EU27_2020,2023,10.5\n\
         EU27_2020,2024,13.5\n\
         ES,2023,9.5\n\
         ES,2024,11.5\n\
         DE,2023,11.5\n\
         DE,2024,40.0\n\
         FR,2024,40.0\n\
         IT,2024,38.0\n\
         ES,2024,30.0\n"
    );

    // Tied leaders keep their input order under the stable sort.
    let top = fs::read_to_string(paths.adoption_top15_csv()).expect("top");
    assert_eq!(
        top,
        "geo,year,value\n\
         DE,2024,40.0\n\
         FR,2024,40.0\n\
         IT,2024,38.0\n\
         ES,2024,30.0\n\
         EU27_2020,2024,13.5\n\
         ES,2024,11.5\n"
    );

    // Tied values share rank 1 and the next value lands at rank 3.
    let rank = fs::read_to_string(paths.adoption_rank_csv()).expect("rank");
    assert_eq!(
        rank,
        "geo,year,value,rank\n\
         EU27_2020,2023,10.5,2\n\
         EU27_2020,2024,13.5,5\n\
         ES,2023,9.5,3\n\
         ES,2024,11.5,6\n\
         DE,2023,11.5,1\n\
         DE,2024,40.0,1\n\
         FR,2024,40.0,1\n\
         IT,2024,38.0,3\n\
         ES,2024,30.0,4\n"
    );

    let sectors = fs::read_to_string(paths.sectors_focus_csv()).expect("sectors");
    assert_eq!(
        sectors,
        "nace_r2,value\nJ,55.5\nM,33.0\nC10,22.0\n"
    );

    // Only focus geographies and known technology codes survive.
    let tech = fs::read_to_string(paths.tech_focus_csv()).expect("tech");
    assert_eq!(
        tech,
        "geo,indic_is,value,indic_label\n\
         ES,E_AI_TML,6.5,Machine learning\n\
         EU27_2020,E_AI_TTM,4.5,Text mining\n"
    );

    let rendered = fs::read_to_string(paths.tables_report()).expect("report");
    assert!(rendered.contains("Focus geographies: EU27_2020, ES, DE, FR, IT"));
    assert!(rendered.contains("Top 15 adoption (2024): 6 rows"));
}

#[test]
fn top_table_caps_at_fifteen_rows() {
    let root = temp_root("aistat_tables_top15");
    let paths = DataPaths::new(&root);
    let mut contents = String::from("indic_is,nace_r2,size_emp,geo,year,value\n");
    for i in 1..=18 {
        contents.push_str(&format!("E_AI_TANY,C10-S951_X_K,GE10,G{i:02},2024,{i}.0\n"));
    }
    write_clean(&paths, &contents);

    let report = aistat_tables::build::run(&paths, "ES").expect("build tables");
    assert_eq!(report.top_rows, 15);
    assert_eq!(report.sector_rows, None);
    assert!(!paths.sectors_focus_csv().exists());

    let top = fs::read_to_string(paths.adoption_top15_csv()).expect("top");
    let lines: Vec<&str> = top.lines().collect();
    assert_eq!(lines.len(), 16);
    assert_eq!(lines[1], "G18,2024,18.0");
    assert_eq!(lines[15], "G04,2024,4.0");

    let rendered = fs::read_to_string(paths.tables_report()).expect("report");
    assert!(rendered.contains("Focus sectors: skipped (focus country not in data)"));
}

#[test]
fn fails_when_adoption_slice_is_empty() {
    let root = temp_root("aistat_tables_empty_slice");
    let paths = DataPaths::new(&root);
    write_clean(
        &paths,
        "indic_is,nace_r2,size_emp,geo,year,value\n\
         E_AI_TANY,J,GE10,ES,2024,55.5\n\
         E_AI_TML,C10-S951_X_K,GE10,ES,2024,6.5\n",
    );

    let err = aistat_tables::build::run(&paths, "ES").unwrap_err();
    assert!(matches!(err, TablesError::EmptyAdoptionSlice { .. }));
}
