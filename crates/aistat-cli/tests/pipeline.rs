use std::fs;
use std::path::PathBuf;

use aistat_cli::pipeline::{self, StageStatus};
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

/// A downloaded dataset small enough to read: adoption series for four
/// geographies over two years, a sector breakdown and a technology
/// cross-section for the focus country, plus one row with a missing
/// value that the clean stage drops.
const RAW_CSV: &str = "\
freq,unit,indic_is,nace_r2,size_emp,geo,TIME_PERIOD,OBS_VALUE\n\
A,PC_ENT,E_AI_TANY,C10-S951_X_K,GE10,EU27_2020,2023,30.0\n\
A,PC_ENT,E_AI_TANY,C10-S951_X_K,GE10,EU27_2020,2024,33.9\n\
A,PC_ENT,E_AI_TANY,C10-S951_X_K,GE10,ES,2023,25.0\n\
A,PC_ENT,E_AI_TANY,C10-S951_X_K,GE10,ES,2024,27.2\n\
A,PC_ENT,E_AI_TANY,C10-S951_X_K,GE10,DE,2023,18.0\n\
A,PC_ENT,E_AI_TANY,C10-S951_X_K,GE10,DE,2024,19.5\n\
A,PC_ENT,E_AI_TANY,C10-S951_X_K,GE10,AT,2023,40.0\n\
A,PC_ENT,E_AI_TANY,C10-S951_X_K,GE10,AT,2024,45.4\n\
A,PC_ENT,E_AI_TANY,C10-C18,GE10,ES,2024,9.1\n\
A,PC_ENT,E_AI_TANY,J,GE10,ES,2024,55.0\n\
A,PC_ENT,E_AI_TML,C10-S951_X_K,GE10,ES,2024,12.3\n\
A,PC_ENT,E_AI_TTM,C10-S951_X_K,GE10,ES,2024,8.4\n\
A,PC_ENT,E_AI_TML,C10-S951_X_K,GE10,EU27_2020,2024,14.0\n\
A,PC_ENT,E_AI_TANY,C10-S951_X_K,GE10,FR,2024,:\n";

fn seed_raw(paths: &DataPaths) {
    fs::create_dir_all(paths.raw_dir()).expect("create raw dir");
    fs::write(paths.raw_csv(), RAW_CSV).expect("write raw csv");
}

#[test]
fn full_run_from_existing_download_produces_every_artifact() {
    let root = temp_root("aistat_pipeline_full");
    let paths = DataPaths::new(&root);
    seed_raw(&paths);

    let summary = pipeline::run_all(&paths, "ES", true);

    assert!(!summary.has_failure());
    let statuses: Vec<StageStatus> = summary.stages.iter().map(|stage| stage.status).collect();
    assert_eq!(
        statuses,
        [
            StageStatus::Skipped,
            StageStatus::Ok,
            StageStatus::Ok,
            StageStatus::Ok,
            StageStatus::Ok,
            StageStatus::Ok,
        ]
    );

    assert_eq!(summary.stages[0].detail, "using existing raw download");
    assert_eq!(summary.stages[1].detail, "13 of 14 rows kept");
    assert_eq!(summary.stages[2].detail, "5 dimensions, 13 rows");
    assert_eq!(summary.stages[3].detail, "5 tables, years 2023-2024");
    assert_eq!(summary.stages[4].detail, "3 views");
    assert_eq!(summary.stages[5].detail, "6 fragments");

    // Clean and profile artifacts.
    assert!(paths.clean_csv().exists());
    assert!(paths.clean_report().exists());
    assert!(paths.profile_report().exists());
    assert!(paths.profile_counts_csv("geo").exists());

    // Derived tables.
    assert!(paths.adoption_series_csv().exists());
    assert!(paths.adoption_top15_csv().exists());
    assert!(paths.adoption_rank_csv().exists());
    assert!(paths.sectors_focus_csv().exists());
    assert!(paths.tech_focus_csv().exists());
    assert!(paths.tables_report().exists());

    // Chart views with their fallbacks.
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
        assert!(charts.join(name).exists(), "missing chart artifact {name}");
    }

    // Embeddable fragments.
    let embed = paths.embed_dir();
    for name in [
        "view1_table.html",
        "view1_summary.html",
        "view2_table.html",
        "view2_summary.html",
        "view3_table.html",
        "view3_summary.html",
    ] {
        assert!(embed.join(name).exists(), "missing fragment {name}");
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn failure_skips_the_remaining_stages() {
    let root = temp_root("aistat_pipeline_failure");
    let paths = DataPaths::new(&root);
    // No raw file seeded, so the clean stage fails immediately.

    let summary = pipeline::run_all(&paths, "ES", true);

    assert!(summary.has_failure());
    let statuses: Vec<StageStatus> = summary.stages.iter().map(|stage| stage.status).collect();
    assert_eq!(
        statuses,
        [
            StageStatus::Skipped,
            StageStatus::Failed,
            StageStatus::Skipped,
            StageStatus::Skipped,
            StageStatus::Skipped,
            StageStatus::Skipped,
        ]
    );

    for stage in &summary.stages[2..] {
        assert_eq!(stage.detail, "previous stage failed");
        assert_eq!(stage.duration, std::time::Duration::ZERO);
    }
    assert!(
        summary.stages[1].detail.contains("eurostat_ai.csv"),
        "clean failure should name the missing file: {}",
        summary.stages[1].detail
    );

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn single_stage_failure_carries_the_error_chain() {
    let root = temp_root("aistat_pipeline_single");
    let paths = DataPaths::new(&root);

    let result = pipeline::execute(pipeline::Stage::Tables, &paths, "ES");
    assert_eq!(result.status, StageStatus::Failed);
    assert!(
        result.detail.contains("ai_clean.csv"),
        "tables failure should name the missing input: {}",
        result.detail
    );

    let _ = fs::remove_dir_all(&root);
}
