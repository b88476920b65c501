//! Pipeline stages in run order, with per-stage outcomes for the summary.
//!
//! Each stage wraps one crate entry point and reduces its report to a
//! one-line detail string. [`run_all`] executes the stages in sequence
//! and stops advancing after the first failure; later stages are
//! recorded as skipped so the summary table still lists all six.

use std::fmt;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{error, info, info_span};

use aistat_fetch::{PollSettings, ReqwestTransport};
use aistat_model::DataPaths;

/// The six pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Download,
    Clean,
    Profile,
    Tables,
    Charts,
    Export,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Download,
        Stage::Clean,
        Stage::Profile,
        Stage::Tables,
        Stage::Charts,
        Stage::Export,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Download => "download",
            Stage::Clean => "clean",
            Stage::Profile => "profile",
            Stage::Tables => "tables",
            Stage::Charts => "charts",
            Stage::Export => "export",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Ok,
    Skipped,
    Failed,
}

/// Outcome of one stage: headline counts on success, the error chain on
/// failure, the skip reason otherwise.
#[derive(Debug)]
pub struct StageResult {
    pub stage: Stage,
    pub status: StageStatus,
    pub detail: String,
    pub duration: Duration,
}

impl StageResult {
    fn skipped(stage: Stage, reason: &str) -> Self {
        Self {
            stage,
            status: StageStatus::Skipped,
            detail: reason.to_string(),
            duration: Duration::ZERO,
        }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub stages: Vec<StageResult>,
}

impl RunSummary {
    pub fn has_failure(&self) -> bool {
        self.stages
            .iter()
            .any(|stage| stage.status == StageStatus::Failed)
    }
}

/// Run every stage in order. After a failure the remaining stages are
/// skipped; with `skip_download` the pipeline starts from the raw file
/// already on disk.
pub fn run_all(paths: &DataPaths, focus: &str, skip_download: bool) -> RunSummary {
    let mut stages = Vec::with_capacity(Stage::ALL.len());
    let mut failed = false;

    for stage in Stage::ALL {
        if failed {
            stages.push(StageResult::skipped(stage, "previous stage failed"));
            continue;
        }
        if stage == Stage::Download && skip_download {
            info!("download skipped, reusing the raw file on disk");
            stages.push(StageResult::skipped(stage, "using existing raw download"));
            continue;
        }

        let result = execute(stage, paths, focus);
        failed = result.status == StageStatus::Failed;
        stages.push(result);
    }

    RunSummary { stages }
}

/// Run a single stage and time it.
pub fn execute(stage: Stage, paths: &DataPaths, focus: &str) -> StageResult {
    let span = info_span!("stage", name = %stage);
    let _guard = span.enter();

    let started = Instant::now();
    let outcome = match stage {
        Stage::Download => run_download(paths),
        Stage::Clean => run_clean(paths),
        Stage::Profile => run_profile(paths),
        Stage::Tables => run_tables(paths, focus),
        Stage::Charts => run_charts(paths, focus),
        Stage::Export => run_export(paths),
    };
    let duration = started.elapsed();

    match outcome {
        Ok(detail) => {
            info!(duration_ms = duration.as_millis() as u64, %detail, "stage finished");
            StageResult {
                stage,
                status: StageStatus::Ok,
                detail,
                duration,
            }
        }
        Err(source) => {
            let detail = format!("{source:#}");
            error!(duration_ms = duration.as_millis() as u64, error = %detail, "stage failed");
            StageResult {
                stage,
                status: StageStatus::Failed,
                detail,
                duration,
            }
        }
    }
}

fn run_download(paths: &DataPaths) -> Result<String> {
    let transport = ReqwestTransport::new().context("build HTTP client")?;
    let report = aistat_fetch::download::run(paths, &transport, &PollSettings::default())?;
    Ok(format!("{} ({} bytes)", report.dataflow, report.bytes))
}

fn run_clean(paths: &DataPaths) -> Result<String> {
    let report = aistat_clean::run(paths)?;
    Ok(format!("{} of {} rows kept", report.rows_out, report.rows_in))
}

fn run_profile(paths: &DataPaths) -> Result<String> {
    let report = aistat_tables::profile::run(paths)?;
    Ok(format!(
        "{} dimensions, {} rows",
        report.dimensions.len(),
        report.rows
    ))
}

fn run_tables(paths: &DataPaths, focus: &str) -> Result<String> {
    let report = aistat_tables::build::run(paths, focus)?;
    let (year_min, year_max) = report.year_range;
    let tables = if report.sector_rows.is_some() { 5 } else { 4 };
    Ok(format!("{tables} tables, years {year_min}-{year_max}"))
}

fn run_charts(paths: &DataPaths, focus: &str) -> Result<String> {
    let report = aistat_report::charts::run(paths, focus)?;
    Ok(format!("{} views", report.views.len()))
}

fn run_export(paths: &DataPaths) -> Result<String> {
    let report = aistat_report::embed::run(paths)?;
    if report.skipped.is_empty() {
        Ok(format!("{} fragments", report.written.len()))
    } else {
        Ok(format!(
            "{} fragments, {} inputs missing",
            report.written.len(),
            report.skipped.len()
        ))
    }
}
