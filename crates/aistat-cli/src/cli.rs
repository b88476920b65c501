//! CLI argument definitions for the pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "aistat",
    version,
    about = "Eurostat AI adoption statistics - download, clean, summarize, visualize",
    long_about = "Build the AI adoption analysis from the Eurostat enterprise survey.\n\n\
                  Downloads the dataset over the SDMX 3.0 API, cleans it into an\n\
                  annual percentage series, derives summary tables and renders\n\
                  interactive chart views with accessible CSV and text fallbacks."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Root directory holding data/ and outputs/.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Geo code of the country highlighted in tables and charts.
    #[arg(long = "focus", value_name = "GEO", default_value = "ES", global = true)]
    pub focus: String,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download the raw dataset from the Eurostat SDMX API.
    Download,

    /// Clean the raw download into a tidy annual percentage series.
    Clean,

    /// Profile the cleaned dataset dimension by dimension.
    Profile,

    /// Derive the summary tables from the cleaned dataset.
    Tables,

    /// Render the interactive chart views with CSV and text fallbacks.
    Charts,

    /// Convert the chart fallbacks into embeddable HTML fragments.
    Export,

    /// Run every stage in order and print a summary table.
    Run(RunArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Start from the raw file already on disk instead of downloading.
    #[arg(long = "skip-download")]
    pub skip_download: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
