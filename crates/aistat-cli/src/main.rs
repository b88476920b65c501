//! aistat CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};

use aistat_cli::logging::{LogConfig, LogFormat, init_logging};
use aistat_cli::pipeline::{self, Stage, StageStatus};
use aistat_model::DataPaths;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let paths = DataPaths::new(&cli.data_dir);
    let exit_code = match &cli.command {
        Command::Download => run_stage(Stage::Download, &paths, &cli.focus),
        Command::Clean => run_stage(Stage::Clean, &paths, &cli.focus),
        Command::Profile => run_stage(Stage::Profile, &paths, &cli.focus),
        Command::Tables => run_stage(Stage::Tables, &paths, &cli.focus),
        Command::Charts => run_stage(Stage::Charts, &paths, &cli.focus),
        Command::Export => run_stage(Stage::Export, &paths, &cli.focus),
        Command::Run(args) => {
            let summary = pipeline::run_all(&paths, &cli.focus, args.skip_download);
            print_summary(&summary);
            if summary.has_failure() { 1 } else { 0 }
        }
    };
    std::process::exit(exit_code);
}

fn run_stage(stage: Stage, paths: &DataPaths, focus: &str) -> i32 {
    let result = pipeline::execute(stage, paths, focus);
    match result.status {
        StageStatus::Failed => {
            eprintln!("error: {}", result.detail);
            1
        }
        _ => {
            println!("{}: {}", result.stage, result.detail);
            0
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
