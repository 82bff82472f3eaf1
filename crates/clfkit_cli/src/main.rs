//! `clfkit` batch driver:
//! converts a directory of classification-report JSON files into formatted
//! XLSX workbooks.

mod batch;
mod logging;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::batch::{SpecBatchOptions, run_batch};
use crate::logging::{LogLevel, log};

/// Convert classification-report JSON files into formatted XLSX workbooks.
#[derive(Parser, Debug)]
#[command(name = "clfkit", version, about)]
struct Cli {
    /// Directory containing report files.
    report_dir: PathBuf,

    /// File-name glob for report files.
    #[arg(long, default_value = "*.json")]
    pattern: String,

    /// Directory for per-report workbooks; defaults to each input's directory.
    #[arg(long, conflicts_with = "merged")]
    out_dir: Option<PathBuf>,

    /// Consolidate all reports into one workbook at this path, one sheet per file.
    #[arg(long)]
    merged: Option<PathBuf>,

    /// Convert remaining files after a failure instead of aborting.
    #[arg(long)]
    keep_going: bool,

    /// Suppress all output.
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print one line per converted file.
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };
    let options = SpecBatchOptions {
        report_dir: cli.report_dir,
        pattern: cli.pattern,
        out_dir: cli.out_dir,
        path_merged: cli.merged,
        if_keep_going: cli.keep_going,
        level,
    };

    match run_batch(&options) {
        Ok(report_batch) => {
            log(level, LogLevel::Normal, &report_batch.to_string());
            if report_batch.error_count() > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
