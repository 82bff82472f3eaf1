//! Directory scan and per-file conversion orchestration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use globset::Glob;
use rust_xlsxwriter::Workbook;

use clfkit_report_xlsx::convert_report_to_xlsx;

use crate::logging::{LogLevel, log};
use crate::report::ReportBatch;

/// Input options for one batch run.
#[derive(Debug, Clone)]
pub struct SpecBatchOptions {
    /// Directory scanned for report files.
    pub report_dir: PathBuf,
    /// File-name glob applied to candidate entries.
    pub pattern: String,
    /// Output directory for per-report workbooks; `None` writes alongside inputs.
    pub out_dir: Option<PathBuf>,
    /// Consolidated output workbook path; one sheet per report file.
    pub path_merged: Option<PathBuf>,
    /// Continue past per-file failures instead of aborting.
    pub if_keep_going: bool,
    /// Console verbosity.
    pub level: LogLevel,
}

/// Convert every matching report file under `options.report_dir`.
///
/// Per-file failures are recorded in the returned [`ReportBatch`]; setup
/// failures (bad directory, bad pattern, unwritable output) abort the run.
pub fn run_batch(options: &SpecBatchOptions) -> Result<ReportBatch> {
    let matcher = Glob::new(&options.pattern)
        .with_context(|| format!("Invalid file pattern {:?}", options.pattern))?
        .compile_matcher();

    if !options.report_dir.is_dir() {
        bail!("Report directory not found: {}", options.report_dir.display());
    }
    if let Some(dir_out) = &options.out_dir {
        fs::create_dir_all(dir_out)
            .with_context(|| format!("Failed to create output directory {}", dir_out.display()))?;
    }

    let mut report_batch = ReportBatch::default();
    let mut l_paths_matched = Vec::new();
    let iter_entries = fs::read_dir(&options.report_dir).with_context(|| {
        format!("Failed to read report directory {}", options.report_dir.display())
    })?;
    for entry in iter_entries {
        let path = entry
            .with_context(|| {
                format!("Failed to scan report directory {}", options.report_dir.display())
            })?
            .path();
        report_batch.add_scanned();
        if !path.is_file() {
            continue;
        }
        let Some(c_file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if matcher.is_match(c_file_name) {
            report_batch.add_matched();
            l_paths_matched.push(path);
        }
    }
    l_paths_matched.sort();

    let mut workbook_merged = options.path_merged.as_ref().map(|_| Workbook::new());

    for path_report in &l_paths_matched {
        let result = match workbook_merged.as_mut() {
            Some(workbook) => convert_into_workbook(workbook, path_report),
            None => convert_to_own_workbook(path_report, options.out_dir.as_deref()),
        };
        match result {
            Ok(c_sheet_name) => {
                report_batch.add_converted();
                log(
                    options.level,
                    LogLevel::Verbose,
                    &format!("converted {} -> sheet {c_sheet_name:?}", path_report.display()),
                );
            }
            Err(err) => {
                report_batch.add_error(path_report.clone(), format!("{err:#}"));
                log(
                    options.level,
                    LogLevel::Normal,
                    &format!("failed {}: {err:#}", path_report.display()),
                );
                if !options.if_keep_going {
                    break;
                }
            }
        }
    }

    if let Some(path_merged) = &options.path_merged
        && let Some(mut workbook) = workbook_merged
    {
        if report_batch.error_count() > 0 && !options.if_keep_going {
            report_batch.add_warning(format!(
                "Batch aborted; merged workbook not written: {}",
                path_merged.display()
            ));
        } else if report_batch.cnt_converted == 0 {
            report_batch
                .add_warning("No report converted; merged workbook not written.".to_string());
        } else {
            workbook.save(path_merged).with_context(|| {
                format!("Failed to save merged workbook {}", path_merged.display())
            })?;
            log(
                options.level,
                LogLevel::Verbose,
                &format!("saved merged workbook {}", path_merged.display()),
            );
        }
    }

    Ok(report_batch)
}

fn convert_into_workbook(workbook: &mut Workbook, path_report: &Path) -> Result<String> {
    let value = read_report_value(path_report)?;
    let summary = convert_report_to_xlsx(workbook, &value, &derive_sheet_name(path_report))?;
    Ok(summary.sheet_name)
}

fn convert_to_own_workbook(path_report: &Path, dir_out: Option<&Path>) -> Result<String> {
    let value = read_report_value(path_report)?;
    let mut workbook = Workbook::new();
    let summary = convert_report_to_xlsx(&mut workbook, &value, &derive_sheet_name(path_report))?;

    let path_out = derive_output_path(path_report, dir_out);
    workbook
        .save(&path_out)
        .with_context(|| format!("Failed to save workbook {}", path_out.display()))?;
    Ok(summary.sheet_name)
}

fn read_report_value(path_report: &Path) -> Result<serde_json::Value> {
    let c_text = fs::read_to_string(path_report)
        .with_context(|| format!("Failed to read {}", path_report.display()))?;
    let value = serde_json::from_str(&c_text)
        .with_context(|| format!("Failed to parse JSON report {}", path_report.display()))?;
    Ok(value)
}

/// Sheet name from the input file stem; sanitization happens in the kernel.
fn derive_sheet_name(path_report: &Path) -> String {
    path_report
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("report")
        .to_string()
}

/// Output workbook path: `<stem>.xlsx` under `dir_out` or the input's directory.
fn derive_output_path(path_report: &Path, dir_out: Option<&Path>) -> PathBuf {
    let c_stem = path_report
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("report");
    let dir_base = match dir_out {
        Some(dir) => dir.to_path_buf(),
        None => path_report.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir_base.join(format!("{c_stem}.xlsx"))
}
