//! Batch run-report model.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// One conversion failure with path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecBatchError {
    /// Report file that failed.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// Aggregate counters and diagnostics for one batch run.
#[derive(Debug, Default, Clone)]
pub struct ReportBatch {
    /// Total scanned directory entries.
    pub cnt_scanned: u64,
    /// Entries matching the file pattern.
    pub cnt_matched: u64,
    /// Successfully converted report files.
    pub cnt_converted: u64,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
    /// Per-file failures.
    pub errors: Vec<SpecBatchError>,
}

impl ReportBatch {
    /// Number of collected hard errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Matched files neither converted nor failed (left behind by an abort).
    pub fn skipped_count(&self) -> u64 {
        self.cnt_matched
            .saturating_sub(self.cnt_converted)
            .saturating_sub(self.errors.len() as u64)
    }

    /// Increment scanned count by one.
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    /// Increment matched count by one.
    pub fn add_matched(&mut self) {
        self.cnt_matched += 1;
    }

    /// Increment converted count by one.
    pub fn add_converted(&mut self) {
        self.cnt_converted += 1;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Add one path-scoped error.
    pub fn add_error(&mut self, path: PathBuf, exception: String) {
        self.errors.push(SpecBatchError { path, exception });
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_matched".to_string(), self.cnt_matched);
        dict_counts.insert("cnt_converted".to_string(), self.cnt_converted);
        dict_counts.insert("cnt_skipped".to_string(), self.skipped_count());
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} scanned={} matched={} converted={} skipped={} errors={} warnings={}",
            dict_counts["cnt_scanned"],
            dict_counts["cnt_matched"],
            dict_counts["cnt_converted"],
            dict_counts["cnt_skipped"],
            dict_counts["cnt_errors"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[XLSX]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_batch_counters_and_one_line_summary() {
        let mut report = ReportBatch::default();
        for _ in 0..5 {
            report.add_scanned();
        }
        for _ in 0..4 {
            report.add_matched();
        }
        report.add_converted();
        report.add_converted();
        report.add_error(PathBuf::from("bad.json"), "boom".to_string());
        report.add_warning("w".to_string());

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_scanned"], 5);
        assert_eq!(dict_counts["cnt_matched"], 4);
        assert_eq!(dict_counts["cnt_converted"], 2);
        assert_eq!(dict_counts["cnt_skipped"], 1);
        assert_eq!(dict_counts["cnt_errors"], 1);
        assert_eq!(dict_counts["cnt_warnings"], 1);

        let txt = report.format("[XLSX]");
        assert_eq!(
            txt,
            "[XLSX] scanned=5 matched=4 converted=2 skipped=1 errors=1 warnings=1"
        );
        assert_eq!(report.to_string(), txt);
    }
}
