//! Report models, formatter options, run summary, and error types.

use std::fmt;

use rust_xlsxwriter::XlsxError;

////////////////////////////////////////////////////////////////////////////////
// #region ReportModels

/// One four-metric report row (a class or an avg aggregate).
#[derive(Debug, Clone, PartialEq)]
pub struct SpecMetricRow {
    /// Class name or aggregate label.
    pub label: String,
    /// Precision for the label.
    pub precision: f64,
    /// Recall for the label.
    pub recall: f64,
    /// F1 score for the label.
    pub f1_score: f64,
    /// True-instance count; numeric per the sklearn dict contract.
    pub support: f64,
}

/// Accuracy slot content; the one shape irregularity in the report.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumAccuracyEntry {
    /// Bare `accuracy` scalar.
    Scalar(f64),
    /// `micro avg` row emitted in place of accuracy for label subsets.
    MicroAvg(SpecMetricRow),
}

/// Validated classification report: sorted class rows plus fixed aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecClassificationReport {
    /// Per-class rows, sorted lexicographically by label.
    pub rows_class: Vec<SpecMetricRow>,
    /// Accuracy (or micro-avg) divider entry.
    pub accuracy: EnumAccuracyEntry,
    /// Macro-average aggregate row.
    pub row_macro_avg: SpecMetricRow,
    /// Weighted-average aggregate row.
    pub row_weighted_avg: SpecMetricRow,
}

impl SpecClassificationReport {
    /// Number of per-class rows.
    pub fn class_count(&self) -> usize {
        self.rows_class.len()
    }

    /// Total sheet rows: header + classes + accuracy + macro avg + weighted avg.
    pub fn row_count_total(&self) -> usize {
        self.rows_class.len() + 4
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Partial cell format with right-biased overlay semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,

    /// Border style for all sides.
    pub border: Option<i64>,
    /// Top border override.
    pub top: Option<i64>,
    /// Bottom border override.
    pub bottom: Option<i64>,
    /// Left border override.
    pub left: Option<i64>,
    /// Right border override.
    pub right: Option<i64>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            top: other.top.or(self.top),
            bottom: other.bottom.or(self.bottom),
            left: other.left.or(self.left),
            right: other.right.or(self.right),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
        }
    }
}

/// Named format presets for one report sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReportFormats {
    /// Header row and label column format.
    pub header: SpecCellFormat,
    /// Precision/recall/f1-score cell format.
    pub decimal: SpecCellFormat,
    /// Support cell format.
    pub integer: SpecCellFormat,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Column width autofit policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitColumnsPolicy {
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitColumnsPolicy {
    fn default() -> Self {
        Self {
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RunSummary

/// Per-call run summary returned by the sheet writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReportSheetSummary {
    /// Final sheet name in the workbook (after sanitization).
    pub sheet_name: String,
    /// Rows written, header included.
    pub n_rows: usize,
    /// Per-class rows written.
    pub n_classes: usize,
    /// A same-named sheet existed and was replaced.
    pub if_replaced_existing: bool,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Conversion failures: schema violations, argument misuse, xlsx engine errors.
#[derive(Debug)]
pub enum ReportConvertError {
    /// Report root is not a mapping of labels to entries.
    RootNotMapping,
    /// A non-accuracy entry is not a metric mapping.
    EntryNotMapping {
        /// Offending report label.
        label: String,
    },
    /// A metric mapping lacks a required key.
    MissingMetricKey {
        /// Offending report label.
        label: String,
        /// Missing metric key.
        key: &'static str,
    },
    /// A metric value is not a number.
    MetricNotNumeric {
        /// Offending report label.
        label: String,
        /// Offending metric key.
        key: &'static str,
    },
    /// The `accuracy` entry is not a bare number.
    AccuracyNotNumeric,
    /// A required aggregate entry is absent.
    MissingAggregate {
        /// Missing aggregate label.
        label: String,
    },
    /// Sheet name is empty (or blank after trimming).
    EmptySheetName,
    /// Report is too tall for one Excel worksheet.
    SheetLimitExceeded {
        /// Rows the sheet would need.
        n_rows: usize,
    },
    /// Error surfaced unchanged from the xlsx engine.
    Xlsx(XlsxError),
}

impl fmt::Display for ReportConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotMapping => {
                write!(f, "Report root must be a mapping of labels to metric entries.")
            }
            Self::EntryNotMapping { label } => {
                write!(f, "Report entry {label:?} must be a metric mapping.")
            }
            Self::MissingMetricKey { label, key } => {
                write!(f, "Report entry {label:?} is missing required metric key {key:?}.")
            }
            Self::MetricNotNumeric { label, key } => {
                write!(f, "Report entry {label:?} has a non-numeric value for {key:?}.")
            }
            Self::AccuracyNotNumeric => {
                write!(f, "The \"accuracy\" entry must be a bare number.")
            }
            Self::MissingAggregate { label } => {
                write!(f, "Required aggregate entry {label:?} is missing.")
            }
            Self::EmptySheetName => write!(f, "Sheet name must be non-empty."),
            Self::SheetLimitExceeded { n_rows } => {
                write!(f, "Report needs {n_rows} rows and exceeds the Excel sheet limit.")
            }
            Self::Xlsx(err) => write!(f, "xlsx write error: {err}"),
        }
    }
}

impl std::error::Error for ReportConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xlsx(err) => Some(err),
            _ => None,
        }
    }
}

impl From<XlsxError> for ReportConvertError {
    fn from(err: XlsxError) -> Self {
        Self::Xlsx(err)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
