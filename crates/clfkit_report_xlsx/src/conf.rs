//! Report layout constants and default format presets.

use crate::spec::{SpecCellFormat, SpecReportFormats};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Fixed report column headers, label column first.
pub const TUP_REPORT_COLUMNS: [&str; 5] =
    ["class", "precision", "recall", "f1-score", "support"];
/// Metric keys required on every non-accuracy report entry.
pub const TUP_METRIC_KEYS: [&str; 4] = ["precision", "recall", "f1-score", "support"];

/// Aggregate entry label: bare accuracy scalar.
pub const KEY_ACCURACY: &str = "accuracy";
/// Aggregate entry label: micro average (emitted in place of accuracy).
pub const KEY_MICRO_AVG: &str = "micro avg";
/// Aggregate entry label: macro average.
pub const KEY_MACRO_AVG: &str = "macro avg";
/// Aggregate entry label: weighted average.
pub const KEY_WEIGHTED_AVG: &str = "weighted avg";

/// Zero-based index of the f1-score column (the accuracy value slot).
pub const N_IDX_COL_F1: usize = 3;
/// Zero-based index of the support column.
pub const N_IDX_COL_SUPPORT: usize = 4;

/// Thin border style code.
pub const N_BORDER_THIN: i64 = 1;
/// Thick border style code (divider above the aggregate block).
pub const N_BORDER_THICK: i64 = 5;

/// Header row and label column fill color.
pub const C_COLOR_HEADER_FILL: &str = "D9D9D9";
/// Color scale low stop (metric value 0.0).
pub const C_COLOR_SCALE_LOW: &str = "E67C73";
/// Color scale mid stop.
pub const C_COLOR_SCALE_MID: &str = "FFFFFF";
/// Color scale high stop (metric value 1.0).
pub const C_COLOR_SCALE_HIGH: &str = "57BB8A";
/// Metric value mapped to the mid color stop.
pub const N_SCALE_MIDPOINT: f64 = 0.6;

/// Number format for precision/recall/f1-score cells.
pub const C_NUM_FORMAT_DECIMAL: &str = "0.0000";
/// Number format for support cells.
pub const C_NUM_FORMAT_INTEGER: &str = "0";

/// Build default format presets used by [`crate::writer::ReportXlsxFormatter`].
pub fn derive_default_report_formats() -> SpecReportFormats {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Arial".to_string()),
        font_size: Some(11),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    };

    SpecReportFormats {
        header: cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            bg_color: Some(C_COLOR_HEADER_FILL.to_string()),
            ..Default::default()
        }),
        decimal: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some(C_NUM_FORMAT_DECIMAL.to_string()),
            ..Default::default()
        }),
        integer: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some(C_NUM_FORMAT_INTEGER.to_string()),
            ..Default::default()
        }),
    }
}
