//! `clfkit_report_xlsx` v1:
//! classification-report to formatted-XLSX conversion kernel.
//!
//! Architecture:
//! - `conf`   : constants and default format presets
//! - `spec`   : report models, options, run summary, errors
//! - `schema` : untyped report-mapping validation
//! - `util`   : pure helper functions
//! - `writer` : sheet layout and styling kernel
pub mod conf;
pub mod schema;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    KEY_ACCURACY, KEY_MACRO_AVG, KEY_MICRO_AVG, KEY_WEIGHTED_AVG, N_LEN_EXCEL_SHEET_NAME_MAX,
    TUP_EXCEL_ILLEGAL, TUP_METRIC_KEYS, TUP_REPORT_COLUMNS, derive_default_report_formats,
};
pub use schema::convert_value_to_report;
pub use spec::{
    EnumAccuracyEntry, ReportConvertError, SpecAutofitColumnsPolicy, SpecCellFormat,
    SpecClassificationReport, SpecMetricRow, SpecReportFormats, SpecReportSheetSummary,
};
pub use util::{sanitize_sheet_name, validate_sheet_name};
pub use writer::{ReportXlsxFormatter, convert_report_to_xlsx};
