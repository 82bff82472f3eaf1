//! Sheet layout and styling kernel.
//!
//! The workbook is always caller-owned: the kernel lays out a detached
//! worksheet and attaches it only after every cell and style is in place, so
//! a failed conversion never leaves a partially-filled sheet behind.

use rust_xlsxwriter::{
    ConditionalFormat3ColorScale, ConditionalFormatType, Format, FormatAlign, FormatBorder,
    Workbook, Worksheet,
};
use serde_json::Value;

use crate::conf::{
    C_COLOR_SCALE_HIGH, C_COLOR_SCALE_LOW, C_COLOR_SCALE_MID, KEY_ACCURACY, N_IDX_COL_F1,
    N_NROWS_EXCEL_MAX, N_SCALE_MIDPOINT, TUP_REPORT_COLUMNS, derive_default_report_formats,
};
use crate::schema::convert_value_to_report;
use crate::spec::{
    EnumAccuracyEntry, ReportConvertError, SpecAutofitColumnsPolicy, SpecCellFormat,
    SpecClassificationReport, SpecMetricRow, SpecReportFormats, SpecReportSheetSummary,
};
use crate::util::{derive_cell_border_patch, estimate_unicode_string_width, validate_sheet_name};

/// Stateless report-sheet formatter holding format presets and layout options.
pub struct ReportXlsxFormatter {
    formats: SpecReportFormats,
    policy_autofit: SpecAutofitColumnsPolicy,
    if_color_scale: bool,
    if_freeze_header: bool,
}

impl Default for ReportXlsxFormatter {
    fn default() -> Self {
        Self::new(
            derive_default_report_formats(),
            SpecAutofitColumnsPolicy::default(),
            true,
            true,
        )
    }
}

impl ReportXlsxFormatter {
    /// Create a formatter bound to format presets and layout options.
    pub fn new(
        formats: SpecReportFormats,
        policy_autofit: SpecAutofitColumnsPolicy,
        if_color_scale: bool,
        if_freeze_header: bool,
    ) -> Self {
        Self {
            formats,
            policy_autofit,
            if_color_scale,
            if_freeze_header,
        }
    }

    /// Lay out `report` as one styled sheet inside `workbook`.
    ///
    /// A sheet whose name collides with `sheet_name` is replaced in place, so
    /// repeated calls with the same name are idempotent.
    pub fn write_report_sheet(
        &self,
        workbook: &mut Workbook,
        report: &SpecClassificationReport,
        sheet_name: &str,
    ) -> Result<SpecReportSheetSummary, ReportConvertError> {
        let c_sheet_name = validate_sheet_name(sheet_name)?;

        let mut warnings = Vec::new();
        if c_sheet_name != sheet_name {
            warnings.push(format!(
                "Sheet name sanitized: {sheet_name:?} -> {c_sheet_name:?}"
            ));
        }

        let n_rows_total = report.row_count_total();
        if n_rows_total > N_NROWS_EXCEL_MAX {
            return Err(ReportConvertError::SheetLimitExceeded { n_rows: n_rows_total });
        }
        let n_idx_row_divider = report.class_count() + 1;

        let mut worksheet = Worksheet::new();
        worksheet.set_name(&c_sheet_name)?;

        let mut l_width_by_col = TUP_REPORT_COLUMNS.map(estimate_unicode_string_width);

        // Header row.
        for (n_idx_col, c_header) in TUP_REPORT_COLUMNS.iter().enumerate() {
            let fmt = self.derive_cell_format(0, n_idx_col, n_rows_total, n_idx_row_divider);
            worksheet.write_string_with_format(0, cast_col_num(n_idx_col)?, *c_header, &fmt)?;
        }

        // Class rows, pre-sorted by the schema step.
        for (n_idx, row) in report.rows_class.iter().enumerate() {
            self.write_metric_row(
                &mut worksheet,
                n_idx + 1,
                row,
                n_rows_total,
                n_idx_row_divider,
                &mut l_width_by_col,
            )?;
        }

        // Divider row: bare accuracy value in the f1-score slot, or the
        // micro-avg row when the report covers a label subset.
        match &report.accuracy {
            EnumAccuracyEntry::Scalar(n_accuracy) => self.write_accuracy_row(
                &mut worksheet,
                n_idx_row_divider,
                *n_accuracy,
                n_rows_total,
                &mut l_width_by_col,
            )?,
            EnumAccuracyEntry::MicroAvg(row) => self.write_metric_row(
                &mut worksheet,
                n_idx_row_divider,
                row,
                n_rows_total,
                n_idx_row_divider,
                &mut l_width_by_col,
            )?,
        }

        // Aggregate rows in fixed order.
        self.write_metric_row(
            &mut worksheet,
            n_idx_row_divider + 1,
            &report.row_macro_avg,
            n_rows_total,
            n_idx_row_divider,
            &mut l_width_by_col,
        )?;
        self.write_metric_row(
            &mut worksheet,
            n_idx_row_divider + 2,
            &report.row_weighted_avg,
            n_rows_total,
            n_idx_row_divider,
            &mut l_width_by_col,
        )?;

        if self.if_color_scale {
            let fmt_scale = ConditionalFormat3ColorScale::new()
                .set_minimum(ConditionalFormatType::Number, 0.0)
                .set_midpoint(ConditionalFormatType::Number, N_SCALE_MIDPOINT)
                .set_maximum(ConditionalFormatType::Number, 1.0)
                .set_minimum_color(C_COLOR_SCALE_LOW)
                .set_midpoint_color(C_COLOR_SCALE_MID)
                .set_maximum_color(C_COLOR_SCALE_HIGH);
            worksheet.add_conditional_format(
                1,
                1,
                cast_row_num(n_rows_total - 1)?,
                cast_col_num(N_IDX_COL_F1)?,
                &fmt_scale,
            )?;
        }

        let n_width_min = usize::max(1, self.policy_autofit.width_cell_min);
        let n_width_max = usize::min(
            255,
            usize::max(n_width_min, self.policy_autofit.width_cell_max),
        );
        for (n_idx_col, n_width) in l_width_by_col.iter().enumerate() {
            let n_width_final = usize::min(
                n_width_max,
                usize::max(n_width_min, n_width + self.policy_autofit.width_cell_padding),
            );
            worksheet.set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)?;
        }

        if self.if_freeze_header {
            worksheet.set_freeze_panes(1, 0)?;
        }

        let n_idx_existing = workbook
            .worksheets_mut()
            .iter()
            .position(|ws_existing| ws_existing.name() == c_sheet_name);
        let if_replaced_existing = match n_idx_existing {
            Some(n_idx) => {
                workbook.worksheets_mut()[n_idx] = worksheet;
                true
            }
            None => {
                workbook.push_worksheet(worksheet);
                false
            }
        };

        Ok(SpecReportSheetSummary {
            sheet_name: c_sheet_name,
            n_rows: n_rows_total,
            n_classes: report.class_count(),
            if_replaced_existing,
            warnings,
        })
    }

    fn write_metric_row(
        &self,
        worksheet: &mut Worksheet,
        n_idx_row: usize,
        row: &SpecMetricRow,
        n_rows_total: usize,
        n_idx_row_divider: usize,
        l_width_by_col: &mut [usize; 5],
    ) -> Result<(), ReportConvertError> {
        let n_row = cast_row_num(n_idx_row)?;

        let fmt_label = self.derive_cell_format(n_idx_row, 0, n_rows_total, n_idx_row_divider);
        worksheet.write_string_with_format(n_row, 0, row.label.as_str(), &fmt_label)?;
        l_width_by_col[0] = usize::max(
            l_width_by_col[0],
            estimate_unicode_string_width(&row.label),
        );

        for (n_idx_col, n_value) in [row.precision, row.recall, row.f1_score]
            .iter()
            .enumerate()
            .map(|(n_idx, n_value)| (n_idx + 1, *n_value))
        {
            let fmt = self.derive_cell_format(n_idx_row, n_idx_col, n_rows_total, n_idx_row_divider);
            worksheet.write_number_with_format(n_row, cast_col_num(n_idx_col)?, n_value, &fmt)?;
            l_width_by_col[n_idx_col] =
                usize::max(l_width_by_col[n_idx_col], format!("{n_value:.4}").len());
        }

        let n_idx_col_support = TUP_REPORT_COLUMNS.len() - 1;
        let fmt_support =
            self.derive_cell_format(n_idx_row, n_idx_col_support, n_rows_total, n_idx_row_divider);
        worksheet.write_number_with_format(
            n_row,
            cast_col_num(n_idx_col_support)?,
            row.support,
            &fmt_support,
        )?;
        l_width_by_col[n_idx_col_support] = usize::max(
            l_width_by_col[n_idx_col_support],
            format!("{:.0}", row.support).len(),
        );

        Ok(())
    }

    fn write_accuracy_row(
        &self,
        worksheet: &mut Worksheet,
        n_idx_row: usize,
        n_accuracy: f64,
        n_rows_total: usize,
        l_width_by_col: &mut [usize; 5],
    ) -> Result<(), ReportConvertError> {
        let n_row = cast_row_num(n_idx_row)?;
        let n_idx_row_divider = n_idx_row;

        let fmt_label = self.derive_cell_format(n_idx_row, 0, n_rows_total, n_idx_row_divider);
        worksheet.write_string_with_format(n_row, 0, KEY_ACCURACY, &fmt_label)?;
        l_width_by_col[0] = usize::max(
            l_width_by_col[0],
            estimate_unicode_string_width(KEY_ACCURACY),
        );

        for n_idx_col in 1..TUP_REPORT_COLUMNS.len() {
            let fmt = self.derive_cell_format(n_idx_row, n_idx_col, n_rows_total, n_idx_row_divider);
            if n_idx_col == N_IDX_COL_F1 {
                worksheet.write_number_with_format(
                    n_row,
                    cast_col_num(n_idx_col)?,
                    n_accuracy,
                    &fmt,
                )?;
                l_width_by_col[n_idx_col] = usize::max(
                    l_width_by_col[n_idx_col],
                    format!("{n_accuracy:.4}").len(),
                );
            } else {
                worksheet.write_blank(n_row, cast_col_num(n_idx_col)?, &fmt)?;
            }
        }

        Ok(())
    }

    fn derive_cell_format(
        &self,
        n_idx_row: usize,
        n_idx_col: usize,
        n_rows_total: usize,
        n_idx_row_divider: usize,
    ) -> Format {
        let fmt_base = if n_idx_row == 0 || n_idx_col == 0 {
            &self.formats.header
        } else if n_idx_col < TUP_REPORT_COLUMNS.len() - 1 {
            &self.formats.decimal
        } else {
            &self.formats.integer
        };

        let fmt_final = fmt_base.with_(derive_cell_border_patch(
            n_idx_row,
            n_idx_col,
            n_rows_total,
            n_idx_row_divider,
        ));
        derive_rust_xlsx_format(&fmt_final)
    }
}

/// One-shot conversion: validate the untyped mapping, then lay out the sheet
/// with default presets. Mirrors `format(report_data, workbook, sheet_name)`.
pub fn convert_report_to_xlsx(
    workbook: &mut Workbook,
    report_data: &Value,
    sheet_name: &str,
) -> Result<SpecReportSheetSummary, ReportConvertError> {
    let report = convert_value_to_report(report_data)?;
    ReportXlsxFormatter::default().write_report_sheet(workbook, &report, sheet_name)
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = spec.top {
        format = format.set_border_top(derive_format_border(val));
    }
    if let Some(val) = spec.bottom {
        format = format.set_border_bottom(derive_format_border(val));
    }
    if let Some(val) = spec.left {
        format = format.set_border_left(derive_format_border(val));
    }
    if let Some(val) = spec.right {
        format = format.set_border_right(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        0 => FormatBorder::None,
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, ReportConvertError> {
    u32::try_from(value).map_err(|_| ReportConvertError::SheetLimitExceeded { n_rows: value })
}

fn cast_col_num(value: usize) -> Result<u16, ReportConvertError> {
    u16::try_from(value).map_err(|_| ReportConvertError::SheetLimitExceeded { n_rows: value })
}
