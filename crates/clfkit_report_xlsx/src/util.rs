//! Stateless helper functions used by the sheet writer.

use crate::conf::{
    N_BORDER_THICK, N_BORDER_THIN, N_IDX_COL_SUPPORT, N_LEN_EXCEL_SHEET_NAME_MAX,
    TUP_EXCEL_ILLEGAL, TUP_REPORT_COLUMNS,
};
use crate::spec::{ReportConvertError, SpecCellFormat};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to a valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Sanitize `name`, rejecting empty/blank input instead of inventing a name.
pub fn validate_sheet_name(name: &str) -> Result<String, ReportConvertError> {
    if name.trim().is_empty() {
        return Err(ReportConvertError::EmptySheetName);
    }
    Ok(sanitize_sheet_name(name, "_"))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WidthEstimation

/// Estimate displayed width units for one cell text.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region BorderPlanning

/// Derive the border overlay for one cell of the report grid.
///
/// Encodes the outer box, the rule under the header row, the rules around the
/// label and support columns, and the thick divider above the aggregate block.
pub fn derive_cell_border_patch(
    n_idx_row: usize,
    n_idx_col: usize,
    n_rows_total: usize,
    n_idx_row_divider: usize,
) -> SpecCellFormat {
    let n_idx_col_last = TUP_REPORT_COLUMNS.len() - 1;
    let n_idx_row_last = n_rows_total - 1;

    let top = if n_idx_row == n_idx_row_divider {
        Some(N_BORDER_THICK)
    } else if n_idx_row == 0 {
        Some(N_BORDER_THIN)
    } else {
        None
    };
    let bottom = if n_idx_row == 0 || n_idx_row == n_idx_row_last {
        Some(N_BORDER_THIN)
    } else {
        None
    };
    let left = if n_idx_col == 0 || n_idx_col == N_IDX_COL_SUPPORT {
        Some(N_BORDER_THIN)
    } else {
        None
    };
    let right = if n_idx_col == 0 || n_idx_col == n_idx_col_last {
        Some(N_BORDER_THIN)
    } else {
        None
    };

    SpecCellFormat {
        top,
        bottom,
        left,
        right,
        ..Default::default()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
