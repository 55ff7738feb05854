//! Spreadsheet row ingestion
//!
//! Reads the first worksheet of a workbook into fixed-width rows of trimmed
//! text, addressed by absolute column position. Row 1 is a header; data
//! starts at row 2.

use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::Workbook;
use std::path::Path;

use crate::error::{Result, ScaffoldError};

/// Header row of the controller-directive sheet
pub const DIRECTIVE_HEADERS: [&str; 6] = [
    "Model",
    "GenerateController (Y/N)",
    "FormRequest (Y/N)",
    "Namespace (Optional)",
    "Route Prefix (Optional)",
    "API Mode (Y/N)",
];

/// One data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based spreadsheet row number
    pub number: u32,
    cells: Vec<String>,
}

impl SheetRow {
    /// Build a row from cell values, padding or truncating to `width`
    #[must_use]
    pub fn new(number: u32, cells: Vec<String>, width: usize) -> Self {
        let mut cells: Vec<String> = cells.into_iter().map(|c| c.trim().to_string()).collect();
        cells.resize(width, String::new());
        Self { number, cells }
    }

    /// Trimmed cell text at `column` (0-based); empty when out of range
    #[must_use]
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map_or("", String::as_str)
    }

    /// Cell text, `None` when blank
    #[must_use]
    pub fn optional(&self, column: usize) -> Option<String> {
        let value = self.cell(column);
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Boolean-like cell
    #[must_use]
    pub fn flag(&self, column: usize) -> bool {
        is_affirmative(self.cell(column))
    }

    /// Whether every cell is blank
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }
}

/// `yes` / `y` in any case, surrounding whitespace ignored
#[must_use]
pub fn is_affirmative(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "yes" | "y")
}

/// Read data rows (row 2 onward) from the first worksheet
///
/// Fully blank rows are dropped.
///
/// # Errors
///
/// Returns [`ScaffoldError::InputNotFound`] if `path` does not exist, and a
/// read error if the workbook cannot be parsed.
pub fn read_rows(path: &Path, width: usize) -> Result<Vec<SheetRow>> {
    if !path.exists() {
        return Err(ScaffoldError::InputNotFound(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|source| ScaffoldError::SheetRead {
        path: path.to_path_buf(),
        source,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ScaffoldError::EmptyWorkbook(path.to_path_buf()))?
        .map_err(|source| ScaffoldError::SheetRead {
            path: path.to_path_buf(),
            source,
        })?;

    let rows = rows_from_range(&range, width);
    tracing::debug!(path = %path.display(), rows = rows.len(), "spreadsheet loaded");
    Ok(rows)
}

fn rows_from_range(range: &Range<Data>, width: usize) -> Vec<SheetRow> {
    let Some((last_row, _)) = range.end() else {
        return Vec::new();
    };

    // Index 0 is the header row
    (1..=last_row)
        .map(|row| {
            let cells = (0..width)
                .map(|col| {
                    u32::try_from(col)
                        .ok()
                        .and_then(|col| range.get_value((row, col)))
                        .map(ToString::to_string)
                        .unwrap_or_default()
                })
                .collect();
            SheetRow::new(row + 1, cells, width)
        })
        .filter(|row| !row.is_blank())
        .collect()
}

/// Write a fresh controller-directive sheet with one row per model
///
/// Directive cells are left blank for manual completion.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the
/// workbook cannot be saved.
pub fn write_directive_sheet(path: &Path, models: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
    }

    let sheet_err = |source: rust_xlsxwriter::XlsxError| ScaffoldError::SheetWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in (0u16..).zip(DIRECTIVE_HEADERS) {
        worksheet.write_string(0, col, header).map_err(sheet_err)?;
    }
    for (row, model) in (1u32..).zip(models) {
        worksheet.write_string(row, 0, model).map_err(sheet_err)?;
    }

    workbook.save(path).map_err(sheet_err)?;
    tracing::debug!(path = %path.display(), models = models.len(), "directive sheet written");
    Ok(())
}
