use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::domain::error::AppError;
use crate::domain::import::{CellValue, SheetData};

/// Reads one worksheet of an Excel/OpenDocument workbook.
pub struct WorkbookReader {
    sheet_index: usize,
}

impl Default for WorkbookReader {
    fn default() -> Self {
        Self { sheet_index: 0 }
    }
}

impl WorkbookReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet_index(mut self, sheet_index: usize) -> Self {
        self.sheet_index = sheet_index;
        self
    }

    pub fn read_file(&self, path: &Path) -> Result<SheetData, AppError> {
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "Workbook not found: {}",
                path.display()
            )));
        }

        let mut workbook = open_workbook_auto(path).map_err(|e| {
            AppError::ParseError(format!("Failed to open workbook {}: {}", path.display(), e))
        })?;

        let range = workbook
            .worksheet_range_at(self.sheet_index)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No worksheet at index {} in {}",
                    self.sheet_index,
                    path.display()
                ))
            })?
            .map_err(|e| AppError::ParseError(format!("Failed to read worksheet: {}", e)))?;

        Ok(sheet_from_range(&range))
    }
}

/// First row is the header; later rows are keyed by it. Short rows are padded
/// with empty text, cells past the header are dropped.
pub fn sheet_from_range(range: &Range<Data>) -> SheetData {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return SheetData::default();
    };
    let headers: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();

    let rows = rows
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = cells.get(idx).map(cell_to_value).unwrap_or_else(|| "".into());
                    (header.clone(), value)
                })
                .collect()
        })
        .collect();

    SheetData { headers, rows }
}

pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Empty => CellValue::Text(String::new()),
        other => CellValue::Text(other.to_string()),
    }
}
