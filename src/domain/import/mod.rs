// ============================================================
// IMPORT DOMAIN LAYER
// ============================================================
// Row, cell and report types for spreadsheet imports
// No I/O, no async

mod cell_value;
mod report;
mod sheet_format;
mod vocabulary;

pub use cell_value::CellValue;
pub use report::{ColumnSuggestion, ColumnTarget, HeaderCollision, ImportReport, Measure};
pub use sheet_format::SheetFormat;
pub use vocabulary::{find_region, is_canonical_column, CANONICAL_COLUMNS, REGION_PREFIXES};

use indexmap::IndexMap;

/// A row as handed over by a sheet reader or an API caller.
pub type RawRow = IndexMap<String, CellValue>;

/// A row after header normalization and numeric coercion.
pub type NormalizedRow = IndexMap<String, CellValue>;

/// Header record plus data rows as read from a sheet.
/// `headers` keeps repeats that collapse once the rows are keyed by them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}
