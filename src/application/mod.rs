pub mod use_cases;

pub use use_cases::column_mapping::suggest_mapping;
pub use use_cases::row_normalizer::{normalize_header, normalize_row, normalize_rows};
pub use use_cases::sheet_import::SheetImportUseCase;
