pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

mod app;

pub use app::{init_tracing, serve};
pub use application::{normalize_header, normalize_row, normalize_rows, SheetImportUseCase};
pub use domain::error::{AppError, Result};
pub use domain::import::{CellValue, ImportReport, NormalizedRow, RawRow};
pub use infrastructure::config::{load_config, AppConfig};
