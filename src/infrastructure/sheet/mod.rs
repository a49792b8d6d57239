// ============================================================
// SHEET INFRASTRUCTURE LAYER
// ============================================================
// CSV and workbook readers producing raw rows

mod csv_reader;
mod workbook_reader;

pub use csv_reader::CsvReader;
pub use workbook_reader::WorkbookReader;

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::import::{SheetData, SheetFormat};
use crate::infrastructure::config::ImportConfig;

/// Picks the reader matching the file extension.
#[derive(Debug, Clone, Default)]
pub struct SheetReader {
    config: ImportConfig,
}

impl SheetReader {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn read_file(&self, path: &Path) -> Result<SheetData> {
        let format = SheetFormat::from_path(path).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Unsupported sheet format: {}",
                path.display()
            ))
        })?;
        debug!(%format, path = %path.display(), "Reading sheet");

        match format {
            SheetFormat::Csv => {
                let mut reader = CsvReader::new().with_trim(self.config.trim_values);
                if let Some(delimiter) = self.config.delimiter_byte() {
                    reader = reader.with_delimiter(delimiter);
                }
                reader.read_file(path)
            }
            SheetFormat::Workbook => WorkbookReader::new()
                .with_sheet_index(self.config.sheet_index)
                .read_file(path),
        }
    }

    /// Resolve a requested path inside the configured `root_dir`.
    /// Fails when no root is configured or the path leaves it.
    pub fn confine(&self, requested: &Path) -> Result<PathBuf> {
        let root = self.config.root_dir.as_deref().ok_or_else(|| {
            AppError::ValidationError(
                "File import is disabled: import.root_dir is not set".to_string(),
            )
        })?;
        confine_to_root(root, requested)
    }
}

/// Relative paths are taken from `root`. Symlinks and `..` are resolved
/// before the containment check.
pub fn confine_to_root(root: &Path, requested: &Path) -> Result<PathBuf> {
    let root = root.canonicalize().map_err(|e| {
        AppError::Internal(format!("Import root {} is unusable: {}", root.display(), e))
    })?;
    let resolved = root.join(requested).canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            AppError::NotFound(format!("File not found: {}", requested.display()))
        }
        _ => AppError::ValidationError(format!(
            "Cannot resolve {}: {}",
            requested.display(),
            e
        )),
    })?;

    if !resolved.starts_with(&root) {
        return Err(AppError::ValidationError(format!(
            "{} is outside the import root",
            requested.display()
        )));
    }
    Ok(resolved)
}
