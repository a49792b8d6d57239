use serde::{Deserialize, Serialize};
use std::path::Path;

/// File family a sheet reader knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetFormat {
    /// Delimited text (comma, semicolon, tab, pipe)
    Csv,

    /// Excel or OpenDocument workbook
    Workbook,
}

impl SheetFormat {
    /// Detect the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "txt" => Some(SheetFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SheetFormat::Workbook),
            _ => None,
        }
    }
}

impl std::fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetFormat::Csv => write!(f, "CSV"),
            SheetFormat::Workbook => write!(f, "Workbook"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(SheetFormat::from_path(Path::new("a/b.CSV")), Some(SheetFormat::Csv));
        assert_eq!(
            SheetFormat::from_path(Path::new("catalog.xlsx")),
            Some(SheetFormat::Workbook)
        );
        assert_eq!(SheetFormat::from_path(Path::new("notes.pdf")), None);
        assert_eq!(SheetFormat::from_path(Path::new("no_extension")), None);
    }
}
