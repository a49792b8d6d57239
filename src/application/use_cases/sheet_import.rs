// ============================================================
// SHEET IMPORT USE CASE
// ============================================================
// Orchestrate sheet reading, row normalization and column mapping

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::use_cases::column_mapping::{
    canonical_headers, find_collisions, raw_headers_of, suggest_mapping,
};
use crate::application::use_cases::row_normalizer::normalize_rows;
use crate::domain::error::{AppError, Result};
use crate::domain::import::{ImportReport, RawRow, SheetData};
use crate::infrastructure::config::ImportConfig;
use crate::infrastructure::sheet::SheetReader;
use crate::interfaces::http::{add_log, SharedLogs};

const LOG_SOURCE: &str = "Import";

pub struct SheetImportUseCase {
    reader: SheetReader,
    logs: SharedLogs,
}

impl SheetImportUseCase {
    pub fn new(config: ImportConfig, logs: SharedLogs) -> Self {
        Self {
            reader: SheetReader::new(config),
            logs,
        }
    }

    /// Normalize rows that are already in memory. Never fails.
    /// Headers are the distinct keys of the rows.
    pub fn import_rows(&self, source: &str, rows: &[RawRow]) -> ImportReport {
        self.build_report(source, &raw_headers_of(rows), rows)
    }

    /// Normalize a sheet as read from disk. Headers come from the header
    /// record, so a sheet without data rows still reports its columns.
    pub fn import_sheet(&self, source: &str, sheet: &SheetData) -> ImportReport {
        self.build_report(source, &sheet.headers, &sheet.rows)
    }

    fn build_report(
        &self,
        source: &str,
        raw_headers: &[String],
        rows: &[RawRow],
    ) -> ImportReport {
        let start = Instant::now();

        let headers = canonical_headers(raw_headers);
        let normalized = normalize_rows(rows);
        let mapping = suggest_mapping(&headers);
        let collisions = find_collisions(raw_headers);

        for collision in &collisions {
            warn!(
                source,
                canonical = %collision.canonical,
                raw_headers = ?collision.raw_headers,
                "Headers collide after normalization; last value wins"
            );
            add_log(
                &self.logs,
                "WARN",
                LOG_SOURCE,
                &format!(
                    "{}: headers {:?} all normalize to '{}'",
                    source, collision.raw_headers, collision.canonical
                ),
            );
        }

        let report = ImportReport {
            import_id: Uuid::new_v4(),
            source: source.to_string(),
            headers,
            row_count: normalized.len(),
            rows: normalized,
            mapping,
            collisions,
            processing_time_ms: start.elapsed().as_millis() as u64,
            imported_at: Utc::now(),
        };

        info!(
            source,
            import_id = %report.import_id,
            rows = report.row_count,
            columns = report.headers.len(),
            "Rows normalized"
        );

        report
    }

    /// Like [`Self::import_file`], but only for paths inside `import.root_dir`.
    /// Used where the path comes from a remote caller.
    pub async fn import_file_within_root(&self, requested: PathBuf) -> Result<ImportReport> {
        let path = self.reader.confine(&requested).map_err(|e| {
            warn!(path = %requested.display(), error = %e, "File import refused");
            add_log(
                &self.logs,
                "WARN",
                LOG_SOURCE,
                &format!("Refused {}: {}", requested.display(), e),
            );
            e
        })?;
        self.import_file(path).await
    }

    /// Read a sheet from disk on a blocking thread, then normalize it.
    pub async fn import_file(&self, path: PathBuf) -> Result<ImportReport> {
        let source = file_label(&path);
        add_log(
            &self.logs,
            "INFO",
            LOG_SOURCE,
            &format!("Reading sheet {}", path.display()),
        );

        let reader = self.reader.clone();
        let read_path = path.clone();
        let sheet = tokio::task::spawn_blocking(move || reader.read_file(&read_path))
            .await
            .map_err(|e| AppError::Internal(format!("Sheet reader task failed: {}", e)))?
            .map_err(|e| {
                add_log(
                    &self.logs,
                    "ERROR",
                    LOG_SOURCE,
                    &format!("Failed to read {}: {}", path.display(), e),
                );
                e
            })?;

        let report = self.import_sheet(&source, &sheet);
        add_log(
            &self.logs,
            "INFO",
            LOG_SOURCE,
            &format!(
                "Imported {} rows from {} ({} ms)",
                report.row_count, source, report.processing_time_ms
            ),
        );
        Ok(report)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::{CellValue, ColumnTarget, HeaderCollision, Measure};
    use crate::interfaces::http::new_log_buffer;
    use std::io::Write;

    fn use_case() -> SheetImportUseCase {
        SheetImportUseCase::new(ImportConfig::default(), new_log_buffer())
    }

    #[tokio::test]
    async fn test_import_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(
            b"Style Name,SKU,US Price,UK Qty\nTee,T-1,\"$1,250.00\",12\nHoodie,H-1,N/A,\n",
        )
        .unwrap();

        let report = use_case().import_file(file.path().to_path_buf()).await.unwrap();

        assert_eq!(report.row_count, 2);
        assert_eq!(report.headers, vec!["style_name", "sku", "us_price", "uk_qty"]);
        assert_eq!(report.rows[0]["us_price"], CellValue::Number(1250.0));
        assert_eq!(report.rows[0]["uk_qty"], CellValue::Number(12.0));
        assert_eq!(report.rows[1]["us_price"], CellValue::from("N/A"));
        assert_eq!(report.rows[1]["uk_qty"], CellValue::from(""));
        assert_eq!(
            report.mapping[2].target,
            ColumnTarget::Regional {
                region: "US".to_string(),
                measure: Measure::Price
            }
        );
        assert!(report.collisions.is_empty());
    }

    #[tokio::test]
    async fn test_import_missing_file_fails() {
        let logs = new_log_buffer();
        let use_case = SheetImportUseCase::new(ImportConfig::default(), logs.clone());
        let err = use_case
            .import_file(PathBuf::from("/missing/catalog.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let logs = logs.lock().unwrap();
        assert!(logs.iter().any(|entry| entry.level == "ERROR"));
    }

    #[tokio::test]
    async fn test_import_header_only_csv_keeps_columns() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"SKU,US Price\n").unwrap();

        let report = use_case().import_file(file.path().to_path_buf()).await.unwrap();

        assert_eq!(report.row_count, 0);
        assert_eq!(report.headers, vec!["sku", "us_price"]);
        assert_eq!(report.mapping.len(), 2);
        assert_eq!(
            report.mapping[1].target,
            ColumnTarget::Regional {
                region: "US".to_string(),
                measure: Measure::Price
            }
        );
    }

    #[tokio::test]
    async fn test_import_repeated_csv_header_reports_collision() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"SKU,Price,Price\nA,1,2\n").unwrap();

        let report = use_case().import_file(file.path().to_path_buf()).await.unwrap();

        assert_eq!(report.headers, vec!["sku", "price"]);
        assert_eq!(report.rows[0]["price"], CellValue::Number(2.0));
        assert_eq!(
            report.collisions,
            vec![HeaderCollision {
                canonical: "price".to_string(),
                raw_headers: vec!["Price".to_string(), "Price".to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn test_import_within_root() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("catalog.csv"), "SKU,Qty\nA-1,3\n").unwrap();
        let config = ImportConfig {
            root_dir: Some(root.path().to_path_buf()),
            ..ImportConfig::default()
        };
        let logs = new_log_buffer();
        let use_case = SheetImportUseCase::new(config, logs.clone());

        let report = use_case
            .import_file_within_root(PathBuf::from("catalog.csv"))
            .await
            .unwrap();
        assert_eq!(report.source, "catalog.csv");
        assert_eq!(report.rows[0]["qty"], CellValue::Number(3.0));

        let elsewhere = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let err = use_case
            .import_file_within_root(elsewhere.path().to_path_buf())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(logs.lock().unwrap().iter().any(|entry| entry.level == "WARN"));
    }

    #[tokio::test]
    async fn test_import_within_root_requires_root() {
        let err = use_case()
            .import_file_within_root(PathBuf::from("catalog.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_import_rows_reports_collisions() {
        let mut row = RawRow::new();
        row.insert("Style Name".to_string(), CellValue::from("Tee"));
        row.insert("style_name ".to_string(), CellValue::from("Hoodie"));

        let report = use_case().import_rows("batch", &[row]);
        assert_eq!(report.source, "batch");
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.rows[0]["style_name"], CellValue::from("Hoodie"));
    }
}
