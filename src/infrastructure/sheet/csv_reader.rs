// ============================================================
// CSV READER
// ============================================================
// Read delimited files into raw rows with encoding and delimiter detection

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::domain::error::AppError;
use crate::domain::import::{CellValue, RawRow, SheetData};

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// CSV reader producing one raw row per record
pub struct CsvReader {
    /// Delimiter byte; `None` means detect from content
    delimiter: Option<u8>,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self {
            delimiter: None,
            trim: true,
        }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a delimiter instead of detecting it
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Read a delimited file
    pub fn read_file(&self, path: &Path) -> Result<SheetData, AppError> {
        let bytes = std::fs::read(path)?;
        let content = decode(&bytes);
        self.read_content(&content)
    }

    /// Parse delimited content. The first record is the header.
    pub fn read_content(&self, content: &str) -> Result<SheetData, AppError> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(content));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::to_raw_row(&headers, &record));
        }

        Ok(SheetData {
            headers: headers.iter().map(str::to_string).collect(),
            rows,
        })
    }

    fn to_raw_row(headers: &StringRecord, record: &StringRecord) -> RawRow {
        headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record.get(idx).unwrap_or("");
                (header.to_string(), CellValue::from(value))
            })
            .collect()
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let sample_lines: Vec<&str> = content.lines().take(10).collect();
        if sample_lines.is_empty() {
            return b',';
        }

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &DELIMITER_CANDIDATES {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

/// Decode as UTF-8 (BOM stripped), falling back to Windows-1252 on invalid bytes.
fn decode(bytes: &[u8]) -> String {
    let (content, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return content.into_owned();
    }
    let (content, _, _) = WINDOWS_1252.decode(bytes);
    content.into_owned()
}
