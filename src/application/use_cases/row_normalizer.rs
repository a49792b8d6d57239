// ============================================================
// ROW NORMALIZER
// ============================================================
// Canonical keys and numeric coercion for imported rows.
// Pure and infallible: malformed input passes through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::import::{CellValue, NormalizedRow, RawRow};

// U+FEFF counts as whitespace so a byte-order mark on the first header is dropped.
static WHITESPACE_RUN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\x{FEFF}]+").unwrap());

static NUMERIC_COLUMN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)price|quant|quantity|qty|value|cost").unwrap());

static NON_NUMERIC_CHARS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.-]+").unwrap());

/// Trim, lowercase and collapse whitespace runs into a single underscore.
/// Punctuation is left alone: `"Unit Price ($)"` becomes `"unit_price_($)"`.
pub fn normalize_header(name: &str) -> String {
    let lowered = name.trim_matches(is_header_whitespace).to_lowercase();
    WHITESPACE_RUN_PATTERN.replace_all(&lowered, "_").into_owned()
}

fn is_header_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Whether a column holds prices, quantities or other amounts.
pub fn is_numeric_column(key: &str) -> bool {
    NUMERIC_COLUMN_PATTERN.is_match(key)
}

/// Strip everything but digits, `.` and `-`, then parse.
/// `None` when nothing parseable is left, e.g. `"N/A"` or `"1.2.3"`.
pub fn coerce_number(value: &CellValue) -> Option<f64> {
    let raw = value.to_coercion_string();
    let stripped = NON_NUMERIC_CHARS_PATTERN.replace_all(&raw, "");
    stripped.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Normalize a single row.
pub fn normalize_row(row: &RawRow) -> NormalizedRow {
    let mut out = NormalizedRow::with_capacity(row.len());

    // IndexMap::insert keeps the slot of the first occurrence and takes the later value.
    for (key, value) in row {
        out.insert(normalize_header(key), value.clone());
    }

    for (key, value) in out.iter_mut() {
        if !is_numeric_column(key) || value.is_empty_text() {
            continue;
        }
        if let Some(n) = coerce_number(value) {
            *value = CellValue::Number(n);
        }
    }

    out
}

/// Normalize every row, preserving count and order.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<NormalizedRow> {
    rows.iter().map(normalize_row).collect()
}
