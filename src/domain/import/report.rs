// ============================================================
// IMPORT REPORT TYPES
// ============================================================
// Column mapping suggestions and the summary of one import

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NormalizedRow;

/// What a regional column measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Price,
    Quantity,
}

/// Suggested destination for one normalized header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ColumnTarget {
    /// One of the canonical product columns
    Canonical { column: String },

    /// A price or quantity column scoped to a market
    Regional { region: String, measure: Measure },

    Unmapped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSuggestion {
    pub header: String,
    pub target: ColumnTarget,
}

/// Several raw headers that normalized onto the same key.
/// The last one in iteration order supplied the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCollision {
    pub canonical: String,
    pub raw_headers: Vec<String>,
}

/// Result of a sheet import
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub import_id: Uuid,

    /// File name, or a caller-supplied label for JSON batches
    pub source: String,

    /// Normalized headers in first-occurrence order
    pub headers: Vec<String>,

    pub rows: Vec<NormalizedRow>,

    pub row_count: usize,

    pub mapping: Vec<ColumnSuggestion>,

    pub collisions: Vec<HeaderCollision>,

    pub processing_time_ms: u64,

    pub imported_at: DateTime<Utc>,
}
