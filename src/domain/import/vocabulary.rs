// ============================================================
// IMPORT VOCABULARY
// ============================================================
// Reference column names used when mapping imported headers

/// Canonical product columns the column mapper can target.
/// Matched against normalized headers only; the normalizer never enforces them.
pub const CANONICAL_COLUMNS: &[&str] = &[
    "style_name",
    "product_code",
    "size",
    "sku",
    "upc",
    "collection",
    "artist_name",
];

/// Markets that can scope a price or quantity column (e.g. `US_price`).
pub const REGION_PREFIXES: &[&str] = &["US", "UK", "EU", "DE", "FR", "IT"];

/// Look up a region prefix case-insensitively, returning its canonical spelling.
pub fn find_region(token: &str) -> Option<&'static str> {
    REGION_PREFIXES
        .iter()
        .copied()
        .find(|region| region.eq_ignore_ascii_case(token))
}

pub fn is_canonical_column(normalized_header: &str) -> bool {
    CANONICAL_COLUMNS.contains(&normalized_header)
}
