// Column mapping suggestions for normalized headers.
//
// Headers are matched against the canonical product columns first, then against
// region-scoped price/quantity columns such as `us_price` or `qty_uk`.

use indexmap::IndexMap;

use crate::application::use_cases::row_normalizer::{is_numeric_column, normalize_header};
use crate::domain::import::{
    find_region, is_canonical_column, ColumnSuggestion, ColumnTarget, HeaderCollision, Measure,
    RawRow,
};

const PRICE_TOKENS: &[&str] = &["price", "cost", "value"];

fn measure_for(rest: &str) -> Measure {
    let lower = rest.to_ascii_lowercase();
    if PRICE_TOKENS.iter().any(|t| lower.contains(t)) {
        Measure::Price
    } else {
        Measure::Quantity
    }
}

/// Split `us_price` / `price_us` into a region and the remaining column name.
fn split_region(normalized_header: &str) -> Option<(&'static str, &str)> {
    if let Some((head, rest)) = normalized_header.split_once('_') {
        if let Some(region) = find_region(head) {
            return Some((region, rest));
        }
    }
    if let Some((rest, tail)) = normalized_header.rsplit_once('_') {
        if let Some(region) = find_region(tail) {
            return Some((region, rest));
        }
    }
    None
}

pub fn detect_target(normalized_header: &str) -> ColumnTarget {
    if is_canonical_column(normalized_header) {
        return ColumnTarget::Canonical {
            column: normalized_header.to_string(),
        };
    }
    if let Some((region, rest)) = split_region(normalized_header) {
        if !rest.is_empty() && is_numeric_column(rest) {
            return ColumnTarget::Regional {
                region: region.to_string(),
                measure: measure_for(rest),
            };
        }
    }
    ColumnTarget::Unmapped
}

/// Suggest a target for each header. Headers are normalized first, so raw
/// spreadsheet names are accepted too.
pub fn suggest_mapping<S: AsRef<str>>(headers: &[S]) -> Vec<ColumnSuggestion> {
    headers
        .iter()
        .map(|h| {
            let header = normalize_header(h.as_ref());
            let target = detect_target(&header);
            ColumnSuggestion { header, target }
        })
        .collect()
}

/// Distinct raw keys across all rows, in first-occurrence order.
pub fn raw_headers_of(rows: &[RawRow]) -> Vec<String> {
    let mut seen: IndexMap<&str, ()> = IndexMap::new();
    for row in rows {
        for key in row.keys() {
            seen.insert(key, ());
        }
    }
    seen.into_keys().map(str::to_string).collect()
}

/// Normalized headers in first-occurrence order, without repeats.
pub fn canonical_headers<S: AsRef<str>>(raw_headers: &[S]) -> Vec<String> {
    let mut seen: IndexMap<String, ()> = IndexMap::new();
    for header in raw_headers {
        seen.insert(normalize_header(header.as_ref()), ());
    }
    seen.into_keys().collect()
}

/// Canonical keys that more than one header column normalized onto.
/// A header record naming the same column twice counts: only the last
/// column's value survives in the row.
pub fn find_collisions<S: AsRef<str>>(raw_headers: &[S]) -> Vec<HeaderCollision> {
    let mut sources: IndexMap<String, Vec<String>> = IndexMap::new();
    for header in raw_headers {
        let header = header.as_ref();
        sources
            .entry(normalize_header(header))
            .or_default()
            .push(header.to_string());
    }

    sources
        .into_iter()
        .filter(|(_, raw_headers)| raw_headers.len() > 1)
        .map(|(canonical, raw_headers)| HeaderCollision {
            canonical,
            raw_headers,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::CellValue;
    use pretty_assertions::assert_eq;

    fn regional(region: &str, measure: Measure) -> ColumnTarget {
        ColumnTarget::Regional {
            region: region.to_string(),
            measure,
        }
    }

    #[test]
    fn test_suggest_mapping_mixed_headers() {
        let mapping = suggest_mapping(&["sku", "us_price", "qty_uk", "notes"]);
        let targets: Vec<ColumnTarget> = mapping.into_iter().map(|s| s.target).collect();
        assert_eq!(
            targets,
            vec![
                ColumnTarget::Canonical {
                    column: "sku".to_string()
                },
                regional("US", Measure::Price),
                regional("UK", Measure::Quantity),
                ColumnTarget::Unmapped,
            ]
        );
    }

    #[test]
    fn test_suggest_mapping_normalizes_raw_headers() {
        let mapping = suggest_mapping(&["  Artist Name", "EU Cost", "DE Quantity"]);
        assert_eq!(mapping[0].header, "artist_name");
        assert_eq!(
            mapping[0].target,
            ColumnTarget::Canonical {
                column: "artist_name".to_string()
            }
        );
        assert_eq!(mapping[1].target, regional("EU", Measure::Price));
        assert_eq!(mapping[2].target, regional("DE", Measure::Quantity));
    }

    #[test]
    fn test_region_without_measure_is_unmapped() {
        assert_eq!(detect_target("us_warehouse"), ColumnTarget::Unmapped);
        assert_eq!(detect_target("us_"), ColumnTarget::Unmapped);
        assert_eq!(detect_target("price"), ColumnTarget::Unmapped);
    }

    #[test]
    fn test_collisions_and_headers() {
        let mut first = RawRow::new();
        first.insert("Style Name".to_string(), CellValue::from("Tee"));
        first.insert("SKU".to_string(), CellValue::from("T-1"));
        let mut second = RawRow::new();
        second.insert("style_name ".to_string(), CellValue::from("Hoodie"));
        second.insert("Price".to_string(), CellValue::from("10"));
        let raw = raw_headers_of(&[first, second]);

        assert_eq!(raw, vec!["Style Name", "SKU", "style_name ", "Price"]);
        assert_eq!(canonical_headers(&raw), vec!["style_name", "sku", "price"]);
        assert_eq!(
            find_collisions(&raw),
            vec![HeaderCollision {
                canonical: "style_name".to_string(),
                raw_headers: vec!["Style Name".to_string(), "style_name ".to_string()],
            }]
        );
    }

    #[test]
    fn test_same_header_in_every_row_is_not_a_collision() {
        let rows: Vec<RawRow> = (0..3)
            .map(|_| {
                let mut r = RawRow::new();
                r.insert("SKU".to_string(), CellValue::from("x"));
                r
            })
            .collect();
        assert!(find_collisions(&raw_headers_of(&rows)).is_empty());
    }

    #[test]
    fn test_repeated_header_column_is_a_collision() {
        assert_eq!(
            find_collisions(&["SKU", "Price", "Price"]),
            vec![HeaderCollision {
                canonical: "price".to_string(),
                raw_headers: vec!["Price".to_string(), "Price".to_string()],
            }]
        );
    }

    #[test]
    fn test_byte_order_mark_header_maps_to_canonical_column() {
        let mapping = suggest_mapping(&["\u{feff}SKU"]);
        assert_eq!(mapping[0].header, "sku");
        assert_eq!(
            mapping[0].target,
            ColumnTarget::Canonical {
                column: "sku".to_string()
            }
        );
    }
}
