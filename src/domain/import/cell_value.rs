// ============================================================
// CELL VALUE
// ============================================================
// Scalar carried by raw and normalized rows

use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;

/// Largest integer an f64 holds exactly; beyond it numbers keep their float form.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// True only for the empty string; `Null` and whitespace are not empty.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, CellValue::Text(text) if text.is_empty())
    }

    /// String form fed to numeric coercion.
    pub fn to_coercion_string(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("null"),
            CellValue::Bool(true) => Cow::Borrowed("true"),
            CellValue::Bool(false) => Cow::Borrowed("false"),
            CellValue::Number(n) => Cow::Owned(n.to_string()),
            CellValue::Text(text) => Cow::Borrowed(text.as_str()),
        }
    }
}

// Integral numbers go out as JSON integers so `1250` stays `1250`.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(value) => serializer.serialize_bool(*value),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_json_scalars() {
        let values: Vec<CellValue> =
            serde_json::from_value(json!([null, true, 12, 3.5, "N/A"])).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Number(12.0),
                CellValue::Number(3.5),
                CellValue::Text("N/A".to_string()),
            ]
        );
    }

    #[test]
    fn test_integral_numbers_serialize_without_fraction() {
        let out = serde_json::to_string(&CellValue::Number(1250.0)).unwrap();
        assert_eq!(out, "1250");
        let out = serde_json::to_string(&CellValue::Number(12.5)).unwrap();
        assert_eq!(out, "12.5");
    }

    #[test]
    fn test_only_empty_string_is_empty_text() {
        assert!(CellValue::from("").is_empty_text());
        assert!(!CellValue::from(" ").is_empty_text());
        assert!(!CellValue::Null.is_empty_text());
    }

    #[test]
    fn test_coercion_string_of_number_round_trips() {
        assert_eq!(CellValue::Number(42.0).to_coercion_string(), "42");
        assert_eq!(CellValue::Number(-0.25).to_coercion_string(), "-0.25");
    }
}
