use once_cell::sync::Lazy;
use ordered_float::NotNan;
use regex::Regex;
use serde::{Deserialize, Serialize};

static INT_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").expect("valid integer pattern"));
static FLOAT_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?(\d+\.\d*|\.\d+)([eE][+-]?\d+)?$").expect("valid decimal pattern"));

/// Right-hand side of a WHERE condition.
///
/// Text renders single-quoted; numbers render bare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Int(i64),
    Float(NotNan<f64>),
    Text(String),
}

impl Default for ConditionValue {
    fn default() -> Self {
        ConditionValue::Text(String::new())
    }
}

impl ConditionValue {
    /// Classify text from a value box: integers and decimals become numbers,
    /// anything else (including integers too large for `i64` and decimals
    /// too large for `f64`) stays text.
    pub fn infer(text: &str) -> Self {
        let trimmed = text.trim();
        if INT_TEXT.is_match(trimmed) {
            if let Ok(value) = trimmed.parse::<i64>() {
                return ConditionValue::Int(value);
            }
        } else if FLOAT_TEXT.is_match(trimmed) {
            if let Some(value) = trimmed.parse::<f64>().ok().and_then(Self::float) {
                return value;
            }
        }
        ConditionValue::Text(text.to_string())
    }

    /// `None` for NaN and infinities, which have no SQL literal.
    pub fn float(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        NotNan::new(value).ok().map(ConditionValue::Float)
    }

    /// Empty text counts as "no value yet"; numbers are always set.
    pub fn is_set(&self) -> bool {
        match self {
            ConditionValue::Text(text) => !text.is_empty(),
            ConditionValue::Int(_) | ConditionValue::Float(_) => true,
        }
    }

    /// Raw text of the value, without any quoting.
    pub fn as_text(&self) -> String {
        match self {
            ConditionValue::Int(i) => i.to_string(),
            ConditionValue::Float(f) => f.into_inner().to_string(),
            ConditionValue::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(text: &str) -> Self {
        ConditionValue::Text(text.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(text: String) -> Self {
        ConditionValue::Text(text)
    }
}

impl From<i64> for ConditionValue {
    fn from(value: i64) -> Self {
        ConditionValue::Int(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_classifies_numbers_and_text() {
        assert_eq!(ConditionValue::infer("42"), ConditionValue::Int(42));
        assert_eq!(ConditionValue::infer(" -7 "), ConditionValue::Int(-7));
        assert_eq!(ConditionValue::infer("3.5"), ConditionValue::float(3.5).unwrap());
        assert_eq!(ConditionValue::infer("paid"), ConditionValue::Text("paid".into()));
        assert_eq!(ConditionValue::infer("1, 2"), ConditionValue::Text("1, 2".into()));
        assert_eq!(ConditionValue::infer(""), ConditionValue::Text(String::new()));
    }

    #[test]
    fn infer_keeps_overflowing_integers_as_text() {
        let huge = "99999999999999999999999";
        assert_eq!(ConditionValue::infer(huge), ConditionValue::Text(huge.into()));
    }

    #[test]
    fn infer_keeps_overflowing_decimals_as_text() {
        for huge in ["1.5e999", "-2.0E400"] {
            assert_eq!(ConditionValue::infer(huge), ConditionValue::Text(huge.into()));
        }
        assert_eq!(ConditionValue::infer("1.5e300"), ConditionValue::float(1.5e300).unwrap());
    }

    #[test]
    fn is_set_only_false_for_empty_text() {
        assert!(!ConditionValue::default().is_set());
        assert!(ConditionValue::from("x").is_set());
        assert!(ConditionValue::from(0).is_set());
    }

    #[test]
    fn deserializes_untagged() {
        let values: Vec<ConditionValue> = serde_json::from_str(r#"[5, 2.5, "5"]"#).expect("deserialize");
        assert_eq!(values[0], ConditionValue::Int(5));
        assert_eq!(values[1], ConditionValue::float(2.5).unwrap());
        assert_eq!(values[2], ConditionValue::Text("5".into()));
    }

    #[test]
    fn float_rejects_nan_and_infinity() {
        assert!(ConditionValue::float(f64::NAN).is_none());
        assert!(ConditionValue::float(f64::INFINITY).is_none());
        assert!(ConditionValue::float(f64::NEG_INFINITY).is_none());
    }
}
