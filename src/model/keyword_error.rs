use thiserror::Error;

/// Raised when host-supplied text does not name a known SQL keyword
/// (join type, operator, aggregation, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{text}'")]
pub struct UnknownKeyword {
    pub kind: &'static str,
    pub text: String,
}

impl UnknownKeyword {
    pub fn new(kind: &'static str, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }

    pub fn err<T>(self) -> Result<T, UnknownKeyword> {
        Err(self)
    }
}

/// Collapses runs of whitespace and upper-cases keyword text typed by a host,
/// so `"left   join"` and `"LEFT JOIN"` compare equal.
pub(crate) fn normalize_keyword(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}
