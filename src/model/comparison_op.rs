use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::model::{normalize_keyword, UnknownKeyword};

/// Binary comparison used by JOIN ... ON, HAVING and the plain WHERE forms.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
}

impl ComparisonOp {
    pub const ALL: [ComparisonOp; 6] = [
        ComparisonOp::Eq,
        ComparisonOp::NotEq,
        ComparisonOp::Gt,
        ComparisonOp::Lt,
        ComparisonOp::GtEq,
        ComparisonOp::LtEq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "!=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Lt => "<",
            ComparisonOp::GtEq => ">=",
            ComparisonOp::LtEq => "<=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComparisonOp({})", self)
    }
}

impl FromStr for ComparisonOp {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = normalize_keyword(s);
        if text == "<>" {
            return Ok(ComparisonOp::NotEq);
        }
        ComparisonOp::ALL
            .into_iter()
            .find(|op| op.as_str() == text)
            .ok_or_else(|| UnknownKeyword::new("comparison operator", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_rendered_form() {
        for op in ComparisonOp::ALL {
            assert_eq!(op.as_str().parse::<ComparisonOp>(), Ok(op));
        }
    }

    #[test]
    fn accepts_ansi_not_equal() {
        assert_eq!(" <> ".parse::<ComparisonOp>(), Ok(ComparisonOp::NotEq));
    }

    #[test]
    fn rejects_like() {
        assert!("LIKE".parse::<ComparisonOp>().is_err());
    }
}
