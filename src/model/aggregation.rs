use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::model::{normalize_keyword, UnknownKeyword};

/// Aggregate function applied to a selected column or a HAVING subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Aggregation {
    #[default]
    Count,
    Sum,
    Avg,
    Min,
    Max,
    GroupConcat,
}

impl Aggregation {
    pub const ALL: [Aggregation; 6] = [
        Aggregation::Count,
        Aggregation::Sum,
        Aggregation::Avg,
        Aggregation::Min,
        Aggregation::Max,
        Aggregation::GroupConcat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Count => "COUNT",
            Aggregation::Sum => "SUM",
            Aggregation::Avg => "AVG",
            Aggregation::Min => "MIN",
            Aggregation::Max => "MAX",
            Aggregation::GroupConcat => "GROUP_CONCAT",
        }
    }

    /// Picker label, e.g. `SUM - Sum values`.
    pub fn label(&self) -> &'static str {
        match self {
            Aggregation::Count => "COUNT - Count rows",
            Aggregation::Sum => "SUM - Sum values",
            Aggregation::Avg => "AVG - Average",
            Aggregation::Min => "MIN - Minimum",
            Aggregation::Max => "MAX - Maximum",
            Aggregation::GroupConcat => "GROUP_CONCAT - Concatenate",
        }
    }

    /// `FUNC(column)`
    pub fn apply_to(&self, column: &str) -> String {
        format!("{}({})", self.as_str(), column)
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = normalize_keyword(s);
        Aggregation::ALL
            .into_iter()
            .find(|agg| agg.as_str() == text)
            .ok_or_else(|| UnknownKeyword::new("aggregation", s))
    }
}
