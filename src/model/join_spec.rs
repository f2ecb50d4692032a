use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::model::{normalize_keyword, ComparisonOp, UnknownKeyword};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    #[default]
    #[serde(rename = "INNER JOIN")]
    Inner,
    #[serde(rename = "LEFT JOIN")]
    Left,
    #[serde(rename = "RIGHT JOIN")]
    Right,
    #[serde(rename = "FULL OUTER JOIN")]
    FullOuter,
}

impl JoinType {
    pub const ALL: [JoinType; 4] = [JoinType::Inner, JoinType::Left, JoinType::Right, JoinType::FullOuter];

    pub fn as_str(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::FullOuter => "FULL OUTER JOIN",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinType {
    type Err = UnknownKeyword;

    /// Accepts `INNER JOIN` as well as the bare `INNER`, and `FULL` for `FULL OUTER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = normalize_keyword(s);
        let head = text.strip_suffix(" JOIN").unwrap_or(&text);
        match head {
            "INNER" => Ok(JoinType::Inner),
            "LEFT" | "LEFT OUTER" => Ok(JoinType::Left),
            "RIGHT" | "RIGHT OUTER" => Ok(JoinType::Right),
            "FULL" | "FULL OUTER" => Ok(JoinType::FullOuter),
            _ => UnknownKeyword::new("join type", s).err(),
        }
    }
}

/// Join between the tables already in the query and the table introduced at
/// the next position.
///
/// `left_column` references any earlier table; `right_column` references the
/// joined table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinSpec {
    pub join_type: JoinType,
    pub left_column: String,
    pub operator: ComparisonOp,
    pub right_column: String,
}

/// A single field change on a [`JoinSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinEdit {
    JoinType(JoinType),
    LeftColumn(String),
    Operator(ComparisonOp),
    RightColumn(String),
}

impl JoinSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(join_type: JoinType, left_column: &str, operator: ComparisonOp, right_column: &str) -> Self {
        Self {
            join_type,
            left_column: left_column.to_string(),
            operator,
            right_column: right_column.to_string(),
        }
    }

    /// Both endpoints are chosen.
    pub fn is_complete(&self) -> bool {
        !self.left_column.is_empty() && !self.right_column.is_empty()
    }

    pub fn apply(&mut self, edit: JoinEdit) {
        match edit {
            JoinEdit::JoinType(join_type) => self.join_type = join_type,
            JoinEdit::LeftColumn(column) => self.left_column = column,
            JoinEdit::Operator(operator) => self.operator = operator,
            JoinEdit::RightColumn(column) => self.right_column = column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_type_parses_long_and_short_forms() {
        assert_eq!("inner join".parse::<JoinType>(), Ok(JoinType::Inner));
        assert_eq!("LEFT".parse::<JoinType>(), Ok(JoinType::Left));
        assert_eq!("full".parse::<JoinType>(), Ok(JoinType::FullOuter));
        assert_eq!("FULL OUTER JOIN".parse::<JoinType>(), Ok(JoinType::FullOuter));
        assert!("CROSS JOIN".parse::<JoinType>().is_err());
    }

    #[test]
    fn default_join_is_inner_equality_without_endpoints() {
        let join = JoinSpec::new();
        assert_eq!(join.join_type, JoinType::Inner);
        assert_eq!(join.operator, ComparisonOp::Eq);
        assert!(!join.is_complete());
    }

    #[test]
    fn apply_sets_each_field() {
        let mut join = JoinSpec::new();
        join.apply(JoinEdit::LeftColumn("u.id".into()));
        assert!(!join.is_complete());
        join.apply(JoinEdit::RightColumn("o.user_id".into()));
        join.apply(JoinEdit::JoinType(JoinType::Left));
        join.apply(JoinEdit::Operator(ComparisonOp::GtEq));
        assert!(join.is_complete());
        assert_eq!(join, JoinSpec::on(JoinType::Left, "u.id", ComparisonOp::GtEq, "o.user_id"));
    }

    #[test]
    fn serializes_with_sql_keywords() {
        let join = JoinSpec::on(JoinType::FullOuter, "a.id", ComparisonOp::NotEq, "b.a_id");
        let value = serde_json::to_value(&join).expect("serialize");
        assert_eq!(value["join_type"], "FULL OUTER JOIN");
        assert_eq!(value["operator"], "!=");
    }
}
