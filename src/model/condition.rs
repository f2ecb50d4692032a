use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::model::{normalize_keyword, ComparisonOp, ConditionValue, UnknownKeyword};

/// Connective placed in front of a condition to join it to the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl Logic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Logic {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_keyword(s).as_str() {
            "AND" => Ok(Logic::And),
            "OR" => Ok(Logic::Or),
            _ => UnknownKeyword::new("logic", s).err(),
        }
    }
}

/// WHERE operator. `IsNull` and `IsNotNull` take no value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConditionOperator {
    Compare(ComparisonOp),
    Like,
    NotLike,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl Default for ConditionOperator {
    fn default() -> Self {
        ConditionOperator::Compare(ComparisonOp::Eq)
    }
}

impl ConditionOperator {
    pub const ALL: [ConditionOperator; 12] = [
        ConditionOperator::Compare(ComparisonOp::Eq),
        ConditionOperator::Compare(ComparisonOp::NotEq),
        ConditionOperator::Compare(ComparisonOp::Gt),
        ConditionOperator::Compare(ComparisonOp::Lt),
        ConditionOperator::Compare(ComparisonOp::GtEq),
        ConditionOperator::Compare(ComparisonOp::LtEq),
        ConditionOperator::Like,
        ConditionOperator::NotLike,
        ConditionOperator::In,
        ConditionOperator::NotIn,
        ConditionOperator::IsNull,
        ConditionOperator::IsNotNull,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Compare(op) => op.as_str(),
            ConditionOperator::Like => "LIKE",
            ConditionOperator::NotLike => "NOT LIKE",
            ConditionOperator::In => "IN",
            ConditionOperator::NotIn => "NOT IN",
            ConditionOperator::IsNull => "IS NULL",
            ConditionOperator::IsNotNull => "IS NOT NULL",
        }
    }

    pub fn is_nullary(&self) -> bool {
        matches!(self, ConditionOperator::IsNull | ConditionOperator::IsNotNull)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ConditionOperator::In | ConditionOperator::NotIn)
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConditionOperator({})", self)
    }
}

impl FromStr for ConditionOperator {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(op) = s.parse::<ComparisonOp>() {
            return Ok(ConditionOperator::Compare(op));
        }
        let text = normalize_keyword(s);
        ConditionOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == text)
            .ok_or_else(|| UnknownKeyword::new("condition operator", s))
    }
}

impl From<ComparisonOp> for ConditionOperator {
    fn from(op: ComparisonOp) -> Self {
        ConditionOperator::Compare(op)
    }
}

impl From<ConditionOperator> for String {
    fn from(op: ConditionOperator) -> Self {
        op.as_str().to_string()
    }
}

impl TryFrom<String> for ConditionOperator {
    type Error = UnknownKeyword;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

/// One WHERE condition. `logic` joins it to the previous condition and is
/// ignored on the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub subject: String,
    pub operator: ConditionOperator,
    pub value: ConditionValue,
    pub logic: Logic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionEdit {
    Subject(String),
    Operator(ConditionOperator),
    Value(ConditionValue),
    Logic(Logic),
}

impl Condition {
    pub fn new(subject: &str, operator: ConditionOperator, value: impl Into<ConditionValue>) -> Self {
        Self {
            subject: subject.to_string(),
            operator,
            value: value.into(),
            logic: Logic::And,
        }
    }

    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }

    pub fn has_subject(&self) -> bool {
        !self.subject.is_empty()
    }

    /// Complete enough to render: a subject plus a value, unless the operator
    /// takes none.
    pub fn is_renderable(&self) -> bool {
        self.has_subject() && (self.value.is_set() || self.operator.is_nullary())
    }

    pub fn apply(&mut self, edit: ConditionEdit) {
        match edit {
            ConditionEdit::Subject(subject) => self.subject = subject,
            ConditionEdit::Operator(operator) => self.operator = operator,
            ConditionEdit::Value(value) => self.value = value,
            ConditionEdit::Logic(logic) => self.logic = logic,
        }
    }
}
