use serde::{Deserialize, Serialize};

use crate::model::{Aggregation, ComparisonOp, Logic};

/// Filter on an aggregated value: `AGG(column) op value`.
///
/// The value is emitted verbatim, so numeric thresholds stay bare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HavingCondition {
    pub aggregation: Aggregation,
    pub column: String,
    pub operator: ComparisonOp,
    pub value: String,
    pub logic: Logic,
}

impl Default for HavingCondition {
    fn default() -> Self {
        Self {
            aggregation: Aggregation::Count,
            column: String::new(),
            operator: ComparisonOp::Gt,
            value: String::new(),
            logic: Logic::And,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HavingEdit {
    Aggregation(Aggregation),
    Column(String),
    Operator(ComparisonOp),
    Value(String),
    Logic(Logic),
}

impl HavingCondition {
    pub fn new(aggregation: Aggregation, column: &str, operator: ComparisonOp, value: &str) -> Self {
        Self {
            aggregation,
            column: column.to_string(),
            operator,
            value: value.to_string(),
            logic: Logic::And,
        }
    }

    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }

    pub fn has_subject(&self) -> bool {
        !self.column.is_empty()
    }

    pub fn is_renderable(&self) -> bool {
        self.has_subject() && !self.value.is_empty()
    }

    pub fn apply(&mut self, edit: HavingEdit) {
        match edit {
            HavingEdit::Aggregation(aggregation) => self.aggregation = aggregation,
            HavingEdit::Column(column) => self.column = column,
            HavingEdit::Operator(operator) => self.operator = operator,
            HavingEdit::Value(value) => self.value = value,
            HavingEdit::Logic(logic) => self.logic = logic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts_greater_than() {
        let having = HavingCondition::default();
        assert_eq!(having.aggregation, Aggregation::Count);
        assert_eq!(having.operator, ComparisonOp::Gt);
        assert!(!having.has_subject());
    }

    #[test]
    fn renderable_needs_column_and_value() {
        let mut having = HavingCondition::default();
        having.apply(HavingEdit::Column("o.id".into()));
        assert!(!having.is_renderable());
        having.apply(HavingEdit::Value("5".into()));
        assert!(having.is_renderable());
    }
}
