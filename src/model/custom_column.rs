use serde::{Deserialize, Serialize};

/// Free-form projection expression, always emitted as `expression AS "alias"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomColumn {
    pub expression: String,
    pub output_alias: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomColumnEdit {
    Expression(String),
    Alias(String),
}

impl CustomColumn {
    pub fn new(expression: &str, output_alias: &str) -> Self {
        Self {
            expression: expression.to_string(),
            output_alias: output_alias.to_string(),
        }
    }

    pub fn apply(&mut self, edit: CustomColumnEdit) {
        match edit {
            CustomColumnEdit::Expression(expression) => self.expression = expression,
            CustomColumnEdit::Alias(alias) => self.output_alias = alias,
        }
    }
}
