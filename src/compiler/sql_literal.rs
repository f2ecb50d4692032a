use crate::model::ConditionValue;

/// Quoting rules for the text the compiler splices into SQL.
pub struct SqlLiteral;

impl SqlLiteral {
    /// `'text'` with embedded single quotes doubled.
    pub fn string(text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }

    /// `"alias"` with embedded double quotes doubled.
    pub fn alias(alias: &str) -> String {
        format!("\"{}\"", alias.replace('"', "\"\""))
    }

    /// Numbers bare, text single-quoted.
    pub fn value(value: &ConditionValue) -> String {
        match value {
            ConditionValue::Int(i) => i.to_string(),
            ConditionValue::Float(f) => f.into_inner().to_string(),
            ConditionValue::Text(text) => Self::string(text),
        }
    }

    /// Splits a comma-separated value into `('a', 'b', 'c')`; every item is
    /// trimmed and quoted as text.
    pub fn list(value: &ConditionValue) -> String {
        let text = value.as_text();
        let items: Vec<String> = text.split(',').map(|item| Self::string(item.trim())).collect();
        format!("({})", items.join(", "))
    }
}
