use serde::{Deserialize, Serialize};

use crate::{catalog::ColumnCandidate, model::Aggregation};

/// A catalog column ticked into the projection, keyed by `qualified_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSelection {
    /// `visible_table.column`, e.g. `u.email`.
    pub qualified_name: String,
    pub column_type: String,
    pub aggregation: Option<Aggregation>,
    pub output_alias: Option<String>,
}

impl ColumnSelection {
    pub fn new(qualified_name: &str, column_type: &str) -> Self {
        Self {
            qualified_name: qualified_name.to_string(),
            column_type: column_type.to_string(),
            aggregation: None,
            output_alias: None,
        }
    }

    pub fn aggregated(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.set_alias(alias);
        self
    }

    pub fn is_aggregated(&self) -> bool {
        self.aggregation.is_some()
    }

    pub fn alias(&self) -> Option<&str> {
        self.output_alias.as_deref()
    }

    pub(crate) fn set_alias(&mut self, alias: &str) {
        self.output_alias = if alias.is_empty() { None } else { Some(alias.to_string()) };
    }

    /// Projection expression without the alias: `AGG(col)` or `col`.
    pub fn expression(&self) -> String {
        match &self.aggregation {
            Some(aggregation) => aggregation.apply_to(&self.qualified_name),
            None => self.qualified_name.clone(),
        }
    }
}

impl From<&ColumnCandidate> for ColumnSelection {
    fn from(candidate: &ColumnCandidate) -> Self {
        ColumnSelection::new(&candidate.qualified_name, &candidate.column_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_wraps_aggregation() {
        let plain = ColumnSelection::new("o.total", "decimal");
        assert_eq!(plain.expression(), "o.total");
        let summed = plain.aggregated(Aggregation::Sum);
        assert_eq!(summed.expression(), "SUM(o.total)");
        assert!(summed.is_aggregated());
    }

    #[test]
    fn empty_alias_is_none() {
        let col = ColumnSelection::new("u.id", "integer").with_alias("");
        assert_eq!(col.alias(), None);
        let col = col.with_alias("user_id");
        assert_eq!(col.alias(), Some("user_id"));
    }
}
