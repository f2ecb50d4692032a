use thiserror::Error;

/// A relational rule broken by the current model. `Display` gives the
/// message shown to the user; positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryIssue {
    #[error("Please select at least one table")]
    NoTable,

    #[error("Missing JOIN conditions for selected tables")]
    MissingJoins,

    #[error("JOIN {join}: Please select both columns")]
    IncompleteJoin { join: usize },

    #[error("Please select at least one column or add a custom expression.")]
    EmptyProjection,

    #[error("Non-aggregated columns in SELECT must be in GROUP BY: {}", .columns.join(", "))]
    UngroupedColumns { columns: Vec<String> },

    #[error("Custom Expression {column}: Expression cannot be empty.")]
    EmptyCustomExpression { column: usize },

    #[error("Custom Expression {column}: Alias cannot be empty.")]
    EmptyCustomAlias { column: usize },

    #[error("Custom Expression {column}: Alias \"{alias}\" is already used.")]
    DuplicateCustomAlias { column: usize, alias: String },

    /// Join whose paired table is missing or was never picked.
    #[error("JOIN {join}: Please select a table")]
    JoinWithoutTable { join: usize },
}
