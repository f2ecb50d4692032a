use thiserror::Error;

use crate::validator::QueryIssue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("query model is invalid: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<QueryIssue>),

    /// Table id is set but no catalog name was resolved for it.
    #[error("table at position {position} has no resolved name")]
    UnresolvedTable { position: usize },

    /// Join (1-based) with no table at the position it attaches.
    #[error("JOIN {join} has no table to attach")]
    DanglingJoin { join: usize },

    #[error("internal compiler failure: {0}")]
    Internal(String),
}

impl CompileError {
    pub fn err<T>(self) -> Result<T, CompileError> {
        Err(self)
    }
}
