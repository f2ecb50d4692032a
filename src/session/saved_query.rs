use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::QueryModel;

/// Record handed to the persistence collaborator when a compiled query is
/// saved. The snapshot lets the builder reopen the query later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub id: Uuid,
    pub database_id: String,
    pub name: String,
    pub sql: String,
    /// Upper-cased leading keyword, e.g. `SELECT`.
    pub query_type: String,
    pub is_saved: bool,
    #[serde(default)]
    pub snapshot: Option<QueryModel>,
    pub created_at: DateTime<Utc>,
}

impl SavedQuery {
    pub fn new(database_id: &str, name: Option<&str>, sql: &str, snapshot: Option<QueryModel>) -> Self {
        let created_at = Utc::now();
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => Self::default_name(&created_at),
        };
        Self {
            id: Uuid::new_v4(),
            database_id: database_id.to_string(),
            name,
            sql: sql.to_string(),
            query_type: Self::query_type_of(sql),
            is_saved: true,
            snapshot,
            created_at,
        }
    }

    pub fn default_name(at: &DateTime<Utc>) -> String {
        format!("Saved Query {}", at.timestamp_millis())
    }

    /// First word of the statement, upper-cased. Empty text gives `""`.
    pub fn query_type_of(sql: &str) -> String {
        sql.split_whitespace()
            .next()
            .map(|word| word.trim_end_matches(';').to_uppercase())
            .unwrap_or_default()
    }
}
