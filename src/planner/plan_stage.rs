use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical stages of a SELECT, in the order they are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    #[serde(rename = "FROM")]
    From,
    #[serde(rename = "JOIN")]
    Join,
    #[serde(rename = "WHERE")]
    Where,
    #[serde(rename = "GROUP BY")]
    GroupBy,
    #[serde(rename = "HAVING")]
    Having,
    #[serde(rename = "SELECT")]
    Select,
    #[serde(rename = "ORDER BY")]
    OrderBy,
    #[serde(rename = "LIMIT")]
    Limit,
}

impl StageKind {
    pub const PIPELINE: [StageKind; 8] = [
        StageKind::From,
        StageKind::Join,
        StageKind::Where,
        StageKind::GroupBy,
        StageKind::Having,
        StageKind::Select,
        StageKind::OrderBy,
        StageKind::Limit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StageKind::From => "FROM",
            StageKind::Join => "JOIN",
            StageKind::Where => "WHERE",
            StageKind::GroupBy => "GROUP BY",
            StageKind::Having => "HAVING",
            StageKind::Select => "SELECT",
            StageKind::OrderBy => "ORDER BY",
            StageKind::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the plan view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStage {
    pub kind: StageKind,
    pub enabled: bool,
    pub summary: String,
}

impl PlanStage {
    pub fn new(kind: StageKind, enabled: bool, summary: impl Into<String>) -> Self {
        Self { kind, enabled, summary: summary.into() }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl fmt::Display for PlanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.enabled { "*" } else { " " };
        write!(f, "[{}] {}: {}", marker, self.kind, self.summary)
    }
}
