use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// A table picked into the query. Position 0 drives the FROM clause; every
/// later position is attached through the join at `position - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRef {
    /// Catalog id; empty while the picker is unset.
    pub id: String,
    /// Display name resolved from the catalog.
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEdit {
    /// Select a catalog table; the name is resolved from the catalog.
    Id(String),
    Name(String),
    /// Empty text clears the alias.
    Alias(String),
}

impl TableRef {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = non_empty(alias);
        self
    }

    pub fn is_selected(&self) -> bool {
        !self.id.is_empty()
    }

    /// Name used to qualify this table's columns: the alias when present.
    pub fn visible_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn apply(&mut self, edit: TableEdit, catalog: &dyn Catalog) {
        match edit {
            TableEdit::Id(id) => {
                self.name = catalog.table(&id).map(|t| t.name).unwrap_or_default();
                self.id = id;
            }
            TableEdit::Name(name) => self.name = name,
            TableEdit::Alias(alias) => self.alias = non_empty(&alias),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() { None } else { Some(text.to_string()) }
}
