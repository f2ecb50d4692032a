use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub column_type: String,
}

/// One table as listed by the catalog collaborator:
/// `{ "id": ..., "name": ..., "columns": [{ "name": ..., "type": ... }] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: &str, column_type: &str) -> Self {
        self.columns.push(ColumnDescriptor {
            name: name.to_string(),
            column_type: column_type.to_string(),
        });
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}
