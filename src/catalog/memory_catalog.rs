use indexmap::IndexMap;
use serde_json::Value;

use crate::catalog::{Catalog, TableDescriptor};

/// In-memory catalog keyed by table id, kept in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCatalog {
    tables: IndexMap<String, TableDescriptor>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_descriptors(descriptors: impl IntoIterator<Item = TableDescriptor>) -> Self {
        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.insert(descriptor);
        }
        catalog
    }

    /// Load a JSON listing (`[{id, name, columns: [{name, type}]}]`), keeping
    /// at most `limit` tables.
    pub fn load_from_json(listing: Value, limit: usize) -> Result<Self, serde_json::Error> {
        let descriptors: Vec<TableDescriptor> = serde_json::from_value(listing)?;
        Ok(Self::from_descriptors(descriptors.into_iter().take(limit)))
    }

    pub fn load_from_str(listing: &str, limit: usize) -> Result<Self, serde_json::Error> {
        Self::load_from_json(serde_json::from_str(listing)?, limit)
    }

    /// Inserts or replaces the table with the same id.
    pub fn insert(&mut self, descriptor: TableDescriptor) {
        self.tables.insert(descriptor.id.clone(), descriptor);
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Catalog for MemoryCatalog {
    fn table(&self, id: &str) -> Option<TableDescriptor> {
        self.tables.get(id).cloned()
    }

    fn tables(&self) -> Vec<TableDescriptor> {
        self.tables.values().cloned().collect()
    }
}
