use crate::{catalog::Catalog, model::TableRef};

/// A column offered by the pickers, qualified by its table's visible name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCandidate {
    pub table_name: String,
    /// Alias when set, otherwise the table name.
    pub table_alias: String,
    /// Position of the owning table in the query.
    pub table_index: usize,
    pub column_name: String,
    pub column_type: String,
    pub qualified_name: String,
}

impl ColumnCandidate {
    /// All columns of every selected table, in table then catalog order.
    /// Tables unknown to the catalog contribute nothing.
    pub fn collect(tables: &[TableRef], catalog: &dyn Catalog) -> Vec<ColumnCandidate> {
        let mut out = Vec::new();
        for (table_index, table_ref) in tables.iter().enumerate() {
            let Some(table) = catalog.table(&table_ref.id) else {
                continue;
            };
            let visible = table_ref.alias.clone().unwrap_or_else(|| table.name.clone());
            for column in &table.columns {
                out.push(ColumnCandidate {
                    table_name: table.name.clone(),
                    table_alias: visible.clone(),
                    table_index,
                    column_name: column.name.clone(),
                    column_type: column.column_type.clone(),
                    qualified_name: format!("{}.{}", visible, column.name),
                });
            }
        }
        out
    }

    /// Candidates for the left side of the join attaching `table_position`:
    /// columns of any earlier table.
    pub fn join_left(candidates: &[ColumnCandidate], table_position: usize) -> Vec<&ColumnCandidate> {
        candidates.iter().filter(|c| c.table_index < table_position).collect()
    }

    /// Candidates for the right side: columns of the joined table itself.
    pub fn join_right(candidates: &[ColumnCandidate], table_position: usize) -> Vec<&ColumnCandidate> {
        candidates.iter().filter(|c| c.table_index == table_position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MemoryCatalog, TableDescriptor};

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::from_descriptors([
            TableDescriptor::new("t1", "users").with_column("id", "integer").with_column("name", "text"),
            TableDescriptor::new("t2", "orders").with_column("id", "integer").with_column("user_id", "integer"),
        ])
    }

    #[test]
    fn qualifies_with_alias_or_table_name() {
        let tables = vec![
            TableRef::new("t1", "users").with_alias("u"),
            TableRef::new("t2", "orders"),
        ];
        let names: Vec<String> = ColumnCandidate::collect(&tables, &catalog())
            .into_iter()
            .map(|c| c.qualified_name)
            .collect();
        assert_eq!(names, vec!["u.id", "u.name", "orders.id", "orders.user_id"]);
    }

    #[test]
    fn skips_unset_and_unknown_tables() {
        let tables = vec![TableRef::default(), TableRef::new("nope", "nope"), TableRef::new("t2", "orders")];
        let candidates = ColumnCandidate::collect(&tables, &catalog());
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.table_index == 2));
    }

    #[test]
    fn join_sides_split_by_position() {
        let tables = vec![TableRef::new("t1", "users"), TableRef::new("t2", "orders")];
        let candidates = ColumnCandidate::collect(&tables, &catalog());
        let left: Vec<&str> = ColumnCandidate::join_left(&candidates, 1).into_iter().map(|c| c.qualified_name.as_str()).collect();
        let right: Vec<&str> = ColumnCandidate::join_right(&candidates, 1).into_iter().map(|c| c.qualified_name.as_str()).collect();
        assert_eq!(left, vec!["users.id", "users.name"]);
        assert_eq!(right, vec!["orders.id", "orders.user_id"]);
    }
}
