use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, ColumnCandidate},
    model::{normalize_keyword, QueryModel, UnknownKeyword},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_keyword(s).as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => UnknownKeyword::new("sort direction", s).err(),
        }
    }
}

/// What an ORDER BY entry sorts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Table column, rendered bare (`u.created_at`).
    Column(String),
    /// Output alias of a selection or custom column, rendered double-quoted.
    Alias(String),
}

impl SortKey {
    pub fn is_empty(&self) -> bool {
        match self {
            SortKey::Column(name) | SortKey::Alias(name) => name.is_empty(),
        }
    }

    /// Reads a picker value where aliases arrive wrapped in double quotes
    /// (`"total"`) and columns arrive bare.
    pub fn from_picker_value(value: &str) -> Self {
        match value.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
            Some(alias) => SortKey::Alias(alias.to_string()),
            None => SortKey::Column(value.to_string()),
        }
    }

    /// Every sortable reference: catalog columns of the selected tables, then
    /// selection aliases, then custom column aliases.
    pub fn candidates(model: &QueryModel, catalog: &dyn Catalog) -> Vec<SortKey> {
        let mut keys: Vec<SortKey> = ColumnCandidate::collect(&model.tables, catalog)
            .into_iter()
            .map(|c| SortKey::Column(c.qualified_name))
            .collect();
        keys.extend(
            model.columns
                .values()
                .filter_map(|c| c.alias())
                .map(|alias| SortKey::Alias(alias.to_string())),
        );
        keys.extend(
            model.custom_columns
                .iter()
                .filter(|c| !c.output_alias.is_empty())
                .map(|c| SortKey::Alias(c.output_alias.clone())),
        );
        keys
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderBy {
    pub reference: Option<SortKey>,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderByEdit {
    Reference(Option<SortKey>),
    Direction(SortDirection),
}

impl OrderBy {
    pub fn new(reference: SortKey, direction: SortDirection) -> Self {
        Self { reference: Some(reference), direction }
    }

    /// The non-empty sort key, if one was chosen.
    pub fn key(&self) -> Option<&SortKey> {
        self.reference.as_ref().filter(|key| !key.is_empty())
    }

    pub fn apply(&mut self, edit: OrderByEdit) {
        match edit {
            OrderByEdit::Reference(reference) => self.reference = reference,
            OrderByEdit::Direction(direction) => self.direction = direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{MemoryCatalog, TableDescriptor},
        model::{ColumnSelection, CustomColumn, TableRef},
    };

    #[test]
    fn picker_value_distinguishes_aliases() {
        assert_eq!(SortKey::from_picker_value("\"total\""), SortKey::Alias("total".into()));
        assert_eq!(SortKey::from_picker_value("u.id"), SortKey::Column("u.id".into()));
        assert_eq!(SortKey::from_picker_value("\""), SortKey::Column("\"".into()));
    }

    #[test]
    fn key_ignores_empty_reference() {
        let mut order = OrderBy::default();
        assert!(order.key().is_none());
        order.apply(OrderByEdit::Reference(Some(SortKey::Column(String::new()))));
        assert!(order.key().is_none());
        order.apply(OrderByEdit::Reference(Some(SortKey::Column("u.id".into()))));
        order.apply(OrderByEdit::Direction(SortDirection::Desc));
        assert_eq!(order, OrderBy::new(SortKey::Column("u.id".into()), SortDirection::Desc));
    }

    #[test]
    fn candidates_list_columns_then_aliases() {
        let catalog = MemoryCatalog::from_descriptors([
            TableDescriptor::new("t1", "users").with_column("id", "integer").with_column("name", "text"),
        ]);
        let mut model = QueryModel::default();
        model.tables.push(TableRef::new("t1", "users").with_alias("u"));
        let col = ColumnSelection::new("u.name", "text").with_alias("who");
        model.columns.insert(col.qualified_name.clone(), col);
        model.custom_columns.push(CustomColumn::new("1 + 1", "two"));
        model.custom_columns.push(CustomColumn::new("3", ""));

        let keys = SortKey::candidates(&model, &catalog);
        assert_eq!(keys, vec![
            SortKey::Column("u.id".into()),
            SortKey::Column("u.name".into()),
            SortKey::Alias("who".into()),
            SortKey::Alias("two".into()),
        ]);
    }

    #[test]
    fn direction_parses() {
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("down".parse::<SortDirection>().is_err());
    }
}
