use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    catalog::Catalog,
    model::{
        Aggregation, ColumnSelection, Condition, ConditionEdit, CustomColumn, CustomColumnEdit,
        HavingCondition, HavingEdit, JoinAlignment, JoinEdit, JoinSpec, OrderBy, OrderByEdit,
        TableEdit, TableRef,
    },
};

/// Structured intent of a SELECT statement under construction.
///
/// Every mutator is total: out-of-range indices and unknown keys leave the
/// model untouched. The GROUP BY rule may be transiently broken between
/// edits; the validator reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryModel {
    pub tables: Vec<TableRef>,
    /// `joins[i]` attaches `tables[i + 1]`.
    pub joins: Vec<JoinSpec>,
    /// Keyed by qualified column name, in selection order.
    pub columns: IndexMap<String, ColumnSelection>,
    pub custom_columns: Vec<CustomColumn>,
    pub conditions: Vec<Condition>,
    pub group_by: IndexSet<String>,
    pub having: Vec<HavingCondition>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub distinct: bool,
}

impl QueryModel {
    /// Model at the start of a builder session: one unset table and one
    /// empty condition ready to be filled in.
    pub fn new() -> Self {
        Self {
            tables: vec![TableRef::default()],
            conditions: vec![Condition::default()],
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ---- tables ----

    /// Appends an unset table. The join for it is created by `add_join` or on
    /// the first `update_join`.
    pub fn add_table(&mut self) {
        self.tables.push(TableRef::default());
        self.check_join_alignment();
    }

    /// Removes the table and, for any position after the driving table, the
    /// join that attached it. Removing the driving table leaves the joins in
    /// place; their endpoints must be reassigned by the caller.
    pub fn remove_table(&mut self, idx: usize) {
        if idx >= self.tables.len() {
            return;
        }
        self.tables.remove(idx);
        if idx > 0 && idx - 1 < self.joins.len() {
            self.joins.remove(idx - 1);
        }
        self.check_join_alignment();
    }

    pub fn update_table(&mut self, idx: usize, edit: TableEdit, catalog: &dyn Catalog) {
        if let Some(table) = self.tables.get_mut(idx) {
            table.apply(edit, catalog);
        }
    }

    /// Table attached by `joins[join_idx]`.
    pub fn joined_table(&self, join_idx: usize) -> Option<&TableRef> {
        self.tables.get(join_idx + 1)
    }

    // ---- joins ----

    pub fn add_join(&mut self) {
        self.joins.push(JoinSpec::default());
    }

    /// Edits the join attaching `tables[idx + 1]`. If that table exists but
    /// its join does not yet, default joins are created up to `idx` first.
    pub fn update_join(&mut self, idx: usize, edit: JoinEdit) {
        if idx >= self.joins.len() {
            if idx + 1 >= self.tables.len() {
                return;
            }
            self.joins.resize_with(idx + 1, JoinSpec::default);
        }
        if let Some(join) = self.joins.get_mut(idx) {
            join.apply(edit);
        }
    }

    pub fn join_alignment(&self) -> JoinAlignment {
        JoinAlignment::of(self.tables.len(), self.joins.len())
    }

    fn check_join_alignment(&self) {
        let alignment = self.join_alignment();
        if self.tables.len() > 1 && !alignment.is_aligned() {
            warn!(tables = self.tables.len(), joins = self.joins.len(), %alignment, "join list out of step with tables");
        }
    }

    // ---- selected columns ----

    /// Adds the column (without aggregation or alias) or removes it if it is
    /// already selected.
    pub fn toggle_column(&mut self, column: impl Into<ColumnSelection>) {
        let column = column.into();
        if self.columns.shift_remove(&column.qualified_name).is_none() {
            let selection = ColumnSelection::new(&column.qualified_name, &column.column_type);
            self.columns.insert(selection.qualified_name.clone(), selection);
        }
    }

    pub fn update_column_aggregation(&mut self, qualified_name: &str, aggregation: Option<Aggregation>) {
        if let Some(column) = self.columns.get_mut(qualified_name) {
            column.aggregation = aggregation;
        }
    }

    pub fn update_column_alias(&mut self, qualified_name: &str, alias: &str) {
        if let Some(column) = self.columns.get_mut(qualified_name) {
            column.set_alias(alias);
        }
    }

    // ---- custom columns ----

    pub fn add_custom_column(&mut self) {
        self.custom_columns.push(CustomColumn::default());
    }

    pub fn remove_custom_column(&mut self, idx: usize) {
        if idx < self.custom_columns.len() {
            self.custom_columns.remove(idx);
        }
    }

    pub fn update_custom_column(&mut self, idx: usize, edit: CustomColumnEdit) {
        if let Some(column) = self.custom_columns.get_mut(idx) {
            column.apply(edit);
        }
    }

    // ---- WHERE ----

    pub fn add_condition(&mut self) {
        self.conditions.push(Condition::default());
    }

    pub fn remove_condition(&mut self, idx: usize) {
        if idx < self.conditions.len() {
            self.conditions.remove(idx);
        }
    }

    pub fn update_condition(&mut self, idx: usize, edit: ConditionEdit) {
        if let Some(condition) = self.conditions.get_mut(idx) {
            condition.apply(edit);
        }
    }

    // ---- GROUP BY ----

    pub fn add_group_by(&mut self, column: &str) {
        if !column.is_empty() {
            self.group_by.insert(column.to_string());
        }
    }

    pub fn remove_group_by(&mut self, column: &str) {
        self.group_by.shift_remove(column);
    }

    // ---- HAVING ----

    pub fn add_having_condition(&mut self) {
        self.having.push(HavingCondition::default());
    }

    pub fn remove_having_condition(&mut self, idx: usize) {
        if idx < self.having.len() {
            self.having.remove(idx);
        }
    }

    pub fn update_having_condition(&mut self, idx: usize, edit: HavingEdit) {
        if let Some(having) = self.having.get_mut(idx) {
            having.apply(edit);
        }
    }

    // ---- ORDER BY ----

    pub fn add_order_by(&mut self) {
        self.order_by.push(OrderBy::default());
    }

    pub fn remove_order_by(&mut self, idx: usize) {
        if idx < self.order_by.len() {
            self.order_by.remove(idx);
        }
    }

    pub fn update_order_by(&mut self, idx: usize, edit: OrderByEdit) {
        if let Some(order) = self.order_by.get_mut(idx) {
            order.apply(edit);
        }
    }

    // ---- modifiers ----

    pub fn set_limit(&mut self, limit: Option<u64>) {
        self.limit = limit;
    }

    pub fn set_offset(&mut self, offset: Option<u64>) {
        self.offset = offset;
    }

    pub fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }

    // ---- snapshots ----

    /// JSON snapshot for "saved query" features.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Missing fields fall back to their defaults.
    pub fn from_snapshot(snapshot: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{MemoryCatalog, TableDescriptor},
        model::{ComparisonOp, ConditionOperator, ConditionValue, JoinType, Logic, SortDirection, SortKey},
    };

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::from_descriptors([
            TableDescriptor::new("t_users", "users").with_column("id", "integer"),
            TableDescriptor::new("t_orders", "orders").with_column("user_id", "integer"),
        ])
    }

    fn two_table_model() -> QueryModel {
        let catalog = catalog();
        let mut model = QueryModel::new();
        model.update_table(0, TableEdit::Id("t_users".into()), &catalog);
        model.add_table();
        model.update_table(1, TableEdit::Id("t_orders".into()), &catalog);
        model.add_join();
        model
    }

    #[test]
    fn new_model_has_placeholders() {
        let model = QueryModel::new();
        assert_eq!(model.tables, vec![TableRef::default()]);
        assert_eq!(model.conditions.len(), 1);
        assert!(model.joins.is_empty());
        assert!(model.columns.is_empty());
    }

    #[test]
    fn add_table_does_not_add_join() {
        let mut model = QueryModel::new();
        model.add_table();
        assert_eq!(model.tables.len(), 2);
        assert!(model.joins.is_empty());
        assert_eq!(model.join_alignment(), JoinAlignment::MissingJoins(1));
    }

    #[test]
    fn remove_later_table_drops_its_join() {
        let mut model = two_table_model();
        model.add_table();
        model.add_join();
        model.update_join(1, JoinEdit::LeftColumn("orders.user_id".into()));

        model.remove_table(1);
        assert_eq!(model.tables.len(), 2);
        assert_eq!(model.joins.len(), 1);
        assert_eq!(model.joins[0].left_column, "orders.user_id");
    }

    #[test]
    fn remove_driving_table_keeps_joins() {
        let mut model = two_table_model();
        model.remove_table(0);
        assert_eq!(model.tables.len(), 1);
        assert_eq!(model.tables[0].name, "orders");
        assert_eq!(model.joins.len(), 1);
        assert_eq!(model.join_alignment(), JoinAlignment::SurplusJoins(1));
    }

    #[test]
    fn remove_table_out_of_range_is_noop() {
        let mut model = two_table_model();
        let before = model.clone();
        model.remove_table(7);
        assert_eq!(model, before);
    }

    #[test]
    fn remove_later_table_without_join_does_not_underflow() {
        let mut model = QueryModel::new();
        model.add_table();
        model.remove_table(1);
        assert_eq!(model.tables.len(), 1);
        assert!(model.joins.is_empty());
    }

    #[test]
    fn update_join_materializes_missing_join_for_existing_table() {
        let mut model = QueryModel::new();
        model.add_table();
        model.update_join(0, JoinEdit::JoinType(JoinType::Left));
        assert_eq!(model.joins.len(), 1);
        assert_eq!(model.joins[0].join_type, JoinType::Left);
        assert!(model.join_alignment().is_aligned());
    }

    #[test]
    fn update_join_without_paired_table_is_noop() {
        let mut model = QueryModel::new();
        model.update_join(0, JoinEdit::LeftColumn("x.id".into()));
        assert!(model.joins.is_empty());
    }

    #[test]
    fn toggle_column_adds_then_removes_preserving_order() {
        let mut model = QueryModel::new();
        model.toggle_column(ColumnSelection::new("users.id", "integer"));
        model.toggle_column(ColumnSelection::new("users.name", "text"));
        model.toggle_column(ColumnSelection::new("users.email", "text"));
        model.toggle_column(ColumnSelection::new("users.name", "text"));
        let keys: Vec<&str> = model.columns.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["users.id", "users.email"]);
    }

    #[test]
    fn toggle_column_resets_aggregation_and_alias() {
        let mut model = QueryModel::new();
        model.toggle_column(ColumnSelection::new("o.total", "decimal").aggregated(Aggregation::Sum).with_alias("t"));
        let selected = &model.columns["o.total"];
        assert_eq!(selected.aggregation, None);
        assert_eq!(selected.output_alias, None);
    }

    #[test]
    fn column_updates_by_key() {
        let mut model = QueryModel::new();
        model.toggle_column(ColumnSelection::new("o.total", "decimal"));
        model.update_column_aggregation("o.total", Some(Aggregation::Max));
        model.update_column_alias("o.total", "biggest");
        model.update_column_alias("o.missing", "ignored");
        assert_eq!(model.columns["o.total"].aggregation, Some(Aggregation::Max));
        assert_eq!(model.columns["o.total"].alias(), Some("biggest"));
        assert_eq!(model.columns.len(), 1);
    }

    #[test]
    fn custom_columns_allow_duplicates_and_index_edits() {
        let mut model = QueryModel::new();
        model.add_custom_column();
        model.add_custom_column();
        model.update_custom_column(1, CustomColumnEdit::Expression("1 + 1".into()));
        model.update_custom_column(1, CustomColumnEdit::Alias("two".into()));
        model.update_custom_column(9, CustomColumnEdit::Alias("nope".into()));
        assert_eq!(model.custom_columns[1], CustomColumn::new("1 + 1", "two"));
        model.remove_custom_column(0);
        assert_eq!(model.custom_columns, vec![CustomColumn::new("1 + 1", "two")]);
    }

    #[test]
    fn conditions_default_and_update() {
        let mut model = QueryModel::new();
        model.add_condition();
        model.update_condition(1, ConditionEdit::Subject("u.age".into()));
        model.update_condition(1, ConditionEdit::Operator(ComparisonOp::GtEq.into()));
        model.update_condition(1, ConditionEdit::Value(ConditionValue::Int(18)));
        model.update_condition(1, ConditionEdit::Logic(Logic::Or));
        let cond = &model.conditions[1];
        assert_eq!(cond.operator, ConditionOperator::Compare(ComparisonOp::GtEq));
        assert_eq!(cond.logic, Logic::Or);
        model.remove_condition(0);
        assert_eq!(model.conditions.len(), 1);
        assert_eq!(model.conditions[0].subject, "u.age");
    }

    #[test]
    fn group_by_has_set_semantics() {
        let mut model = QueryModel::new();
        model.add_group_by("u.city");
        model.add_group_by("u.city");
        model.add_group_by("");
        model.add_group_by("u.country");
        assert_eq!(model.group_by.len(), 2);
        model.remove_group_by("u.city");
        model.remove_group_by("u.unknown");
        assert_eq!(model.group_by.iter().collect::<Vec<_>>(), vec!["u.country"]);
    }

    #[test]
    fn having_and_order_by_mutators() {
        let mut model = QueryModel::new();
        model.add_having_condition();
        model.update_having_condition(0, HavingEdit::Column("o.id".into()));
        model.update_having_condition(0, HavingEdit::Value("3".into()));
        assert!(model.having[0].is_renderable());
        model.remove_having_condition(0);
        assert!(model.having.is_empty());

        model.add_order_by();
        assert_eq!(model.order_by[0].direction, SortDirection::Asc);
        model.update_order_by(0, OrderByEdit::Reference(Some(SortKey::Alias("total".into()))));
        model.update_order_by(0, OrderByEdit::Direction(SortDirection::Desc));
        assert_eq!(model.order_by[0], OrderBy::new(SortKey::Alias("total".into()), SortDirection::Desc));
        model.remove_order_by(3);
        assert_eq!(model.order_by.len(), 1);
    }

    #[test]
    fn reset_returns_to_session_start() {
        let mut model = two_table_model();
        model.set_limit(Some(5));
        model.set_distinct(true);
        model.reset();
        assert_eq!(model, QueryModel::new());
    }

    #[test]
    fn snapshot_round_trips() {
        let mut model = two_table_model();
        model.update_join(0, JoinEdit::LeftColumn("users.id".into()));
        model.toggle_column(ColumnSelection::new("users.id", "integer"));
        model.add_group_by("users.id");
        model.set_offset(Some(20));

        let snapshot = model.to_snapshot().expect("serialize");
        let restored = QueryModel::from_snapshot(&snapshot).expect("deserialize");
        assert_eq!(restored, model);
    }

    #[test]
    fn empty_snapshot_is_default_model() {
        let model = QueryModel::from_snapshot("{}").expect("deserialize");
        assert_eq!(model, QueryModel::default());
    }
}
