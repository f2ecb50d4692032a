use std::collections::HashSet;

use crate::{model::QueryModel, validator::QueryIssue};

pub struct QueryValidator;

impl QueryValidator {
    /// Messages for every broken rule, in rule order. Empty means the model
    /// can be compiled.
    pub fn validate(model: &QueryModel) -> Vec<String> {
        Self::issues(model).iter().map(ToString::to_string).collect()
    }

    /// Rules are checked in a fixed order:
    /// 1. a driving table is selected
    /// 2. every extra table has a join
    /// 3. every join has both endpoints
    /// 4. something is projected
    /// 5. mixed aggregation is fully grouped
    /// 6. custom columns have an expression and an alias
    /// 7. custom aliases are unique
    /// 8. every join has a picked table to attach
    pub fn issues(model: &QueryModel) -> Vec<QueryIssue> {
        let mut issues = Vec::new();
        Self::check_tables(model, &mut issues);
        Self::check_joins(model, &mut issues);
        Self::check_projection(model, &mut issues);
        Self::check_grouping(model, &mut issues);
        Self::check_custom_columns(model, &mut issues);
        Self::check_alias_uniqueness(model, &mut issues);
        Self::check_join_targets(model, &mut issues);
        issues
    }

    pub fn is_valid(model: &QueryModel) -> bool {
        Self::issues(model).is_empty()
    }

    fn check_tables(model: &QueryModel, issues: &mut Vec<QueryIssue>) {
        let driving_selected = model.tables.first().is_some_and(|t| t.is_selected() && !t.name.is_empty());
        if !driving_selected {
            issues.push(QueryIssue::NoTable);
        }
    }

    fn check_joins(model: &QueryModel, issues: &mut Vec<QueryIssue>) {
        if model.tables.len() > 1 && !model.join_alignment().is_aligned() {
            issues.push(QueryIssue::MissingJoins);
        }
        for (idx, join) in model.joins.iter().enumerate() {
            if !join.is_complete() {
                issues.push(QueryIssue::IncompleteJoin { join: idx + 1 });
            }
        }
    }

    fn check_projection(model: &QueryModel, issues: &mut Vec<QueryIssue>) {
        if model.columns.is_empty() && model.custom_columns.is_empty() {
            issues.push(QueryIssue::EmptyProjection);
        }
    }

    fn check_grouping(model: &QueryModel, issues: &mut Vec<QueryIssue>) {
        let has_aggregated = model.columns.values().any(|c| c.is_aggregated());
        let has_plain = model.columns.values().any(|c| !c.is_aggregated());
        if !(has_aggregated && has_plain) {
            return;
        }

        let missing: Vec<String> = model.columns
            .values()
            .filter(|c| !c.is_aggregated() && !model.group_by.contains(&c.qualified_name))
            .map(|c| c.qualified_name.clone())
            .collect();

        if !missing.is_empty() {
            issues.push(QueryIssue::UngroupedColumns { columns: missing });
        }
    }

    fn check_custom_columns(model: &QueryModel, issues: &mut Vec<QueryIssue>) {
        for (idx, custom) in model.custom_columns.iter().enumerate() {
            if custom.expression.is_empty() {
                issues.push(QueryIssue::EmptyCustomExpression { column: idx + 1 });
            }
            if custom.output_alias.is_empty() {
                issues.push(QueryIssue::EmptyCustomAlias { column: idx + 1 });
            }
        }
    }

    fn check_alias_uniqueness(model: &QueryModel, issues: &mut Vec<QueryIssue>) {
        let mut seen: HashSet<&str> = model.columns.values().filter_map(|c| c.alias()).collect();
        for (idx, custom) in model.custom_columns.iter().enumerate() {
            let alias = custom.output_alias.as_str();
            if alias.is_empty() {
                continue;
            }
            if !seen.insert(alias) {
                issues.push(QueryIssue::DuplicateCustomAlias { column: idx + 1, alias: alias.to_string() });
            }
        }
    }

    fn check_join_targets(model: &QueryModel, issues: &mut Vec<QueryIssue>) {
        for idx in 0..model.joins.len() {
            let attached = model.joined_table(idx).is_some_and(|t| t.is_selected() && !t.name.is_empty());
            if !attached {
                issues.push(QueryIssue::JoinWithoutTable { join: idx + 1 });
            }
        }
    }
}
