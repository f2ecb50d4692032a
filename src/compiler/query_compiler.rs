use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::{
    compiler::{CompileError, SqlLiteral},
    config::BuilderConfig,
    model::{Condition, HavingCondition, OrderBy, QueryModel, SortKey, TableRef},
    validator::QueryValidator,
};

/// Turns a [`QueryModel`] into SELECT text, one clause per line:
/// SELECT, FROM, JOIN..., WHERE, GROUP BY, HAVING, ORDER BY, LIMIT/OFFSET.
pub struct QueryCompiler;

impl QueryCompiler {
    /// SQL for the model, or `""` when the model does not validate or
    /// cannot be assembled. Never panics.
    pub fn compile(model: &QueryModel) -> String {
        Self::compile_with_config(model, &BuilderConfig::default())
    }

    pub fn compile_with_config(model: &QueryModel, config: &BuilderConfig) -> String {
        match panic::catch_unwind(AssertUnwindSafe(|| Self::try_compile_with_config(model, config))) {
            Ok(Ok(sql)) => sql,
            Ok(Err(CompileError::Invalid(issues))) => {
                debug!(issues = issues.len(), "query model not compiled: validation failed");
                String::new()
            }
            Ok(Err(err)) => {
                warn!(error = %err, "query compilation failed");
                String::new()
            }
            Err(_) => {
                warn!("query compilation panicked");
                String::new()
            }
        }
    }

    pub fn try_compile(model: &QueryModel) -> Result<String, CompileError> {
        Self::try_compile_with_config(model, &BuilderConfig::default())
    }

    pub fn try_compile_with_config(model: &QueryModel, config: &BuilderConfig) -> Result<String, CompileError> {
        let issues = QueryValidator::issues(model);
        if !issues.is_empty() {
            return CompileError::Invalid(issues).err();
        }

        let mut lines: Vec<String> = Vec::new();

        lines.push(Self::select_clause(model));
        lines.push(Self::from_clause(model)?);
        lines.extend(Self::join_clauses(model)?);

        if let Some(clause) = Self::where_clause(&model.conditions) {
            lines.push(clause);
        }
        if !model.group_by.is_empty() {
            let keys: Vec<&str> = model.group_by.iter().map(String::as_str).collect();
            lines.push(format!("GROUP BY {}", keys.join(", ")));
        }
        if let Some(clause) = Self::having_clause(&model.having) {
            lines.push(clause);
        }
        if let Some(clause) = Self::order_by_clause(&model.order_by) {
            lines.push(clause);
        }
        match (model.limit, model.offset) {
            (Some(limit), offset) => lines.push(Self::limit_clause(limit, offset)),
            (None, Some(offset)) if config.offset_without_limit => {
                if let Some(last) = lines.last_mut() {
                    last.push_str(&format!(" OFFSET {}", offset));
                }
            }
            _ => {}
        }

        let mut sql = lines.join("\n");
        sql.push(';');
        Ok(sql)
    }

    fn select_clause(model: &QueryModel) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(model.columns.len() + model.custom_columns.len());

        for column in model.columns.values() {
            let mut part = column.expression();
            if let Some(alias) = column.alias() {
                part.push_str(" AS ");
                part.push_str(&SqlLiteral::alias(alias));
            }
            parts.push(part);
        }
        for custom in &model.custom_columns {
            parts.push(format!("{} AS {}", custom.expression, SqlLiteral::alias(&custom.output_alias)));
        }

        let projection = if parts.is_empty() { "*".to_string() } else { parts.join(", ") };
        if model.distinct {
            format!("SELECT DISTINCT {}", projection)
        } else {
            format!("SELECT {}", projection)
        }
    }

    fn table_source(table: &TableRef, position: usize) -> Result<String, CompileError> {
        if table.name.is_empty() {
            return CompileError::UnresolvedTable { position }.err();
        }
        Ok(match &table.alias {
            Some(alias) => format!("{} AS {}", table.name, alias),
            None => table.name.clone(),
        })
    }

    fn from_clause(model: &QueryModel) -> Result<String, CompileError> {
        let driving = model.tables.first().ok_or(CompileError::UnresolvedTable { position: 0 })?;
        Ok(format!("FROM {}", Self::table_source(driving, 0)?))
    }

    fn join_clauses(model: &QueryModel) -> Result<Vec<String>, CompileError> {
        let mut lines = Vec::with_capacity(model.joins.len());
        for (idx, join) in model.joins.iter().enumerate() {
            let table = model.joined_table(idx).ok_or(CompileError::DanglingJoin { join: idx + 1 })?;
            lines.push(format!(
                "{} {} ON {} {} {}",
                join.join_type,
                Self::table_source(table, idx + 1)?,
                join.left_column,
                join.operator,
                join.right_column
            ));
        }
        Ok(lines)
    }

    fn render_condition(condition: &Condition) -> String {
        let operator = condition.operator;
        if operator.is_nullary() {
            format!("{} {}", condition.subject, operator)
        } else if operator.is_list() {
            format!("{} {} {}", condition.subject, operator, SqlLiteral::list(&condition.value))
        } else {
            format!("{} {} {}", condition.subject, operator, SqlLiteral::value(&condition.value))
        }
    }

    fn where_clause(conditions: &[Condition]) -> Option<String> {
        let mut clause = String::new();
        for (idx, condition) in conditions.iter().filter(|c| c.is_renderable()).enumerate() {
            if idx > 0 {
                clause.push_str(&format!(" {} ", condition.logic));
            }
            clause.push_str(&Self::render_condition(condition));
        }
        if clause.is_empty() { None } else { Some(format!("WHERE {}", clause)) }
    }

    fn having_clause(having: &[HavingCondition]) -> Option<String> {
        let mut clause = String::new();
        for (idx, condition) in having.iter().filter(|h| h.is_renderable()).enumerate() {
            if idx > 0 {
                clause.push_str(&format!(" {} ", condition.logic));
            }
            clause.push_str(&format!(
                "{} {} {}",
                condition.aggregation.apply_to(&condition.column),
                condition.operator,
                condition.value
            ));
        }
        if clause.is_empty() { None } else { Some(format!("HAVING {}", clause)) }
    }

    fn order_by_clause(order_by: &[OrderBy]) -> Option<String> {
        let keys: Vec<String> = order_by
            .iter()
            .filter_map(|order| {
                let key = match order.key()? {
                    SortKey::Column(column) => column.clone(),
                    SortKey::Alias(alias) => SqlLiteral::alias(alias),
                };
                Some(format!("{} {}", key, order.direction))
            })
            .collect();
        if keys.is_empty() { None } else { Some(format!("ORDER BY {}", keys.join(", "))) }
    }

    /// OFFSET shares the LIMIT line. Without a LIMIT it trails whatever
    /// clause came last.
    fn limit_clause(limit: u64, offset: Option<u64>) -> String {
        match offset {
            Some(offset) => format!("LIMIT {} OFFSET {}", limit, offset),
            None => format!("LIMIT {}", limit),
        }
    }
}
