use crate::{
    model::{QueryModel, SortKey, TableRef},
    planner::{PlanStage, StageKind},
};

/// Describes a model as the ordered list of logical stages the host draws
/// next to the SQL text. Works on any model, complete or not.
pub struct PlanVisualizer;

impl PlanVisualizer {
    pub fn describe_plan(model: &QueryModel) -> Vec<PlanStage> {
        StageKind::PIPELINE
            .iter()
            .map(|kind| match kind {
                StageKind::From => Self::from_stage(model),
                StageKind::Join => Self::join_stage(model),
                StageKind::Where => Self::where_stage(model),
                StageKind::GroupBy => Self::group_by_stage(model),
                StageKind::Having => Self::having_stage(model),
                StageKind::Select => Self::select_stage(model),
                StageKind::OrderBy => Self::order_by_stage(model),
                StageKind::Limit => Self::limit_stage(model),
            })
            .collect()
    }

    fn from_stage(model: &QueryModel) -> PlanStage {
        let enabled = model.tables.iter().any(TableRef::is_selected);
        let summary = match model.tables.iter().find(|t| t.is_selected()) {
            Some(table) => Self::table_label(table),
            None => "No table selected".to_string(),
        };
        PlanStage::new(StageKind::From, enabled, summary)
    }

    fn join_stage(model: &QueryModel) -> PlanStage {
        let labels: Vec<String> = model
            .joins
            .iter()
            .enumerate()
            .filter(|(_, join)| join.is_complete())
            .map(|(idx, join)| {
                let target = model.joined_table(idx).map(Self::table_label).unwrap_or_else(|| "?".to_string());
                format!("{} {}", join.join_type, target)
            })
            .collect();

        if labels.is_empty() {
            return PlanStage::new(StageKind::Join, false, "No joins");
        }
        let summary = format!("{}: {}", Self::count(labels.len(), "join", "joins"), labels.join(", "));
        PlanStage::new(StageKind::Join, true, summary)
    }

    fn where_stage(model: &QueryModel) -> PlanStage {
        let active = model.conditions.iter().filter(|c| c.has_subject()).count();
        if active == 0 {
            return PlanStage::new(StageKind::Where, false, "No conditions");
        }
        PlanStage::new(StageKind::Where, true, Self::count(active, "condition", "conditions"))
    }

    fn group_by_stage(model: &QueryModel) -> PlanStage {
        if model.group_by.is_empty() {
            return PlanStage::new(StageKind::GroupBy, false, "No grouping");
        }
        let keys: Vec<&str> = model.group_by.iter().map(String::as_str).collect();
        PlanStage::new(StageKind::GroupBy, true, keys.join(", "))
    }

    fn having_stage(model: &QueryModel) -> PlanStage {
        let active = model.having.iter().filter(|h| h.has_subject()).count();
        if active == 0 {
            return PlanStage::new(StageKind::Having, false, "No group filters");
        }
        PlanStage::new(StageKind::Having, true, Self::count(active, "condition", "conditions"))
    }

    fn select_stage(model: &QueryModel) -> PlanStage {
        let columns = model.columns.len();
        let custom = model.custom_columns.len();
        if columns + custom == 0 {
            return PlanStage::new(StageKind::Select, false, "No columns selected");
        }

        let mut parts = Vec::new();
        if columns > 0 {
            parts.push(Self::count(columns, "column", "columns"));
        }
        if custom > 0 {
            parts.push(Self::count(custom, "custom expression", "custom expressions"));
        }
        let mut summary = parts.join(", ");
        if model.distinct {
            summary = format!("DISTINCT {}", summary);
        }
        PlanStage::new(StageKind::Select, true, summary)
    }

    fn order_by_stage(model: &QueryModel) -> PlanStage {
        let keys: Vec<String> = model
            .order_by
            .iter()
            .filter_map(|order| {
                let name = match order.key()? {
                    SortKey::Column(name) | SortKey::Alias(name) => name,
                };
                Some(format!("{} {}", name, order.direction))
            })
            .collect();

        if keys.is_empty() {
            return PlanStage::new(StageKind::OrderBy, false, "No sorting");
        }
        PlanStage::new(StageKind::OrderBy, true, keys.join(", "))
    }

    fn limit_stage(model: &QueryModel) -> PlanStage {
        let summary = match (model.limit, model.offset) {
            (Some(limit), Some(offset)) => format!("{} rows from {}", limit, offset),
            (Some(limit), None) => format!("{} rows", limit),
            (None, Some(offset)) => format!("all rows from {}", offset),
            (None, None) => return PlanStage::new(StageKind::Limit, false, "No limit"),
        };
        PlanStage::new(StageKind::Limit, true, summary)
    }

    fn table_label(table: &TableRef) -> String {
        let name = if table.name.is_empty() { &table.id } else { &table.name };
        match &table.alias {
            Some(alias) => format!("{} AS {}", name, alias),
            None => name.clone(),
        }
    }

    fn count(n: usize, singular: &str, plural: &str) -> String {
        format!("{} {}", n, if n == 1 { singular } else { plural })
    }
}
