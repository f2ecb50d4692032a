use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::{
    catalog::{Catalog, ColumnCandidate, TableDescriptor},
    compiler::QueryCompiler,
    config::BuilderConfig,
    model::{QueryModel, SortKey, TableEdit},
    planner::{PlanStage, PlanVisualizer},
    session::SavedQuery,
    validator::QueryValidator,
};

/// What the host renders after each edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderOutput {
    /// Compiled text, `""` while the model is invalid.
    pub sql: String,
    pub issues: Vec<String>,
    pub plan: Vec<PlanStage>,
}

impl BuilderOutput {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// One builder session: a model owned exclusively by this session, the
/// catalog it resolves against, and the config used to compile it.
///
/// The host edits through [`BuilderSession::model_mut`] and then calls
/// [`BuilderSession::recompile`] to refresh SQL, messages and plan.
pub struct BuilderSession<C: Catalog> {
    id: Uuid,
    config: BuilderConfig,
    catalog: C,
    model: QueryModel,
}

impl<C: Catalog> BuilderSession<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, BuilderConfig::default())
    }

    pub fn with_config(catalog: C, config: BuilderConfig) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, "builder session started");
        Self {
            id,
            config,
            catalog,
            model: QueryModel::new(),
        }
    }

    /// Resumes from a saved model instead of the blank start state.
    pub fn from_model(catalog: C, config: BuilderConfig, model: QueryModel) -> Self {
        Self { model, ..Self::with_config(catalog, config) }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn model(&self) -> &QueryModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut QueryModel {
        &mut self.model
    }

    /// Table edit resolved against this session's catalog.
    pub fn update_table(&mut self, idx: usize, edit: TableEdit) {
        self.model.update_table(idx, edit, &self.catalog);
    }

    /// Catalog tables offered by the table picker, capped by the config.
    pub fn available_tables(&self) -> Vec<TableDescriptor> {
        self.catalog.tables().into_iter().take(self.config.catalog_limit).collect()
    }

    pub fn column_candidates(&self) -> Vec<ColumnCandidate> {
        ColumnCandidate::collect(&self.model.tables, &self.catalog)
    }

    pub fn sort_candidates(&self) -> Vec<SortKey> {
        SortKey::candidates(&self.model, &self.catalog)
    }

    pub fn recompile(&self) -> BuilderOutput {
        let issues = QueryValidator::validate(&self.model);
        let sql = if issues.is_empty() {
            QueryCompiler::compile_with_config(&self.model, &self.config)
        } else {
            String::new()
        };
        let plan = PlanVisualizer::describe_plan(&self.model);

        debug!(session = %self.id, issues = issues.len(), sql_len = sql.len(), "recompiled query model");
        BuilderOutput { sql, issues, plan }
    }

    pub fn reset(&mut self) {
        self.model.reset();
        debug!(session = %self.id, "builder session reset");
    }

    /// Packs the current query for the persistence collaborator. `None` when
    /// the model does not compile.
    pub fn save(&self, database_id: &str, name: Option<&str>) -> Option<SavedQuery> {
        let sql = QueryCompiler::compile_with_config(&self.model, &self.config);
        if sql.is_empty() {
            debug!(session = %self.id, "nothing to save: model does not compile");
            return None;
        }
        Some(SavedQuery::new(database_id, name, &sql, Some(self.model.clone())))
    }
}
