pub mod config;
pub use config::BuilderConfig;

pub mod catalog;
pub use catalog::{Catalog, ColumnCandidate, ColumnDescriptor, MemoryCatalog, TableDescriptor};

pub mod model;
pub use model::QueryModel;

pub mod validator;
pub use validator::{QueryIssue, QueryValidator};

pub mod compiler;
pub use compiler::{CompileError, QueryCompiler};

pub mod planner;
pub use planner::{PlanStage, PlanVisualizer, StageKind};

pub mod session;
pub use session::{BuilderOutput, BuilderSession, SavedQuery};

/// Messages for every rule the model breaks, in rule order.
pub fn validate(model: &QueryModel) -> Vec<String> {
    QueryValidator::validate(model)
}

/// SQL text for the model, or `""` when it cannot be compiled.
pub fn compile(model: &QueryModel) -> String {
    QueryCompiler::compile(model)
}

pub fn describe_plan(model: &QueryModel) -> Vec<PlanStage> {
    PlanVisualizer::describe_plan(model)
}
