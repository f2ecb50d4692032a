pub mod keyword_error;
pub use keyword_error::*;

pub mod comparison_op;
pub use comparison_op::*;

pub mod aggregation;
pub use aggregation::*;

pub mod table_ref;
pub use table_ref::*;

pub mod join_spec;
pub use join_spec::*;

pub mod join_alignment;
pub use join_alignment::*;

pub mod column_selection;
pub use column_selection::*;

pub mod custom_column;
pub use custom_column::*;

pub mod condition_value;
pub use condition_value::*;

pub mod condition;
pub use condition::*;

pub mod having_condition;
pub use having_condition::*;

pub mod order_by;
pub use order_by::*;

pub mod query_model;
pub use query_model::*;
