pub mod query_issue;
pub use query_issue::*;

pub mod query_validator;
pub use query_validator::*;
