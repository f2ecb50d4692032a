pub mod compile_error;
pub use compile_error::*;

pub mod sql_literal;
pub use sql_literal::*;

pub mod query_compiler;
pub use query_compiler::*;
