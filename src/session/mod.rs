pub mod saved_query;
pub use saved_query::*;

pub mod builder_session;
pub use builder_session::*;
