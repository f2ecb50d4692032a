pub mod table_descriptor;
pub use table_descriptor::*;

pub mod memory_catalog;
pub use memory_catalog::*;

pub mod column_candidate;
pub use column_candidate::*;

/// Read-only table listing used to resolve table ids and to enumerate
/// column candidates. Nothing here is cached past a single call.
pub trait Catalog {
    fn table(&self, id: &str) -> Option<TableDescriptor>;

    fn tables(&self) -> Vec<TableDescriptor>;
}
