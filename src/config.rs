/// Knobs shared by a builder session and the compiler.
///
/// - `offset_without_limit` keeps `OFFSET n` in the output when no LIMIT is set.
/// - `catalog_limit` caps how many catalog tables are offered to the pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Emit OFFSET even when LIMIT is absent
    pub offset_without_limit: bool,
    /// Maximum number of catalog tables listed
    pub catalog_limit: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self { offset_without_limit: true, catalog_limit: 300 }
    }
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(offset_without_limit: bool, catalog_limit: usize) -> Self {
        Self {
            offset_without_limit,
            catalog_limit,
        }
    }

    /// Convenience: only emit OFFSET together with a LIMIT.
    pub fn strict_offset() -> Self {
        Self {
            offset_without_limit: false,
            ..Self::default()
        }
    }

    pub fn with_catalog_limit(mut self, catalog_limit: usize) -> Self {
        self.catalog_limit = catalog_limit;
        self
    }
}
