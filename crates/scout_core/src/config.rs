//! Explicit configuration passed into the catalog.
//!
//! Nothing here is read from the environment; the UI shell builds these
//! values and hands them in.

/// Key under which the whole entry collection is stored.
pub const DEFAULT_STORAGE_KEY: &str = "SavedLocations";

/// Catalog construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Fixed gateway key for the serialized collection.
    pub storage_key: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
