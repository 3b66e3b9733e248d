//! Location catalog engine for the Scout place-bookmarking app.
//! This crate owns saved places, their derived tags, search matching and the
//! tag-chip flow layout; UI shells call into it through `scout_ffi`.

pub mod config;
pub mod db;
pub mod layout;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;
pub mod tags;

pub use config::{CatalogConfig, DEFAULT_STORAGE_KEY};
pub use layout::flow::{FlowLayout, FlowPacking, Point, Size, DEFAULT_FLOW_SPACING};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{Entry, EntryDraft, EntryId, DEFAULT_EMOJI};
pub use search::matcher::matches;
pub use service::catalog::{export_summary, sorted_newest_first, LocationCatalog};
pub use service::snapshot::CodecError;
pub use store::gateway::{GatewayError, GatewayResult, PersistenceGateway};
pub use store::memory::MemoryGateway;
pub use store::sqlite::SqliteGateway;
pub use tags::extract::{extract_auto_tags, split_tag_input};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
