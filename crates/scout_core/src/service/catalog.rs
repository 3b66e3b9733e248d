//! Location catalog service.
//!
//! # Responsibility
//! - Own the authoritative collection of saved places.
//! - Derive auto tags on every add/update and answer filtered views.
//! - Hand whole-collection snapshots to the background writer.
//!
//! # Invariants
//! - No two stored entries share an `id`.
//! - `auto_tags` is recomputed from title/description on every add/update.
//! - `created_at` is stamped by `add` and survives every `update`.
//! - Persistence is fire-and-forget: in-memory state stays authoritative even
//!   when a durable write is lost.
//!
//! # Threading
//! A catalog must be mutated from a single owner. Callers sharing one across
//! threads provide their own synchronization (for example a `Mutex`).

use crate::config::CatalogConfig;
use crate::model::entry::{Entry, EntryDraft, EntryId};
use crate::search::matcher::matches;
use crate::service::snapshot::{decode_snapshot, encode_snapshot};
use crate::service::writer::BackgroundWriter;
use crate::store::gateway::{GatewayResult, PersistenceGateway};
use crate::store::sqlite::SqliteGateway;
use crate::tags::extract::extract_auto_tags;
use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// In-memory saved-place collection with background persistence.
pub struct LocationCatalog {
    entries: Vec<Entry>,
    query: String,
    config: CatalogConfig,
    writer: BackgroundWriter,
}

impl LocationCatalog {
    /// Loads the stored collection and starts the background writer.
    ///
    /// A missing, unreadable or malformed blob yields an empty catalog.
    pub fn open(gateway: Arc<dyn PersistenceGateway>, config: CatalogConfig) -> Self {
        let started_at = Instant::now();
        let entries = load_entries(gateway.as_ref(), &config.storage_key);
        info!(
            "event=catalog_open module=service status=ok entries={} duration_ms={}",
            entries.len(),
            started_at.elapsed().as_millis()
        );

        Self {
            entries,
            query: String::new(),
            config,
            writer: BackgroundWriter::spawn(gateway),
        }
    }

    /// Opens a catalog backed by the SQLite file at `path`.
    ///
    /// # Errors
    /// - Returns an error only when the database cannot be opened or
    ///   migrated; blob content problems still yield an empty catalog.
    pub fn open_sqlite(path: impl AsRef<Path>, config: CatalogConfig) -> GatewayResult<Self> {
        let gateway = SqliteGateway::open(path)?;
        Ok(Self::open(Arc::new(gateway), config))
    }

    /// Stores a new entry built from `draft` and returns it.
    ///
    /// Never fails; empty titles are accepted.
    pub fn add(&mut self, draft: EntryDraft) -> Entry {
        let mut entry = Entry::from_draft(Uuid::new_v4(), now_epoch_ms(), draft);
        entry.auto_tags = extract_auto_tags(&entry.title, &entry.description);
        self.entries.push(entry.clone());
        info!(
            "event=catalog_mutation module=service status=ok op=add id={} entries={}",
            entry.id,
            self.entries.len()
        );
        self.persist();
        entry
    }

    /// Replaces the stored record that shares `entry.id`.
    ///
    /// Caller-supplied `auto_tags` and `created_at` are ignored. Returns
    /// `false` without touching storage when no entry has that id.
    pub fn update(&mut self, mut entry: Entry) -> bool {
        let Some(slot) = self.entries.iter_mut().find(|stored| stored.id == entry.id) else {
            debug!(
                "event=catalog_mutation module=service status=not_found op=update id={}",
                entry.id
            );
            return false;
        };

        entry.auto_tags = extract_auto_tags(&entry.title, &entry.description);
        entry.created_at = slot.created_at;
        *slot = entry;
        info!(
            "event=catalog_mutation module=service status=ok op=update id={}",
            slot.id
        );
        self.persist();
        true
    }

    /// Deletes the entry with `id`. Returns `false` when it was not stored.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            debug!("event=catalog_mutation module=service status=not_found op=remove id={id}");
            return false;
        }

        info!(
            "event=catalog_mutation module=service status=ok op=remove id={id} entries={}",
            self.entries.len()
        );
        self.persist();
        true
    }

    /// Entries matching `query`, in storage order.
    pub fn filtered_view(&self, query: &str) -> Vec<&Entry> {
        if query.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|entry| matches(entry, query))
            .collect()
    }

    /// Replaces the stored search query used by [`Self::filtered`].
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Filtered view for the stored query.
    pub fn filtered(&self) -> Vec<&Entry> {
        self.filtered_view(&self.query)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// All entries in storage order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted union of every entry's tags.
    pub fn known_tags(&self) -> BTreeSet<String> {
        self.entries.iter().flat_map(Entry::all_tags).collect()
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Blocks until every snapshot scheduled so far reached the gateway.
    ///
    /// Mutating calls never require this; it exists for shutdown paths and
    /// tests that reopen the same store.
    pub fn flush(&self) {
        self.writer.flush();
    }

    fn persist(&self) {
        match encode_snapshot(&self.entries) {
            Ok(blob) => self.writer.schedule(&self.config.storage_key, blob),
            Err(err) => error!(
                "event=catalog_persist module=service status=error error_code=encode_failed error={err}"
            ),
        }
    }
}

/// Renders a shareable four-line summary with a maps deeplink.
pub fn export_summary(entry: &Entry) -> String {
    let latitude = format_coordinate(entry.latitude);
    let longitude = format_coordinate(entry.longitude);
    format!(
        "Location: {}\nDescription: {}\nCoordinates: {latitude}, {longitude}\nMaps URL: https://maps.apple.com/?ll={latitude},{longitude}",
        entry.title, entry.description
    )
}

/// Orders entries newest first, breaking timestamp ties by id.
pub fn sorted_newest_first(mut entries: Vec<&Entry>) -> Vec<&Entry> {
    entries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    entries
}

// Plain decimal notation; whole numbers keep a trailing `.0`.
fn format_coordinate(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn load_entries(gateway: &dyn PersistenceGateway, key: &str) -> Vec<Entry> {
    let blob = match gateway.load(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!("event=catalog_load module=service status=empty reason=absent");
            return Vec::new();
        }
        Err(err) => {
            warn!("event=catalog_load module=service status=empty reason=load_failed error={err}");
            return Vec::new();
        }
    };

    match decode_snapshot(&blob) {
        Ok(entries) => {
            info!(
                "event=catalog_load module=service status=ok entries={}",
                entries.len()
            );
            entries
        }
        Err(err) => {
            warn!(
                "event=catalog_load module=service status=empty reason=malformed bytes={} error={err}",
                blob.len()
            );
            Vec::new()
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::{export_summary, sorted_newest_first};
    use crate::model::entry::{Entry, EntryDraft};
    use uuid::Uuid;

    fn entry_at(created_at: i64) -> Entry {
        Entry::from_draft(Uuid::new_v4(), created_at, EntryDraft::new("x", 0.0, 0.0))
    }

    #[test]
    fn export_summary_uses_four_line_template() {
        let draft = EntryDraft::new("Golden Gate Park", 37.7694, -122.4862)
            .with_description("Big park");
        let entry = Entry::from_draft(Uuid::new_v4(), 0, draft);
        assert_eq!(
            export_summary(&entry),
            "Location: Golden Gate Park\n\
             Description: Big park\n\
             Coordinates: 37.7694, -122.4862\n\
             Maps URL: https://maps.apple.com/?ll=37.7694,-122.4862"
        );
    }

    #[test]
    fn export_summary_keeps_decimal_point_on_whole_coordinates() {
        let entry = Entry::from_draft(Uuid::new_v4(), 0, EntryDraft::new("Origin", 10.0, 0.0));
        assert!(export_summary(&entry).ends_with("?ll=10.0,0.0"));
    }

    #[test]
    fn export_summary_never_uses_exponent_notation() {
        let draft = EntryDraft::new("Null Island", 0.00001, -0.0000025);
        let summary = export_summary(&Entry::from_draft(Uuid::new_v4(), 0, draft));
        assert!(summary.contains("Coordinates: 0.00001, -0.0000025\n"));
        assert!(summary.ends_with("?ll=0.00001,-0.0000025"));
    }

    #[test]
    fn newest_first_orders_by_created_at_descending() {
        let old = entry_at(1);
        let new = entry_at(5);
        let mid = entry_at(3);
        let sorted = sorted_newest_first(vec![&old, &new, &mid]);
        let stamps: Vec<i64> = sorted.iter().map(|entry| entry.created_at).collect();
        assert_eq!(stamps, vec![5, 3, 1]);
    }
}
