//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose catalog, tag and layout use-cases to Dart via FRB.
//! - Own the single process-wide catalog and serialize access to it.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The catalog is only ever mutated while holding `CatalogSlot::catalog`.
//! - Mutations return before their durable write lands.

use log::warn;
use scout_core::{
    core_version as core_version_inner, export_summary, init_logging as init_logging_inner,
    sorted_newest_first, split_tag_input, CatalogConfig, Entry, EntryDraft, FlowLayout,
    GatewayResult, LocationCatalog, Size,
};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};
use uuid::Uuid;

static CATALOG: OnceLock<CatalogSlot> = OnceLock::new();
static CATALOG_OPEN_GATE: Mutex<()> = Mutex::new(());

struct CatalogSlot {
    db_path: PathBuf,
    catalog: Mutex<LocationCatalog>,
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the process-wide catalog backed by the SQLite file at `db_path`.
///
/// # FFI contract
/// - Idempotent for the same path; a different path is rejected.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_open(db_path: String) -> String {
    let requested = PathBuf::from(db_path.trim());
    if requested.as_os_str().is_empty() {
        return "db_path cannot be empty".to_string();
    }

    open_into(&CATALOG, &CATALOG_OPEN_GATE, requested, |path| {
        LocationCatalog::open_sqlite(path, CatalogConfig::default())
    })
}

// `gate` is held across the emptiness check and `set`; `open` runs at most once.
fn open_into<F>(
    cell: &OnceLock<CatalogSlot>,
    gate: &Mutex<()>,
    requested: PathBuf,
    open: F,
) -> String
where
    F: FnOnce(&Path) -> GatewayResult<LocationCatalog>,
{
    let _guard = gate.lock().unwrap_or_else(PoisonError::into_inner);

    if cell.get().is_none() {
        match open(&requested) {
            Ok(catalog) => {
                let _ = cell.set(CatalogSlot {
                    db_path: requested.clone(),
                    catalog: Mutex::new(catalog),
                });
            }
            Err(err) => return format!("catalog_open failed: {err}"),
        }
    }

    match cell.get() {
        Some(slot) if slot.db_path == requested => String::new(),
        Some(slot) => format!(
            "catalog already open at `{}`; refusing to switch to `{}`",
            slot.db_path.display(),
            requested.display()
        ),
        None => "catalog_open failed: catalog unavailable".to_string(),
    }
}

/// One saved place as seen by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: Option<Vec<u8>>,
    /// Unix epoch milliseconds.
    pub created_at_ms: i64,
    pub auto_tags: Vec<String>,
    pub custom_tags: Vec<String>,
    /// Sorted union of auto and custom tags, for chip rendering.
    pub all_tags: Vec<String>,
    pub emoji: String,
}

/// Input for creating or editing a saved place.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationInput {
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: Option<Vec<u8>>,
    pub custom_tags: Vec<String>,
    /// `None` keeps the default pin glyph on create.
    pub emoji: Option<String>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationActionResponse {
    /// Whether a stored entry was created/changed.
    pub ok: bool,
    pub item: Option<LocationItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl LocationActionResponse {
    fn success(message: impl Into<String>, item: Option<LocationItem>) -> Self {
        Self {
            ok: true,
            item,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item: None,
            message: message.into(),
        }
    }
}

/// Saves a new place.
///
/// # FFI contract
/// - Empty titles are accepted here; the form disables saving first.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn location_add(input: LocationInput) -> LocationActionResponse {
    let mut draft = EntryDraft::new(input.title, input.latitude, input.longitude)
        .with_description(input.description)
        .with_custom_tags(input.custom_tags);
    draft.image_blob = input.image;
    if let Some(emoji) = input.emoji {
        draft = draft.with_emoji(emoji);
    }

    match with_catalog(|catalog| catalog.add(draft)) {
        Ok(entry) => LocationActionResponse::success("Location saved.", Some(to_item(&entry))),
        Err(err) => LocationActionResponse::failure(format!("location_add failed: {err}")),
    }
}

/// Replaces a saved place by id. `ok=false` when the id is unknown.
#[flutter_rust_bridge::frb(sync)]
pub fn location_update(id: String, input: LocationInput) -> LocationActionResponse {
    let Ok(entry_id) = Uuid::parse_str(id.trim()) else {
        return LocationActionResponse::failure(format!("invalid location id `{id}`"));
    };

    let result = with_catalog(|catalog| {
        let mut entry = catalog.get(entry_id)?.clone();
        entry.title = input.title;
        entry.description = input.description;
        entry.latitude = input.latitude;
        entry.longitude = input.longitude;
        entry.image_blob = input.image;
        entry.custom_tags = input.custom_tags.into_iter().collect();
        if let Some(emoji) = input.emoji {
            entry.emoji = emoji;
        }
        if catalog.update(entry) {
            catalog.get(entry_id).map(to_item)
        } else {
            None
        }
    });

    match result {
        Ok(Some(item)) => LocationActionResponse::success("Location updated.", Some(item)),
        Ok(None) => LocationActionResponse::failure(format!("location not found: {entry_id}")),
        Err(err) => LocationActionResponse::failure(format!("location_update failed: {err}")),
    }
}

/// Deletes a saved place. Removing an unknown id is reported, not raised.
#[flutter_rust_bridge::frb(sync)]
pub fn location_remove(id: String) -> LocationActionResponse {
    let Ok(entry_id) = Uuid::parse_str(id.trim()) else {
        return LocationActionResponse::failure(format!("invalid location id `{id}`"));
    };

    match with_catalog(|catalog| catalog.remove(entry_id)) {
        Ok(true) => LocationActionResponse::success("Location removed.", None),
        Ok(false) => LocationActionResponse::failure(format!("location not found: {entry_id}")),
        Err(err) => LocationActionResponse::failure(format!("location_remove failed: {err}")),
    }
}

/// Lists places matching `query`, newest first. Empty query lists all.
///
/// # FFI contract
/// - Never panics; returns an empty list when the catalog is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn location_search(query: String) -> Vec<LocationItem> {
    let result = with_catalog(|catalog| {
        catalog.set_query(query);
        sorted_newest_first(catalog.filtered())
            .into_iter()
            .map(to_item)
            .collect::<Vec<_>>()
    });

    result.unwrap_or_else(|err| {
        warn!("event=location_search module=ffi status=error error={err}");
        Vec::new()
    })
}

/// Returns the shareable summary for one place, or `None` when unknown.
#[flutter_rust_bridge::frb(sync)]
pub fn location_share_text(id: String) -> Option<String> {
    let entry_id = Uuid::parse_str(id.trim()).ok()?;
    with_catalog(|catalog| catalog.get(entry_id).map(export_summary))
        .ok()
        .flatten()
}

/// Splits tag-editor text on commas into trimmed custom tags.
#[flutter_rust_bridge::frb(sync)]
pub fn tag_input_split(raw: String) -> Vec<String> {
    split_tag_input(raw.as_str())
}

/// Measured tag chip handed in by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipSize {
    pub width: f64,
    pub height: f64,
}

/// Chip origins plus the height the chip container needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ChipLayout {
    pub height: f64,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// Wraps chips into rows for a container of `container_width`.
///
/// `spacing=None` uses the default chip gap.
#[flutter_rust_bridge::frb(sync)]
pub fn tag_chip_layout(
    chips: Vec<ChipSize>,
    container_width: f64,
    spacing: Option<f64>,
) -> ChipLayout {
    let layout = spacing.map_or_else(FlowLayout::default, FlowLayout::new);
    let sizes: Vec<Size> = chips
        .iter()
        .map(|chip| Size::new(chip.width, chip.height))
        .collect();
    let packing = layout.pack(&sizes, container_width);
    ChipLayout {
        height: packing.height,
        xs: packing.placements.iter().map(|point| point.x).collect(),
        ys: packing.placements.iter().map(|point| point.y).collect(),
    }
}

fn with_catalog<T>(f: impl FnOnce(&mut LocationCatalog) -> T) -> Result<T, String> {
    let slot = CATALOG
        .get()
        .ok_or_else(|| "catalog not open; call catalog_open first".to_string())?;
    let mut catalog = slot
        .catalog
        .lock()
        .map_err(|_| "catalog lock poisoned".to_string())?;
    Ok(f(&mut catalog))
}

fn to_item(entry: &Entry) -> LocationItem {
    LocationItem {
        id: entry.id.to_string(),
        title: entry.title.clone(),
        description: entry.description.clone(),
        latitude: entry.latitude,
        longitude: entry.longitude,
        image: entry.image_blob.clone(),
        created_at_ms: entry.created_at,
        auto_tags: entry.auto_tags.iter().cloned().collect(),
        custom_tags: entry.custom_tags.iter().cloned().collect(),
        all_tags: entry.all_tags().into_iter().collect(),
        emoji: entry.emoji.clone(),
    }
}
