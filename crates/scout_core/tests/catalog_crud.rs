use scout_core::{
    export_summary, extract_auto_tags, sorted_newest_first, CatalogConfig, EntryDraft,
    LocationCatalog, MemoryGateway,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

fn empty_catalog() -> LocationCatalog {
    LocationCatalog::open(Arc::new(MemoryGateway::new()), CatalogConfig::default())
}

#[test]
fn add_stores_entry_once_with_extracted_auto_tags() {
    let mut catalog = empty_catalog();
    let draft = EntryDraft::new("Golden Gate Park", 37.7694, -122.4862)
        .with_description("Windmills and Bison")
        .with_custom_tags(["Picnic"]);

    let added = catalog.add(draft);

    let view = catalog.filtered_view("");
    assert_eq!(view.iter().filter(|entry| entry.id == added.id).count(), 1);
    let stored = catalog.get(added.id).unwrap();
    assert_eq!(
        stored.auto_tags,
        extract_auto_tags("Golden Gate Park", "Windmills and Bison")
    );
    assert!(stored.custom_tags.contains("Picnic"));
    assert!(!added.id.is_nil());
}

#[test]
fn add_accepts_empty_title() {
    let mut catalog = empty_catalog();
    let added = catalog.add(EntryDraft::new("", 0.0, 0.0));
    assert_eq!(catalog.len(), 1);
    assert!(added.auto_tags.is_empty());
}

#[test]
fn all_tags_is_exact_union_of_auto_and_custom() {
    let mut catalog = empty_catalog();
    let added = catalog.add(
        EntryDraft::new("Blue Bottle", 0.0, 0.0).with_custom_tags(["coffee", "blue", "Coffee"]),
    );

    let expected: BTreeSet<String> = ["blue", "bottle", "coffee", "Coffee"]
        .into_iter()
        .map(str::to_string)
        .collect();
    assert_eq!(added.all_tags(), expected);
}

#[test]
fn update_recomputes_auto_tags_and_keeps_identity_and_created_at() {
    let mut catalog = empty_catalog();
    let added = catalog.add(EntryDraft::new("Old Name", 1.0, 2.0));

    let mut edited = added.clone();
    edited.title = "New Name".to_string();
    edited.description = "Rooftop bar".to_string();
    edited.created_at = 42;
    edited.auto_tags = ["bogus".to_string()].into_iter().collect();
    edited.add_custom_tag("drinks");

    assert!(catalog.update(edited));

    let stored = catalog.get(added.id).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(stored.title, "New Name");
    assert_eq!(stored.created_at, added.created_at);
    assert_eq!(stored.auto_tags, extract_auto_tags("New Name", "Rooftop bar"));
    assert!(!stored.auto_tags.contains("bogus"));
    assert!(stored.custom_tags.contains("drinks"));
}

#[test]
fn update_with_unknown_id_changes_nothing() {
    let mut catalog = empty_catalog();
    let added = catalog.add(EntryDraft::new("Kept", 1.0, 2.0));

    let mut stranger = added.clone();
    stranger.id = Uuid::new_v4();
    stranger.title = "Intruder".to_string();

    assert!(!catalog.update(stranger));
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.entries()[0].title, "Kept");
}

#[test]
fn remove_is_idempotent() {
    let mut catalog = empty_catalog();
    let keep = catalog.add(EntryDraft::new("Keep", 0.0, 0.0));
    let gone = catalog.add(EntryDraft::new("Gone", 0.0, 0.0));

    assert!(catalog.remove(gone.id));
    assert!(!catalog.remove(gone.id));

    let ids: Vec<Uuid> = catalog.filtered_view("").iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![keep.id]);
}

#[test]
fn filtered_view_applies_and_of_substrings() {
    let mut catalog = empty_catalog();
    let park = catalog.add(EntryDraft::new("Golden Gate Park", 0.0, 0.0));
    catalog.add(EntryDraft::new("Ferry Building", 0.0, 0.0).with_description("Market hall"));

    let hits = catalog.filtered_view("golden park");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, park.id);
    assert!(catalog.filtered_view("bridge").is_empty());
    assert_eq!(catalog.filtered_view("   ").len(), 2);
}

#[test]
fn stored_query_drives_filtered() {
    let mut catalog = empty_catalog();
    catalog.add(EntryDraft::new("Tartine", 0.0, 0.0).with_description("bakery"));
    catalog.add(EntryDraft::new("Dolores Park", 0.0, 0.0));

    assert_eq!(catalog.filtered().len(), 2);
    catalog.set_query("BAKERY");
    assert_eq!(catalog.query(), "BAKERY");
    let hits = catalog.filtered();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Tartine");
}

#[test]
fn known_tags_unions_every_entry() {
    let mut catalog = empty_catalog();
    catalog.add(EntryDraft::new("Mission Dolores", 0.0, 0.0).with_custom_tags(["History"]));
    catalog.add(EntryDraft::new("Dolores Park", 0.0, 0.0));

    let tags: Vec<String> = catalog.known_tags().into_iter().collect();
    assert_eq!(tags, vec!["History", "dolores", "mission", "park"]);
}

#[test]
fn newest_first_puts_latest_add_on_top() {
    let mut catalog = empty_catalog();
    let first = catalog.add(EntryDraft::new("first", 0.0, 0.0));
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = catalog.add(EntryDraft::new("second", 0.0, 0.0));

    let ordered = sorted_newest_first(catalog.filtered_view(""));
    assert_eq!(ordered[0].id, second.id);
    assert_eq!(ordered[1].id, first.id);
}

#[test]
fn export_summary_renders_stored_entry() {
    let mut catalog = empty_catalog();
    let added = catalog.add(
        EntryDraft::new("Coit Tower", 37.8024, -122.4058).with_description("Murals"),
    );

    let summary = export_summary(catalog.get(added.id).unwrap());
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Location: Coit Tower",
            "Description: Murals",
            "Coordinates: 37.8024, -122.4058",
            "Maps URL: https://maps.apple.com/?ll=37.8024,-122.4058",
        ]
    );
}
