use scout_core::{Entry, EntryDraft, LocationCatalog, MemoryGateway, CatalogConfig};
use std::sync::Arc;

#[test]
fn entry_serialization_uses_camel_case_fields_and_base64_image() {
    let mut catalog = LocationCatalog::open(Arc::new(MemoryGateway::new()), CatalogConfig::default());
    let entry = catalog.add(
        EntryDraft::new("Pier", 1.5, -2.25)
            .with_image(b"png".to_vec())
            .with_custom_tags(["b", "a"]),
    );

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["id"], entry.id.to_string());
    assert_eq!(json["title"], "Pier");
    assert_eq!(json["latitude"], 1.5);
    assert_eq!(json["longitude"], -2.25);
    assert_eq!(json["imageBlob"], "cG5n");
    assert_eq!(json["createdAt"], entry.created_at);
    assert_eq!(json["autoTags"], serde_json::json!(["pier"]));
    assert_eq!(json["customTags"], serde_json::json!(["a", "b"]));
    assert_eq!(json["emoji"], "📍");

    let decoded: Entry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.image_blob.as_deref(), Some(&b"png"[..]));
}

#[test]
fn missing_optional_fields_take_defaults() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Legacy",
        "description": "",
        "latitude": 0.0,
        "longitude": 0.0,
        "createdAt": 1_700_000_000_000_i64
    });

    let entry: Entry = serde_json::from_value(value).unwrap();
    assert_eq!(entry.image_blob, None);
    assert!(entry.auto_tags.is_empty());
    assert!(entry.custom_tags.is_empty());
    assert_eq!(entry.emoji, scout_core::DEFAULT_EMOJI);
}

#[test]
fn custom_tag_edits_are_case_sensitive() {
    let mut entry: Entry = serde_json::from_value(serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "t",
        "description": "",
        "latitude": 0.0,
        "longitude": 0.0,
        "createdAt": 0
    }))
    .unwrap();

    assert!(entry.add_custom_tag("Cafe"));
    assert!(entry.add_custom_tag("cafe"));
    assert!(!entry.add_custom_tag("cafe"));
    assert_eq!(entry.custom_tags.len(), 2);
    assert!(entry.remove_custom_tag("Cafe"));
    assert!(!entry.remove_custom_tag("Cafe"));
}

#[test]
fn non_finite_coordinates_travel_as_text() {
    let mut catalog = LocationCatalog::open(Arc::new(MemoryGateway::new()), CatalogConfig::default());
    let entry = catalog.add(EntryDraft::new("Unknown fix", f64::NAN, f64::NEG_INFINITY));

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["latitude"], "NaN");
    assert_eq!(json["longitude"], "-inf");

    let decoded: Entry = serde_json::from_value(json).unwrap();
    assert!(decoded.latitude.is_nan());
    assert_eq!(decoded.longitude, f64::NEG_INFINITY);
}

#[test]
fn null_coordinates_from_older_snapshots_load_as_nan() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Old",
        "description": "",
        "latitude": null,
        "longitude": 12,
        "createdAt": 1
    });

    let entry: Entry = serde_json::from_value(value).unwrap();
    assert!(entry.latitude.is_nan());
    assert_eq!(entry.longitude, 12.0);

    let bad = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Bad",
        "description": "",
        "latitude": "north",
        "longitude": 0.0,
        "createdAt": 1
    });
    assert!(serde_json::from_value::<Entry>(bad).is_err());
}
