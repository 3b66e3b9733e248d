//! Whole-collection snapshot codec.
//!
//! The stored blob is a JSON array of entries using camelCase field names.

use crate::model::entry::{Entry, EntryId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot encode/decode failure.
#[derive(Debug)]
pub struct CodecError(serde_json::Error);

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid catalog snapshot: {}", self.0)
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self(value)
    }
}

/// Serializes the full entry collection.
pub fn encode_snapshot(entries: &[Entry]) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(entries)?)
}

/// Parses a stored collection. Later duplicates of an id are dropped.
pub fn decode_snapshot(blob: &[u8]) -> Result<Vec<Entry>, CodecError> {
    let decoded: Vec<Entry> = serde_json::from_slice(blob)?;
    let mut seen: HashSet<EntryId> = HashSet::with_capacity(decoded.len());
    Ok(decoded
        .into_iter()
        .filter(|entry| seen.insert(entry.id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::decode_snapshot;

    #[test]
    fn decode_rejects_non_array_payload() {
        assert!(decode_snapshot(b"{\"id\":1}").is_err());
        assert!(decode_snapshot(b"not json").is_err());
    }

    #[test]
    fn decode_drops_repeated_ids() {
        let blob = br#"[
            {"id":"11111111-2222-4333-8444-555555555555","title":"a","description":"",
             "latitude":1.0,"longitude":2.0,"imageBlob":null,"createdAt":1,
             "autoTags":["a"],"customTags":[],"emoji":"x"},
            {"id":"11111111-2222-4333-8444-555555555555","title":"b","description":"",
             "latitude":1.0,"longitude":2.0,"imageBlob":null,"createdAt":2,
             "autoTags":["b"],"customTags":[],"emoji":"x"}
        ]"#;
        let entries = decode_snapshot(blob).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "a");
    }
}
