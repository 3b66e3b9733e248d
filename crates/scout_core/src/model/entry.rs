//! Saved-place entry model.
//!
//! # Responsibility
//! - Define the catalog's unit of record and the draft used to create one.
//! - Expose the derived `all_tags` view over auto and custom tags.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - Equality and hashing consider `id` only; content drift does not change
//!   identity.
//! - `created_at` is stamped once by the catalog and never re-stamped.
//! - `auto_tags` is derived from title/description and never user-edited.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Glyph used when the creator does not pick one.
pub const DEFAULT_EMOJI: &str = "📍";

/// Stable identifier for every saved place.
pub type EntryId = Uuid;

/// One saved place in the catalog.
///
/// Serialized with camelCase field names; `imageBlob` travels as base64 text.
/// Non-finite coordinates are written as `"NaN"`, `"inf"` or `"-inf"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub description: String,
    #[serde(with = "coordinate")]
    pub latitude: f64,
    #[serde(with = "coordinate")]
    pub longitude: f64,
    #[serde(default, with = "base64_blob")]
    pub image_blob: Option<Vec<u8>>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    #[serde(default)]
    pub auto_tags: BTreeSet<String>,
    #[serde(default)]
    pub custom_tags: BTreeSet<String>,
    #[serde(default = "default_emoji")]
    pub emoji: String,
}

impl Entry {
    /// Materializes a draft into a record with the given identity and stamp.
    ///
    /// `auto_tags` starts empty; the catalog fills it in.
    pub(crate) fn from_draft(id: EntryId, created_at: i64, draft: EntryDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            latitude: draft.latitude,
            longitude: draft.longitude,
            image_blob: draft.image_blob,
            created_at,
            auto_tags: BTreeSet::new(),
            custom_tags: draft.custom_tags,
            emoji: draft.emoji,
        }
    }

    /// Union of auto and custom tags.
    pub fn all_tags(&self) -> BTreeSet<String> {
        self.auto_tags.union(&self.custom_tags).cloned().collect()
    }

    /// Adds one custom tag verbatim. Returns `false` when already present.
    ///
    /// Custom tags keep their casing, so `Cafe` and `cafe` are distinct.
    pub fn add_custom_tag(&mut self, tag: impl Into<String>) -> bool {
        self.custom_tags.insert(tag.into())
    }

    /// Removes one custom tag. Returns `false` when it was not present.
    pub fn remove_custom_tag(&mut self, tag: &str) -> bool {
        self.custom_tags.remove(tag)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// User input for a new entry, before identity and tags are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_blob: Option<Vec<u8>>,
    pub custom_tags: BTreeSet<String>,
    pub emoji: String,
}

impl EntryDraft {
    /// Creates a draft with empty description, no image, no custom tags and
    /// the default pin glyph.
    pub fn new(title: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            latitude,
            longitude,
            image_blob: None,
            custom_tags: BTreeSet::new(),
            emoji: DEFAULT_EMOJI.to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_custom_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, blob: Vec<u8>) -> Self {
        self.image_blob = Some(blob);
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    /// Form-level check used by add/edit screens before calling the catalog.
    ///
    /// The catalog itself accepts empty titles.
    pub fn is_submittable(&self) -> bool {
        !self.title.is_empty()
    }
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

mod coordinate {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(f64),
        Text(String),
        // Snapshots written before non-finite values were encoded as text.
        Null,
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if *value == f64::INFINITY {
            serializer.serialize_str("inf")
        } else if *value == f64::NEG_INFINITY {
            serializer.serialize_str("-inf")
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Wire::deserialize(deserializer)? {
            Wire::Number(value) => Ok(value),
            Wire::Null => Ok(f64::NAN),
            Wire::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(serde::de::Error::custom(format!(
                    "invalid coordinate `{other}`"
                ))),
            },
        }
    }
}

mod base64_blob {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = Option::<String>::deserialize(deserializer)?;
        encoded
            .map(|text| STANDARD.decode(text.as_bytes()).map_err(serde::de::Error::custom))
            .transpose()
    }
}
