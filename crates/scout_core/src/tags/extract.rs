//! Automatic tag extraction.
//!
//! # Invariants
//! - Auto tags are literal whitespace-delimited lowercase substrings; no
//!   stemming, stop words or punctuation stripping.
//! - Custom tag input is never case-normalized.

use std::collections::BTreeSet;

/// Derives the auto-tag set from an entry's title and description.
///
/// Pure: the same inputs always yield the same set.
pub fn extract_auto_tags(title: &str, description: &str) -> BTreeSet<String> {
    let title = title.to_lowercase();
    let description = description.to_lowercase();
    title
        .split_whitespace()
        .chain(description.split_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits raw tag-editor input on commas into trimmed, non-empty tags.
///
/// Casing is preserved verbatim.
pub fn split_tag_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
