//! AND-of-substrings query matching.
//!
//! # Invariants
//! - Empty and whitespace-only queries match every entry.
//! - Terms are split on single spaces and matched as substrings of
//!   `"<title> <description>"`, lowercased. Tags are not consulted.

use crate::model::entry::Entry;

/// Returns whether `entry` matches every term of `query`.
pub fn matches(entry: &Entry, query: &str) -> bool {
    matches_text(&entry.title, &entry.description, query)
}

/// Matching on raw fields, for callers that have not built an `Entry` yet.
pub fn matches_text(title: &str, description: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let haystack = format!("{title} {description}").to_lowercase();
    let query = query.to_lowercase();
    query
        .split(' ')
        .filter(|term| !term.is_empty())
        .all(|term| haystack.contains(term))
}
