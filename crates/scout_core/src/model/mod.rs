//! Domain model for saved places.
//!
//! # Responsibility
//! - Define canonical data structures owned by the catalog.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.
//! - Removal is a hard delete; there are no tombstones.

pub mod entry;
