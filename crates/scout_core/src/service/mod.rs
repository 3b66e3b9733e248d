//! Catalog use-case services.
//!
//! # Responsibility
//! - Own the authoritative in-memory entry collection.
//! - Orchestrate tag extraction, matching and background persistence.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod catalog;
pub mod snapshot;
mod writer;
