//! Tag derivation and custom-tag input helpers.
//!
//! # Responsibility
//! - Derive automatic tags from free text.
//! - Parse raw tag-editor input into custom tag values.

pub mod extract;
