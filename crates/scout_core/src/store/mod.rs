//! Persistence gateway contracts and implementations.
//!
//! # Responsibility
//! - Define the narrow key/blob contract the catalog persists through.
//! - Keep SQL details out of catalog orchestration.
//!
//! # Invariants
//! - `save` fully overwrites the blob stored under a key.
//! - `load` reports an absent key as `Ok(None)`, not as an error.

pub mod gateway;
pub mod memory;
pub mod sqlite;
