//! Entry search entry points.
//!
//! # Responsibility
//! - Decide whether an entry matches a user query.
//! - Stay stateless so any thread may call it.

pub mod matcher;
