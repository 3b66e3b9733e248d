//! Geometry helpers for renderers.
//!
//! # Responsibility
//! - Arrange variable-sized tag chips without any UI toolkit dependency.
//! - Stay pure so layout results depend only on inputs.

pub mod flow;
