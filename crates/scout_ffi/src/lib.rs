//! FFI bridge crate for the Scout UI shell.

pub mod api;
