//! Core utilities and types for hostmock.
//!
//! This crate provides file output and naming helpers used across
//! the hostmock crates.

mod file;
mod utils;

// File operations
pub use file::{File, GENERATED_HEADER, WriteResult};
// String utilities
pub use utils::{is_rust_keyword, sanitize_ident, to_pascal_case, to_snake_case};
