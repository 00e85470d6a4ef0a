//! Core operations.
//!
//! Business logic for hostmock commands, separated from CLI argument
//! parsing and output rendering.

pub mod generate;

pub use generate::{GenerateOptions, generate};
