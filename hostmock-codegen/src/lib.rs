//! Language-agnostic code building blocks for hostmock.
//!
//! Language-specific emitters (e.g., `hostmock-codegen-rust`) build their
//! AST nodes on top of these pieces.
//!
//! - [`builder`] - Indented text output ([`CodeBuilder`], [`CodeFragment`], [`Renderable`])
//! - [`imports`] - Deduplicated, ordered import tracking

pub mod builder;
pub mod imports;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use imports::ImportCollector;
