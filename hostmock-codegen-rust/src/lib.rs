//! Rust test-support module emitter for hostmock.
//!
//! [`Generator`] turns an [`ApiModel`](hostmock_ir::ApiModel) into a module
//! that exposes a member enum, a typed mock view, setup functions and a fake
//! factory, all delegating to `hostmock-runtime`.

mod generator;
mod literal;
mod naming;
mod rust_file;

pub mod ast;

pub use ast::{Arm, Enum, Fn, Impl, Match, MethodChain, Param, Struct, Variant};
pub use generator::{DEFAULT_RUNTIME_CRATE, EmitOptions, Generator, generate_module};
pub use literal::{ModelLiteral, string_lit};
pub use naming::{Ident, Naming};
pub use rust_file::{RawCode, RustFile};
