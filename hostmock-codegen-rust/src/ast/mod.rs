//! Rust AST builders for generating enums, structs, impls, functions, and
//! builder-style expressions.
//!
//! Each builder implements [`Renderable`](hostmock_codegen::Renderable) and is
//! rendered through a [`CodeBuilder`](hostmock_codegen::CodeBuilder).

mod chains;
mod enums;
mod fns;
mod impls;
mod structs;

pub use chains::MethodChain;
pub use enums::{Enum, Variant};
pub use fns::{Arm, Fn, Match, Param};
pub use impls::Impl;
pub use structs::Struct;
