//! Intermediate representation types for hostmock.
//!
//! This crate provides the API model shared across the hostmock pipeline.
//! The extractor produces it, the emitter renders it, and the runtime
//! embeds it to know which members can be mocked and how to fake values.
//!
//! # Architecture
//!
//! ```text
//! index.d.ts → hostmock-decl (scanning) → hostmock-ir (ApiModel) → codegen
//!                                                     ↘ hostmock-runtime
//! ```
//!
//! The IR types are:
//! - Language-agnostic (the declaration syntax is only used for `Display`)
//! - Immutable once built (builders consume `self`)
//! - Self-contained (no dependencies beyond serde)

mod model;
mod types;

pub use model::{ApiMember, ApiModel, Param, TypeDef, TypeParam};
pub use types::{
    EnumDecl, EnumVariant, Field, FunctionType, Keyword, Literal, TypeAlias, TypeDecl, TypeExpr,
};
