//! Runtime support for hostmock-generated test modules.
//!
//! A generated module calls into this crate to:
//!
//! - build call-recording stand-ins for host functions ([`create_mock`], [`MockFn`]),
//! - install them where code under test finds its API ([`setup_global`], [`ApiContext`]),
//! - fill in minimal instances of declared value types ([`create_fake`], [`FakeBuilder`]).
//!
//! ```
//! use hostmock_runtime::{ApiContext, Impls, json, setup_global};
//!
//! let ctx = ApiContext::new();
//! let api = setup_global(
//!     &ctx,
//!     "mod",
//!     ["GetObjId"],
//!     &Impls::new().returning("GetObjId", json!(100)),
//!     None,
//! );
//!
//! assert_eq!(ctx.call("mod", "GetObjId", &[]).unwrap(), json!(100));
//! assert_eq!(api.mock("GetObjId").unwrap().call_count(), 1);
//! ```

mod context;
mod error;
mod fake;
mod mock;
mod object;

pub use context::{ApiContext, setup_global};
pub use error::RuntimeError;
pub use fake::{FakeBuilder, Rule, Synth, TypeTag, create_fake, literal_value};
pub use hostmock_ir::{
    ApiMember, ApiModel, EnumDecl, EnumVariant, Field, FunctionType, Keyword, Literal, Param,
    TypeAlias, TypeDecl, TypeDef, TypeExpr, TypeParam,
};
pub use mock::{Call, Impl, Impls, MockFn, MockObject, create_mock};
pub use object::{ApiObject, Member};
pub use serde_json::{Map, Value, json};
