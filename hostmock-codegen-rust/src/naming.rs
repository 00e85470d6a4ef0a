//! Rust identifiers for declared names.
//!
//! Declaration names are free-form (`GetObjId`, `get-obj-id`, `$emit`), so
//! every name the module exposes as an identifier is planned up front and
//! collisions are rejected before anything is rendered.

use std::collections::HashMap;

use eyre::{Result, bail};
use hostmock_core::{sanitize_ident, to_pascal_case, to_snake_case};
use hostmock_ir::ApiModel;

/// Inherent methods of the generated mock view; accessors may not shadow them.
const VIEW_METHODS: &[&str] = &["mock", "call", "object", "into_inner"];

/// Identifiers derived from one declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// Name exactly as declared.
    pub name: String,
    /// PascalCase enum variant.
    pub variant: String,
    /// snake_case accessor.
    pub accessor: String,
}

/// Identifiers for everything the generated module names.
#[derive(Debug, Clone)]
pub struct Naming {
    /// PascalCase namespace prefix (`mod` → `Mod`).
    pub prefix: String,
    /// snake_case namespace (`mod` → `mod`, `a.b` → `a_b`).
    pub snake: String,
    pub members: Vec<Ident>,
    pub types: Vec<Ident>,
}

impl Naming {
    /// Plan identifiers for `model`, failing on any collision.
    pub fn plan(model: &ApiModel) -> Result<Self> {
        let prefix = type_ident(&model.namespace);
        let snake = to_snake_case(&model.namespace);
        if prefix == "_" || snake.is_empty() {
            bail!("namespace '{}' has no usable Rust identifier", model.namespace);
        }

        let members = plan_idents(model.member_names(), "member")?;
        let types = plan_idents(model.type_names(), "type")?;
        Ok(Self {
            prefix,
            snake,
            members,
            types,
        })
    }

    /// `ModMember`
    pub fn member_enum(&self) -> String {
        format!("{}Member", self.prefix)
    }

    /// `ModType`
    pub fn type_enum(&self) -> String {
        format!("{}Type", self.prefix)
    }

    /// `ModMock`
    pub fn mock_struct(&self) -> String {
        format!("{}Mock", self.prefix)
    }

    /// `setup_mod_mock`
    pub fn setup_fn(&self) -> String {
        format!("setup_{}_mock", self.snake)
    }

    /// `setup_all_mod_mock`
    pub fn setup_all_fn(&self) -> String {
        format!("setup_all_{}_mock", self.snake)
    }
}

fn type_ident(name: &str) -> String {
    sanitize_ident(&to_pascal_case(name))
}

fn accessor_ident(name: &str) -> String {
    let ident = sanitize_ident(&to_snake_case(name));
    if VIEW_METHODS.contains(&ident.as_str()) {
        format!("{}_", ident)
    } else {
        ident
    }
}

fn plan_idents<'a>(names: impl Iterator<Item = &'a str>, kind: &str) -> Result<Vec<Ident>> {
    let mut variants: HashMap<String, String> = HashMap::new();
    let mut accessors: HashMap<String, String> = HashMap::new();
    let mut idents = Vec::new();

    for name in names {
        let ident = Ident {
            name: name.to_string(),
            variant: type_ident(name),
            accessor: accessor_ident(name),
        };
        if ident.variant == "_" {
            bail!("{} '{}' has no usable Rust identifier", kind, name);
        }
        if let Some(first) = variants.insert(ident.variant.clone(), ident.name.clone()) {
            bail!(
                "{} names '{}' and '{}' both become the Rust identifier `{}`",
                kind,
                first,
                name,
                ident.variant
            );
        }
        if let Some(first) = accessors.insert(ident.accessor.clone(), ident.name.clone()) {
            bail!(
                "{} names '{}' and '{}' both become the Rust identifier `{}`",
                kind,
                first,
                name,
                ident.accessor
            );
        }
        idents.push(ident);
    }
    Ok(idents)
}
