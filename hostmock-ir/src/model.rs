//! API model.
//!
//! The [`ApiModel`] is the complete result of scanning one declaration file
//! under one namespace: the callable members of that namespace and every
//! named type the file declares.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EnumDecl, TypeAlias, TypeDecl, TypeExpr};

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeExpr,
    /// Declared with `?`.
    pub optional: bool,
    /// Declared with `...`.
    pub rest: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            rest: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn rest(mut self) -> Self {
        self.rest = true;
        self
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dots = if self.rest { "..." } else { "" };
        let q = if self.optional { "?" } else { "" };
        write!(f, "{}{}{}: {}", dots, self.name, q, self.ty)
    }
}

/// A generic type parameter (`T extends Base = Default`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    pub constraint: Option<TypeExpr>,
    pub default: Option<TypeExpr>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
            default: None,
        }
    }

    pub fn constraint(mut self, ty: TypeExpr) -> Self {
        self.constraint = Some(ty);
        self
    }

    pub fn default(mut self, ty: TypeExpr) -> Self {
        self.default = Some(ty);
        self
    }
}

impl fmt::Display for TypeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(c) = &self.constraint {
            write!(f, " extends {}", c)?;
        }
        if let Some(d) = &self.default {
            write!(f, " = {}", d)?;
        }
        Ok(())
    }
}

/// One callable member of the API surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMember {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub returns: TypeExpr,
}

impl ApiMember {
    /// Create a member with no parameters returning `void`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            params: Vec::new(),
            returns: TypeExpr::keyword(crate::Keyword::Void),
        }
    }

    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: TypeExpr) -> Self {
        self.returns = ty;
        self
    }

    /// Number of parameters a caller must supply.
    pub fn required_arity(&self) -> usize {
        self.params
            .iter()
            .filter(|p| !p.optional && !p.rest)
            .count()
    }
}

impl fmt::Display for ApiMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_params.is_empty() {
            f.write_str("<")?;
            for (i, tp) in self.type_params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", tp)?;
            }
            f.write_str(">")?;
        }
        f.write_str("(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "): {}", self.returns)
    }
}

/// A resolved named type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeDef<'a> {
    Decl(&'a TypeDecl),
    Alias(&'a TypeAlias),
    Enum(&'a EnumDecl),
}

/// Application-independent model of one scanned namespace.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiModel {
    /// Namespace the members were read from (e.g. `mod`).
    pub namespace: String,
    pub members: Vec<ApiMember>,
    pub types: Vec<TypeDecl>,
    pub aliases: Vec<TypeAlias>,
    pub enums: Vec<EnumDecl>,
}

impl ApiModel {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn member(mut self, member: ApiMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn type_decl(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }

    pub fn alias(mut self, alias: TypeAlias) -> Self {
        self.aliases.push(alias);
        self
    }

    pub fn enum_decl(mut self, decl: EnumDecl) -> Self {
        self.enums.push(decl);
        self
    }

    /// Look up a callable member by name.
    pub fn get_member(&self, name: &str) -> Option<&ApiMember> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Member names in declaration order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Look up a value-type declaration, accepting qualified names.
    pub fn get_type(&self, name: &str) -> Option<&TypeDecl> {
        match self.resolve(name)? {
            TypeDef::Decl(decl) => Some(decl),
            _ => None,
        }
    }

    /// Resolve a type name to its definition.
    ///
    /// `mod.Player` resolves to `Player` when no declaration carries the
    /// qualified name itself.
    pub fn resolve(&self, name: &str) -> Option<TypeDef<'_>> {
        self.resolve_exact(name).or_else(|| {
            let (_, last) = name.rsplit_once('.')?;
            self.resolve_exact(last)
        })
    }

    fn resolve_exact(&self, name: &str) -> Option<TypeDef<'_>> {
        if let Some(decl) = self.types.iter().find(|t| t.name == name) {
            return Some(TypeDef::Decl(decl));
        }
        if let Some(alias) = self.aliases.iter().find(|a| a.name == name) {
            return Some(TypeDef::Alias(alias));
        }
        self.enums
            .iter()
            .find(|e| e.name == name)
            .map(TypeDef::Enum)
    }

    /// Names of every declared type (decls, aliases, enums) in model order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .map(|t| t.name.as_str())
            .chain(self.aliases.iter().map(|a| a.name.as_str()))
            .chain(self.enums.iter().map(|e| e.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnumVariant, Field, Keyword, Literal};

    fn sample() -> ApiModel {
        ApiModel::new("mod")
            .member(
                ApiMember::new("GetObjId")
                    .param(Param::new("obj", TypeExpr::named("Object")))
                    .returns(TypeExpr::number()),
            )
            .type_decl(TypeDecl::new("Player").field(Field::new("name", TypeExpr::string())))
            .alias(TypeAlias::new("Id", TypeExpr::number()))
            .enum_decl(
                EnumDecl::new("Team").variant(
                    EnumVariant::new("Team1").value(Literal::Number("1".into())),
                ),
            )
    }

    #[test]
    fn test_member_display() {
        let member = ApiMember::new("Message")
            .param(Param::new("msg", TypeExpr::string()))
            .param(Param::new("arg0", TypeExpr::named("mod.Player")).optional())
            .returns(TypeExpr::named("mod.Message"));
        assert_eq!(
            member.to_string(),
            "Message(msg: string, arg0?: mod.Player): mod.Message"
        );
    }

    #[test]
    fn test_member_display_generic_rest() {
        let member = ApiMember::new("Log")
            .type_param(TypeParam::new("T").constraint(TypeExpr::string()))
            .param(Param::new("items", TypeExpr::array(TypeExpr::named("T"))).rest());
        assert_eq!(member.to_string(), "Log<T extends string>(...items: T[]): void");
    }

    #[test]
    fn test_required_arity() {
        let member = ApiMember::new("f")
            .param(Param::new("a", TypeExpr::number()))
            .param(Param::new("b", TypeExpr::number()).optional())
            .param(Param::new("c", TypeExpr::array(TypeExpr::number())).rest());
        assert_eq!(member.required_arity(), 1);
    }

    #[test]
    fn test_default_return_is_void() {
        assert_eq!(
            ApiMember::new("f").returns,
            TypeExpr::keyword(Keyword::Void)
        );
    }

    #[test]
    fn test_resolve_plain_and_qualified() {
        let model = sample();
        assert!(matches!(model.resolve("Player"), Some(TypeDef::Decl(_))));
        assert!(matches!(model.resolve("mod.Player"), Some(TypeDef::Decl(_))));
        assert!(matches!(model.resolve("mod.Id"), Some(TypeDef::Alias(_))));
        assert!(matches!(model.resolve("Team"), Some(TypeDef::Enum(_))));
        assert!(model.resolve("Vehicle").is_none());
        assert!(model.get_type("Id").is_none());
    }

    #[test]
    fn test_lookups() {
        let model = sample();
        assert!(model.get_member("GetObjId").is_some());
        assert!(model.get_member("Missing").is_none());
        assert_eq!(model.member_names().collect::<Vec<_>>(), ["GetObjId"]);
        assert_eq!(
            model.type_names().collect::<Vec<_>>(),
            ["Player", "Id", "Team"]
        );
    }
}
