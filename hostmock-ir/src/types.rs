//! Declared types and named value-type declarations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Param, TypeParam};

/// Built-in keyword types of the declaration language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    Number,
    String,
    Boolean,
    Bigint,
    Void,
    Any,
    Unknown,
    Never,
    Null,
    Undefined,
    Object,
    Symbol,
}

impl Keyword {
    /// Look up a keyword type by its source spelling.
    pub fn from_ident(ident: &str) -> Option<Self> {
        let kw = match ident {
            "number" => Self::Number,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "bigint" => Self::Bigint,
            "void" => Self::Void,
            "any" => Self::Any,
            "unknown" => Self::Unknown,
            "never" => Self::Never,
            "null" => Self::Null,
            "undefined" => Self::Undefined,
            "object" => Self::Object,
            "symbol" => Self::Symbol,
            _ => return None,
        };
        Some(kw)
    }

    /// Source spelling of the keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Bigint => "bigint",
            Self::Void => "void",
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Never => "never",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Object => "object",
            Self::Symbol => "symbol",
        }
    }

    /// Returns the Rust variant name (`Keyword::Number` → `"Number"`).
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Bigint => "Bigint",
            Self::Void => "Void",
            Self::Any => "Any",
            Self::Unknown => "Unknown",
            Self::Never => "Never",
            Self::Null => "Null",
            Self::Undefined => "Undefined",
            Self::Object => "Object",
            Self::Symbol => "Symbol",
        }
    }
}

/// A literal type (`"red"`, `42`, `true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Literal {
    String(String),
    /// Numeric literal kept as written.
    Number(String),
    Boolean(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
            Self::Number(n) => f.write_str(n),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// A function type: `(a: number, b?: string) => void` or `<T>(x: T) => T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionType {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub returns: Box<TypeExpr>,
}

/// A type expression exactly as it was declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    Keyword { keyword: Keyword },
    Literal { literal: Literal },
    /// `T[]`
    Array { element: Box<TypeExpr> },
    /// `[A, B]`
    Tuple { elements: Vec<TypeExpr> },
    /// `Player`, `mod.Player`, `Array<T>`, `Promise<void>`
    Named { name: String, args: Vec<TypeExpr> },
    Union { variants: Vec<TypeExpr> },
    Intersection { parts: Vec<TypeExpr> },
    Function(FunctionType),
    /// `{ x: number; y?: number }`
    Object { fields: Vec<Field> },
    /// Anything kept verbatim (`typeof x`, `keyof T`, `T["k"]`).
    Opaque { text: String },
}

impl TypeExpr {
    pub fn keyword(keyword: Keyword) -> Self {
        Self::Keyword { keyword }
    }

    pub fn number() -> Self {
        Self::keyword(Keyword::Number)
    }

    pub fn string() -> Self {
        Self::keyword(Keyword::String)
    }

    pub fn boolean() -> Self {
        Self::keyword(Keyword::Boolean)
    }

    pub fn literal(literal: Literal) -> Self {
        Self::Literal { literal }
    }

    pub fn array(element: TypeExpr) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    pub fn tuple(elements: Vec<TypeExpr>) -> Self {
        Self::Tuple { elements }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    pub fn union(variants: Vec<TypeExpr>) -> Self {
        Self::Union { variants }
    }

    pub fn intersection(parts: Vec<TypeExpr>) -> Self {
        Self::Intersection { parts }
    }

    pub fn function(params: Vec<Param>, returns: TypeExpr) -> Self {
        Self::generic_function(Vec::new(), params, returns)
    }

    pub fn generic_function(
        type_params: Vec<TypeParam>,
        params: Vec<Param>,
        returns: TypeExpr,
    ) -> Self {
        Self::Function(FunctionType {
            type_params,
            params,
            returns: Box::new(returns),
        })
    }

    pub fn object(fields: Vec<Field>) -> Self {
        Self::Object { fields }
    }

    pub fn opaque(text: impl Into<String>) -> Self {
        Self::Opaque { text: text.into() }
    }

    /// Returns true if this is a function type.
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Returns true for `null`, `undefined` and `void`.
    pub fn is_nullish(&self) -> bool {
        matches!(
            self,
            Self::Keyword {
                keyword: Keyword::Null | Keyword::Undefined | Keyword::Void
            }
        )
    }

    /// Binding strength of the outermost operator: function types bind
    /// loosest, then unions, then intersections.
    fn precedence(&self) -> u8 {
        match self {
            Self::Function(_) => 0,
            Self::Union { .. } => 1,
            Self::Intersection { .. } => 2,
            _ => 3,
        }
    }

    /// Writes `self` as an operand of an operator with binding strength
    /// `level`, parenthesized only where the bare text would parse differently.
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, level: u8) -> fmt::Result {
        if self.precedence() <= level {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword { keyword } => f.write_str(keyword.as_str()),
            Self::Literal { literal } => write!(f, "{}", literal),
            Self::Array { element } => {
                element.fmt_operand(f, 3)?;
                f.write_str("[]")
            }
            Self::Tuple { elements } => {
                f.write_str("[")?;
                join(f, elements, ", ")?;
                f.write_str("]")
            }
            Self::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    join(f, args, ", ")?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Union { variants } => {
                for (i, variant) in variants.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    variant.fmt_operand(f, 1)?;
                }
                Ok(())
            }
            Self::Intersection { parts } => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" & ")?;
                    }
                    part.fmt_operand(f, 2)?;
                }
                Ok(())
            }
            Self::Function(func) => {
                if !func.type_params.is_empty() {
                    f.write_str("<")?;
                    join(f, &func.type_params, ", ")?;
                    f.write_str(">")?;
                }
                f.write_str("(")?;
                join(f, &func.params, ", ")?;
                write!(f, ") => {}", func.returns)
            }
            Self::Object { fields } => {
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                join(f, fields, "; ")?;
                f.write_str(" }")
            }
            Self::Opaque { text } => f.write_str(text),
        }
    }
}

/// A property of a value type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeExpr,
    pub optional: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = if self.optional { "?" } else { "" };
        write!(f, "{}{}: {}", self.name, q, self.ty)
    }
}

/// A named value type (interface, object type alias or class shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    /// Heritage clause (`interface A extends B, C<T>`).
    pub extends: Vec<TypeExpr>,
    pub fields: Vec<Field>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn extends(mut self, base: TypeExpr) -> Self {
        self.extends.push(base);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Fields that a fake instance must always carry.
    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.optional)
    }
}

/// A type alias whose target is not an object literal (`type Id = number`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub name: String,
    pub target: TypeExpr,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, target: TypeExpr) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

/// One member of an enum declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumVariant {
    pub name: String,
    /// Explicit initializer, if any.
    pub value: Option<Literal>,
}

impl EnumVariant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn value(mut self, value: Literal) -> Self {
        self.value = Some(value);
        self
    }
}

/// An `enum` or `const enum` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub variants: Vec<EnumVariant>,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    pub fn variant(mut self, variant: EnumVariant) -> Self {
        self.variants.push(variant);
        self
    }
}
