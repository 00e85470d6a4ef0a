//! Minimal fake instances of declared value types.
//!
//! Every required field gets a default picked by the field type's [`TypeTag`].
//! The table of rules is explicit and each rule can be swapped per builder:
//!
//! | Tag        | Default                                         |
//! |------------|-------------------------------------------------|
//! | `Number`   | `0`                                             |
//! | `Text`     | `""`                                            |
//! | `Boolean`  | `false`                                         |
//! | `Sequence` | `[]`                                            |
//! | `Named`    | recursive fake of the referenced declaration    |
//! | `Object`   | object of the literal's required fields         |
//! | `Literal`  | the literal itself                              |
//! | `Union`    | default of the first non-nullish variant        |
//! | `Intersection` | object parts merged left to right           |
//! | `Other`    | `null`                                          |

use std::{cell::RefCell, collections::HashMap, sync::Arc};

use hostmock_ir::{ApiModel, EnumDecl, Field, Keyword, Literal, TypeDecl, TypeDef, TypeExpr};
use serde_json::{Map, Number, Value};

/// Dispatch key of the default-value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Number,
    Text,
    Boolean,
    Sequence,
    Named,
    Object,
    Literal,
    Union,
    Intersection,
    Other,
}

impl TypeTag {
    pub fn of(ty: &TypeExpr) -> Self {
        match ty {
            TypeExpr::Keyword { keyword } => match keyword {
                Keyword::Number | Keyword::Bigint => Self::Number,
                Keyword::String => Self::Text,
                Keyword::Boolean => Self::Boolean,
                _ => Self::Other,
            },
            TypeExpr::Array { .. } | TypeExpr::Tuple { .. } => Self::Sequence,
            TypeExpr::Named { name, .. } if matches!(name.as_str(), "Array" | "ReadonlyArray") => {
                Self::Sequence
            }
            TypeExpr::Named { .. } => Self::Named,
            TypeExpr::Object { .. } => Self::Object,
            TypeExpr::Literal { .. } => Self::Literal,
            TypeExpr::Union { .. } => Self::Union,
            TypeExpr::Intersection { .. } => Self::Intersection,
            TypeExpr::Function(_) | TypeExpr::Opaque { .. } => Self::Other,
        }
    }
}

/// A default-value rule.
pub type Rule = Arc<dyn Fn(&Synth<'_, '_>, &TypeExpr) -> Value + Send + Sync>;

/// Builds fake values for the types of one [`ApiModel`].
#[derive(Clone)]
pub struct FakeBuilder<'m> {
    model: &'m ApiModel,
    rules: HashMap<TypeTag, Rule>,
}

impl<'m> FakeBuilder<'m> {
    pub fn new(model: &'m ApiModel) -> Self {
        let mut rules: HashMap<TypeTag, Rule> = HashMap::new();
        rules.insert(TypeTag::Number, Arc::new(number_rule));
        rules.insert(TypeTag::Text, Arc::new(text_rule));
        rules.insert(TypeTag::Boolean, Arc::new(boolean_rule));
        rules.insert(TypeTag::Sequence, Arc::new(sequence_rule));
        rules.insert(TypeTag::Named, Arc::new(named_rule));
        rules.insert(TypeTag::Object, Arc::new(object_rule));
        rules.insert(TypeTag::Literal, Arc::new(literal_rule));
        rules.insert(TypeTag::Union, Arc::new(union_rule));
        rules.insert(TypeTag::Intersection, Arc::new(intersection_rule));
        rules.insert(TypeTag::Other, Arc::new(null_rule));
        Self { model, rules }
    }

    /// Replace the rule for `tag`.
    pub fn rule<F>(mut self, tag: TypeTag, f: F) -> Self
    where
        F: Fn(&Synth<'_, '_>, &TypeExpr) -> Value + Send + Sync + 'static,
    {
        self.rules.insert(tag, Arc::new(f));
        self
    }

    pub fn model(&self) -> &'m ApiModel {
        self.model
    }

    /// Fake instance of `type_name` with `overrides` on top.
    ///
    /// Object overrides replace synthesized keys verbatim; any other override
    /// value is returned as is. An unknown type name yields `{}` plus
    /// overrides.
    pub fn build(&self, type_name: &str, overrides: Option<Value>) -> Value {
        let base = match self.model.resolve(type_name) {
            Some(_) => self.synth().named(type_name),
            None => {
                tracing::warn!(type_name, "unknown type; faking an empty object");
                Value::Object(Map::new())
            }
        };
        apply_overrides(base, overrides)
    }

    /// Default value for an arbitrary type expression.
    pub fn default_for(&self, ty: &TypeExpr) -> Value {
        self.synth().default_for(ty)
    }

    fn synth(&self) -> Synth<'_, 'm> {
        Synth {
            builder: self,
            stack: RefCell::new(Vec::new()),
        }
    }
}

/// One synthesis run; handed to rules so they can recurse.
pub struct Synth<'b, 'm> {
    builder: &'b FakeBuilder<'m>,
    /// Named types currently being synthesized.
    stack: RefCell<Vec<String>>,
}

impl Synth<'_, '_> {
    pub fn model(&self) -> &ApiModel {
        self.builder.model
    }

    /// Dispatch `ty` through the rule table.
    pub fn default_for(&self, ty: &TypeExpr) -> Value {
        match self.builder.rules.get(&TypeTag::of(ty)) {
            Some(rule) => rule(self, ty),
            None => Value::Null,
        }
    }

    /// Fake of a named declaration; `null` if `name` is already being built.
    pub fn named(&self, name: &str) -> Value {
        let Some(def) = self.builder.model.resolve(name) else {
            return Value::Object(Map::new());
        };
        let key = match def {
            TypeDef::Decl(d) => d.name.as_str(),
            TypeDef::Alias(a) => a.name.as_str(),
            TypeDef::Enum(e) => e.name.as_str(),
        };
        if self.stack.borrow().iter().any(|n| n == key) {
            return Value::Null;
        }

        self.stack.borrow_mut().push(key.to_string());
        let value = match def {
            TypeDef::Decl(decl) => self.object(&self.effective_fields(decl)),
            TypeDef::Alias(alias) => self.default_for(&alias.target),
            TypeDef::Enum(decl) => first_variant(decl),
        };
        self.stack.borrow_mut().pop();
        value
    }

    /// Object holding a default for every required field.
    pub fn object(&self, fields: &[Field]) -> Value {
        let map = fields
            .iter()
            .filter(|f| !f.optional)
            .map(|f| (f.name.clone(), self.default_for(&f.ty)))
            .collect();
        Value::Object(map)
    }

    /// Fields of `decl` including inherited ones; own fields win.
    fn effective_fields(&self, decl: &TypeDecl) -> Vec<Field> {
        let mut fields: Vec<Field> = Vec::new();
        let mut visited = vec![decl.name.clone()];
        self.collect_inherited(decl, &mut fields, &mut visited);
        fields
    }

    fn collect_inherited(&self, decl: &TypeDecl, fields: &mut Vec<Field>, visited: &mut Vec<String>) {
        for base in &decl.extends {
            let TypeExpr::Named { name, .. } = base else {
                continue;
            };
            let Some(TypeDef::Decl(parent)) = self.builder.model.resolve(name) else {
                continue;
            };
            if visited.contains(&parent.name) {
                continue;
            }
            visited.push(parent.name.clone());
            self.collect_inherited(parent, fields, visited);
        }
        for field in &decl.fields {
            match fields.iter_mut().find(|f| f.name == field.name) {
                Some(existing) => *existing = field.clone(),
                None => fields.push(field.clone()),
            }
        }
    }
}

fn number_rule(_: &Synth<'_, '_>, _: &TypeExpr) -> Value {
    Value::from(0)
}

fn text_rule(_: &Synth<'_, '_>, _: &TypeExpr) -> Value {
    Value::from("")
}

fn boolean_rule(_: &Synth<'_, '_>, _: &TypeExpr) -> Value {
    Value::Bool(false)
}

fn sequence_rule(_: &Synth<'_, '_>, _: &TypeExpr) -> Value {
    Value::Array(Vec::new())
}

fn null_rule(_: &Synth<'_, '_>, _: &TypeExpr) -> Value {
    Value::Null
}

fn named_rule(synth: &Synth<'_, '_>, ty: &TypeExpr) -> Value {
    match ty {
        TypeExpr::Named { name, .. } => synth.named(name),
        _ => Value::Null,
    }
}

fn object_rule(synth: &Synth<'_, '_>, ty: &TypeExpr) -> Value {
    match ty {
        TypeExpr::Object { fields } => synth.object(fields),
        _ => Value::Null,
    }
}

fn literal_rule(_: &Synth<'_, '_>, ty: &TypeExpr) -> Value {
    match ty {
        TypeExpr::Literal { literal } => literal_value(literal),
        _ => Value::Null,
    }
}

fn union_rule(synth: &Synth<'_, '_>, ty: &TypeExpr) -> Value {
    match ty {
        TypeExpr::Union { variants } => variants
            .iter()
            .find(|v| !v.is_nullish())
            .map_or(Value::Null, |v| synth.default_for(v)),
        _ => Value::Null,
    }
}

fn intersection_rule(synth: &Synth<'_, '_>, ty: &TypeExpr) -> Value {
    let TypeExpr::Intersection { parts } = ty else {
        return Value::Null;
    };
    let mut merged: Option<Map<String, Value>> = None;
    for part in parts {
        if let Value::Object(map) = synth.default_for(part) {
            merged.get_or_insert_with(Map::new).extend(map);
        }
    }
    merged.map_or(Value::Null, Value::Object)
}

fn first_variant(decl: &EnumDecl) -> Value {
    match decl.variants.first() {
        Some(variant) => match &variant.value {
            Some(literal) => literal_value(literal),
            // numeric enums start at zero
            None => Value::from(0),
        },
        None => Value::Null,
    }
}

/// JSON value of a literal type.
pub fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::Number(n) => parse_number(n).unwrap_or_else(|| Value::String(n.clone())),
    }
}

fn parse_number(text: &str) -> Option<Value> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits = digits.replace('_', "");
    let radix = match digits.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    let value = match radix {
        Some(radix) => {
            let n = i64::from_str_radix(&digits[2..], radix).ok()?;
            Value::from(if negative { -n } else { n })
        }
        None => match digits.parse::<i64>() {
            Ok(n) => Value::from(if negative { -n } else { n }),
            Err(_) => {
                let f = digits.parse::<f64>().ok()?;
                Value::Number(Number::from_f64(if negative { -f } else { f })?)
            }
        },
    };
    Some(value)
}

fn apply_overrides(base: Value, overrides: Option<Value>) -> Value {
    match (base, overrides) {
        (base, None) => base,
        (Value::Object(mut map), Some(Value::Object(top))) => {
            map.extend(top);
            Value::Object(map)
        }
        (_, Some(other)) => other,
    }
}

/// Fake instance of `type_name` using the default rules.
pub fn create_fake(model: &ApiModel, type_name: &str, overrides: Option<Value>) -> Value {
    FakeBuilder::new(model).build(type_name, overrides)
}
