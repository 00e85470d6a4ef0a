//! Rust expressions that rebuild an [`ApiModel`] at test time.
//!
//! The generated module embeds the scanned model as builder calls against
//! the IR types re-exported by the runtime crate. Every IR symbol an
//! expression mentions is recorded so the module imports exactly those.

use std::collections::BTreeSet;

use hostmock_ir::{
    ApiMember, ApiModel, EnumDecl, Field, Keyword, Literal, Param, TypeAlias, TypeDecl, TypeExpr,
    TypeParam,
};

use crate::ast::MethodChain;

/// Quote `s` as a Rust string literal.
pub fn string_lit(s: &str) -> String {
    format!("{:?}", s)
}

/// Renders model parts as Rust expressions.
#[derive(Debug, Default)]
pub struct ModelLiteral {
    symbols: BTreeSet<&'static str>,
}

impl ModelLiteral {
    pub fn new() -> Self {
        Self::default()
    }

    /// IR symbols referenced by everything rendered so far.
    pub fn symbols(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.symbols.iter().copied()
    }

    fn uses(&mut self, symbol: &'static str) {
        self.symbols.insert(symbol);
    }

    /// The whole model as one builder chain.
    pub fn model(&mut self, model: &ApiModel) -> MethodChain {
        self.uses("ApiModel");
        let mut chain = MethodChain::new(format!("ApiModel::new({})", string_lit(&model.namespace)));
        for member in &model.members {
            chain = chain.method_chain("member", self.member(member));
        }
        for decl in &model.types {
            chain = chain.method_chain("type_decl", self.type_decl(decl));
        }
        for alias in &model.aliases {
            chain = chain.method_arg("alias", self.alias(alias));
        }
        for decl in &model.enums {
            chain = chain.method_chain("enum_decl", self.enum_decl(decl));
        }
        chain
    }

    pub fn member(&mut self, member: &ApiMember) -> MethodChain {
        self.uses("ApiMember");
        let mut chain = MethodChain::new(format!("ApiMember::new({})", string_lit(&member.name)));
        for tp in &member.type_params {
            let tp = self.type_param(tp);
            chain = chain.method_arg("type_param", tp);
        }
        for param in &member.params {
            let param = self.param(param);
            chain = chain.method_arg("param", param);
        }
        // `ApiMember::new` already returns void
        if member.returns != TypeExpr::keyword(Keyword::Void) {
            let returns = self.type_expr(&member.returns);
            chain = chain.method_arg("returns", returns);
        }
        chain
    }

    pub fn type_decl(&mut self, decl: &TypeDecl) -> MethodChain {
        self.uses("TypeDecl");
        let mut chain = MethodChain::new(format!("TypeDecl::new({})", string_lit(&decl.name)));
        for base in &decl.extends {
            let base = self.type_expr(base);
            chain = chain.method_arg("extends", base);
        }
        for field in &decl.fields {
            let field = self.field(field);
            chain = chain.method_arg("field", field);
        }
        chain
    }

    pub fn alias(&mut self, alias: &TypeAlias) -> String {
        self.uses("TypeAlias");
        format!(
            "TypeAlias::new({}, {})",
            string_lit(&alias.name),
            self.type_expr(&alias.target)
        )
    }

    pub fn enum_decl(&mut self, decl: &EnumDecl) -> MethodChain {
        self.uses("EnumDecl");
        let mut chain = MethodChain::new(format!("EnumDecl::new({})", string_lit(&decl.name)));
        for variant in &decl.variants {
            self.uses("EnumVariant");
            let value = variant.value.as_ref().map(|v| self.literal(v));
            let variant = MethodChain::new(format!("EnumVariant::new({})", string_lit(&variant.name)))
                .method_arg_opt("value", value)
                .build_inline();
            chain = chain.method_arg("variant", variant);
        }
        chain
    }

    fn type_param(&mut self, tp: &TypeParam) -> String {
        self.uses("TypeParam");
        let constraint = tp.constraint.as_ref().map(|c| self.type_expr(c));
        let default = tp.default.as_ref().map(|d| self.type_expr(d));
        MethodChain::new(format!("TypeParam::new({})", string_lit(&tp.name)))
            .method_arg_opt("constraint", constraint)
            .method_arg_opt("default", default)
            .build_inline()
    }

    fn param(&mut self, param: &Param) -> String {
        self.uses("Param");
        MethodChain::new(format!(
            "Param::new({}, {})",
            string_lit(&param.name),
            self.type_expr(&param.ty)
        ))
        .method_if(param.optional, "optional")
        .method_if(param.rest, "rest")
        .build_inline()
    }

    fn field(&mut self, field: &Field) -> String {
        self.uses("Field");
        MethodChain::new(format!(
            "Field::new({}, {})",
            string_lit(&field.name),
            self.type_expr(&field.ty)
        ))
        .method_if(field.optional, "optional")
        .build_inline()
    }

    fn literal(&mut self, literal: &Literal) -> String {
        self.uses("Literal");
        match literal {
            Literal::String(s) => format!("Literal::String({}.into())", string_lit(s)),
            Literal::Number(n) => format!("Literal::Number({}.into())", string_lit(n)),
            Literal::Boolean(b) => format!("Literal::Boolean({})", b),
        }
    }

    fn list(&mut self, items: &[TypeExpr]) -> String {
        let items = items.iter().map(|t| self.type_expr(t)).collect::<Vec<_>>();
        format!("vec![{}]", items.join(", "))
    }

    /// A single-line expression that rebuilds `ty`.
    pub fn type_expr(&mut self, ty: &TypeExpr) -> String {
        self.uses("TypeExpr");
        match ty {
            TypeExpr::Keyword { keyword } => match keyword {
                Keyword::Number => "TypeExpr::number()".to_string(),
                Keyword::String => "TypeExpr::string()".to_string(),
                Keyword::Boolean => "TypeExpr::boolean()".to_string(),
                other => {
                    self.uses("Keyword");
                    format!("TypeExpr::keyword(Keyword::{})", other.variant_name())
                }
            },
            TypeExpr::Literal { literal } => format!("TypeExpr::literal({})", self.literal(literal)),
            TypeExpr::Array { element } => format!("TypeExpr::array({})", self.type_expr(element)),
            TypeExpr::Tuple { elements } => format!("TypeExpr::tuple({})", self.list(elements)),
            TypeExpr::Named { name, args } if args.is_empty() => {
                format!("TypeExpr::named({})", string_lit(name))
            }
            TypeExpr::Named { name, args } => {
                format!("TypeExpr::generic({}, {})", string_lit(name), self.list(args))
            }
            TypeExpr::Union { variants } => format!("TypeExpr::union({})", self.list(variants)),
            TypeExpr::Intersection { parts } => {
                format!("TypeExpr::intersection({})", self.list(parts))
            }
            TypeExpr::Function(func) => {
                let params = func.params.iter().map(|p| self.param(p)).collect::<Vec<_>>();
                let returns = self.type_expr(&func.returns);
                if func.type_params.is_empty() {
                    return format!("TypeExpr::function(vec![{}], {})", params.join(", "), returns);
                }
                let type_params = func
                    .type_params
                    .iter()
                    .map(|tp| self.type_param(tp))
                    .collect::<Vec<_>>();
                format!(
                    "TypeExpr::generic_function(vec![{}], vec![{}], {})",
                    type_params.join(", "),
                    params.join(", "),
                    returns
                )
            }
            TypeExpr::Object { fields } => {
                let fields = fields.iter().map(|f| self.field(f)).collect::<Vec<_>>();
                format!("TypeExpr::object(vec![{}])", fields.join(", "))
            }
            TypeExpr::Opaque { text } => format!("TypeExpr::opaque({})", string_lit(text)),
        }
    }
}
