//! Assembles an [`ApiModel`] for one namespace out of parsed items.

use std::collections::HashSet;

use hostmock_ir::{ApiMember, ApiModel, EnumDecl, TypeAlias, TypeDecl, TypeExpr};
use miette::SourceSpan;

use crate::{
    error::{Result, SourceContext},
    parser::Item,
};

pub(crate) fn collect(items: &[Item], namespace: &str, ctx: &SourceContext<'_>) -> Result<ApiModel> {
    let mut collector = Collector {
        ctx,
        target: namespace,
        found: false,
        namespaces: Vec::new(),
        members: Vec::new(),
        types: Vec::new(),
        interfaces: HashSet::new(),
        aliases: Vec::new(),
        enums: Vec::new(),
        type_names: HashSet::new(),
    };
    collector.walk(items, "")?;

    if !collector.found {
        return Err(ctx.missing_namespace(namespace, collector.namespaces));
    }

    let model = ApiModel {
        namespace: namespace.to_string(),
        members: collector.members.into_iter().map(|(m, _)| m).collect(),
        types: collector.types,
        aliases: collector.aliases,
        enums: collector.enums,
    };
    tracing::debug!(
        namespace,
        members = model.members.len(),
        types = model.types.len(),
        aliases = model.aliases.len(),
        enums = model.enums.len(),
        "extracted api model"
    );
    Ok(model)
}

struct Collector<'a> {
    ctx: &'a SourceContext<'a>,
    target: &'a str,
    found: bool,
    /// Qualified namespace names in first-seen order.
    namespaces: Vec<String>,
    members: Vec<(ApiMember, SourceSpan)>,
    types: Vec<TypeDecl>,
    /// TypeDecls that came from an `interface` and may be reopened.
    interfaces: HashSet<String>,
    aliases: Vec<TypeAlias>,
    enums: Vec<EnumDecl>,
    type_names: HashSet<String>,
}

impl Collector<'_> {
    fn walk(&mut self, items: &[Item], path: &str) -> Result<()> {
        for item in items {
            match item {
                Item::Namespace { name, body, .. } => {
                    let qualified = if path.is_empty() {
                        name.clone()
                    } else {
                        format!("{}.{}", path, name)
                    };
                    self.enter_namespace(&qualified);
                    if qualified == self.target {
                        tracing::debug!(namespace = %qualified, "found target namespace block");
                        self.collect_members(body)?;
                    }
                    self.walk(body, &qualified)?;
                }
                Item::Interface(decl) => self.add_interface(decl),
                Item::Class(decl) => self.add_decl(decl.clone()),
                Item::Alias { name, target } => match target {
                    TypeExpr::Object { fields } => {
                        let mut decl = TypeDecl::new(name.clone());
                        decl.fields = fields.clone();
                        self.add_decl(decl);
                    }
                    _ => self.add_alias(TypeAlias::new(name.clone(), target.clone())),
                },
                Item::Enum(decl) => self.add_enum(decl.clone()),
                Item::Function { .. } | Item::Variable { .. } => {}
            }
        }
        Ok(())
    }

    /// Record `qualified` and every dotted prefix of it.
    fn enter_namespace(&mut self, qualified: &str) {
        let mut end = 0;
        for part in qualified.split('.') {
            end += part.len();
            let prefix = &qualified[..end];
            if prefix == self.target {
                self.found = true;
            }
            if !self.namespaces.iter().any(|n| n == prefix) {
                self.namespaces.push(prefix.to_string());
            }
            end += 1;
        }
    }

    fn collect_members(&mut self, body: &[Item]) -> Result<()> {
        for item in body {
            let (member, span) = match item {
                Item::Function { member, span } => (member.clone(), *span),
                Item::Variable {
                    name,
                    span,
                    ty: Some(TypeExpr::Function(func)),
                } => {
                    let member = ApiMember {
                        name: name.clone(),
                        type_params: func.type_params.clone(),
                        params: func.params.clone(),
                        returns: (*func.returns).clone(),
                    };
                    (member, *span)
                }
                _ => continue,
            };

            if let Some((_, first)) = self.members.iter().find(|(m, _)| m.name == member.name) {
                return Err(self.ctx.duplicate_member(&member.name, *first, span));
            }
            self.members.push((member, span));
        }
        Ok(())
    }

    fn add_interface(&mut self, decl: &TypeDecl) {
        if self.interfaces.contains(&decl.name) {
            if let Some(existing) = self.types.iter_mut().find(|t| t.name == decl.name) {
                for base in &decl.extends {
                    if !existing.extends.contains(base) {
                        existing.extends.push(base.clone());
                    }
                }
                for field in &decl.fields {
                    if !existing.fields.iter().any(|f| f.name == field.name) {
                        existing.fields.push(field.clone());
                    }
                }
            }
            return;
        }
        if self.claim(&decl.name) {
            self.interfaces.insert(decl.name.clone());
            self.types.push(decl.clone());
        }
    }

    fn add_decl(&mut self, decl: TypeDecl) {
        if self.claim(&decl.name) {
            self.types.push(decl);
        }
    }

    fn add_alias(&mut self, alias: TypeAlias) {
        if self.claim(&alias.name) {
            self.aliases.push(alias);
        }
    }

    fn add_enum(&mut self, decl: EnumDecl) {
        if self.claim(&decl.name) {
            self.enums.push(decl);
        }
    }

    /// First declaration of a type name wins.
    fn claim(&mut self, name: &str) -> bool {
        if self.type_names.insert(name.to_string()) {
            return true;
        }
        tracing::warn!(name, "ignoring redeclaration of type");
        false
    }
}
