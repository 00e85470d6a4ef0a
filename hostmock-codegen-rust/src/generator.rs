use std::path::Path;

use eyre::{Result, bail};
use hostmock_codegen::{ImportCollector, Renderable};
use hostmock_core::{File, GENERATED_HEADER, WriteResult};
use hostmock_ir::ApiModel;

use crate::{
    Arm, Enum, Fn, Impl, Match, Param, RawCode, RustFile, Struct, Variant,
    literal::{ModelLiteral, string_lit},
    naming::{Ident, Naming},
};

/// Runtime crate path used when none is configured.
pub const DEFAULT_RUNTIME_CRATE: &str = "hostmock_runtime";

/// Options that shape the emitted module.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Path the generated module uses to reach the runtime crate.
    pub runtime_crate: String,
    /// Declaration file label shown in the module header.
    pub source: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            source: None,
        }
    }
}

impl EmitOptions {
    pub fn runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    pub fn source(mut self, label: impl Into<String>) -> Self {
        self.source = Some(label.into());
        self
    }
}

/// Renders an [`ApiModel`] into a Rust test-support module.
pub struct Generator<'a> {
    model: &'a ApiModel,
    options: EmitOptions,
}

impl<'a> Generator<'a> {
    pub fn new(model: &'a ApiModel) -> Self {
        Self {
            model,
            options: EmitOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EmitOptions) -> Self {
        self.options = options;
        self
    }

    /// Render the module text.
    ///
    /// Fails without producing any text when a declared name cannot become
    /// a unique Rust identifier.
    pub fn render(&self) -> Result<String> {
        let rt = self.options.runtime_crate.as_str();
        if !is_valid_path(rt) {
            bail!("'{}' is not a valid Rust path for the runtime crate", rt);
        }

        let naming = Naming::plan(self.model)?;
        let mut literal = ModelLiteral::new();
        let model_chain = literal.model(self.model);

        let mut imports = ImportCollector::new();
        imports.add("std::sync", "LazyLock");
        imports.add_all(
            rt,
            [
                "ApiContext",
                "ApiMember",
                "ApiModel",
                "ApiObject",
                "FakeBuilder",
                "Impls",
                "MockFn",
                "RuntimeError",
                "Value",
                "setup_global",
            ],
        );
        imports.add_all(rt, literal.symbols());

        let header_source = match &self.options.source {
            Some(source) => format!("// Source: {} (namespace `{}`)", source, self.model.namespace),
            None => format!("// Namespace: `{}`", self.model.namespace),
        };

        let members = self.member_enum(&naming);
        let types = self.type_enum(&naming);
        let code = RustFile::new()
            .header(GENERATED_HEADER)
            .header(header_source)
            .inner_attr("allow(dead_code, unused_imports)")
            .imports(imports)
            .add(RawCode::lines([
                "/// Binding the host installs this API under.".to_string(),
                format!(
                    "pub const NAMESPACE: &str = {};",
                    string_lit(&self.model.namespace)
                ),
            ]))
            .add(RawCode::new(
                "static API_MODEL: LazyLock<ApiModel> = LazyLock::new(api_model);",
            ))
            .add_all(members)
            .add_all(types)
            .add(
                Fn::new("model")
                    .doc("The scanned API, built once.")
                    .returns("&'static ApiModel")
                    .body_line("&API_MODEL"),
            )
            .add(
                Fn::new("api_model")
                    .doc("Rebuild the scanned API model.")
                    .returns("ApiModel")
                    .body(model_chain),
            )
            .add_all(self.mock_view(&naming))
            .add_all(self.setup_fns(&naming, rt))
            .render();

        tracing::debug!(
            namespace = %self.model.namespace,
            members = naming.members.len(),
            types = naming.types.len(),
            bytes = code.len(),
            "module rendered"
        );
        Ok(code)
    }

    /// Render and write the module to `path`; nothing is written if
    /// rendering fails.
    pub fn generate(&self, path: &Path) -> Result<WriteResult> {
        let code = self.render()?;
        File::new(path, code).write()
    }

    fn member_enum(&self, naming: &Naming) -> Vec<Box<dyn Renderable>> {
        let name = naming.member_enum();
        let mut decl = Enum::new(&name)
            .doc(format!("Callable members of `{}`.", self.model.namespace))
            .derives(["Debug", "Clone", "Copy", "PartialEq", "Eq", "Hash"]);
        for (ident, member) in naming.members.iter().zip(&self.model.members) {
            decl = decl.variant(Variant::new(&ident.variant).doc(format!("`{}`", member)));
        }

        let index_arms = naming
            .members
            .iter()
            .enumerate()
            .map(|(i, ident)| Arm::new(format!("Self::{}", ident.variant), i.to_string()));

        let methods = enum_methods(&name, &naming.members, "Every member, in declaration order.")
            .method(
                Fn::new("signature")
                    .doc("Signature exactly as declared.")
                    .param(Param::receiver("self"))
                    .returns("&'static ApiMember")
                    .body_line("&model().members[self.index()]"),
            )
            .method(
                Fn::new("index")
                    .private()
                    .param(Param::receiver("self"))
                    .returns("usize")
                    .body(Match::new("self").arms(index_arms)),
            );

        vec![
            Box::new(decl) as Box<dyn Renderable>,
            Box::new(methods),
            Box::new(as_ref_impl(&name)),
        ]
    }

    fn type_enum(&self, naming: &Naming) -> Vec<Box<dyn Renderable>> {
        let name = naming.type_enum();
        let mut decl = Enum::new(&name)
            .doc("Declared value types, usable as `create_fake` names.")
            .derives(["Debug", "Clone", "Copy", "PartialEq", "Eq", "Hash"]);
        for ident in &naming.types {
            decl = decl.variant(Variant::new(&ident.variant));
        }

        vec![
            Box::new(decl) as Box<dyn Renderable>,
            Box::new(enum_methods(&name, &naming.types, "Every declared type.")),
            Box::new(as_ref_impl(&name)),
        ]
    }

    fn mock_view(&self, naming: &Naming) -> Vec<Box<dyn Renderable>> {
        let name = naming.mock_struct();
        let member = naming.member_enum();

        let view = Struct::new(&name)
            .doc(format!(
                "`{}` as installed by [`{}`].",
                self.model.namespace,
                naming.setup_fn()
            ))
            .derive("Debug, Clone")
            .field("ApiObject");

        let mut methods = Impl::new(&name)
            .method(
                Fn::new("mock")
                    .doc("Recording stand-in for `member`, if it was selected.")
                    .param(Param::receiver("&self"))
                    .param(Param::new("member", &member))
                    .returns("Option<&MockFn>")
                    .body_line("self.0.mock(member.name())"),
            )
            .method(
                Fn::new("call")
                    .param(Param::receiver("&self"))
                    .param(Param::new("member", &member))
                    .param(Param::new("args", "&[Value]"))
                    .returns("Result<Value, RuntimeError>")
                    .body_line("self.0.call(member.name(), args)"),
            )
            .method(
                Fn::new("object")
                    .param(Param::receiver("&self"))
                    .returns("&ApiObject")
                    .body_line("&self.0"),
            )
            .method(
                Fn::new("into_inner")
                    .param(Param::receiver("self"))
                    .returns("ApiObject")
                    .body_line("self.0"),
            );
        for (ident, decl) in naming.members.iter().zip(&self.model.members) {
            methods = methods.method(
                Fn::new(&ident.accessor)
                    .doc(format!("`{}`", decl))
                    .param(Param::receiver("&self"))
                    .returns("Option<&MockFn>")
                    .body_line(format!("self.mock({}::{})", member, ident.variant)),
            );
        }

        let deref = Impl::new(&name)
            .for_trait("std::ops::Deref")
            .decl(None, "type Target = ApiObject;")
            .method(
                Fn::new("deref")
                    .private()
                    .param(Param::receiver("&self"))
                    .returns("&ApiObject")
                    .body_line("&self.0"),
            );

        vec![
            Box::new(view) as Box<dyn Renderable>,
            Box::new(methods),
            Box::new(deref),
        ]
    }

    fn setup_fns(&self, naming: &Naming, rt: &str) -> Vec<Fn> {
        let view = naming.mock_struct();
        let member = naming.member_enum();
        vec![
            Fn::new(naming.setup_fn())
                .doc(format!(
                    "Mock `members` of `{}`, layer them over `extra` and install the result\n\
                     in `ctx`, replacing any previous binding.",
                    self.model.namespace
                ))
                .param(Param::new("ctx", "&ApiContext"))
                .param(Param::new("members", format!("&[{}]", member)))
                .param(Param::new("impls", "&Impls"))
                .param(Param::new("extra", "Option<ApiObject>"))
                .returns(&view)
                .body_line(format!(
                    "{}(setup_global(ctx, NAMESPACE, members.iter().map(|m| m.name()), impls, extra))",
                    view
                )),
            Fn::new(naming.setup_all_fn())
                .doc("Like the selective setup, with every member mocked.")
                .param(Param::new("ctx", "&ApiContext"))
                .param(Param::new("impls", "&Impls"))
                .param(Param::new("extra", "Option<ApiObject>"))
                .returns(&view)
                .body_line(format!(
                    "{}(ctx, {}::ALL, impls, extra)",
                    naming.setup_fn(),
                    member
                )),
            Fn::new("create_fake")
                .doc("Minimal instance of a declared type with `overrides` on top.")
                .param(Param::new("type_name", "impl AsRef<str>"))
                .param(Param::new("overrides", "Option<Value>"))
                .returns("Value")
                .body_line(format!(
                    "{}::create_fake(model(), type_name.as_ref(), overrides)",
                    rt
                )),
            Fn::new("fake_builder")
                .doc("Fake builder over this model, for replacing default rules.")
                .returns("FakeBuilder<'static>")
                .body_line("FakeBuilder::new(model())"),
        ]
    }
}

/// `ALL` and `name()` shared by the member and type enums.
fn enum_methods(name: &str, idents: &[Ident], all_doc: &str) -> Impl {
    let all = idents
        .iter()
        .map(|i| format!("Self::{}", i.variant))
        .collect::<Vec<_>>()
        .join(", ");
    let name_arms = idents
        .iter()
        .map(|i| Arm::new(format!("Self::{}", i.variant), string_lit(&i.name)));

    Impl::new(name)
        .decl(Some(all_doc), format!("pub const ALL: &'static [Self] = &[{}];", all))
        .method(
            Fn::new("name")
                .doc("Name as declared.")
                .param(Param::receiver("self"))
                .returns("&'static str")
                .body(Match::new("self").arms(name_arms)),
        )
}

fn as_ref_impl(name: &str) -> Impl {
    Impl::new(name).for_trait("AsRef<str>").method(
        Fn::new("as_ref")
            .private()
            .param(Param::receiver("&self"))
            .returns("&str")
            .body_line("self.name()"),
    )
}

/// Whether `path` looks like `a::b::c` (optionally with a leading `::`).
fn is_valid_path(path: &str) -> bool {
    let path = path.strip_prefix("::").unwrap_or(path);
    !path.is_empty()
        && path.split("::").all(|seg| {
            let mut chars = seg.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Pipeline helper: extract `namespace` from declaration `source` and render
/// the module. Extraction errors propagate unchanged.
pub fn generate_module(
    source: &str,
    filename: &str,
    namespace: &str,
    options: EmitOptions,
) -> Result<String> {
    let model = hostmock_decl::extract_with_filename(source, filename, namespace)?;
    Generator::new(&model).with_options(options).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_paths() {
        assert!(is_valid_path("hostmock_runtime"));
        assert!(is_valid_path("crate::support::rt"));
        assert!(is_valid_path("::hostmock_runtime"));
        assert!(!is_valid_path(""));
        assert!(!is_valid_path("hostmock-runtime"));
        assert!(!is_valid_path("a::"));
        assert!(!is_valid_path("1rt"));
    }

    #[test]
    fn test_options_builder() {
        let options = EmitOptions::default().runtime_crate("rt").source("types/index.d.ts");
        assert_eq!(options.runtime_crate, "rt");
        assert_eq!(options.source.as_deref(), Some("types/index.d.ts"));
        assert_eq!(EmitOptions::default().runtime_crate, DEFAULT_RUNTIME_CRATE);
    }
}
