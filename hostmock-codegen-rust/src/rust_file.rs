//! RustFile abstraction for structured Rust file generation.
//!
//! A file is a header comment, inner attributes, grouped `use` statements,
//! and body items separated by blank lines.

use hostmock_codegen::{CodeBuilder, CodeFragment, ImportCollector, Renderable};

/// Raw code lines emitted as-is.
#[derive(Debug, Clone)]
pub struct RawCode {
    lines: Vec<String>,
}

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            lines: code.into().lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.lines.iter().map(CodeFragment::line).collect()
    }
}

/// A structured representation of a Rust file.
///
/// ```
/// use hostmock_codegen::ImportCollector;
/// use hostmock_codegen_rust::{RawCode, RustFile};
///
/// let mut imports = ImportCollector::new();
/// imports.add("std::sync", "LazyLock");
///
/// let file = RustFile::new()
///     .header("// header")
///     .inner_attr("allow(dead_code)")
///     .imports(imports)
///     .add(RawCode::new("pub const NAMESPACE: &str = \"mod\";"))
///     .render();
///
/// assert_eq!(
///     file,
///     "// header\n\n#![allow(dead_code)]\n\nuse std::sync::LazyLock;\n\npub const NAMESPACE: &str = \"mod\";\n"
/// );
/// ```
#[derive(Default)]
pub struct RustFile {
    header: Vec<String>,
    inner_attrs: Vec<String>,
    imports: ImportCollector,
    body: Vec<Vec<CodeFragment>>,
}

impl RustFile {
    /// Create a new empty RustFile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header line (written verbatim, before everything else).
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    /// Add an inner attribute such as `allow(dead_code)`.
    pub fn inner_attr(mut self, attr: impl Into<String>) -> Self {
        self.inner_attrs.push(attr.into());
        self
    }

    /// Use these imports.
    pub fn imports(mut self, imports: ImportCollector) -> Self {
        self.imports = imports;
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add multiple body elements.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// Render the file with Rust indentation (4 spaces).
    pub fn render(&self) -> String {
        let mut sections: Vec<Vec<CodeFragment>> = Vec::new();

        if !self.header.is_empty() {
            sections.push(self.header.iter().map(CodeFragment::line).collect());
        }
        if !self.inner_attrs.is_empty() {
            sections.push(
                self.inner_attrs
                    .iter()
                    .map(|attr| CodeFragment::line(format!("#![{}]", attr)))
                    .collect(),
            );
        }
        if !self.imports.is_empty() {
            sections.push(self.use_lines());
        }
        sections.extend(self.body.iter().cloned());

        let mut builder = CodeBuilder::rust();
        for (i, fragments) in sections.into_iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment);
            }
        }
        builder.build()
    }

    fn use_lines(&self) -> Vec<CodeFragment> {
        self.imports
            .iter()
            .map(|(module, symbols)| {
                let symbols = symbols.iter().map(String::as_str).collect::<Vec<_>>();
                let line = match symbols.as_slice() {
                    [] => format!("use {};", module),
                    [one] => format!("use {}::{};", module, one),
                    many => format!("use {}::{{{}}};", module, many.join(", ")),
                };
                CodeFragment::line(line)
            })
            .collect()
    }

    /// Check if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
            && self.inner_attrs.is_empty()
            && self.imports.is_empty()
            && self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Struct;

    #[test]
    fn test_empty_file() {
        let file = RustFile::new();
        assert!(file.is_empty());
        assert_eq!(file.render(), "");
    }

    #[test]
    fn test_grouped_uses_and_body() {
        let mut imports = ImportCollector::new();
        imports.add("std::sync", "LazyLock");
        imports.add("hostmock_runtime", "Value");
        imports.add("hostmock_runtime", "ApiObject");

        let code = RustFile::new()
            .imports(imports)
            .add(Struct::new("ModMock").field("ApiObject"))
            .add(RawCode::lines(["pub fn a() {}", "pub fn b() {}"]))
            .render();

        insta::assert_snapshot!(code, @r"
        use std::sync::LazyLock;
        use hostmock_runtime::{ApiObject, Value};

        pub struct ModMock(ApiObject);

        pub fn a() {}
        pub fn b() {}
        ");
    }

    #[test]
    fn test_header_lines_stay_together() {
        let code = RustFile::new()
            .header("// one")
            .header("// two")
            .inner_attr("allow(dead_code)")
            .inner_attr("allow(unused_imports)")
            .render();
        assert_eq!(
            code,
            "// one\n// two\n\n#![allow(dead_code)]\n#![allow(unused_imports)]\n"
        );
    }
}
