//! Code builder utility for generating properly indented code.

use super::{CodeFragment, Indent, Renderable};

/// Fluent API for building code with proper indentation.
///
/// Consuming methods (returning `Self`) chain; `push_*` methods (returning
/// `&mut Self`) work through a mutable borrow.
///
/// ```
/// use hostmock_codegen::CodeBuilder;
///
/// let code = CodeBuilder::rust()
///     .line("fn main() {")
///     .indent()
///     .line("println!(\"Hello, world!\");")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "fn main() {\n    println!(\"Hello, world!\");\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// 4-space indentation with `///` docs.
    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    // =========================================================================
    // Mutable API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            return self.push_blank();
        }
        self.indent.write(&mut self.buffer, self.indent_level);
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no trailing whitespace).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a doc comment, one `///` line per line of `text`.
    pub fn push_doc(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            if line.is_empty() {
                self.push_line("///");
            } else {
                self.push_line(&format!("/// {}", line));
            }
        }
        self
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &(impl Renderable + ?Sized)) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Doc(text) => {
                self.push_doc(&text);
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                self.push_line(&close);
            }
            CodeFragment::Indent(fragments) => {
                self.push_indent();
                for f in fragments {
                    self.apply_fragment(f);
                }
                self.push_dedent();
            }
        }
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::rust()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_has_no_indent() {
        let code = CodeBuilder::rust().indent().line("a").line("").line("b").build();
        assert_eq!(code, "    a\n\n    b\n");
    }

    #[test]
    fn test_multiline_doc() {
        let mut builder = CodeBuilder::rust().indent();
        builder.push_doc("First line.\n\nSecond line.");
        let code = builder.build();

        assert_eq!(code, "    /// First line.\n    ///\n    /// Second line.\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let code = CodeBuilder::rust().dedent().line("a").build();
        assert_eq!(code, "a\n");
    }

    #[test]
    fn test_emit_nested_fragments() {
        struct Node;
        impl Renderable for Node {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![
                    CodeFragment::doc("Entry point."),
                    CodeFragment::block(
                        "fn main() {",
                        vec![
                            CodeFragment::line("let greeting = \"Hello\";"),
                            CodeFragment::Blank,
                            CodeFragment::line("println!(\"{greeting}\");"),
                        ],
                        "}",
                    ),
                    CodeFragment::indent(vec![CodeFragment::line(".call()")]),
                ]
            }
        }

        let mut builder = CodeBuilder::rust();
        builder.emit(&Node);
        assert_eq!(
            builder.build(),
            "/// Entry point.\nfn main() {\n    let greeting = \"Hello\";\n\n    println!(\"{greeting}\");\n}\n    .call()\n"
        );
    }
}
