//! Builder for Rust method chains (`ApiModel::new("mod").member(..)`).

use hostmock_codegen::{CodeBuilder, CodeFragment, Renderable};

#[derive(Debug, Clone)]
enum Arg {
    Inline(String),
    Chain(MethodChain),
}

impl Arg {
    fn inline(&self) -> String {
        match self {
            Self::Inline(s) => s.clone(),
            Self::Chain(chain) => chain.build_inline(),
        }
    }
}

/// A method call in a chain.
#[derive(Debug, Clone)]
struct MethodCall {
    name: String,
    args: Vec<Arg>,
}

impl MethodCall {
    fn inline(&self) -> String {
        let args = self.args.iter().map(Arg::inline).collect::<Vec<_>>();
        format!(".{}({})", self.name, args.join(", "))
    }

    /// A call whose only argument is a chain with calls of its own is
    /// rendered as an indented block.
    fn nested(&self) -> Option<&MethodChain> {
        match self.args.as_slice() {
            [Arg::Chain(chain)] if chain.has_calls() => Some(chain),
            _ => None,
        }
    }
}

/// Builder for fluent method chains.
///
/// Rendered as a fragment, every call sits on its own line below the base
/// expression; a call taking another chain opens a nested block.
#[derive(Debug, Clone)]
pub struct MethodChain {
    base: String,
    calls: Vec<MethodCall>,
}

impl MethodChain {
    /// Create a new method chain starting from a base expression.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            calls: Vec::new(),
        }
    }

    /// Add a method call with no arguments.
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.calls.push(MethodCall {
            name: name.into(),
            args: Vec::new(),
        });
        self
    }

    /// Add a method call with a single argument.
    pub fn method_arg(mut self, name: impl Into<String>, arg: impl Into<String>) -> Self {
        self.calls.push(MethodCall {
            name: name.into(),
            args: vec![Arg::Inline(arg.into())],
        });
        self
    }

    /// Add a method call whose argument is itself a chain.
    pub fn method_chain(mut self, name: impl Into<String>, chain: MethodChain) -> Self {
        self.calls.push(MethodCall {
            name: name.into(),
            args: vec![Arg::Chain(chain)],
        });
        self
    }

    /// Conditionally add a method call if the condition is true.
    pub fn method_if(self, condition: bool, name: impl Into<String>) -> Self {
        if condition { self.method(name) } else { self }
    }

    /// Conditionally add a method call if the option is Some.
    pub fn method_arg_opt(self, name: impl Into<String>, value: Option<String>) -> Self {
        match value {
            Some(v) => self.method_arg(name, v),
            None => self,
        }
    }

    /// Check if the chain has any method calls.
    pub fn has_calls(&self) -> bool {
        !self.calls.is_empty()
    }

    /// Build the method chain as a single-line string.
    pub fn build_inline(&self) -> String {
        let mut result = self.base.clone();
        for call in &self.calls {
            result.push_str(&call.inline());
        }
        result
    }

    /// Build the method chain with each call on a new line.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for MethodChain {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let calls = self
            .calls
            .iter()
            .map(|call| match call.nested() {
                Some(chain) => {
                    CodeFragment::block(format!(".{}(", call.name), chain.to_fragments(), ")")
                }
                None => CodeFragment::line(call.inline()),
            })
            .collect::<Vec<_>>();

        let mut fragments = vec![CodeFragment::line(&self.base)];
        if !calls.is_empty() {
            fragments.push(CodeFragment::indent(calls));
        }
        fragments
    }
}
