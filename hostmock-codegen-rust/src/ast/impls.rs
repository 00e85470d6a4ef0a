//! Rust impl block builder.

use hostmock_codegen::{CodeBuilder, CodeFragment, Renderable};

use super::Fn;

#[derive(Debug, Clone)]
enum Item {
    /// An associated const or type, rendered as written.
    Decl { doc: Option<String>, line: String },
    Method(Fn),
}

/// Builder for Rust impl blocks.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    trait_name: Option<String>,
    items: Vec<Item>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            trait_name: None,
            items: Vec::new(),
        }
    }

    /// Create an impl block for a trait.
    pub fn for_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.trait_name = Some(trait_name.into());
        self
    }

    /// Add an associated item such as `pub const ALL: &[Self] = &[];`.
    pub fn decl(mut self, doc: Option<&str>, line: impl Into<String>) -> Self {
        self.items.push(Item::Decl {
            doc: doc.map(str::to_string),
            line: line.into(),
        });
        self
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.items.push(Item::Method(method));
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }

    fn header(&self) -> String {
        match &self.trait_name {
            Some(trait_name) => format!("impl {} for {} {{", trait_name, self.type_name),
            None => format!("impl {} {{", self.type_name),
        }
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.items.is_empty() {
            return vec![CodeFragment::line(format!("{}}}", self.header()))];
        }

        let mut body = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::Blank);
            }
            match item {
                Item::Decl { doc, line } => {
                    if let Some(doc) = doc {
                        body.push(CodeFragment::doc(doc));
                    }
                    body.push(CodeFragment::line(line));
                }
                Item::Method(method) => body.extend(method.to_fragments()),
            }
        }
        vec![CodeFragment::block(self.header(), body, "}")]
    }
}
