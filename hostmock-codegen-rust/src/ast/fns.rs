//! Rust function builder.

use hostmock_codegen::{CodeBuilder, CodeFragment, Renderable};

/// A parameter in a Rust function.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty.into()),
        }
    }

    /// A receiver such as `self` or `&self`.
    pub fn receiver(receiver: impl Into<String>) -> Self {
        Self {
            name: receiver.into(),
            ty: None,
        }
    }

    fn format(&self) -> String {
        match &self.ty {
            Some(ty) => format!("{}: {}", self.name, ty),
            None => self.name.clone(),
        }
    }
}

/// Builder for Rust functions.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    is_public: bool,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<CodeFragment>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            is_public: true,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Add a node to the function body.
    pub fn body(mut self, node: impl Renderable) -> Self {
        self.body.extend(node.to_fragments());
        self
    }

    fn signature(&self) -> String {
        let vis = if self.is_public { "pub " } else { "" };
        let params = self
            .params
            .iter()
            .map(Param::format)
            .collect::<Vec<_>>()
            .join(", ");
        match &self.return_type {
            Some(ret) => format!("{}fn {}({}) -> {}", vis, self.name, params, ret),
            None => format!("{}fn {}({})", vis, self.name, params),
        }
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        if self.body.is_empty() {
            fragments.push(CodeFragment::line(format!("{} {{}}", self.signature())));
        } else {
            fragments.push(CodeFragment::block(
                format!("{} {{", self.signature()),
                self.body.clone(),
                "}",
            ));
        }
        fragments
    }
}

/// One arm of a [`Match`].
#[derive(Debug, Clone)]
pub struct Arm {
    pattern: String,
    expr: String,
}

impl Arm {
    pub fn new(pattern: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            expr: expr.into(),
        }
    }
}

/// A `match` expression with single-expression arms.
#[derive(Debug, Clone)]
pub struct Match {
    scrutinee: String,
    arms: Vec<Arm>,
}

impl Match {
    pub fn new(scrutinee: impl Into<String>) -> Self {
        Self {
            scrutinee: scrutinee.into(),
            arms: Vec::new(),
        }
    }

    pub fn arm(mut self, arm: Arm) -> Self {
        self.arms.push(arm);
        self
    }

    pub fn arms(mut self, arms: impl IntoIterator<Item = Arm>) -> Self {
        self.arms.extend(arms);
        self
    }
}

impl Renderable for Match {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let header = format!("match {} {{", self.scrutinee);
        // an empty match on an uninhabited type is still valid Rust
        if self.arms.is_empty() {
            return vec![CodeFragment::line(format!("{}}}", header))];
        }
        let arms = self
            .arms
            .iter()
            .map(|arm| CodeFragment::line(format!("{} => {},", arm.pattern, arm.expr)))
            .collect();
        vec![CodeFragment::block(header, arms, "}")]
    }
}
