//! Rust struct builder.

use hostmock_codegen::{CodeBuilder, CodeFragment, Renderable};

/// Builder for tuple structs (`pub struct ModMock(ApiObject);`).
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    fields: Vec<String>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    /// Add a positional field; it stays private to the generated module.
    pub fn field(mut self, ty: impl Into<String>) -> Self {
        self.fields.push(ty.into());
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        if !self.derives.is_empty() {
            fragments.push(CodeFragment::line(format!(
                "#[derive({})]",
                self.derives.join(", ")
            )));
        }
        let line = if self.fields.is_empty() {
            format!("pub struct {};", self.name)
        } else {
            format!("pub struct {}({});", self.name, self.fields.join(", "))
        };
        fragments.push(CodeFragment::line(line));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newtype() {
        let code = Struct::new("ModMock")
            .doc("Installed stand-in.")
            .derive("Debug")
            .derive("Clone")
            .field("ApiObject")
            .build();
        assert_eq!(
            code,
            "/// Installed stand-in.\n#[derive(Debug)]\n#[derive(Clone)]\npub struct ModMock(ApiObject);\n"
        );
    }

    #[test]
    fn test_unit_struct() {
        assert_eq!(Struct::new("Marker").build(), "pub struct Marker;\n");
    }
}
