use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for declaration scanning (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> SourceContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    pub fn parse_error(&self, message: impl Into<String>, span: SourceSpan) -> Box<Error> {
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn missing_namespace(
        &self,
        namespace: impl Into<String>,
        available: Vec<String>,
    ) -> Box<Error> {
        let available = if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        };
        Box::new(Error::MissingNamespace {
            src: self.named_source(),
            namespace: namespace.into(),
            available,
        })
    }

    pub fn duplicate_member(
        &self,
        name: impl Into<String>,
        first_span: SourceSpan,
        second_span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::DuplicateMember {
            src: self.named_source(),
            first_span,
            second_span,
            name: name.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(hostmock::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse declarations: {message}")]
    #[diagnostic(code(hostmock::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("namespace '{namespace}' is not declared")]
    #[diagnostic(
        code(hostmock::missing_namespace),
        help("declared namespaces: {available}; pass one of them with --namespace")
    )]
    MissingNamespace {
        #[source_code]
        src: NamedSource<String>,
        namespace: String,
        available: String,
    },

    #[error("function '{name}' is declared more than once")]
    #[diagnostic(
        code(hostmock::duplicate_member),
        help("overloads cannot be mocked separately; merge them into one signature")
    )]
    DuplicateMember {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        name: String,
    },
}

impl Error {
    /// Returns true for syntax errors.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns true when the requested namespace was not found.
    pub fn is_missing_namespace(&self) -> bool {
        matches!(self, Self::MissingNamespace { .. })
    }
}
