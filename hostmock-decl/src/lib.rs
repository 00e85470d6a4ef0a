// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod collect;
mod error;
mod lexer;
mod parser;

use std::path::Path;

pub use error::{Error, Result};
use error::SourceContext;
use hostmock_ir::ApiModel;

/// Read a declaration file and extract the API surface of `namespace`.
pub fn extract_file(path: impl AsRef<Path>, namespace: &str) -> Result<ApiModel> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    let filename = path.display().to_string();
    extract_with_filename(&content, &filename, namespace)
}

/// Extract from a string (uses "index.d.ts" as the filename in diagnostics)
pub fn extract(source: &str, namespace: &str) -> Result<ApiModel> {
    extract_with_filename(source, "index.d.ts", namespace)
}

/// Extract from a string with a custom filename for error reporting
pub fn extract_with_filename(source: &str, filename: &str, namespace: &str) -> Result<ApiModel> {
    let ctx = SourceContext::new(source, filename);
    let tokens = lexer::tokenize(source).map_err(|e| ctx.parse_error(e.message, e.span))?;
    let items = parser::Parser::new(source, &tokens)
        .parse_file()
        .map_err(|e| ctx.parse_error(e.message, e.span))?;
    collect::collect(&items, namespace, &ctx)
}
