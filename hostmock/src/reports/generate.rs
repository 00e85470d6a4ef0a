//! Generate command report.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from module generation.
#[derive(Debug)]
pub struct GenerateReport {
    pub namespace: String,
    pub member_count: usize,
    /// Declared types, aliases and enums.
    pub type_count: usize,
    pub result: GenerationResult,
}

/// Result of module generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// The module was persisted; `changed` is false when identical content
    /// was already there.
    Written { path: PathBuf, changed: bool },
    /// Dry-run: the module text.
    Preview(String),
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            // stdout carries only the module so it can be redirected
            GenerationResult::Preview(code) => out.preformatted(code),
            GenerationResult::Written { path, changed } => {
                out.key_value("Namespace", &self.namespace);
                out.key_value("Members", &self.member_count.to_string());
                out.key_value("Types", &self.type_count.to_string());
                let path = path.display().to_string();
                if *changed {
                    out.added_item(&path);
                } else {
                    out.list_item(&format!("{} (unchanged)", path));
                }
            }
        }
    }
}
