//! Generate operation: render a model into a module and persist it.

use std::path::Path;

use eyre::{Context, Result};
use hostmock_codegen_rust::{EmitOptions, Generator};
use hostmock_core::WriteResult;
use hostmock_ir::ApiModel;

use crate::reports::{GenerateReport, GenerationResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Declaration file the model came from.
    pub sdk: &'a Path,
    /// Where the module is written.
    pub out: &'a Path,
    /// Rust path of the runtime crate.
    pub runtime_crate: &'a str,
    /// Whether to return the module instead of writing it.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Rendering happens entirely in memory; the output file is only touched
/// once the whole module is ready.
pub fn generate(model: &ApiModel, opts: GenerateOptions) -> Result<GenerateReport> {
    let emit = EmitOptions::default()
        .runtime_crate(opts.runtime_crate)
        .source(opts.sdk.display().to_string());
    let generator = Generator::new(model).with_options(emit);

    let result = if opts.dry_run {
        GenerationResult::Preview(generator.render().wrap_err("failed to generate module")?)
    } else {
        let written = generator
            .generate(opts.out)
            .wrap_err("failed to generate module")?;
        GenerationResult::Written {
            path: opts.out.to_path_buf(),
            changed: written == WriteResult::Written,
        }
    };

    tracing::info!(namespace = %model.namespace, "generation finished");
    Ok(GenerateReport {
        namespace: model.namespace.clone(),
        member_count: model.members.len(),
        type_count: model.type_names().count(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use hostmock_ir::{ApiMember, TypeDecl, TypeExpr};
    use tempfile::TempDir;

    use super::*;

    fn model() -> ApiModel {
        ApiModel::new("mod")
            .member(ApiMember::new("GetObjId").returns(TypeExpr::number()))
            .type_decl(TypeDecl::new("Player"))
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.rs");
        let report = generate(
            &model(),
            GenerateOptions {
                sdk: Path::new("index.d.ts"),
                out: &out,
                runtime_crate: "hostmock_runtime",
                dry_run: true,
            },
        )
        .unwrap();

        let GenerationResult::Preview(code) = report.result else {
            panic!("expected a preview");
        };
        assert!(code.contains("// Source: index.d.ts (namespace `mod`)"));
        assert!(!out.exists());
    }

    #[test]
    fn test_writes_module() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("test-support").join("hostmock_generated.rs");
        let opts = || GenerateOptions {
            sdk: Path::new("index.d.ts"),
            out: &out,
            runtime_crate: "hostmock_runtime",
            dry_run: false,
        };

        let report = generate(&model(), opts()).unwrap();
        assert_eq!(report.member_count, 1);
        assert_eq!(report.type_count, 1);
        assert!(matches!(report.result, GenerationResult::Written { changed: true, .. }));
        assert!(std::fs::read_to_string(&out).unwrap().contains("pub enum ModMember {"));

        let again = generate(&model(), opts()).unwrap();
        assert!(matches!(again.result, GenerationResult::Written { changed: false, .. }));
    }

    #[test]
    fn test_bad_runtime_path_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.rs");
        let result = generate(
            &model(),
            GenerateOptions {
                sdk: Path::new("index.d.ts"),
                out: &out,
                runtime_crate: "not a path",
                dry_run: false,
            },
        );
        assert!(result.is_err());
        assert!(!out.exists());
    }
}
