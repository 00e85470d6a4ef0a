//! End-to-end emission tests: declaration text in, module text out.

use hostmock_codegen_rust::{EmitOptions, Generator, generate_module};
use hostmock_core::WriteResult;
use hostmock_ir::{ApiMember, ApiModel, TypeExpr};
use tempfile::TempDir;

const MOD_API: &str = r#"
declare namespace mod {
    /** Returns the object id. */
    function GetObjId(): number;
    function DisplayMessage(message: string, players?: Player[]): void;

    interface Player {
        name: string;
        team?: Team;
    }

    enum Team { Team1 = 1, Team2 = 2 }
}
"#;

/// The module the runtime crate's integration tests compile and drive.
const MOD_API_MODULE: &str = include_str!("../../hostmock-runtime/tests/support/mod_api.rs");

fn render(source: &str) -> String {
    generate_module(source, "index.d.ts", "mod", EmitOptions::default()).unwrap()
}

#[test]
fn test_module_matches_compiled_fixture() {
    assert_eq!(render(MOD_API), MOD_API_MODULE);
}

#[test]
fn test_generation_is_deterministic() {
    assert_eq!(render(MOD_API), render(MOD_API));
}

#[test]
fn test_source_label_in_header() {
    let code = generate_module(
        MOD_API,
        "index.d.ts",
        "mod",
        EmitOptions::default().source("types/index.d.ts"),
    )
    .unwrap();

    let mut lines = code.lines();
    assert_eq!(
        lines.next(),
        Some("// @generated by hostmock. Do not edit by hand.")
    );
    assert_eq!(
        lines.next(),
        Some("// Source: types/index.d.ts (namespace `mod`)")
    );
}

#[test]
fn test_custom_runtime_path() {
    let code = generate_module(
        MOD_API,
        "index.d.ts",
        "mod",
        EmitOptions::default().runtime_crate("crate::support::rt"),
    )
    .unwrap();

    assert!(code.contains("use crate::support::rt::{ApiContext, "));
    assert!(code.contains("    crate::support::rt::create_fake(model(), type_name.as_ref(), overrides)\n"));
    assert!(!code.contains("hostmock_runtime"));
}

#[test]
fn test_invalid_runtime_path_is_rejected() {
    let err = generate_module(
        MOD_API,
        "index.d.ts",
        "mod",
        EmitOptions::default().runtime_crate("hostmock-runtime"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("not a valid Rust path"));
}

#[test]
fn test_missing_namespace_propagates() {
    let err = generate_module(MOD_API, "index.d.ts", "other", EmitOptions::default()).unwrap_err();

    let decl = err
        .downcast_ref::<Box<hostmock_decl::Error>>()
        .expect("extractor error should propagate unchanged");
    assert!(decl.is_missing_namespace());
}

#[test]
fn test_parse_error_propagates() {
    let err = generate_module("declare namespace mod {", "index.d.ts", "mod", EmitOptions::default())
        .unwrap_err();
    let decl = err.downcast_ref::<Box<hostmock_decl::Error>>().unwrap();
    assert!(decl.is_parse());
}

#[test]
fn test_empty_namespace() {
    let code = render("declare namespace mod {}");

    assert!(code.contains("pub enum ModMember {}\n"));
    assert!(code.contains("pub enum ModType {}\n"));
    assert!(code.contains("    pub const ALL: &'static [Self] = &[];\n"));
    assert!(code.contains("        match self {}\n"));
    assert!(code.contains("pub fn api_model() -> ApiModel {\n    ApiModel::new(\"mod\")\n}\n"));
}

#[test]
fn test_keyword_types_import_keyword() {
    let code = render("declare namespace mod { function Log(...items: any[]): void; }");

    assert!(code.contains("Keyword, "));
    assert!(code.contains(
        ".param(Param::new(\"items\", TypeExpr::array(TypeExpr::keyword(Keyword::Any))).rest())"
    ));
    assert!(code.contains("    /// `Log(...items: any[]): void`\n    Log,\n"));
    assert!(code.contains("    pub fn log(&self) -> Option<&MockFn> {\n"));
}

#[test]
fn test_names_are_sanitized() {
    let code = render(
        "declare namespace mod { function type(): void; function get_obj(): void; function mock(): void; }",
    );

    assert!(code.contains("    Type,\n    GetObj,\n    Mock,\n"));
    assert!(code.contains("pub fn type_(&self)"));
    assert!(code.contains("pub fn get_obj(&self)"));
    assert!(code.contains("pub fn mock_(&self)"));
    assert!(code.contains("Self::Type => \"type\","));
}

#[test]
fn test_identifier_collision_fails() {
    let model = ApiModel::new("mod")
        .member(ApiMember::new("getObj").returns(TypeExpr::number()))
        .member(ApiMember::new("GetObj"));

    let err = Generator::new(&model).render().unwrap_err();
    assert!(err.to_string().contains("'getObj' and 'GetObj'"));
}

#[test]
fn test_dotted_namespace_prefix() {
    let code = generate_module(
        "declare namespace game.server { function Tick(): void; }",
        "index.d.ts",
        "game.server",
        EmitOptions::default(),
    )
    .unwrap();

    assert!(code.contains("pub const NAMESPACE: &str = \"game.server\";"));
    assert!(code.contains("pub enum GameServerMember {"));
    assert!(code.contains("pub fn setup_game_server_mock(ctx: &ApiContext, members: &[GameServerMember],"));
    assert!(code.contains("pub fn setup_all_game_server_mock("));
}

#[test]
fn test_generate_writes_once() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("test-support").join("hostmock_generated.rs");
    let model = hostmock_decl::extract(MOD_API, "mod").unwrap();
    let generator = Generator::new(&model);

    assert_eq!(generator.generate(&out).unwrap(), WriteResult::Written);
    assert_eq!(generator.generate(&out).unwrap(), WriteResult::Unchanged);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), MOD_API_MODULE);
}

#[test]
fn test_failed_render_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out.rs");
    let model = ApiModel::new("mod")
        .member(ApiMember::new("a_b"))
        .member(ApiMember::new("aB"));

    assert!(Generator::new(&model).generate(&out).is_err());
    assert!(!out.exists());
}
