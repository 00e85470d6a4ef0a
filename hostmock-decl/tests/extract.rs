//! Integration tests for declaration extraction.

use hostmock_decl::{extract, extract_file};
use hostmock_ir::{Literal, TypeDef, TypeExpr};
use tempfile::TempDir;

const PORTAL: &str = r#"
/// <reference path="./types.d.ts" />

declare namespace mod {
    /** Returns the object id. */
    function GetObjId(obj: Object): number;
    function DisplayMessage(message: string, players?: Player[], ...rest: any[]): void;
    const GetTeam: (player: Player) => Team;
    const MAX_PLAYERS: number;

    interface Player {
        name: string;
        team?: Team;
        isAlive(): boolean;
    }

    enum Team { Team1 = 1, Team2 = 2 }
}
"#;

#[test]
fn test_extracts_functions_in_source_order() {
    let model = extract(PORTAL, "mod").unwrap();

    assert_eq!(model.namespace, "mod");
    let names: Vec<_> = model.member_names().collect();
    assert_eq!(names, ["GetObjId", "DisplayMessage", "GetTeam"]);
}

#[test]
fn test_signatures_are_mirrored_exactly() {
    let model = extract(PORTAL, "mod").unwrap();

    let display = model.get_member("DisplayMessage").unwrap();
    assert_eq!(
        display.to_string(),
        "DisplayMessage(message: string, players?: Player[], ...rest: any[]): void"
    );
    assert_eq!(display.required_arity(), 1);

    let team = model.get_member("GetTeam").unwrap();
    assert_eq!(team.to_string(), "GetTeam(player: Player): Team");
}

#[test]
fn test_mixed_union_and_intersection_keep_written_form() {
    let model = extract(
        "declare namespace mod { function Spawn(at: Pos & Named | null, tags: (A | B)[]): void; }",
        "mod",
    )
    .unwrap();

    assert_eq!(
        model.get_member("Spawn").unwrap().to_string(),
        "Spawn(at: Pos & Named | null, tags: (A | B)[]): void"
    );
}

#[test]
fn test_generic_arrow_typed_value_is_a_member() {
    let model = extract(
        "declare namespace mod { const Pick: <T>(xs: T[]) => T; function Plain(): void; }",
        "mod",
    )
    .unwrap();

    let names: Vec<_> = model.member_names().collect();
    assert_eq!(names, ["Pick", "Plain"]);

    let pick = model.get_member("Pick").unwrap();
    assert_eq!(pick.type_params.len(), 1);
    assert_eq!(pick.type_params[0].name, "T");
    assert_eq!(pick.to_string(), "Pick<T>(xs: T[]): T");
    assert_eq!(pick.required_arity(), 1);
}

#[test]
fn test_non_function_values_are_skipped() {
    let model = extract(PORTAL, "mod").unwrap();
    assert!(model.get_member("MAX_PLAYERS").is_none());
}

#[test]
fn test_types_and_enums() {
    let model = extract(PORTAL, "mod").unwrap();

    let player = model.get_type("mod.Player").unwrap();
    let required: Vec<_> = player.required_fields().map(|f| f.name.as_str()).collect();
    assert_eq!(required, ["name", "isAlive"]);

    let Some(TypeDef::Enum(team)) = model.resolve("Team") else {
        panic!("Team should resolve to an enum");
    };
    assert_eq!(team.variants[0].value, Some(Literal::Number("1".into())));
}

#[test]
fn test_minimal_scenario() {
    let src = "declare namespace mod { function GetObjId(): number; interface Player {} }";
    let model = extract(src, "mod").unwrap();

    assert_eq!(model.members.len(), 1);
    assert_eq!(model.members[0].returns, TypeExpr::number());
    assert!(model.get_type("Player").unwrap().fields.is_empty());
}

#[test]
fn test_missing_namespace_lists_available() {
    let err = extract(PORTAL, "other").unwrap_err();

    assert!(err.is_missing_namespace());
    let hostmock_decl::Error::MissingNamespace { available, .. } = *err else {
        panic!("expected MissingNamespace");
    };
    assert_eq!(available, "mod");
}

#[test]
fn test_missing_namespace_in_file_without_namespaces() {
    let err = extract("interface A {}", "mod").unwrap_err();
    let hostmock_decl::Error::MissingNamespace { available, .. } = *err else {
        panic!("expected MissingNamespace");
    };
    assert_eq!(available, "none");
}

#[test]
fn test_duplicate_member_is_an_error() {
    let src = "declare namespace mod { function f(): void; function f(x: number): void; }";
    let err = extract(src, "mod").unwrap_err();

    let hostmock_decl::Error::DuplicateMember {
        name,
        first_span,
        second_span,
        ..
    } = *err
    else {
        panic!("expected DuplicateMember");
    };
    assert_eq!(name, "f");
    assert!(first_span.offset() < second_span.offset());
}

#[test]
fn test_repeated_namespace_blocks_merge() {
    let src = r#"
        declare namespace mod { function A(): void; }
        declare namespace other { function B(): void; }
        declare namespace mod { function C(): void; }
    "#;
    let model = extract(src, "mod").unwrap();
    let names: Vec<_> = model.member_names().collect();
    assert_eq!(names, ["A", "C"]);
}

#[test]
fn test_nested_dotted_and_global_namespaces() {
    let src = r#"
        declare namespace outer.inner { function Deep(): void; }
        declare namespace outer { namespace side { function Side(): void; } }
        declare global { namespace portal { function Global(): string; } }
        declare module "host" { function Quoted(): void; }
    "#;

    assert_eq!(
        extract(src, "outer.inner").unwrap().member_names().collect::<Vec<_>>(),
        ["Deep"]
    );
    assert_eq!(
        extract(src, "outer.side").unwrap().member_names().collect::<Vec<_>>(),
        ["Side"]
    );
    assert_eq!(
        extract(src, "portal").unwrap().member_names().collect::<Vec<_>>(),
        ["Global"]
    );
    assert_eq!(
        extract(src, "host").unwrap().member_names().collect::<Vec<_>>(),
        ["Quoted"]
    );
    // a prefix of a dotted name is itself a namespace, just an empty one
    assert!(extract(src, "outer").unwrap().members.is_empty());
}

#[test]
fn test_interfaces_merge_and_other_redeclarations_are_ignored() {
    let src = r#"
        interface Vec3 { x: number; }
        interface Vec3 extends Base { y: number; x: number; }
        type Vec3 = string;
        type Id = number;
        type Point = { x: number; y?: number };
        declare class Vehicle { speed: number; static make(): Vehicle; }
        declare namespace mod { function f(): void; }
    "#;
    let model = extract(src, "mod").unwrap();

    let vec3 = model.get_type("Vec3").unwrap();
    let fields: Vec<_> = vec3.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, ["x", "y"]);
    assert_eq!(vec3.extends, [TypeExpr::named("Base")]);

    assert!(model.aliases.iter().all(|a| a.name != "Vec3"));
    assert_eq!(model.aliases.len(), 1);
    assert_eq!(model.aliases[0].target, TypeExpr::number());

    let point = model.get_type("Point").unwrap();
    assert_eq!(point.required_fields().count(), 1);

    let vehicle = model.get_type("Vehicle").unwrap();
    assert_eq!(vehicle.fields.len(), 1);
}

#[test]
fn test_module_syntax_is_skipped() {
    let src = r#"
        import type { Thing } from "./thing";
        export = mod;
        export as namespace Portal;
        export default mod;
        export declare namespace mod {
            export function f(t: Thing): void;
        }
    "#;
    let model = extract(src, "mod").unwrap();
    assert_eq!(model.members.len(), 1);
}

#[test]
fn test_extraction_is_deterministic() {
    let first = extract(PORTAL, "mod").unwrap();
    let second = extract(PORTAL, "mod").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parse_errors_carry_a_span() {
    let err = extract("declare namespace mod { function f(: void }", "mod").unwrap_err();
    assert!(err.is_parse());
    let hostmock_decl::Error::Parse { span, message, .. } = *err else {
        panic!("expected Parse");
    };
    assert!(message.starts_with("expected an identifier"));
    assert_eq!(span.offset(), 35);
}

#[test]
fn test_unterminated_string_is_a_parse_error() {
    let err = extract("declare namespace mod { type A = 'oops }", "mod").unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_unterminated_block_is_a_parse_error() {
    let err = extract("declare namespace mod { function f(): void;", "mod").unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_extract_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("index.d.ts");
    std::fs::write(&path, PORTAL).unwrap();

    let model = extract_file(&path, "mod").unwrap();
    assert_eq!(model.members.len(), 3);
}

#[test]
fn test_extract_file_missing() {
    let temp = TempDir::new().unwrap();
    let err = extract_file(temp.path().join("nope.d.ts"), "mod").unwrap_err();
    assert!(matches!(*err, hostmock_decl::Error::Io { .. }));
}
