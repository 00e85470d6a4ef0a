//! Runs the `hostmock` binary end to end.

use std::{
    path::Path,
    process::{Command, Output},
};

use tempfile::TempDir;

const INDEX_D_TS: &str = r#"
declare namespace mod {
    function GetObjId(): number;
    interface Player {}
}
"#;

fn hostmock(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hostmock"))
        .current_dir(dir)
        .env_remove("HOSTMOCK_LOG")
        .env("NO_COLOR", "1")
        .args(args)
        .output()
        .expect("run hostmock")
}

fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("index.d.ts"), INDEX_D_TS).unwrap();
    temp
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_generate_writes_default_out() {
    let temp = workspace();
    let output = hostmock(temp.path(), &["generate", "--sdk", "index.d.ts"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let module = temp.path().join("test-support/hostmock_generated.rs");
    let code = std::fs::read_to_string(module).unwrap();
    assert!(code.starts_with("// @generated by hostmock. Do not edit by hand.\n"));
    assert!(code.contains("pub fn setup_mod_mock("));
    assert!(stdout(&output).contains("Members: 1"));
}

#[test]
fn test_generate_without_sdk_exits_1_with_usage() {
    let temp = TempDir::new().unwrap();
    let output = hostmock(temp.path(), &["generate"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("--sdk"));
    assert!(err.contains("Usage:"));
}

#[test]
fn test_missing_namespace_writes_no_file() {
    let temp = workspace();
    let output = hostmock(
        temp.path(),
        &["generate", "--sdk", "index.d.ts", "--namespace", "other", "--out", "out.rs"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("namespace 'other' is not declared"));
    assert!(!temp.path().join("out.rs").exists());
}

#[test]
fn test_missing_sdk_file_fails() {
    let temp = TempDir::new().unwrap();
    let output = hostmock(temp.path(), &["generate", "--sdk", "nope.d.ts"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to read 'nope.d.ts'"));
}

#[test]
fn test_dry_run_prints_module_only() {
    let temp = workspace();
    let output = hostmock(temp.path(), &["generate", "--sdk", "index.d.ts", "--dry-run"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("// @generated by hostmock."));
    assert!(out.contains("// Source: index.d.ts (namespace `mod`)"));
    assert!(!temp.path().join("test-support").exists());
}

#[test]
fn test_config_file_supplies_settings() {
    let temp = workspace();
    std::fs::write(
        temp.path().join("hostmock.toml"),
        "[generate]\nsdk = \"index.d.ts\"\nout = \"support/api.rs\"\nruntime_crate = \"crate::rt\"\n",
    )
    .unwrap();

    let output = hostmock(temp.path(), &["generate"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let code = std::fs::read_to_string(temp.path().join("support/api.rs")).unwrap();
    assert!(code.contains("use crate::rt::{"));
}

#[test]
fn test_flags_override_config() {
    let temp = workspace();
    std::fs::write(
        temp.path().join("hostmock.toml"),
        "[generate]\nsdk = \"index.d.ts\"\nnamespace = \"other\"\n",
    )
    .unwrap();

    let output = hostmock(temp.path(), &["generate", "--namespace", "mod", "--dry-run"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("pub enum ModMember {"));
}

#[test]
fn test_unrecognized_flag_warns_and_continues() {
    let temp = workspace();
    let output = hostmock(
        temp.path(),
        &["generate", "--sdk", "index.d.ts", "--watch", "--dry-run"],
    );

    assert!(output.status.success());
    assert!(stderr(&output).contains("warning: ignoring unrecognized flag '--watch'"));
    assert!(stdout(&output).contains("pub enum ModMember {"));
}

#[test]
fn test_unrecognized_flag_with_value_warns_and_continues() {
    let temp = workspace();
    let output = hostmock(
        temp.path(),
        &["generate", "--sdk", "index.d.ts", "--mode", "fast", "--dry-run"],
    );

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("warning: ignoring unrecognized flag '--mode'"));
    assert!(err.contains("warning: ignoring value 'fast' of unrecognized flag '--mode'"));
    assert!(stdout(&output).contains("pub enum ModMember {"));
}

#[test]
fn test_help_version_and_bare_invocation_exit_0() {
    let temp = TempDir::new().unwrap();

    for args in [&["--help"][..], &["-h"], &[]] {
        let output = hostmock(temp.path(), args);
        assert_eq!(output.status.code(), Some(0), "args: {:?}", args);
        assert!(stdout(&output).contains("Usage:"), "args: {:?}", args);
    }

    let output = hostmock(temp.path(), &["--version"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("hostmock "));
}

#[test]
fn test_unknown_subcommand_exits_1() {
    let temp = TempDir::new().unwrap();
    let output = hostmock(temp.path(), &["frobnicate"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage:"));
}
