//! End-to-end tests of the `example` binary.
//!
//! These run the compiled program and check exit codes and streams, so they
//! cover the wiring in `main.rs` that the in-process tests cannot.

use assert_cmd::Command;
use predicates::prelude::*;

fn example() -> Command {
    Command::cargo_bin("example").expect("binary is built")
}

#[test]
fn version_prints_package_version() {
    example()
        .arg("version")
        .assert()
        .success()
        .stdout(format!("v{}\n", env!("CARGO_PKG_VERSION")))
        .stderr("");
}

#[test]
fn no_arguments_print_usage() {
    example()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("  build     compile packages and dependencies"))
        .stdout(predicate::str::contains(
            "Use 'example help <command>' for more details on a command.",
        ));
}

#[test]
fn build_success() {
    example()
        .args(["build", "--out", "app", "./cmd"])
        .assert()
        .success()
        .stdout("Build successful. package=<./cmd> out=<app>\n");
}

#[test]
fn build_missing_flag_exits_2() {
    example()
        .arg("build")
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::starts_with("ERROR: required flag --out is not set"))
        .stderr(predicate::str::contains("Run 'example help build' for usage."));
}

#[test]
fn mod_edit_exclusive_flags_exit_2() {
    example()
        .args(["mod", "edit", "--json", "--print"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("mutually exclusive"))
        .stderr(predicate::str::contains("Run 'example mod help edit' for usage."));
}

#[test]
fn unknown_command_exit_2() {
    example()
        .arg("launch")
        .assert()
        .code(2)
        .stderr("ERROR: unknown command (launch)\nRun 'example help' for usage.\n");
}

#[test]
fn unknown_help_topic_exit_2() {
    example()
        .args(["help", "launch"])
        .assert()
        .code(2)
        .stdout("")
        .stderr("example help launch: unknown help topic. Run 'example help'.\n");
}

#[test]
fn debug_logging_goes_to_stderr_only() {
    example()
        .arg("version")
        .env("CMDTREE_LOG", "debug")
        .assert()
        .success()
        .stdout(format!("v{}\n", env!("CARGO_PKG_VERSION")))
        .stderr(predicate::str::contains("resolved subcommand"));
}
