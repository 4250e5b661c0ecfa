//! Flag-level tests for the `ghp` binary.
//!
//! Every case here fails before a request is sent, so no server or token
//! is needed.

use assert_cmd::Command;
use predicates::prelude::*;

fn ghp() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ghp"));
    cmd.env_remove("GH_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .env("GH_HOST", "github.com");
    cmd
}

#[test]
fn test_should_list_subcommands_in_help() {
    ghp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("field"))
        .stdout(predicate::str::contains("item"));
}

#[test]
fn test_should_require_an_owner_flag() {
    ghp()
        .args(["create", "--title", "a title"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "one of --user, --org or --me is required",
        ))
        .stderr(predicate::str::contains("--help"));
}

#[test]
fn test_should_reject_two_owner_flags() {
    ghp()
        .args(["list", "--user", "monalisa", "--me"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "one of --user, --org or --me is required",
        ));
}

#[test]
fn test_should_reject_edit_without_fields() {
    ghp()
        .args(["edit", "1", "--me"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no fields to edit"));
}

#[test]
fn test_should_accept_update_alias() {
    ghp()
        .args(["update", "1", "--org", "github"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no fields to edit"));
}

#[test]
fn test_should_reject_csv_format() {
    ghp()
        .args(["list", "--me", "--format", "csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'csv'"));
}

#[test]
fn test_should_reject_project_number_zero() {
    ghp()
        .args(["view", "0", "--me"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid project number: 0"));
}

#[test]
fn test_should_require_options_for_single_select_field() {
    ghp()
        .args([
            "field",
            "create",
            "1",
            "--org",
            "github",
            "--name",
            "Status",
            "--data-type",
            "SINGLE_SELECT",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "passing --single-select-options is required for SINGLE_SELECT data type",
        ));
}

#[test]
fn test_should_reject_draft_edit_of_non_draft_id() {
    ghp()
        .args(["item", "edit", "--id", "PVTI_1", "--title", "t"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "ID must be the ID of the draft issue content which is prefixed with DI_",
        ))
        .stderr(predicate::str::contains("--help").not());
}

#[test]
fn test_should_reject_malformed_date() {
    ghp()
        .args([
            "item",
            "edit",
            "--id",
            "PVTI_1",
            "--project-id",
            "PVT_1",
            "--field-id",
            "F_1",
            "--date",
            "tomorrow",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "invalid date \"tomorrow\": expected YYYY-MM-DD",
        ));
}
