mod common;

use common::{CommandOutput, TestContext};

#[test]
fn test_help_and_version() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd()
        .arg("--help")
        .output()
        .expect("Failed to run aiupdate")
        .into();

    output
        .assert_success()
        .assert_stdout_contains("Update all AI coding tools in parallel")
        .assert_stdout_contains("Usage: aiupdate")
        .assert_stdout_contains("--probe-timeout");

    let output: CommandOutput = ctx
        .cmd()
        .arg("--version")
        .output()
        .expect("Failed to run aiupdate")
        .into();

    output.assert_success().assert_stdout_contains("aiupdate");
}

#[test]
fn test_list_registry() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd()
        .arg("--list")
        .output()
        .expect("Failed to run aiupdate")
        .into();

    output
        .assert_success()
        .assert_stdout_contains("codex")
        .assert_stdout_contains("npm update -g @openai/codex")
        .assert_stdout_contains("brew upgrade crush")
        .assert_stdout_contains(".claude/local");
}

#[test]
fn test_list_selected_tools() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd()
        .args(["--list", "crush"])
        .output()
        .expect("Failed to run aiupdate")
        .into();

    output.assert_success().assert_stdout_contains("crush");
    assert!(!output.stdout.contains("codex"));
}

#[test]
fn test_unknown_tool_is_rejected() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd()
        .args(["--list", "nosuchtool"])
        .output()
        .expect("Failed to run aiupdate")
        .into();

    output
        .assert_failure()
        .assert_stderr_contains("unknown tool 'nosuchtool'")
        .assert_stderr_contains("codex, gemini, crush, claude");
}

#[test]
fn test_failed_update_exits_zero_by_default() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd_without_tools()
        .arg("crush")
        .output()
        .expect("Failed to run aiupdate")
        .into();

    output
        .assert_success()
        .assert_stdout_contains("Updating AI tools...")
        .assert_stdout_contains("0 succeeded, 1 failed.")
        .assert_stdout_contains("crush failed");
    assert_eq!(output.stdout.matches("╭─").count(), 1);
}

#[test]
fn test_strict_exits_nonzero_on_failure() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd_without_tools()
        .args(["--strict", "crush"])
        .output()
        .expect("Failed to run aiupdate")
        .into();

    output
        .assert_failure()
        .assert_stdout_contains("0 succeeded, 1 failed.");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_json_report_from_binary() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd_without_tools()
        .args(["--json", "crush", "codex"])
        .output()
        .expect("Failed to run aiupdate")
        .into();

    output.assert_success();
    let value: serde_json::Value =
        serde_json::from_str(&output.stdout).expect("Output was not valid JSON");
    let entries = value.as_array().expect("JSON array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["tool"], "codex");
    assert_eq!(entries[1]["tool"], "crush");
    assert!(entries
        .iter()
        .all(|e| e["success"] == false && e["exit_code"] == 1));
}
