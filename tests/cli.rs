//! Integration tests for top-level CLI behavior.
//!
//! Every test here runs the real binary with a scrubbed environment, so no
//! test depends on the developer's sign-in state or API keys, and none
//! reaches the network.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Builds a command for the binary with all ambient configuration removed.
///
/// Tests opt back in to exactly the variables they need. The working
/// directory moves to the system temp dir so a developer's `.env` file is
/// never picked up.
fn flowscribe(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_flowscribe"));
    cmd.args(args)
        .current_dir(std::env::temp_dir())
        .env_remove("FLOWSCRIBE_USER")
        .env_remove("FLOWSCRIBE_EMAIL")
        .env_remove("FLOWSCRIBE_DATA_DIR")
        .env_remove("FLOWSCRIBE_SHARE_BASE_URL")
        .env_remove("GEMINI_API_KEY")
        .env_remove("GITHUB_TOKEN");
    cmd
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn temp_store(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn help_prints_usage_on_stdout() {
    let output = flowscribe(&["--help"]).output().expect("failed to run flowscribe binary");
    let stdout = stdout_of(&output);
    assert!(output.status.success());
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("import"));
    assert!(stdout.contains("history"));
    assert!(stdout.contains("share"));
    assert!(stdout.contains("shared"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = flowscribe(&["nonsense"]).output().expect("failed to run flowscribe binary");
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("unrecognized subcommand"));
}

#[test]
fn import_requires_sign_in() {
    let output = flowscribe(&["import", "https://github.com/acme/app"])
        .output()
        .expect("failed to run flowscribe binary");
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Please sign in to use flowchart history"));
}

#[test]
fn history_requires_sign_in() {
    let output = flowscribe(&["history"]).output().expect("failed to run flowscribe binary");
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Please sign in to use flowchart history"));
}

#[test]
fn share_requires_sign_in() {
    let output =
        flowscribe(&["share", "some-id"]).output().expect("failed to run flowscribe binary");
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Please sign in to use flowchart history"));
}

#[test]
fn import_rejects_an_invalid_url_before_any_network_call() {
    let output = flowscribe(&["import", "github.com/acme/app"])
        .env("FLOWSCRIBE_USER", "itest-user")
        .output()
        .expect("failed to run flowscribe binary");
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Invalid repository URL: github.com/acme/app"));
}

#[test]
fn history_on_a_fresh_store_prints_the_empty_hint() {
    let dir = temp_store("flowscribe_itest_history_empty");

    let output = flowscribe(&["history"])
        .env("FLOWSCRIBE_USER", "itest-user")
        .env("FLOWSCRIBE_DATA_DIR", &dir)
        .output()
        .expect("failed to run flowscribe binary");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("No saved analyses yet."));

    // Cleanup
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn viewing_an_unknown_share_fails_cleanly() {
    let dir = temp_store("flowscribe_itest_shared_unknown");

    let output = flowscribe(&["shared", "no-such-share"])
        .env("FLOWSCRIBE_DATA_DIR", &dir)
        .output()
        .expect("failed to run flowscribe binary");
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Shared analysis not found"));

    // Cleanup
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn sharing_an_unknown_analysis_fails_cleanly() {
    let dir = temp_store("flowscribe_itest_share_unknown");

    let output = flowscribe(&["share", "no-such-id"])
        .env("FLOWSCRIBE_USER", "itest-user")
        .env("FLOWSCRIBE_DATA_DIR", &dir)
        .output()
        .expect("failed to run flowscribe binary");
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("No analysis with id no-such-id in your history"));

    // Cleanup
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn analyze_without_an_api_key_names_the_missing_variable() {
    let dir = temp_store("flowscribe_itest_analyze_nokey");
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let file = dir.join("snippet.py");
    std::fs::write(&file, "print('hi')\n").expect("write snippet");

    let output = flowscribe(&["analyze", "--file", file.to_str().expect("utf-8 path")])
        .output()
        .expect("failed to run flowscribe binary");
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Model invocation failed"));
    assert!(stderr.contains("GEMINI_API_KEY environment variable not set"));

    // Cleanup
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn analyze_with_no_input_reports_nothing_to_do() {
    let output = flowscribe(&["analyze"]).output().expect("failed to run flowscribe binary");
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("No code to analyze"));
}
