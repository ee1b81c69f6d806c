//! Integration tests for the `gemlock` binary
//!
//! Runs the built binary against temporary projects and checks exit codes,
//! stdout and the resulting lock file.

mod common;

use common::{TestProject, SAMPLE_LOCKFILE, UNSORTED_LOCKFILE};

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_check_accepts_valid_lockfile() {
    let project = TestProject::with_lockfile(SAMPLE_LOCKFILE);
    let output = project.run(&["check"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("is valid (4 specs from 3 sources, 3 dependencies)"));
}

#[test]
fn test_check_reports_conflict_marker_position() {
    let project = TestProject::with_lockfile("PLATFORMS\n  ruby\n=======\n");
    let output = project.run(&["check"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Gemfile.lock:3:0"), "stderr: {}", stderr(&output));
}

#[test]
fn test_check_json_summary() {
    let project = TestProject::with_lockfile(SAMPLE_LOCKFILE);
    let output = project.run(&["check", "--json"]);
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["valid"], true);
    assert_eq!(summary["specs"], 4);
    assert_eq!(summary["platforms"], 1);
}

#[test]
fn test_check_uses_gemfile_flag() {
    let project = TestProject::new();
    project.create_file("app/gems.rb", "");
    project.create_file("app/gems.rb.lock", SAMPLE_LOCKFILE);

    let output = project.run(&["--gemfile", "app/gems.rb", "check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("gems.rb.lock"));
}

#[test]
fn test_show_json_lists_sources_and_dependencies() {
    let project = TestProject::with_lockfile(SAMPLE_LOCKFILE);
    let output = project.run(&["show", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let lock: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(lock["sources"].as_array().unwrap().len(), 3);
    assert_eq!(lock["sources"][0]["source"]["type"], "path");
    assert_eq!(lock["sources"][1]["source"]["type"], "git");
    assert_eq!(lock["platforms"][0], "ruby");
    assert_eq!(lock["dependencies"][0]["name"], "foo");
}

#[test]
fn test_show_marks_pinned_dependencies() {
    let project = TestProject::with_lockfile(SAMPLE_LOCKFILE);
    let output = project.run(&["show"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("  rails (= 3.0.0)!\n"));
    assert!(text.contains("  rake (~> 0.8)\n"));
}

#[test]
fn test_show_resolves_path_sources_against_lock_directory() {
    let project = TestProject::new();
    project.create_file("app/Gemfile", "");
    project.create_file("app/Gemfile.lock", SAMPLE_LOCKFILE);

    let output = project.run(&["--gemfile", "app/Gemfile", "show"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("  directory: app/vendor/foo\n"));
}

#[test]
fn test_check_accepts_bundler_trailer_sections() {
    let lockfile = format!("{SAMPLE_LOCKFILE}\nRUBY VERSION\n   ruby 3.2.2p53\n\nBUNDLED WITH\n   2.4.10\n");
    let project = TestProject::with_lockfile(&lockfile);
    let output = project.run(&["check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_tokens_prints_positions() {
    let project = TestProject::with_lockfile("DEPENDENCIES\n  rake (~> 10.0)\n");
    let output = project.run(&["tokens"]);
    assert!(output.status.success());

    let lines: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(lines[0], "1:0 section \"DEPENDENCIES\"");
    assert!(lines.contains(&"2:2 text \"rake\"".to_string()));
    assert!(lines.contains(&"2:8 requirement \"~>\"".to_string()));
}

#[test]
fn test_tokens_of_missing_lockfile_is_empty() {
    let project = TestProject::new();
    let output = project.run(&["tokens"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_fmt_check_detects_non_canonical_file() {
    let project = TestProject::with_lockfile(UNSORTED_LOCKFILE);
    let output = project.run(&["fmt", "--check"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("not in canonical form"));
    assert_eq!(project.read_file("Gemfile.lock"), UNSORTED_LOCKFILE);
}

#[test]
fn test_fmt_rewrites_lockfile() {
    let project = TestProject::with_lockfile(UNSORTED_LOCKFILE);
    let output = project.run(&["fmt"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(project.read_file("Gemfile.lock"), SAMPLE_LOCKFILE);

    let output = project.run(&["fmt", "--check"]);
    assert!(output.status.success());
}

#[test]
fn test_fmt_without_lockfile_fails() {
    let project = TestProject::new();
    let output = project.run(&["fmt"]);
    assert!(!output.status.success());
    assert!(!project.file_exists("Gemfile.lock"));
}
