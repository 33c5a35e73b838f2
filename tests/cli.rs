//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

fn run_planboard(root: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_planboard");
    Command::new(bin)
        .args(args)
        .arg("--root")
        .arg(root)
        .env_remove("PLANBOARD_RECORD")
        .env_remove("PLANBOARD_REPLAY")
        .env_remove("PLANBOARD_ROOT")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run planboard binary")
}

/// Fresh project directory containing the given files.
fn project(name: &str, files: &[(&str, &str)]) -> PathBuf {
    let root = std::env::temp_dir().join(format!("planboard_cli_{name}"));
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&root).unwrap();
    for (path, contents) in files {
        let path = root.join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }
    root
}

const CHECKBOX_PLAN: &str = "\
# Test Implementation Plan

### Phase 0: Critical Fixes (1 day)
- [ ] Fix constructor argument order

### Phase 1: Core Tests
- [ ] Add EquatableArray tests
- [ ] Add model record equality tests
";

const HEADING_PLAN: &str = "\
# Development Plan

## Phase 0: Critical

### TASK-001: Fix constructor argument order
**Priority**: P0
**Estimated**: 2-4 hours

## Phase 1: Core

### TASK-002: Add equality tests
**Priority**: P1
**Dependencies**: TASK-001

### TASK-003: Write usage guide
**Dependencies**: TASK-002
";

#[test]
fn status_shows_the_board() {
    let root = project(
        "status",
        &[
            ("TEST_IMPLEMENTATION_PLAN.md", CHECKBOX_PLAN),
            ("SESSION_NOTES.md", "TASK-001 completed\n"),
        ],
    );
    let output = run_planboard(&root, &["status"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Total Tasks: 3 | Completed: 1 | Pending: 2"));
    assert!(stdout.contains("1. [P1] TASK-002: Add EquatableArray tests"));
    assert!(stdout.contains("2. [P1] TASK-003: Add model record equality tests"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn status_prints_each_extraction_warning_once() {
    let plan = "### Phase 0: Fixes\n- [ ] Fix a\n- [ ]\n";
    let root = project("warnings_once", &[("TEST_IMPLEMENTATION_PLAN.md", plan)]);
    let output = run_planboard(&root, &["status"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stdout.matches("checkbox item has no description").count(), 1);
    assert!(stdout.contains("line 3: checkbox item has no description; skipped"));
    assert!(!stderr.contains("checkbox item has no description"));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn next_waits_for_earlier_phase() {
    let root = project("next_phase", &[("TEST_IMPLEMENTATION_PLAN.md", CHECKBOX_PLAN)]);
    let output = run_planboard(&root, &["next"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.starts_with("Next task: TASK-001 - Fix constructor argument order"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn artifacts_from_config_mark_tasks_complete() {
    let root = project(
        "artifacts",
        &[
            ("DEVELOPMENT-PLAN.md", HEADING_PLAN),
            ("planboard.toml", "[artifacts]\n\"TASK-001\" = \"test/ArgumentOrderTests.cs\"\n"),
            ("test/ArgumentOrderTests.cs", "// tests\n"),
        ],
    );
    let output = run_planboard(&root, &["next"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.starts_with("Next task: TASK-002 - Add equality tests"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn tasks_filters_by_phase() {
    let root = project("tasks", &[("DEVELOPMENT-PLAN.md", HEADING_PLAN)]);
    let output = run_planboard(&root, &["tasks", "--phase", "1"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("TASK-002"));
    assert!(stdout.contains("TASK-003"));
    assert!(!stdout.contains("TASK-001"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn deps_lists_prerequisites() {
    let root = project("deps", &[("DEVELOPMENT-PLAN.md", HEADING_PLAN)]);
    let output = run_planboard(&root, &["deps"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("TASK-003 <- TASK-002 [explicit]"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn export_writes_json_snapshot() {
    let root = project("export", &[("DEVELOPMENT-PLAN.md", HEADING_PLAN)]);
    let output = run_planboard(&root, &["export", "--format", "json"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["plan"]["dialect"], "heading");
    assert_eq!(value["records"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["next"], "TASK-001");
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn explicit_plan_and_dialect_override_candidates() {
    let root = project("explicit_plan", &[("docs/roadmap.md", CHECKBOX_PLAN)]);
    let output =
        run_planboard(&root, &["next", "--plan", "docs/roadmap.md", "--dialect", "checkbox"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("TASK-001"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_plan_fails_with_searched_paths() {
    let root = project("missing_plan", &[]);
    let output = run_planboard(&root, &["status"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("No planning document found"));
    assert!(stderr.contains("TEST_IMPLEMENTATION_PLAN.md"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn invalid_config_fails() {
    let root = project(
        "invalid_config",
        &[("DEVELOPMENT-PLAN.md", HEADING_PLAN), ("planboard.toml", "[completion\n")],
    );
    let output = run_planboard(&root, &["status"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Invalid config"));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn unknown_subcommand_fails() {
    let root = project("unknown", &[]);
    let output = run_planboard(&root, &["nonsense"]);
    assert!(!output.status.success());
    let _ = std::fs::remove_dir_all(&root);
}
