//! Tests for the `compare` command

mod common;

use common::fixtures::Project;
use common::get_bin;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_compare_json_reports_changed_files() {
    let project = Project::new().unwrap();
    let output = get_bin()
        .args(["compare", "head.json", "base.json", "--json"])
        .current_dir(project.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["oldDownloadSize"], 1050);
    assert_eq!(report["newDownloadSize"], 1370);
    assert_eq!(report["difference"], 320);

    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["name"], "/assets/fonts/a.ttf");
    assert_eq!(files[0]["oldSize"], 200);
    assert_eq!(files[0]["newSize"], 450);
    assert_eq!(files[1]["name"], "/assets/new.bin");
    assert_eq!(files[1]["oldSize"], 0);
}

#[test]
fn test_compare_same_build_has_no_changes() {
    let project = Project::new().unwrap();
    get_bin()
        .args(["compare", "base.json", "base.json"])
        .current_dir(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("No file size changes"));
}

#[test]
fn test_compare_removed_files_are_opt_in() {
    let project = Project::new().unwrap();

    let forward = get_bin()
        .args(["compare", "base.json", "head.json", "--json"])
        .current_dir(project.root())
        .output()
        .unwrap();
    let forward: Value = serde_json::from_slice(&forward.stdout).unwrap();
    assert!(forward["files"]
        .as_array()
        .unwrap()
        .iter()
        .all(|f| f["name"] != "/assets/new.bin"));

    let with_removed = get_bin()
        .args(["compare", "base.json", "head.json", "--json", "--include-removed"])
        .current_dir(project.root())
        .output()
        .unwrap();
    let with_removed: Value = serde_json::from_slice(&with_removed.stdout).unwrap();
    let removed = with_removed["files"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "/assets/new.bin")
        .unwrap()
        .clone();
    assert_eq!(removed["newSize"], 0);
    assert_eq!(removed["difference"], -70);
}

#[test]
fn test_compare_console_output() {
    let project = Project::new().unwrap();
    get_bin()
        .args(["compare", "head.json", "base.json"])
        .current_dir(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Size Comparison"))
        .stdout(predicate::str::contains("CHANGED FILES (2 total)"))
        .stdout(predicate::str::contains("/assets/fonts/a.ttf"));
}

#[test]
fn test_compare_missing_base_fails() {
    let project = Project::new().unwrap();
    get_bin()
        .args(["compare", "head.json", "nope.json"])
        .current_dir(project.root())
        .assert()
        .code(66)
        .stderr(predicate::str::contains("base build"));
}
