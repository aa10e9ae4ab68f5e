//! Tests for size budget enforcement via `analyze --check`

mod common;

use common::fixtures::Project;
use common::get_bin;
use predicates::prelude::*;

fn analyze_check(project: &Project) -> assert_cmd::assert::Assert {
    get_bin()
        .arg("analyze")
        .arg(project.base_listing())
        .arg("--deps")
        .arg(project.deps())
        .arg("--check")
        .current_dir(project.root())
        .assert()
}

#[test]
fn test_check_within_budget_succeeds() {
    let project = Project::new().unwrap();
    project.with_budget(2).unwrap();

    analyze_check(&project)
        .success()
        .stdout(predicate::str::contains("Size Budget Check"))
        .stdout(predicate::str::contains("App Size Report: demo"));
}

#[test]
fn test_check_over_budget_exits_one() {
    let project = Project::new().unwrap();
    project.with_budget(1).unwrap();

    analyze_check(&project)
        .code(1)
        .stdout(predicate::str::contains("EXCEEDED"))
        .stderr(predicate::str::contains("exceeds maximum (1024 bytes)"))
        .stderr(predicate::str::contains("over budget"));
}

#[test]
fn test_check_uses_ownership_file_from_config() {
    let project = Project::new().unwrap();
    project.with_budget(2).unwrap();

    analyze_check(&project)
        .success()
        .stdout(predicate::str::contains("growth"));
}

#[test]
fn test_check_without_budget_exits_config_error() {
    let project = Project::new().unwrap();

    analyze_check(&project)
        .code(78)
        .stderr(predicate::str::contains("No size budget configured"));
}

#[test]
fn test_invalid_budget_order_fails() {
    let project = Project::new().unwrap();
    project
        .write(
            ".bundle-ruler.toml",
            "[size-budget]\ntarget-size-kb = 10\nmax-size-kb = 5\n",
        )
        .unwrap();

    analyze_check(&project)
        .failure()
        .stderr(predicate::str::contains("Invalid size budget"));
}
