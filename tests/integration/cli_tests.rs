//! CLI integration tests
//!
//! These tests verify that the CLI works correctly with various options.

use assert_cmd::Command;
use git2::Repository;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "Resources/Resource-en-GB.json",
        r#"[
            {"Type": "Nav", "Name": "Home"},
            {"Type": "Nav", "Name": "About"},
            {"Type": "Cart", "Name": "AddItem"}
        ]"#,
    );
    write(root, "Views/Home/Index.cshtml", "<h1>@NavResourceDictionary.Home</h1>");
    write(root, "Scripts/cart.js", "label('Cart', 'AddItem');");
    dir
}

fn commit_all(root: &Path) {
    let repo = Repository::init(root).unwrap();
    let sig = git2::Signature::now("Test", "test@test.com").unwrap();
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
        .unwrap();
}

fn cli() -> Command {
    Command::cargo_bin("deadresources").unwrap()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deadresources"))
        .stdout(predicate::str::contains("--resources"))
        .stdout(predicate::str::contains("--workers"));
}

#[test]
fn test_cli_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deadresources"));
}

// ============================================================================
// Analysis Tests
// ============================================================================

#[test]
fn test_cli_writes_text_report() {
    let project = project();
    let root = project.path();
    let output = root.join("unused.csv");

    cli()
        .arg(root)
        .arg("--resources")
        .arg(root.join("Resources/Resource-en-GB.json"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 unused resources"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "Nav, About\n");
}

#[test]
fn test_cli_json_report() {
    let project = project();
    let root = project.path();
    let output = root.join("unused.json");

    cli()
        .arg(root)
        .args(["--format", "json", "--quiet", "--workers", "2"])
        .arg("--resources")
        .arg(root.join("Resources/Resource-en-GB.json"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["unused_count"], 1);
    assert_eq!(json["unused"][0]["type"], "Nav");
    assert_eq!(json["unused"][0]["name"], "About");
}

#[test]
fn test_cli_reads_project_config() {
    let project = project();
    let root = project.path();
    write(
        root,
        ".deadresources.yml",
        "resources: Resources/Resource-en-GB.json\nworkers: 3\n",
    );
    let output = root.join("from-config.csv");

    cli()
        .arg(root)
        .arg("--output")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "Nav, About\n");
}

#[test]
fn test_cli_explicit_config_paths_resolve_against_project() {
    let project = project();
    let root = project.path();
    write(
        root,
        "settings/scan.yml",
        "resources: Resources/Resource-en-GB.json\n",
    );
    let output = root.join("explicit.csv");

    cli()
        .arg(root)
        .arg("--config")
        .arg(root.join("settings/scan.yml"))
        .arg("--output")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "Nav, About\n");
}

#[test]
fn test_cli_git_snapshot_ignores_uncommitted_and_excluded_files() {
    let project = project();
    let root = project.path();
    write(root, "bin/Debug/Copied.cs", "NavResourceDictionary.About");
    write(root, "Legacy/Old.cshtml", "@NavResourceDictionary.About");
    commit_all(root);
    write(root, "Scripts/draft.js", "t('Nav', 'About');");
    let output = root.join("git.csv");

    cli()
        .arg(root)
        .arg("--git")
        .args(["--exclude", "Legacy/**", "--quiet"])
        .arg("--resources")
        .arg(root.join("Resources/Resource-en-GB.json"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "Nav, About\n");
}

#[test]
fn test_cli_list_flag_prints_unused() {
    let project = project();
    let root = project.path();

    cli()
        .arg(root)
        .arg("--list")
        .arg("--resources")
        .arg(root.join("Resources/Resource-en-GB.json"))
        .arg("--output")
        .arg(root.join("out.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("About"));
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_cli_missing_source_root_fails() {
    let project = project();
    let root = project.path();

    cli()
        .arg(root.join("does-not-exist"))
        .arg("--resources")
        .arg(root.join("Resources/Resource-en-GB.json"))
        .arg("--output")
        .arg(root.join("out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source root not found"));
}

#[test]
fn test_cli_malformed_catalog_fails_before_scanning() {
    let project = project();
    let root = project.path();
    write(root, "broken.json", "{ not json");
    let output = root.join("out.csv");

    cli()
        .arg(root)
        .arg("--resources")
        .arg(root.join("broken.json"))
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed resource catalog"));

    assert!(!output.exists());
}

#[test]
fn test_cli_missing_catalog_option_fails() {
    let project = project();

    cli()
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No resource catalog configured"));
}

#[test]
fn test_cli_zero_workers_fails() {
    let project = project();
    let root = project.path();

    cli()
        .arg(root)
        .args(["--workers", "0"])
        .arg("--resources")
        .arg(root.join("Resources/Resource-en-GB.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Worker count"));
}

#[test]
fn test_cli_unwritable_output_fails() {
    let project = project();
    let root = project.path();

    cli()
        .arg(root)
        .arg("--resources")
        .arg(root.join("Resources/Resource-en-GB.json"))
        .arg("--output")
        .arg(root.join("no-such-dir").join("out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write report"));
}
