//! Integration tests for the init command

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::tagpage_cmd;

#[test]
fn test_init_creates_vault() {
    let temp = TempDir::new().unwrap();

    tagpage_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tagpage vault"));

    assert!(temp.path().join(".tagpage").is_dir());
    assert!(temp.path().join(".tagpage/config.toml").is_file());
}

#[test]
fn test_init_writes_default_settings() {
    let temp = TempDir::new().unwrap();

    tagpage_cmd().arg("init").arg(temp.path()).assert().success();

    let config =
        std::fs::read_to_string(temp.path().join(".tagpage/config.toml")).unwrap();
    assert!(config.contains("mode = \"both\""));
    assert!(config.contains("sort = \"source\""));
    assert!(config.contains("frontmatter_key = \"tag-page-query\""));
    assert!(config.contains("tag_page_dir = \"tag-pages\""));
}

#[test]
fn test_init_current_directory_default() {
    let temp = TempDir::new().unwrap();

    tagpage_cmd()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .success();

    assert!(temp.path().join(".tagpage/config.toml").is_file());
}

#[test]
fn test_init_twice_fails() {
    let temp = TempDir::new().unwrap();

    tagpage_cmd().arg("init").arg(temp.path()).assert().success();
    tagpage_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Already a tagpage vault"));
}
