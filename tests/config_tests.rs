//! Integration tests for the config command

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::tagpage_cmd;

fn init_vault(temp: &TempDir) {
    tagpage_cmd().arg("init").arg(temp.path()).assert().success();
}

#[test]
fn test_config_list_shows_defaults() {
    let temp = TempDir::new().unwrap();
    init_vault(&temp);

    tagpage_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("mode = both"))
        .stdout(predicate::str::contains("sort = source"))
        .stdout(predicate::str::contains("link-placement = end"))
        .stdout(predicate::str::contains("frontmatter-key = tag-page-query"))
        .stdout(predicate::str::contains("tag-page-dir = tag-pages"));
}

#[test]
fn test_config_set_and_get() {
    let temp = TempDir::new().unwrap();
    init_vault(&temp);

    tagpage_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("sort")
        .arg("newest")
        .assert()
        .success()
        .stdout(predicate::str::contains("Set sort = newest"));

    tagpage_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("sort")
        .assert()
        .success()
        .stdout(predicate::eq("newest\n"));
}

#[test]
fn test_config_set_persists_across_runs() {
    let temp = TempDir::new().unwrap();
    init_vault(&temp);

    tagpage_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("tag-page-dir")
        .arg("pages")
        .assert()
        .success();

    std::fs::write(temp.path().join("daily.md"), "a match #work\n").unwrap();
    tagpage_cmd()
        .current_dir(temp.path())
        .arg("generate")
        .arg("#work")
        .assert()
        .success();

    assert!(temp.path().join("pages/work.md").exists());
}

#[test]
fn test_config_invalid_mode_value() {
    let temp = TempDir::new().unwrap();
    init_vault(&temp);

    tagpage_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("mode")
        .arg("sideways")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid mode"))
        .stderr(predicate::str::contains("lines, bullets, both"));
}

#[test]
fn test_config_unknown_key() {
    let temp = TempDir::new().unwrap();
    init_vault(&temp);

    tagpage_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("colour")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_no_args_prints_usage() {
    let temp = TempDir::new().unwrap();
    init_vault(&temp);

    tagpage_cmd()
        .current_dir(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid keys"));
}
