#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("credits"))
        .stdout(predicate::str::contains("--dir"));
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"))
        .stdout(predicate::str::contains("--language"));
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_missing_token_is_reported() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.env_remove("TMDB_API_TOKEN")
        .arg("--dir")
        .arg(dir.path())
        .args(["movie", "--id", "550"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB API token is required"));
}

#[test]
fn test_rate_requires_value_or_delete() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.args(["rate", "--movie", "550"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--value"));
}

#[test]
fn test_changes_rejects_bad_date() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.args(["changes", "--movie", "550", "--start-date", "2024/03/01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn test_init_writes_config() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let mut cmd = cargo_bin_cmd!("tmdbkit");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["init", "--token", "test-token", "--language", "ja-JP"])
        .assert()
        .success();

    // Assert
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("api_token = \"test-token\""));
    assert!(written.contains("language = \"ja-JP\""));
}
