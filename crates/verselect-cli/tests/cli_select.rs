use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn verselect_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("verselect").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("VERSELECT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

const METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>com.example</groupId>
  <artifactId>lib</artifactId>
  <versioning>
    <versions>
      <version>1.0</version>
      <version>1.1</version>
      <version>2.0-SNAPSHOT</version>
    </versions>
  </versioning>
</metadata>"#;

#[test]
fn test_select_range_winner() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["select", "[1.0,2.0)", "1.0", "1.1", "1.2-beta", "2.0"])
        .assert()
        .success()
        .stdout("1.2-beta\n");
}

#[test]
fn test_select_sub_version() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["select", "1.1.+", "1.10.0", "1.1.4", "1.1.2"])
        .assert()
        .success()
        .stdout("1.1.4\n");
}

#[test]
fn test_select_prefer_short_circuits() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["select", "1.+", "--prefer", "1.3"])
        .assert()
        .success()
        .stdout("1.3\n");
}

#[test]
fn test_select_no_match_fails() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["select", "3.+", "1.0", "2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching version"));
}

#[test]
fn test_select_without_candidates_fails() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["select", "1.+"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No candidate versions given"));
}

#[test]
fn test_select_latest_from_metadata() {
    let tmp = TempDir::new().unwrap();
    let meta = tmp.path().join("maven-metadata.xml");
    fs::write(&meta, METADATA).unwrap();

    verselect_cmd(&tmp)
        .args(["select", "latest.release", "--metadata"])
        .arg(&meta)
        .assert()
        .success()
        .stdout("1.1\n");

    verselect_cmd(&tmp)
        .args(["select", "latest.integration", "--metadata"])
        .arg(&meta)
        .assert()
        .success()
        .stdout("2.0-SNAPSHOT\n");
}

#[test]
fn test_select_latest_without_metadata_finds_nothing() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["select", "latest.release", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching version"));
}

#[test]
fn test_select_custom_status_scheme() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("custom.toml");
    fs::write(&config, "[status]\nscheme = [\"nightly\", \"stable\"]\n").unwrap();

    verselect_cmd(&tmp)
        .arg("--config")
        .arg(&config)
        .args(["select", "latest.release", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown status"));
}

#[test]
fn test_select_malformed_range_reports_syntax_error() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["select", "[1.0,", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing closing"));
}

#[test]
fn test_check_describes_selector() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["check", "[1.0,2.0)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kind:              range"))
        .stdout(predicate::str::contains("dynamic:           true"))
        .stdout(predicate::str::contains("short-circuit:     false"));
}

#[test]
fn test_check_exact_selector() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["check", "1.2.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kind:              exact"))
        .stdout(predicate::str::contains("dynamic:           false"));
}

#[test]
fn test_check_rejects_union_range() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["check", "[1.0,2.0),[3.0,4.0)"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("union ranges"));
}

#[test]
fn test_select_missing_metadata_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    verselect_cmd(&tmp)
        .args(["select", "1.+", "--metadata"])
        .arg(tmp.path().join("absent.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}
