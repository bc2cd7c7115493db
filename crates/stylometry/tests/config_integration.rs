//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, not just process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("STYLOMETRY_MODEL")
        .env_remove("STYLOMETRY_LOG_LEVEL")
        .env_remove("STYLOMETRY_MAX_INPUT_BYTES")
        .env_remove("STYLOMETRY_LOG_DIR")
        .env("STYLOMETRY_LOG_PATH", std::env::temp_dir().join("stylometry-config-tests.jsonl"));
    cmd
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &std::path::Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(
        json["config"]["log_level"], "info",
        "should use default log level"
    );
    assert_eq!(json["config"]["model"], "en_core_web_sm");
    assert!(
        json["config"]["config_file"].is_null(),
        "no config file should be reported"
    );
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".stylometry.toml"),
        r#"model = "de_core_news_sm""#,
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["model"], "de_core_news_sm");
    assert_eq!(json["config"]["language"], "german");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with(".stylometry.toml"),
        "should report dotfile: {reported}"
    );
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("nested").join("deep");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(tmp.path().join("stylometry.toml"), r#"log_level = "warn""#).unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(json["config"]["log_level"], "warn");
}

#[test]
fn regular_name_overrides_dotfile() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stylometry.toml"), r#"log_level = "debug""#).unwrap();
    fs::write(tmp.path().join("stylometry.toml"), r#"log_level = "error""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "error");
}

#[test]
fn closer_config_takes_precedence() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("project");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(tmp.path().join(".stylometry.toml"), r#"model = "fr_core_news_sm""#).unwrap();
    fs::write(sub_dir.join(".stylometry.toml"), r#"model = "it_core_news_sm""#).unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(json["config"]["model"], "it_core_news_sm");
}

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let parent = tmp.path();
    let repo = parent.join("repo");
    fs::create_dir_all(repo.join(".git")).unwrap();
    fs::write(parent.join(".stylometry.toml"), r#"log_level = "error""#).unwrap();

    let json = info_json(&repo);

    assert_eq!(
        json["config"]["log_level"], "info",
        "config above the repository root should not be found"
    );
}

// =============================================================================
// Formats
// =============================================================================

#[test]
fn parses_yaml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".stylometry.yaml"),
        "model: es_core_news_sm\ncache_capacity: 2\n",
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["model"], "es_core_news_sm");
}

#[test]
fn parses_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".stylometry.json"),
        r#"{"log_level": "debug", "max_input_bytes": 1024}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "debug");
    assert_eq!(json["config"]["max_input_bytes"], 1024);
}

#[test]
fn disable_input_limit_removes_limit() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stylometry.toml"), "disable_input_limit = true\n").unwrap();

    let json = info_json(tmp.path());

    assert!(json["config"]["max_input_bytes"].is_null());
}

#[test]
fn default_input_limit_is_reported() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["max_input_bytes"], 5 * 1024 * 1024);
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stylometry.toml"), r#"log_level = "debug""#).unwrap();
    let explicit = tmp.path().join("custom.toml");
    fs::write(&explicit, r#"log_level = "error""#).unwrap();

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["--config", explicit.to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["config"]["log_level"], "error");
}

#[test]
fn env_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stylometry.toml"), r#"model = "de_core_news_sm""#).unwrap();

    let output = cmd()
        .env("STYLOMETRY_MODEL", "nl_core_news_sm")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["config"]["model"], "nl_core_news_sm");
}

#[test]
fn model_flag_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stylometry.toml"), r#"model = "de_core_news_sm""#).unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["--model", "pt_core_news_sm", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pt_core_news_sm"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unknown_model_in_config_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stylometry.toml"), r#"model = "zz_bad""#).unwrap();
    fs::write(tmp.path().join("input.txt"), "Some text.").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "measure", "input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zz_bad"));
}

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stylometry.toml"), "model = [unclosed").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn small_input_limit_rejects_large_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".stylometry.toml"), "max_input_bytes = 8\n").unwrap();
    fs::write(tmp.path().join("input.txt"), "This text is longer than eight bytes.").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "measure", "input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn unknown_config_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".stylometry.toml"),
        "log_level = \"warn\"\nsome_future_option = 42\n",
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "warn");
}
