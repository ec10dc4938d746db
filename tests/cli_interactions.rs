//! CLI subcommand integration tests
//!
//! These tests exercise the binary end to end against real files and check
//! output, error reporting, and exit codes.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn create_test_cmd() -> Command {
    Command::cargo_bin("inikit").unwrap()
}

fn create_temp_config(content: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("app.cfg");
    fs::write(&config_path, content).unwrap();
    let config_path_str = config_path.to_str().unwrap().to_string();
    (temp_dir, config_path_str)
}

const SAMPLE: &str = "\
# service credentials
[API]
FaceAPIKey = abc123 ; subscription key
Retries = {1,2,3}
Enabled = yes

[Display]
Scale = 1.5
";

#[test]
fn test_inspect_lists_sections() {
    let (_dir, path) = create_temp_config(SAMPLE);

    create_test_cmd()
        .arg("inspect")
        .arg(&path)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("[API]"))
        .stdout(predicate::str::contains("3 settings"))
        .stdout(predicate::str::contains("[Display]"));
}

#[test]
fn test_inspect_verbose_shows_settings_and_shapes() {
    let (_dir, path) = create_temp_config(SAMPLE);

    create_test_cmd()
        .arg("inspect")
        .arg(&path)
        .arg("--no-color")
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("FaceAPIKey = abc123"))
        .stdout(predicate::str::contains("array[3]"))
        .stdout(predicate::str::contains("scalar"));
}

#[test]
fn test_get_prints_raw_string_by_default() {
    let (_dir, path) = create_temp_config(SAMPLE);

    create_test_cmd()
        .args(["get", path.as_str(), "API", "FaceAPIKey", "--no-color"])
        .assert()
        .success()
        .stdout("abc123\n");
}

#[test]
fn test_get_decodes_typed_values() {
    let (_dir, path) = create_temp_config(SAMPLE);

    create_test_cmd()
        .args(["get", path.as_str(), "API", "Enabled", "--as", "bool", "--no-color"])
        .assert()
        .success()
        .stdout("true\n");

    create_test_cmd()
        .args(["get", path.as_str(), "Display", "Scale", "--as", "float", "--no-color"])
        .assert()
        .success()
        .stdout("1.5\n");
}

#[test]
fn test_get_array_prints_one_element_per_line() {
    let (_dir, path) = create_temp_config(SAMPLE);

    create_test_cmd()
        .args([
            "get",
            path.as_str(),
            "API",
            "Retries",
            "--as",
            "int",
            "--array",
            "--no-color",
        ])
        .assert()
        .success()
        .stdout("1\n2\n3\n");
}

#[test]
fn test_get_is_case_insensitive() {
    let (_dir, path) = create_temp_config(SAMPLE);

    create_test_cmd()
        .args(["get", path.as_str(), "api", "faceapikey", "--no-color"])
        .assert()
        .success()
        .stdout("abc123\n");
}

#[test]
fn test_get_missing_setting_fails_with_identity_code() {
    let (_dir, path) = create_temp_config(SAMPLE);

    create_test_cmd()
        .args(["get", path.as_str(), "API", "Absent", "--no-color"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_get_bad_cast_fails_with_cast_code() {
    let (_dir, path) = create_temp_config(SAMPLE);

    create_test_cmd()
        .args(["get", path.as_str(), "API", "FaceAPIKey", "--as", "int", "--no-color"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("abc123"));
}

#[test]
fn test_parse_error_reports_line_and_code() {
    let (_dir, path) = create_temp_config("key = 1\n");

    create_test_cmd()
        .args(["inspect", path.as_str(), "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_strip_drops_comments_on_stdout() {
    let (_dir, path) = create_temp_config(SAMPLE);

    create_test_cmd()
        .args(["strip", path.as_str(), "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FaceAPIKey = abc123"))
        .stdout(predicate::str::contains("subscription key").not())
        .stdout(predicate::str::contains("service credentials").not());
}

#[test]
fn test_pack_unpack_round_trip() {
    let (dir, path) = create_temp_config(SAMPLE);
    let packed = dir.path().join("app.cfgb");
    let unpacked = dir.path().join("restored.cfg");

    create_test_cmd()
        .args(["pack", path.as_str(), packed.to_str().unwrap(), "--no-color"])
        .assert()
        .success();

    create_test_cmd()
        .args([
            "unpack",
            packed.to_str().unwrap(),
            unpacked.to_str().unwrap(),
            "--no-color",
        ])
        .assert()
        .success();

    let restored = fs::read_to_string(&unpacked).unwrap();
    assert!(restored.contains("FaceAPIKey = abc123 ; subscription key"));
    assert!(restored.contains("Retries = {1,2,3}"));
}

#[test]
fn test_unpack_rejects_text_input() {
    let (dir, path) = create_temp_config(SAMPLE);
    let out = dir.path().join("out.cfg");

    create_test_cmd()
        .args(["unpack", path.as_str(), out.to_str().unwrap(), "--no-color"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("[BINARY]"));
}

#[test]
fn test_missing_file_fails_with_io_code() {
    create_test_cmd()
        .args(["inspect", "/nonexistent/app.cfg", "--no-color"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("[IO]"));
}
