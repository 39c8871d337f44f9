//! End-to-end tests for the `oscal-extract` binary

use assert_cmd::Command;
use oscal_test_utils::{catalog_json, control_ids, csf_catalog_json, write_json};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn extract_cmd() -> Command {
    let mut cmd = Command::cargo_bin("oscal-extract").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn extracts_requested_controls_in_catalog_order() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "catalog.json", &catalog_json(&["A", "B", "C", "D"]));
    let output = dir.path().join("profile.json");

    extract_cmd()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-c", "D", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracting 2 specified controls..."))
        .stdout(predicate::str::contains("Filtered controls saved to:"))
        .stdout(predicate::str::contains("Successfully extracted 2 controls"))
        .stderr(predicate::str::contains("Warning").not());

    let written = read_json(&output);
    assert_eq!(control_ids(&written), ["B", "D"]);
    assert_eq!(
        written["catalog"]["title"],
        "Test Framework (Filtered - 2 controls)"
    );
    assert_eq!(written["catalog"]["uuid"], "00000000-0000-4000-8000-000000000000");
}

#[test]
fn unknown_ids_warn_but_succeed() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "catalog.json", &catalog_json(&["A", "B"]));
    let output = dir.path().join("out.json");

    extract_cmd()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--controls", "A,ZZ.ZZ-99"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Warning: The following control IDs were not found: [\"ZZ.ZZ-99\"]",
        ))
        .stdout(predicate::str::contains("Successfully extracted 1 controls"));

    assert_eq!(control_ids(&read_json(&output)), ["A"]);
}

#[test]
fn not_found_warning_is_printed_once() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "catalog.json", &catalog_json(&["A"]));
    let output = dir.path().join("out.json");

    let assert = extract_cmd()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-c", "A", "ZZ"])
        .assert()
        .success();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(stderr.matches("not found").count(), 1, "stderr: {stderr}");
    assert!(!stderr.contains('\u{1b}'), "stderr: {stderr}");
}

#[test]
fn summary_lists_each_control() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "csf.json", &csf_catalog_json());
    let output = dir.path().join("out.json");

    extract_cmd()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-c", "PR.DS-01", "GV.OC-01", "-s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 2 controls:"))
        .stdout(predicate::str::contains(
            "ID: GV.OC-01\nFamily: Organizational Context\nTitle: Organizational mission is understood",
        ))
        .stdout(predicate::str::contains("ID: PR.DS-01\nFamily: Data Security"));
}

#[test]
fn defaults_read_conventional_file_and_derive_output() {
    let dir = tempdir().unwrap();
    write_json(dir.path(), "nist-csf-2.json", &csf_catalog_json());

    extract_cmd()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Loading catalog file: nist-csf-2.json"))
        .stdout(predicate::str::contains("Extracting 22 specified controls..."))
        .stdout(predicate::str::contains("Successfully extracted 4 controls"))
        .stderr(predicate::str::contains("Warning: The following control IDs were not found"));

    let written = read_json(&dir.path().join("nist-csf-2-filtered.json"));
    assert_eq!(
        control_ids(&written),
        ["ID.AM-03", "ID.RA-01", "PR.DS-01", "DE.CM-01"]
    );
    assert_eq!(
        written["catalog"]["securityControls"][2]["references"],
        json!(["SP 800-53 SC-28"])
    );
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();

    extract_cmd()
        .arg("-i")
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: catalog file not found"));

    assert!(!dir.path().join("absent-filtered.json").exists());
}

#[test]
fn invalid_json_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ \"catalog\": [").unwrap();

    extract_cmd()
        .arg("-i")
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: invalid JSON in file"));

    assert!(!dir.path().join("broken-filtered.json").exists());
}

#[test]
fn missing_security_controls_fails_without_output() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "catalog.json", &json!({ "catalog": { "title": "T" } }));
    let output = dir.path().join("out.json");

    extract_cmd()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing catalog.securityControls"));

    assert!(!output.exists());
}

#[test]
fn missing_catalog_fails_without_output() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "catalog.json", &json!({ "securityControls": [] }));
    let output = dir.path().join("out.json");

    extract_cmd()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no `catalog` key"));

    assert!(!output.exists());
    assert!(!dir.path().join("catalog-filtered.json").exists());
}

#[test]
fn unwritable_destination_fails() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "catalog.json", &catalog_json(&["A"]));
    let output = dir.path().join("missing-dir").join("out.json");

    extract_cmd()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-c", "A"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: error saving filtered controls"));
}

#[test]
fn refiltering_compounds_annotations() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "catalog.json", &catalog_json(&["A", "B", "C"]));
    let once = dir.path().join("once.json");
    let twice = dir.path().join("twice.json");

    for (from, to) in [(&input, &once), (&once, &twice)] {
        extract_cmd()
            .arg("-i")
            .arg(from)
            .arg("-o")
            .arg(to)
            .args(["-c", "A", "C"])
            .assert()
            .success();
    }

    let first = read_json(&once);
    let second = read_json(&twice);
    assert_eq!(control_ids(&first), control_ids(&second));
    assert_eq!(
        second["catalog"]["title"],
        "Test Framework (Filtered - 2 controls) (Filtered - 2 controls)"
    );
}

#[test]
fn config_file_supplies_settings() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "catalog.json", &catalog_json(&["A", "B", "C"]));
    let output = dir.path().join("from-config.json");
    let config = dir.path().join("extract.toml");
    fs::write(
        &config,
        format!(
            "input = {:?}\noutput = {:?}\ncontrols = [\"C\"]\nsummary = true\n",
            input.to_string_lossy(),
            output.to_string_lossy()
        ),
    )
    .unwrap();

    extract_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 1 controls:"));

    assert_eq!(control_ids(&read_json(&output)), ["C"]);
}

#[test]
fn invalid_config_file_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("extract.toml");
    fs::write(&config, "controls = []\n").unwrap();

    extract_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("empty `controls` list"));
}
