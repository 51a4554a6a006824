#![cfg(feature = "cli")]
use assert_cmd::Command;
use insta::assert_json_snapshot;
use rstest::rstest;
use std::fs;
use tempfile::tempdir;

fn run_fixture(bundle_path: &str, stem: &str, args: &[&str]) {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("bundle.json");
    let output_path = dir.path().join(format!("{stem}.json"));

    // Copy the bundle into the tmpdir
    let bundle = fs::read_to_string(bundle_path).unwrap();
    fs::write(&input_path, bundle).unwrap();

    Command::cargo_bin("crd2swagger")
        .unwrap()
        .arg(input_path.to_str().unwrap())
        .arg(output_path.to_str().unwrap())
        .args(args)
        .assert()
        .success();

    let output = fs::read_to_string(&output_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_json_snapshot!(stem, json);
}

#[rstest]
#[case("widget_bundle", "widget_bundle", &[])]
#[case(
    "widget_bundle",
    "widget_bundle_legacy",
    &["--naming-mode", "legacy", "--max-desc-len", "0"]
)]
fn cli_fixtures(#[case] fixture: &str, #[case] stem: &str, #[case] args: &[&str]) {
    let bundle_path = format!("tests/fixtures/bundles/{fixture}.json");
    run_fixture(&bundle_path, stem, args);
}

#[test]
fn missing_bundle_fails() {
    let dir = tempdir().unwrap();

    let assert = Command::cargo_bin("crd2swagger")
        .unwrap()
        .arg(dir.path().join("absent.json").to_str().unwrap())
        .arg(dir.path().join("out.json").to_str().unwrap())
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("Error:"), "{stderr}");
}

#[test]
fn unloadable_reference_fails() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("bundle.json");
    fs::write(
        &input_path,
        r##"{
  "types": [{
    "namespace": "github.com/org/proj/api/v1",
    "name": "Widget",
    "kind": {"group": "example.io", "version": "v1", "kind": "Widget"},
    "schema": {
      "type": "object",
      "properties": {"spec": {"$ref": "#/definitions/github.com~1org~1proj~1api~1v1~0Missing"}}
    }
  }]
}"##,
    )
    .unwrap();

    let assert = Command::cargo_bin("crd2swagger")
        .unwrap()
        .arg(input_path.to_str().unwrap())
        .arg(dir.path().join("out.json").to_str().unwrap())
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("Missing"), "{stderr}");
}
