use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/triangle")
        .canonicalize()
        .expect("fixture dataset present")
}

#[test]
fn dataset_reports_table_sizes() {
    cargo_bin_cmd!("budgetpath")
        .arg("--data-dir")
        .arg(fixture_dir())
        .arg("dataset")
        .assert()
        .success()
        .stdout(contains("Nodes: 3\n"))
        .stdout(contains("Edges: 3\n"))
        .stdout(contains("Energy costs: yes\n"))
        .stdout(contains("Coordinates: yes\n"));
}

#[test]
fn dataset_honours_environment_override() {
    cargo_bin_cmd!("budgetpath")
        .env("BUDGETPATH_DATA_DIR", fixture_dir())
        .args(["--format", "json", "dataset"])
        .assert()
        .success()
        .stdout(contains("\"nodes\": 3"));
}
