use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture dataset present")
}

fn cli(dataset: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("budgetpath");
    cmd.env("RUST_LOG", "error")
        .arg("--data-dir")
        .arg(fixture_dir(dataset));
    cmd
}

#[test]
fn ucs_route_prints_shortest_distance() {
    cli("triangle")
        .args(["route", "--from", "1", "--to", "2"])
        .assert()
        .success()
        .stdout("Shortest Path: 1 -> 3 -> 2\nShortest Distance: 2\n");
}

#[test]
fn budgeted_route_reports_energy() {
    cli("triangle")
        .args(["route", "--from", "1", "--to", "2", "--algorithm", "budgeted"])
        .args(["--budget", "3"])
        .assert()
        .success()
        .stdout("Shortest Path: 1 -> 2\nDistance: 4\nEnergy: 1\n");
}

#[test]
fn a_star_route_on_sample_dataset() {
    cli("sample")
        .args(["route", "--from", "1", "--to", "8", "--algorithm", "a-star"])
        .args(["--budget", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shortest Path: 1 -> 2 -> 3 -> 4 -> 8"))
        .stdout(predicate::str::contains("Distance: 12\n"))
        .stdout(predicate::str::contains("Energy: 8\n"));
}

#[test]
fn infeasible_budget_is_not_an_error() {
    cli("sample")
        .args(["route", "--from", "1", "--to", "8", "--algorithm", "budgeted"])
        .args(["--budget", "3"])
        .assert()
        .success()
        .stdout("Path not viable\n");
}

#[test]
fn missing_values_are_prompted_for() {
    cli("triangle")
        .args(["route", "--algorithm", "budgeted"])
        .write_stdin("1\n2\n3\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Start Node: "))
        .stderr(predicate::str::contains("Enter Energy budget: "))
        .stdout("Shortest Path: 1 -> 2\nDistance: 4\nEnergy: 1\n");
}

#[test]
fn closed_stdin_fails_with_prompt_name() {
    cli("triangle")
        .args(["route", "--from", "1"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("End Node"));
}

#[test]
fn json_output_is_machine_readable() {
    let output = cli("sample")
        .args(["--format", "json", "route", "--from", "1", "--to", "8"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["algorithm"], "ucs");
    assert_eq!(value["viable"], true);
    assert_eq!(value["steps"], serde_json::json!(["1", "5", "6", "7", "8"]));
    assert_eq!(value["distance"], 9.0);
}

#[test]
fn non_numeric_node_id_fails() {
    cli("triangle")
        .args(["route", "--from", "one", "--to", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid integer"));
}

#[test]
fn negative_budget_fails() {
    cli("triangle")
        .args(["route", "--from", "1", "--to", "2", "--algorithm", "budgeted"])
        .args(["--budget", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid energy budget"));
}

#[test]
fn unknown_start_suggests_similar_ids() {
    cli("sample")
        .args(["route", "--from", "12", "--to", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn missing_dataset_directory_fails() {
    let temp = tempdir().expect("create temp dir");
    cargo_bin_cmd!("budgetpath")
        .arg("--data-dir")
        .arg(temp.path().join("absent"))
        .args(["route", "--from", "1", "--to", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dataset not found"));
}
