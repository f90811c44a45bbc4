//! Command-line behavior of the `perpetuum` binary

mod common;

use assert_cmd::Command;
use common::Fixture;
use predicates::prelude::*;

fn perpetuum() -> Command {
    Command::cargo_bin("perpetuum").expect("binary is built")
}

#[test]
fn test_identical_files_pass() {
    let fixture = Fixture::new();
    let a = fixture.csv("a.csv", &["A,B,C", "1,3,8", "2,5,1"]);

    perpetuum()
        .arg(&a)
        .arg(&a)
        .args(["--line-id", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("identical from a structural perspective"))
        .stdout(predicate::str::contains("No content differences"));
}

#[test]
fn test_differences_with_details() {
    let fixture = Fixture::new();
    let a = fixture.csv("a.csv", &["A,B,C", "1,3,8", "2,5,1", "5,0,0"]);
    let b = fixture.csv("b.csv", &["A,B,C", "1,3,6", "2,5,1", "9,0,0"]);

    perpetuum()
        .arg(&a)
        .arg(&b)
        .args(["-l", "A", "--show-details"])
        .assert()
        .success()
        .stdout(predicate::str::contains("There are differences in the content"))
        .stdout(predicate::str::contains("100.00 % difference"))
        .stdout(predicate::str::contains("8/6"))
        .stdout(predicate::str::contains(
            "Records that are only present in the Primary dataset",
        ))
        .stdout(predicate::str::contains(
            "Records that are only present in the Secondary dataset",
        ));
}

#[test]
fn test_export_writes_timestamped_csv() {
    let fixture = Fixture::new();
    let a = fixture.csv("a.csv", &["A,B,C", "1,3,8", "2,5,1"]);
    let b = fixture.csv("b.csv", &["A,B,C", "1,3,6", "2,5,1"]);

    perpetuum()
        .arg(&a)
        .arg(&b)
        .args(["-l", "A", "-n", "NIGHTLY", "-e"])
        .arg(fixture.dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Report exported to"));

    let exported = fixture.files_starting_with("NIGHTLY_");
    assert_eq!(exported.len(), 1);
    let content = std::fs::read_to_string(&exported[0]).unwrap();
    assert_eq!(content, "A,B,C\n1,3,8/6\n");
}

#[test]
fn test_invalid_export_directory_fails() {
    let fixture = Fixture::new();
    let a = fixture.csv("a.csv", &["A,B", "1,3"]);
    let b = fixture.csv("b.csv", &["A,B", "1,4"]);

    perpetuum()
        .arg(&a)
        .arg(&b)
        .args(["-l", "A", "--export-path"])
        .arg(fixture.dir.path().join("nowhere"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("export directory does not exist"));
}

#[test]
fn test_missing_input_is_reported_not_fatal() {
    let fixture = Fixture::new();
    let a = fixture.csv("a.csv", &["A,B", "1,3"]);

    perpetuum()
        .arg(&a)
        .arg(fixture.dir.path().join("missing.csv"))
        .args(["-l", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("could not proceed"))
        .stderr(predicate::str::contains("Invalid path provided"));
}

#[test]
fn test_structural_mismatch_is_not_fatal() {
    let fixture = Fixture::new();
    let a = fixture.csv("a.csv", &["A,B", "1,3"]);
    let b = fixture.csv("b.csv", &["X,Y", "1,3"]);

    perpetuum()
        .arg(&a)
        .arg(&b)
        .args(["-l", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("completely different"));
}

#[test]
fn test_identifier_not_comparable_is_not_fatal() {
    let fixture = Fixture::new();
    let a = fixture.csv("a.csv", &["A,B", "1,3"]);
    let b = fixture.csv("b.csv", &["A,B", "x,3"]);

    perpetuum()
        .arg(&a)
        .arg(&b)
        .args(["-l", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Structural matches"))
        .stdout(predicate::str::contains("Structural differences"))
        .stdout(predicate::str::contains("could not run"))
        .stdout(predicate::str::contains("'A'"));
}

#[test]
fn test_json_output() {
    let fixture = Fixture::new();
    let a = fixture.csv("a.csv", &["A,B", "1,3", "2,4"]);
    let b = fixture.csv("b.csv", &["A,B", "1,3", "2,5"]);

    let output = perpetuum()
        .arg(&a)
        .arg(&b)
        .args(["-l", "A", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "COMPARISON");
    assert_eq!(value["stats"]["differing_fields"], 1);
    assert_eq!(value["stats"]["difference_percentage"], 50.0);
}

#[test]
fn test_line_id_is_required() {
    let fixture = Fixture::new();
    let a = fixture.csv("a.csv", &["A,B", "1,3"]);

    perpetuum().arg(&a).arg(&a).assert().failure();
}
