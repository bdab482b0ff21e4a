//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_solution(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{source}").unwrap();
    file
}

#[test]
fn list_shows_catalog() {
    Command::cargo_bin("pykata")
        .unwrap()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("add-two-numbers"))
        .stdout(predicate::str::contains("challenges total"));
}

#[test]
fn show_displays_challenge() {
    Command::cargo_bin("pykata")
        .unwrap()
        .args(["show", "sum-list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sum of a List"));
}

#[test]
fn show_unknown_challenge_fails() {
    Command::cargo_bin("pykata")
        .unwrap()
        .args(["show", "does-not-exist"])
        .assert()
        .failure();
}

#[test]
fn check_passing_solution_succeeds() {
    let solution = write_solution("def add(a, b):\n    return a + b\n");
    Command::cargo_bin("pykata")
        .unwrap()
        .args([
            "check",
            solution.path().to_str().unwrap(),
            "-c",
            "add-two-numbers",
            "--no-color",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 failed"));
}

#[test]
fn check_wrong_solution_fails() {
    let solution = write_solution("def add(a, b):\n    return a - b\n");
    Command::cargo_bin("pykata")
        .unwrap()
        .args([
            "check",
            solution.path().to_str().unwrap(),
            "-c",
            "add-two-numbers",
            "--no-color",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL"));
}

#[test]
fn run_prints_captured_output() {
    let program = write_solution("print('from pykata')\n");
    Command::cargo_bin("pykata")
        .unwrap()
        .args(["run", program.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("from pykata"));
}
