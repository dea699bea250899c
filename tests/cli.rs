#![forbid(unsafe_code)]
use assert_cmd::Command;
use chrono::NaiveDate;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use substitute_planner::{io, Seed};
use tempfile::{tempdir, TempDir};

#[test]
fn eligible_lists_available_teachers_only() {
    let (_dir, seed) = seed_file();
    cli(&seed)
        .args(["eligible", "--substitution", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 | Mary Johnson"))
        .stdout(predicate::str::contains("6 | Elizabeth Brown"))
        .stdout(predicate::str::contains("John Smith").not())
        .stdout(predicate::str::contains("Robert Davis").not());
}

#[test]
fn assign_prints_notice_and_row() {
    let (_dir, seed) = seed_file();
    cli(&seed)
        .args(["assign", "--substitution", "1", "--teacher", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Substitute Assigned"))
        .stdout(predicate::str::contains(
            "Sarah Wilson has been assigned to 10A - Mathematics",
        ))
        .stdout(predicate::str::contains("| Sarah Wilson | assigned"));
}

#[test]
fn assign_on_assigned_slot_fails() {
    let (_dir, seed) = seed_file();
    cli(&seed)
        .args(["assign", "--substitution", "2", "--teacher", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid transition"));
}

#[test]
fn assign_rejects_unavailable_or_original_teacher() {
    let (_dir, seed) = seed_file();
    for teacher in ["3", "1"] {
        cli(&seed)
            .args(["assign", "--substitution", "1", "--teacher", teacher])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not among the selected candidates"))
            .stdout(predicate::str::contains("Substitute Assigned").not());
    }
}

#[test]
fn unassign_announces_previous_substitute() {
    let (_dir, seed) = seed_file();
    cli(&seed)
        .args(["unassign", "--substitution", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Sarah Wilson has been removed from 11A - English",
        ))
        .stdout(predicate::str::contains("| - | open"));
}

#[test]
fn list_open_only_and_export() {
    let (dir, seed) = seed_file();
    let csv = dir.path().join("open.csv");
    cli(&seed)
        .args(["list", "--open-only", "--out-csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 substitutions found"));
    let out = std::fs::read_to_string(csv).unwrap();
    assert_eq!(out.lines().count(), 6);
    assert!(!out.contains("assigned"));
}

#[test]
fn week_marks_substitution_cell() {
    let (_dir, seed) = seed_file();
    cli(&seed)
        .args(["week", "--substitution", "1", "--teachers", "5,2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week of 2025-10-13"))
        .stdout(predicate::str::contains("* Monday 2025-10-13 P2"))
        .stdout(predicate::str::contains("| 5,2"));
}

#[test]
fn week_ignores_repeated_and_ineligible_teachers() {
    let (_dir, seed) = seed_file();
    cli(&seed)
        .args(["week", "--substitution", "1", "--teachers", "5,5,3,2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| 5,2"))
        .stderr(predicate::str::contains(
            "teacher 3 is not eligible for substitution 1",
        ));
}

fn cli(seed: &Path) -> Command {
    let mut cmd = Command::cargo_bin("substitute-cli").unwrap();
    cmd.arg("--seed").arg(seed);
    cmd
}

fn seed_file() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("seed.json");
    let seed = Seed::demo(NaiveDate::from_ymd_opt(2025, 10, 13).unwrap()).unwrap();
    io::export_seed_json(&path, &seed).unwrap();
    (dir, path)
}
