//! End-to-end CLI tests for moodimport.
//!
//! These run the actual binary against journal files in a temporary
//! directory.
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const JOURNAL: &str = "date,score,sommeil,medicament,emotions,commentaire
texte perdu
2024-01-15,7,8.5,0,calme,Bonne journée
suite du commentaire
15/01/2024,85,7,1,joie;fatigue,\"Bonjour, ça va\"
lundi 15 brumaire 2024,6,,,,mois inconnu
vendredi 19 janvier 2024 - humeur 4/10 - fatigué
";

fn setup() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("journal.csv");
    fs::write(&input, JOURNAL).expect("Failed to write journal");
    (dir, input)
}

fn moodimport() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_moodimport"));
    Command::from_std(cmd)
}

// ============================================================================
// Import
// ============================================================================

#[test]
fn test_import_writes_csv_and_reports() {
    let (dir, input) = setup();
    let output = dir.path().join("out.csv");

    moodimport()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:  3"))
        .stdout(predicate::str::contains("Failed:    1"))
        .stdout(predicate::str::contains("line 2: no date detected"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("date,mood,sleep_hours,medication,emotions,note"));
    assert!(content.contains("2024-01-15,7,8.5,0,calme,\"Bonne journée\nsuite du commentaire\""));
    assert!(content.contains("2024-01-15,9,7,1,joie;fatigue,\"Bonjour, ça va\""));
    assert!(content.contains("2024-01-19,4"));
}

#[test]
fn test_import_jsonl_output() {
    let (dir, input) = setup();
    let output = dir.path().join("out.jsonl");

    moodimport()
        .arg(&input)
        .args(["-f", "jsonl", "-o"])
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1]["mood"], 9);
    assert_eq!(lines[1]["tags"][1], "fatigue");
}

#[test]
fn test_exported_csv_imports_again() {
    let (dir, input) = setup();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    moodimport().arg(&input).arg("-o").arg(&first).assert().success();
    moodimport()
        .arg(&first)
        .arg("-o")
        .arg(&second)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:  3"))
        .stdout(predicate::str::contains("Failed:    0"));

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

// ============================================================================
// Flags
// ============================================================================

#[test]
fn test_report_json() {
    let (dir, input) = setup();
    let output = dir.path().join("out.json");

    let assert = moodimport()
        .arg(&input)
        .args(["--report-json", "--max-errors", "1", "-f", "json", "-o"])
        .arg(&output)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is JSON");
    assert_eq!(report["imported_count"], 3);
    assert_eq!(report["failed_count"], 1);
    assert_eq!(report["total_records"], 4);
    assert_eq!(report["diagnostic_count"], 2);
    assert_eq!(report["diagnostics"].as_array().unwrap().len(), 1);

    let written: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.len(), 3);
}

#[test]
fn test_preview_writes_nothing() {
    let (dir, input) = setup();
    let output = dir.path().join("out.csv");

    moodimport()
        .arg(&input)
        .arg("--preview")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 records found in 6 lines"))
        .stdout(predicate::str::contains("mood  9"));

    assert!(!output.exists());
}

#[test]
fn test_no_repair_drops_broken_line() {
    let (dir, input) = setup();

    moodimport()
        .arg(&input)
        .arg("--no-repair")
        .arg("-o")
        .arg(dir.path().join("out.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:  2"))
        .stdout(predicate::str::contains("could not parse record"));
}

#[test]
fn test_delimiter_and_no_header() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("journal.txt");
    fs::write(&input, "15/01/2024;7;8;0;calme;ok\n16/01/2024;6;7;0;;\n").unwrap();

    moodimport()
        .arg(&input)
        .args(["-d", ";", "--no-header", "-o"])
        .arg(dir.path().join("out.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:  2"));
}

#[test]
fn test_config_file_is_applied() {
    let (dir, _) = setup();
    let input = dir.path().join("journal.txt");
    fs::write(&input, "15/01/2024|7|8|0|calme|ok\n").unwrap();
    let config = dir.path().join("import.toml");
    fs::write(&config, "delimiter = \"|\"\nskip_header_line = false\n").unwrap();

    moodimport()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("-o")
        .arg(dir.path().join("out.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:  1"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_input_fails() {
    moodimport()
        .arg("does/not/exist.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_invalid_delimiter_fails() {
    let (_dir, input) = setup();

    moodimport()
        .arg(&input)
        .args(["-d", "\""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delimiter"));
}

#[test]
fn test_bad_config_file_fails() {
    let (dir, input) = setup();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "delimiter = 12\n").unwrap();

    moodimport()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_help() {
    moodimport()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--preview"));
}
