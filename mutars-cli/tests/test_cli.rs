//! Runs the `mutars` binary against local cohort and protein files.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

const PROTEINS: &str = "\
>gi|100|ref|NP_000001.2| tumor protein
MKTAYIAKQRQISFVKSHFSRQ
>gi|200|ref|XP_000002.1| predicted protein
MAAAAAAAAA
";

const BRCA: &str = "\
#version 2.4
Hugo_Symbol\tRefseq_prot_Id\tProtein_Change
TP\tNP_000001\tp.M1T
TP\tNP_000001\tp.T1M
TP\tNP_000001\tp.Y5C
";

const LUAD: &str = "\
#version 2.4
#second comment line
Hugo_Symbol\tRefseq_prot_Id\tProtein_Change
XP\tXP_000002\tp.M1A
TP\tNP_000001\tp.K2del
";

fn setup() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path();
    fs::write(path.join("proteins.faa"), PROTEINS).expect("Failed to write");
    fs::write(path.join("brca.maf"), BRCA).expect("Failed to write");
    fs::write(path.join("luad.maf"), LUAD).expect("Failed to write");
    fs::write(
        path.join("catalog.yaml"),
        format!(
            "refseq_protein: {}\ncohorts:\n  - name: BRCA\n    locator: {}\n  - name: LUAD\n    locator: {}\n",
            path.join("proteins.faa").display(),
            path.join("brca.maf").display(),
            path.join("luad.maf").display(),
        ),
    )
    .expect("Failed to write");
    dir
}

fn mutars(dir: &Path, args: &[&str]) -> Output {
    let catalog = dir.join("catalog.yaml");
    let cache = dir.join("cache");
    Command::new(env!("CARGO_BIN_EXE_mutars"))
        .args(args)
        .arg("--catalog")
        .arg(&catalog)
        .arg("--cache-folder")
        .arg(&cache)
        .output()
        .expect("Failed to run mutars")
}

#[test]
fn test_load_writes_merged_table() {
    let dir = setup();
    let output = dir.path().join("merged.tsv");

    let result = mutars(dir.path(), &["load", "--output", output.to_str().unwrap()]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let merged = fs::read_to_string(&output).expect("Failed to read output");
    let lines: Vec<&str> = merged.lines().collect();
    assert_eq!(lines[0], "Hugo_Symbol\tRefseq_prot_Id\tProtein_Change\tCancer Type");
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[5], "TP\tNP_000001\tp.K2del\tLUAD");
}

#[test]
fn test_verify_prints_summary() {
    let dir = setup();
    let outcomes = dir.path().join("outcomes.tsv");

    let result = mutars(
        dir.path(),
        &["verify", "--json", "--output", outcomes.to_str().unwrap()],
    );
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let summary: serde_json::Value =
        serde_json::from_slice(&result.stdout).expect("Summary is not JSON");
    assert_eq!(summary["total"], 5);
    assert_eq!(summary["verified"], 2);
    assert_eq!(summary["residue_mismatch"], 1);
    assert_eq!(summary["unknown_reference"], 1);
    assert_eq!(summary["unparsable_notation"], 1);
    assert_eq!(summary["failed"], 3);

    let table = fs::read_to_string(&outcomes).expect("Failed to read outcomes");
    assert_eq!(table.lines().count(), 6);
    assert!(table.contains("Expected T but got M at position 1 in NP_000001"));
}

#[test]
fn test_verify_single_cohort_text_summary() {
    let dir = setup();

    let result = mutars(dir.path(), &["verify", "--cohort", "BRCA"]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert_eq!(stdout.lines().last(), Some("1 / 3 failed"));
}

#[test]
fn test_peptides() {
    let dir = setup();
    let output = dir.path().join("peptides.tsv");

    let result = mutars(
        dir.path(),
        &["peptides", "--lengths", "9", "--output", output.to_str().unwrap()],
    );
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let peptides = fs::read_to_string(&output).expect("Failed to read output");
    let rows: Vec<Vec<&str>> = peptides
        .lines()
        .skip(1)
        .map(|line| line.split('\t').collect())
        .collect();
    // p.M1T fits one 9-mer, p.Y5C five
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0], vec!["NP_000001", "p.M1T", "9", "1", "MKTAYIAKQ", "TKTAYIAKQ"]);
    assert!(rows.iter().all(|row| row[5].len() == 9));
}

#[test]
fn test_unknown_cohort_fails() {
    let dir = setup();

    let result = mutars(dir.path(), &["verify", "--cohort", "OV"]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Unknown cohort: OV"));
}

#[test]
fn test_verify_without_reference_fails() {
    let dir = setup();
    let catalog = fs::read_to_string(dir.path().join("catalog.yaml")).expect("Failed to read");
    let without_reference: String = catalog
        .lines()
        .filter(|line| !line.starts_with("refseq_protein"))
        .map(|line| format!("{}\n", line))
        .collect();
    fs::write(dir.path().join("catalog.yaml"), without_reference).expect("Failed to write");

    let result = mutars(dir.path(), &["verify"]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("No reference protein archive"));
}

#[test]
fn test_verify_warns_on_unpiped_headers() {
    let dir = setup();
    let plain = dir.path().join("plain.faa");
    fs::write(&plain, ">NP_000001.2 tumor protein\nMKTAYIAKQRQISFVKSHFSRQ\n")
        .expect("Failed to write");

    let result = mutars(dir.path(), &["verify", "--refseq", plain.to_str().unwrap()]);

    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert!(
        String::from_utf8_lossy(&result.stderr).contains("No reference proteins indexed from 1 records")
    );
}
