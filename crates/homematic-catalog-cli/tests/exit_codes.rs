// crates/homematic-catalog-cli/tests/exit_codes.rs

//! Runs the `hm-catalog` binary and checks the process exit status of each
//! failure class.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn hm_catalog(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hm-catalog"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run hm-catalog")
}

/// Fixtures are shared with the library crate.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("..");
    path.push("homematic-catalog");
    path.push("tests");
    path.push("data");
    path.push(name);
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("test paths are UTF-8")
}

#[test]
fn test_success() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("homematic.json");
    let input = fixture("hm_lc_sw2_fm.xml");

    let result = hm_catalog(&["convert", "homegear", arg(&output), arg(&input)]);
    assert_eq!(result.status.code(), Some(0));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"HM-LC-Sw2-FM\""));
}

#[test]
fn test_latin1_input_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("homematic.json");
    let input = fixture("rf_wds10_th_o.xml");

    let result = hm_catalog(&["convert", "legacy", arg(&output), arg(&input)]);
    assert_eq!(result.status.code(), Some(0));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"HM-WDS10-TH-O-2\""));
}

#[test]
fn test_usage_errors() {
    // Missing input files.
    let result = hm_catalog(&["convert", "legacy", "out.json"]);
    assert_eq!(result.status.code(), Some(1));

    // Output without .json suffix.
    let input = fixture("rf_sec_sc.xml");
    let result = hm_catalog(&["convert", "legacy", "out.txt", arg(&input)]);
    assert_eq!(result.status.code(), Some(1));

    // --help is not an error.
    let result = hm_catalog(&["--help"]);
    assert_eq!(result.status.code(), Some(0));
}

#[test]
fn test_unreadable_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("homematic.json");
    let missing = dir.path().join("missing.xml");

    let result = hm_catalog(&["convert", "legacy", arg(&output), arg(&missing)]);
    assert_eq!(result.status.code(), Some(2));
    assert!(!output.exists());
}

#[test]
fn test_wrong_dialect() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("homematic.json");
    let input = fixture("rf_remote.xml");

    let result = hm_catalog(&["convert", "homegear", arg(&output), arg(&input)]);
    assert_eq!(result.status.code(), Some(3));
    assert!(!output.exists());
}
