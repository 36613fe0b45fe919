//! CLI integration tests for iq-sigmf
//!
//! Runs the built binary against scratch directories and checks the files it
//! leaves behind.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

fn run_iq_sigmf(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_iq-sigmf"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stderr_string(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn stdout_string(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn write_f32(dir: &Path, name: &str, values: &[f32]) {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    fs::write(dir.join(name), bytes).expect("Failed to write input");
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .expect("Failed to list output")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_cli_converts_directory() {
    let input = tempfile::tempdir().expect("Failed to create temp dir");
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    write_f32(input.path(), "capture1.dat", &[0.1, 0.2, 0.3, 0.4]);
    write_f32(input.path(), "capture2.dat", &[0.1, 0.2, 0.3]);

    let out_dir = output.path().to_str().unwrap();
    let result = run_iq_sigmf(&[input.path().to_str().unwrap(), "-o", out_dir]);

    assert!(result.status.success(), "stderr: {}", stderr_string(&result));
    assert_eq!(sorted_names(output.path()), vec!["capture1.bin", "capture1.json"]);

    let stderr = stderr_string(&result);
    assert!(stderr.contains("Converted"), "stderr: {}", stderr);
    assert!(stderr.contains("capture2.dat"), "stderr: {}", stderr);
    assert!(stderr.contains("[1/2] Converted"), "stderr: {}", stderr);
    assert!(stderr.contains("[2/2] Error processing"), "stderr: {}", stderr);
    assert!(stdout_string(&result).contains("Converted 1 file(s), 1 failed"));

    let doc: Value = serde_json::from_slice(&fs::read(output.path().join("capture1.json")).unwrap()).unwrap();
    assert_eq!(doc["annotations"]["core:sample_count"], 2);
    assert_eq!(doc["captures"]["core:file_name"], "capture1.bin");
    assert_eq!(doc["captures"]["core:center_frequency"], 3500000000u64);
}

#[test]
fn test_cli_custom_template_and_float16() {
    let input = tempfile::tempdir().expect("Failed to create temp dir");
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    write_f32(input.path(), "burst.dat", &[1.0, -1.0]);

    let template_path = input.path().join("template.json");
    fs::write(
        &template_path,
        r#"{"global": {"core:author": "bench"}, "captures": {"core:file_name": ""}, "annotations": {}}"#,
    )
    .unwrap();

    let result = run_iq_sigmf(&[
        input.path().to_str().unwrap(),
        "--output-dir",
        output.path().to_str().unwrap(),
        "--template",
        template_path.to_str().unwrap(),
        "--encoding",
        "float16",
        "--fallback",
        "off",
    ]);

    assert!(result.status.success(), "stderr: {}", stderr_string(&result));
    let doc: Value = serde_json::from_slice(&fs::read(output.path().join("burst.json")).unwrap()).unwrap();
    assert_eq!(doc["global"]["core:author"], "bench");
    assert_eq!(doc["annotations"]["core:sample_count"], 2);
    assert_eq!(doc["captures"]["core:file_name"], "burst.bin");
}

#[test]
fn test_cli_empty_input_is_not_an_error() {
    let input = tempfile::tempdir().expect("Failed to create temp dir");
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    let out_dir = root.path().join("sigmf");

    let result = run_iq_sigmf(&[input.path().to_str().unwrap(), "-o", out_dir.to_str().unwrap()]);

    assert!(result.status.success(), "stderr: {}", stderr_string(&result));
    assert!(stderr_string(&result).contains("No .dat files found"));
    assert!(out_dir.is_dir());
    assert!(sorted_names(&out_dir).is_empty());
}

#[test]
fn test_cli_rejects_bad_template() {
    let input = tempfile::tempdir().expect("Failed to create temp dir");
    let template_path = input.path().join("template.json");
    fs::write(&template_path, r#"{"global": {}}"#).unwrap();

    let result = run_iq_sigmf(&[
        input.path().to_str().unwrap(),
        "-t",
        template_path.to_str().unwrap(),
    ]);

    assert!(!result.status.success());
    assert!(stderr_string(&result).contains("captures"));
}

#[test]
fn test_cli_rejects_unknown_encoding() {
    let input = tempfile::tempdir().expect("Failed to create temp dir");
    let result = run_iq_sigmf(&[input.path().to_str().unwrap(), "-e", "int8"]);
    assert!(!result.status.success());
}
