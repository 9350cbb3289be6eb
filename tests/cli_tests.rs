// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual msgcodec binary and verify its behavior.

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

/// Get the path to the built msgcodec binary
fn msgcodec_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    // The test binary is in target/debug/deps/
    // The msgcodec binary is in target/debug/
    path.pop(); // deps
    path.pop(); // debug or release
    path.push("msgcodec");
    path
}

/// Run msgcodec with arguments
fn run(args: &[&str]) -> Output {
    let bin = msgcodec_bin();
    Command::new(&bin)
        .args(args)
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run msgcodec and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run msgcodec and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Get a temporary directory for test files
fn temp_dir(name: &str) -> (PathBuf, CleanupGuard) {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let dir = std::env::temp_dir().join(format!(
        "msgcodec_cli_test_{}_{}_{}",
        name,
        std::process::id(),
        random
    ));
    fs::create_dir_all(&dir).unwrap();
    (dir.clone(), CleanupGuard(dir))
}

/// Cleanup guard for test temporary files
#[derive(Debug)]
struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is UTF-8")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("application/x-bincode"));
    assert!(output.contains("encode"));
    assert!(output.contains("inspect"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_missing_subcommand() {
    run_err(&[]);
}

// ============================================================================
// Encode / Inspect
// ============================================================================

#[test]
fn test_encode_text_then_inspect() {
    let (dir, _guard) = temp_dir("text");
    let body = dir.join("hello.bin");

    let output = run_ok(&["encode", "text", "hello", "-o", path_str(&body)]);
    assert!(output.contains("Content-Type: application/x-bincode"));
    assert!(output.contains("Content-Encoding: UTF-8"));

    // descriptor "string" + length-prefixed "hello"
    let bytes = fs::read(&body).unwrap();
    assert_eq!(bytes.len(), 8 + 6 + 8 + 5);

    let output = run_ok(&["inspect", path_str(&body)]);
    assert!(output.contains("Descriptor: string"));
    assert!(output.contains("Value: \"hello\""));
}

#[test]
fn test_encode_int_with_encoding_json() {
    let (dir, _guard) = temp_dir("int");
    let body = dir.join("answer.bin");

    let output = run_ok(&[
        "encode",
        "int",
        "-42",
        "-o",
        path_str(&body),
        "--encoding",
        "US-ASCII",
        "--json",
    ]);
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["bytes"], 8 + 3 + 8);
    assert_eq!(report["properties"]["content_type"], "application/x-bincode");
    assert_eq!(report["properties"]["content_encoding"], "US-ASCII");

    let output = run_ok(&["inspect", path_str(&body), "--json"]);
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["descriptor"], "i64");
    assert_eq!(report["registered"], true);
    assert_eq!(report["value"], "-42");
}

#[test]
fn test_encode_bytes_from_file() {
    let (dir, _guard) = temp_dir("bytes");
    let input = dir.join("raw.dat");
    let body = dir.join("raw.bin");
    fs::write(&input, [0xca, 0xfe, 0xba, 0xbe]).unwrap();

    run_ok(&["encode", "bytes", path_str(&input), "-o", path_str(&body)]);

    let output = run_ok(&["inspect", path_str(&body), "--json"]);
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["descriptor"], "bytes");
    assert_eq!(report["value"], "[4 bytes] cafebabe");
}

#[test]
fn test_inspect_foreign_content_type_fails() {
    let (dir, _guard) = temp_dir("foreign");
    let body = dir.join("hello.bin");
    run_ok(&["encode", "text", "hello", "-o", path_str(&body)]);

    let stderr = run_err(&[
        "inspect",
        path_str(&body),
        "--content-type",
        "application/json",
    ]);
    assert!(stderr.contains("application/json"));
}

#[test]
fn test_inspect_missing_file_fails() {
    run_err(&["inspect", "/nonexistent/msgcodec/body.bin"]);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_sets_charset() {
    let (dir, _guard) = temp_dir("config");
    let config = dir.join("msgcodec.toml");
    let body = dir.join("hello.bin");
    fs::write(&config, "default_charset = \"UTF-16\"\n").unwrap();

    let output = run_ok(&[
        "--config",
        path_str(&config),
        "encode",
        "text",
        "hello",
        "-o",
        path_str(&body),
    ]);
    assert!(output.contains("Content-Encoding: UTF-16"));
}

#[test]
fn test_config_file_limits_body_size() {
    let (dir, _guard) = temp_dir("limit");
    let config = dir.join("msgcodec.toml");
    let body = dir.join("long.bin");
    fs::write(
        &config,
        "initial_buffer_size = 16\nmax_buffer_size = 32\n",
    )
    .unwrap();

    let long_text = "x".repeat(64);
    let stderr = run_err(&[
        "--config",
        path_str(&config),
        "encode",
        "text",
        &long_text,
        "-o",
        path_str(&body),
    ]);
    assert!(stderr.contains("Error"));
    assert!(!body.exists());
}

#[test]
fn test_config_file_unknown_key_fails() {
    let (dir, _guard) = temp_dir("badcfg");
    let config = dir.join("msgcodec.toml");
    let body = dir.join("hello.bin");
    fs::write(&config, "no_such_setting = 1\n").unwrap();

    run_err(&[
        "--config",
        path_str(&config),
        "encode",
        "text",
        "hello",
        "-o",
        path_str(&body),
    ]);
}
