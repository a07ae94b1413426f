//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// Run the slate binary in `dir` with colors off and no data file override.
pub fn run_slate_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slate"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("SLATE_DATA_FILE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute slate binary")
}

/// Create an issue through the CLI and return its key.
pub fn create_issue(dir: &Path, args: &[&str]) -> String {
    let mut full_args = vec!["--json", "create"];
    full_args.extend_from_slice(args);
    let output = run_slate_in_dir(dir, &full_args);
    assert!(
        output.status.success(),
        "create failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let issue: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("create --json prints an issue");
    issue["key"]
        .as_str()
        .expect("issue has a key")
        .to_string()
}

/// Read the persisted document at `.slate/issues.json`.
pub fn read_document(dir: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(dir.join(".slate").join("issues.json"))
        .expect("document exists");
    serde_json::from_str(&content).expect("document is valid JSON")
}
