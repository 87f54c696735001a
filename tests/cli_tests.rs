//! Integration tests for the vaultfill CLI
//!
//! These tests run the compiled binary end-to-end. None of them reach a real
//! secret store: they cover plain values, argument handling and the failures
//! that happen before any network call.

use std::path::Path;
use std::process::Command;

/// Get the path to the vaultfill binary
fn vaultfill_binary() -> std::path::PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test executable name
    path.pop(); // Remove deps directory

    // In debug mode, binary is at target/debug/vaultfill
    path.push("vaultfill");

    if cfg!(windows) {
        path.set_extension("exe");
    }

    path
}

/// Run vaultfill with a clean store environment and an isolated home directory
fn run_vaultfill(home: &Path, args: &[&str]) -> std::process::Output {
    Command::new(vaultfill_binary())
        .args(args)
        .env_remove("VAULT_ADDR")
        .env_remove("VAULT_TOKEN")
        .env_remove("VAULT_NAMESPACE")
        .env_remove("AWS_REGION")
        .env_remove("RUST_LOG")
        .env("HOME", home)
        .output()
        .expect("Failed to execute vaultfill")
}

fn write_values(dir: &Path, contents: &str) -> String {
    let file = dir.join("values.yaml");
    std::fs::write(&file, contents).unwrap();
    file.to_string_lossy().to_string()
}

#[test]
fn test_vaultfill_version() {
    let home = tempfile::tempdir().unwrap();
    let output = run_vaultfill(home.path(), &["--version"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("vaultfill"));
}

#[test]
fn test_vaultfill_help() {
    let home = tempfile::tempdir().unwrap();
    let output = run_vaultfill(home.path(), &["--help"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("versions"));
}

#[test]
fn test_render_requires_mode() {
    let home = tempfile::tempdir().unwrap();
    let values = write_values(home.path(), "A: b\n");

    let output = run_vaultfill(home.path(), &["render", &values]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--mode"));
}

#[test]
fn test_render_config_passthrough() {
    let home = tempfile::tempdir().unwrap();
    let values = write_values(home.path(), "DB_HOST: db.internal\nPORT: 5432\n");

    let output = run_vaultfill(home.path(), &["render", &values, "--mode", "config"]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "DB_HOST: db.internal\nPORT: '5432'\n"
    );
}

#[test]
fn test_render_secret_encodes_values() {
    let home = tempfile::tempdir().unwrap();
    let values = write_values(home.path(), "GREETING: hello world\n");

    let output = run_vaultfill(
        home.path(),
        &["render", &values, "--mode", "secret", "--format", "json"],
    );

    assert!(output.status.success());
    let rendered: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rendered["GREETING"], "aGVsbG8gd29ybGQ=");
}

#[test]
fn test_render_manifest_to_file() {
    let home = tempfile::tempdir().unwrap();
    let values = write_values(home.path(), "LOG_LEVEL: info\n");
    let target = home.path().join("out/configmap.yaml");

    let output = run_vaultfill(
        home.path(),
        &[
            "render",
            &values,
            "--mode",
            "config",
            "--manifest",
            "app-config",
            "--namespace",
            "prod",
            "--output",
            target.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.contains("kind: ConfigMap"));
    assert!(written.contains("name: app-config"));
    assert!(written.contains("namespace: prod"));
    assert!(written.contains("LOG_LEVEL: info"));
}

#[test]
fn test_render_namespace_requires_manifest() {
    let home = tempfile::tempdir().unwrap();
    let values = write_values(home.path(), "A: b\n");

    let output = run_vaultfill(
        home.path(),
        &["render", &values, "--mode", "config", "--namespace", "prod"],
    );

    assert!(!output.status.success());
}

#[test]
fn test_render_malformed_reference_fails() {
    let home = tempfile::tempdir().unwrap();
    let values = write_values(home.path(), "DB_PASS: vault_path:creds/db\n");

    let output = run_vaultfill(home.path(), &["render", &values, "--mode", "config"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Malformed secret reference"));
}

#[test]
fn test_render_without_vault_addr_fails() {
    let home = tempfile::tempdir().unwrap();
    let values = write_values(home.path(), "DB_PASS: vault_path:creds/data/db password\n");

    let output = run_vaultfill(home.path(), &["render", &values, "--mode", "secret"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("VAULT_ADDR is not set"));
}

#[test]
fn test_render_rejects_nested_values() {
    let home = tempfile::tempdir().unwrap();
    let values = write_values(home.path(), "DB:\n  host: db.internal\n");

    let output = run_vaultfill(home.path(), &["render", &values, "--mode", "config"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Entry 'DB'"));
}

#[test]
fn test_list_requires_mount_point() {
    let home = tempfile::tempdir().unwrap();
    let output = run_vaultfill(home.path(), &["list", "apps/web"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--mount-point"));
}

#[test]
fn test_versions_without_vault_addr_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = run_vaultfill(home.path(), &["versions", "apps/web", "--mount-point", "kv"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("VAULT_ADDR is not set"));
}
