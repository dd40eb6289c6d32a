//! CLI integration tests for hono-registry-migrate.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn migrate_cmd() -> Command {
    Command::cargo_bin("hono-registry-migrate").unwrap()
}

fn write_dump(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const CREDENTIALS_DUMP: &str = r#"[
    {"tenant": "t1", "credentials": [
        {"device-id": "d1", "auth-id": "a1", "type": "hashed-password", "secrets": [{"pwd-hash": "x"}]}
    ]},
    {"tenant": "DEFAULT_TENANT", "credentials": [
        {"device-id": "d2", "auth-id": "a2", "type": "x509-cert", "secrets": []}
    ]}
]"#;

const TENANTS_DUMP: &str = r#"[
    {"tenant-id": "t1"},
    {"tenant-id": "t2", "tenant": {"trusted-ca": "abc"}},
    {"tenant-id": "HTTP_TENANT"}
]"#;

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// Argument handling
// =============================================================================

#[test]
fn test_help_displays_usage() {
    migrate_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("credentials"));
}

#[test]
fn test_unknown_collection_is_rejected() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, "dump.json", "[]");

    migrate_cmd()
        .arg("gateways")
        .arg(&dump)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_dump_argument() {
    migrate_cmd()
        .arg("tenants")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

// =============================================================================
// Transformations
// =============================================================================

#[test]
fn test_credentials_to_stdout() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, "credentials.json", CREDENTIALS_DUMP);

    let output = migrate_cmd()
        .arg("credentials")
        .arg(&dump)
        .assert()
        .success()
        .get_output()
        .clone();

    let documents = stdout_json(&output);
    let documents = documents.as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["tenant-id"], "t1");
    assert_eq!(documents[0]["device-id"], "d1");
    assert_eq!(
        documents[0]["credentials"],
        serde_json::json!([{"auth-id": "a1", "type": "hashed-password", "secrets": [{"pwd-hash": "x"}], "enabled": true}])
    );
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("[\n    {\n        \"tenant-id\""));
}

#[test]
fn test_tenants_to_output_file() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, "tenants.json", TENANTS_DUMP);
    let target = dir.path().join("tenants.mongo.json");

    migrate_cmd()
        .arg("tenants")
        .arg(&dump)
        .arg("--output")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let documents: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(documents.as_array().unwrap().len(), 2);
    assert_eq!(documents[0]["tenant"], serde_json::json!({}));
    assert_eq!(documents[1]["tenant"], serde_json::json!({"trusted-ca": "abc"}));
    assert_eq!(documents[0]["updatedOn"], documents[1]["updatedOn"]);
}

#[test]
fn test_ignore_tenant_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, "tenants.json", TENANTS_DUMP);

    let output = migrate_cmd()
        .arg("tenants")
        .arg(&dump)
        .arg("--ignore-tenant")
        .arg("t1")
        .assert()
        .success()
        .get_output()
        .clone();

    let ids: Vec<String> = stdout_json(&output)
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["tenant-id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["t2", "HTTP_TENANT"]);
}

#[test]
fn test_keep_all_tenants() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, "credentials.json", CREDENTIALS_DUMP);

    let output = migrate_cmd()
        .arg("credentials")
        .arg(&dump)
        .arg("--keep-all-tenants")
        .assert()
        .success()
        .get_output()
        .clone();

    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 2);
}

#[test]
fn test_config_file_sets_indent() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, "tenants.json", TENANTS_DUMP);
    let config = write_dump(&dir, "options.yaml", "indent: 2\n");

    migrate_cmd()
        .arg("tenants")
        .arg(&dump)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[\n  {\n    \"tenant-id\": \"t1\""));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_missing_dump_file() {
    let dir = TempDir::new().unwrap();

    migrate_cmd()
        .arg("devices")
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("MIGRATE-001"));
}

#[test]
fn test_invalid_json_dump() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, "devices.json", "[{\"tenant\": \"t1\", ");

    migrate_cmd()
        .arg("devices")
        .arg(&dump)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("MIGRATE-002"));
}

#[test]
fn test_missing_key_emits_nothing() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(
        &dir,
        "credentials.json",
        r#"[{"tenant": "t1", "credentials": [{"device-id": "d1", "type": "psk", "secrets": []}]}]"#,
    );

    migrate_cmd()
        .arg("credentials")
        .arg(&dump)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("MIGRATE-003"))
        .stderr(predicate::str::contains("auth-id"));
}

#[test]
fn test_failed_run_does_not_create_output_file() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, "tenants.json", r#"[{"tenant": {}}]"#);
    let target = dir.path().join("out.json");

    migrate_cmd()
        .arg("tenants")
        .arg(&dump)
        .arg("-o")
        .arg(&target)
        .assert()
        .failure();

    assert!(!target.exists());
}
