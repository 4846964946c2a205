// Integration tests for the loglens binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ERROR_LOG: &str = "\
[2024-01-01T00:00:00.000][ERR][db][] Connection refused by host alpha (Count: 3)
   at Db.Open()
[2024-01-01T00:00:01.000][INF] heartbeat
[2024-01-01T00:00:02.000][ERR][db][] Connection refused by host beta (Count: 1)
[2024-01-01T00:00:03.000][ERR][io][] Disk quota exceeded (Count: 7)
";

const QUERY_LOG: &str = "\
[2024-01-01T00:00:00.000][INF] Executed DbCommand (100ms) [Parameters=[]]
SELECT * FROM \"Sales\".\"Orders\"

[2024-01-01T00:00:01.000][INF] Executed DbCommand (200ms) [Parameters=[]]
SELECT * FROM \"Sales\".\"Orders\" o
JOIN \"Sales\".\"Customers\" c ON c.\"Id\" = o.\"CustomerId\"
";

const REQUEST_LOG: &str = "\
===BEGIN REQUEST===
R1
GET /orders
===END REQUEST===
R1
===BEGIN REQUEST===
R2
GET /customers
===END REQUEST===
R2
";

fn write_log(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn loglens() -> Command {
    Command::cargo_bin("loglens").unwrap()
}

// ============================================================================
// Error analysis
// ============================================================================

#[test]
fn test_errors_text_output() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "app.log", ERROR_LOG);

    loglens()
        .arg("errors")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error Log"))
        .stdout(predicate::str::contains("3 error entries in 2 groups"))
        .stdout(predicate::str::contains("[2] Connection refused by host alpha"))
        .stdout(predicate::str::contains("[1] Disk quota exceeded"));
}

#[test]
fn test_errors_json_output() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "app.log", ERROR_LOG);

    let output = loglens()
        .args(["--format", "json", "errors"])
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["kind"], "errors");
    assert_eq!(value["total_entries"], 3);
    assert_eq!(value["groups"].as_array().unwrap().len(), 2);
    assert_eq!(value["groups"][0]["count"], 2);
}

#[test]
fn test_errors_empty_log_succeeds() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "empty.log", "");

    loglens()
        .arg("errors")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 error entries in 0 groups"));
}

#[test]
fn test_errors_html_to_file() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "app.log", ERROR_LOG);
    let report = dir.path().join("report.html");

    loglens()
        .args(["--format", "html", "--output"])
        .arg(&report)
        .arg("errors")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = fs::read_to_string(&report).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<details>"));
    assert!(html.contains("Disk quota exceeded"));
}

// ============================================================================
// Query analysis
// ============================================================================

#[test]
fn test_queries_text_output() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "sql.log", QUERY_LOG);

    loglens()
        .arg("queries")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall Average Execution Time: 150.00 ms"))
        .stdout(predicate::str::contains("Orders"))
        .stdout(predicate::str::contains("Customers"))
        .stdout(predicate::str::contains("omitted").not());
}

#[test]
fn test_queries_min_time_noted_in_text() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "sql.log", QUERY_LOG);

    loglens()
        .arg("queries")
        .arg(&log)
        .args(["--min-time", "160"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Tables with average below 160.00 ms omitted",
        ));
}

#[test]
fn test_queries_json_without_min_time() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "sql.log", QUERY_LOG);

    let output = loglens()
        .args(["--format", "json", "queries"])
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value.get("min_average_ms").is_none());
    assert_eq!(value["tables"].as_array().unwrap().len(), 2);
}

#[test]
fn test_queries_min_time_filter() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "sql.log", QUERY_LOG);

    let output = loglens()
        .args(["--format", "json", "queries"])
        .arg(&log)
        .args(["--min-time", "160"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tables: Vec<&str> = value["tables"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["table"].as_str().unwrap())
        .collect();
    assert_eq!(tables, vec!["Customers"]);
    assert_eq!(value["overall_average_ms"], 150.0);
}

#[test]
fn test_queries_rejects_negative_min_time() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "sql.log", QUERY_LOG);

    loglens()
        .arg("queries")
        .arg(&log)
        .arg("--min-time=-5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--min-time"));
}

// ============================================================================
// Transaction extraction
// ============================================================================

#[test]
fn test_transaction_extracts_request() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "req.log", REQUEST_LOG);

    loglens()
        .arg("transaction")
        .arg(&log)
        .args(["--request-id", "R2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GET /customers"))
        .stdout(predicate::str::contains("GET /orders").not());
}

#[test]
fn test_transaction_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "req.log", REQUEST_LOG);

    loglens()
        .arg("transaction")
        .arg(&log)
        .args(["--request-id", "R9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to process transaction with request_id R9",
        ));
}

#[test]
fn test_transaction_requires_request_id() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "req.log", REQUEST_LOG);

    loglens().arg("transaction").arg(&log).assert().failure();
}

// ============================================================================
// Configuration and input errors
// ============================================================================

#[test]
fn test_missing_log_file_fails() {
    loglens()
        .args(["errors", "/nonexistent/loglens/app.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/loglens/app.log"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "app.log", ERROR_LOG);
    let config = write_log(&dir, "lens.toml", "similarity_threshold = 2.0\n");

    loglens()
        .arg("--config")
        .arg(&config)
        .arg("errors")
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("similarity_threshold"));
}

#[test]
fn test_config_threshold_changes_grouping() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "app.log", ERROR_LOG);
    let config = write_log(&dir, "lens.toml", "similarity_threshold = 0.999\n");

    loglens()
        .arg("--config")
        .arg(&config)
        .arg("errors")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 error entries in 3 groups"));
}

#[test]
fn test_debug_flag_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let log = write_log(&dir, "app.log", ERROR_LOG);

    loglens()
        .arg("--debug")
        .arg("errors")
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::contains("clustered error entries"));
}
