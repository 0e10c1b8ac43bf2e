use std::{fs, path::Path};

use assert_cmd::Command;
use routegraph::load;
use serde_json::{Value, json};
use tempfile::tempdir;

fn run(db: &Path, args: &[&str]) -> Value {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_routegraph"));
    cmd.args(["--db", db.to_str().unwrap()]).args(args);
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    serde_json::from_str(stdout.trim()).expect("json")
}

#[test]
fn test_cli_exits_with_success_on_help() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_routegraph"));
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_rejects_unknown_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_routegraph"));
    cmd.arg("--bogus");
    cmd.assert().code(2);
}

#[test]
fn test_cli_status_uses_seed_without_writing() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("routes.db");
    let value = run(&db, &["status"]);
    assert_eq!(value["command"], json!("status"));
    assert_eq!(value["edges"], json!(14));
    assert!(!db.exists());
}

#[test]
fn test_cli_add_then_route_persists_between_runs() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("routes.json");
    run(&db, &["add", "Szczecin", "Katowice", "1"]);
    assert!(db.exists());
    let value = run(&db, &["route", "Szczecin", "Krakow"]);
    assert_eq!(value["path"], json!(["Szczecin", "Katowice", "Krakow"]));
    assert_eq!(value["distance"], json!(81));
    let stored = load(&db).expect("snapshot");
    assert_eq!(stored.edge_weight("Katowice", "Szczecin"), Some(1));
}

#[test]
fn test_cli_delete_reports_outcome() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("routes.db");
    let first = run(&db, &["delete", "Warsaw", "Lodz"]);
    assert_eq!(first["deleted"], json!(true));
    let second = run(&db, &["delete", "Warsaw", "Lodz"]);
    assert_eq!(second["deleted"], json!(false));
}

#[test]
fn test_cli_paths_respects_max_paths() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("routes.db");
    let value = run(&db, &["--max-paths", "2", "paths", "Warsaw", "Krakow"]);
    assert_eq!(value["paths"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["truncated"], json!(true));
    assert_eq!(value["shortest"]["nodes"], json!(["Warsaw", "Krakow"]));
}

#[test]
fn test_cli_uses_seed_file() {
    let dir = tempdir().unwrap();
    let seed = dir.path().join("seed.json");
    fs::write(
        &seed,
        r#"[{"source": "A", "destination": "B", "weight": 2},
            {"source": "B", "destination": "C", "weight": 3}]"#,
    )
    .unwrap();
    let db = dir.path().join("routes.db");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_routegraph"));
    cmd.args([
        "--db",
        db.to_str().unwrap(),
        "--seed",
        seed.to_str().unwrap(),
        "nodes",
    ]);
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["nodes"], json!(["A", "B", "C"]));
}

#[test]
fn test_cli_invalid_weight_fails_without_saving() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("routes.db");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_routegraph"));
    cmd.args(["--db", db.to_str().unwrap(), "add", "A", "B", "-4"]);
    cmd.assert().code(1);
    assert!(!db.exists());
}
