mod support;

use std::fs;

use predicates::str::contains;
use serde_json::Value;

use support::TestWorkspace;

const HEADER: &str =
    "id,title,description,priority,status,sprint,epic,assignee,story_points,created_at,updated_at";

#[test]
fn csv_export_writes_header_and_rows() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    ws.add_item("Login", "Auth");
    ws.cmd()
        .args(["add", "Pay, later", "", "--assignee", "alice"])
        .assert()
        .success();

    let path = ws.path().join("out.csv");
    ws.cmd()
        .args(["export-csv", path.to_str().expect("path")])
        .assert()
        .success()
        .stdout(contains("out.csv"));

    let content = fs::read_to_string(&path).expect("read");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some(HEADER));
    assert_eq!(content.lines().count(), 3);
    // Embedded delimiter stays quoted.
    assert!(content.contains("\"Pay, later\""));
}

#[test]
fn empty_project_exports_header_only() {
    let ws = TestWorkspace::init();
    ws.create_project("web");

    let path = ws.path().join("empty.csv");
    let output = ws
        .cmd()
        .args(["export-csv", path.to_str().expect("path"), "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(value["data"]["rows"].as_u64(), Some(0));

    let content = fs::read_to_string(&path).expect("read");
    assert_eq!(content.trim(), HEADER);
}

#[test]
fn default_csv_filename_derives_from_project_name() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    ws.add_item("Login", "");

    ws.cmd().args(["export-csv"]).assert().success();

    let content = fs::read_to_string(ws.path().join("web_backlog.csv")).expect("read");
    assert!(content.starts_with(HEADER));
}

#[test]
fn unset_fields_export_as_empty_cells() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    ws.add_item("Login", "");

    let path = ws.path().join("out.csv");
    ws.cmd()
        .args(["export-csv", path.to_str().expect("path")])
        .assert()
        .success();

    let content = fs::read_to_string(&path).expect("read");
    let row = content.lines().nth(1).expect("data row");
    // sprint, epic, assignee, story_points are consecutive empty cells.
    assert!(row.contains("todo,,,,"));
    assert!(!row.contains("None"));
    assert!(!row.contains("null"));
}

#[test]
fn csv_export_overwrites_previous_file() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    ws.add_item("Login", "");

    let path = ws.path().join("out.csv");
    fs::write(&path, "stale export content\nwith old rows\n").expect("seed");

    ws.cmd()
        .args(["export-csv", path.to_str().expect("path")])
        .assert()
        .success();

    let content = fs::read_to_string(&path).expect("read");
    assert!(!content.contains("stale export"));
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn xlsx_export_writes_a_workbook() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    ws.add_item("Login", "Auth");

    let path = ws.path().join("out.xlsx");
    ws.cmd()
        .args(["export-xlsx", path.to_str().expect("path")])
        .assert()
        .success();

    let bytes = fs::read(&path).expect("read");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn default_xlsx_filename_derives_from_project_name() {
    let ws = TestWorkspace::init();
    ws.create_project("web");

    ws.cmd().args(["export-xlsx"]).assert().success();
    assert!(ws.path().join("web_backlog.xlsx").exists());
}

#[test]
fn export_requires_a_selection() {
    let ws = TestWorkspace::init();

    ws.cmd()
        .args(["export-csv"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("No project selected"));
}
