mod support;

use predicates::str::contains;
use serde_json::Value;

use support::TestWorkspace;

/// Seed one project with a known spread of priorities, statuses and labels.
fn seeded_workspace() -> TestWorkspace {
    let ws = TestWorkspace::init();
    ws.create_project("web");

    ws.cmd()
        .args(["add", "one", "", "--priority", "high", "--sprint", "s1"])
        .assert()
        .success();
    ws.cmd()
        .args(["add", "two", "", "--sprint", "s1", "--assignee", "alice"])
        .assert()
        .success();
    ws.cmd()
        .args(["add", "three", "", "--priority", "high", "--assignee", "bob"])
        .assert()
        .success();
    ws.cmd()
        .args(["add", "four", "", "--priority", "low", "--sprint", "s2"])
        .assert()
        .success();

    ws.cmd()
        .args(["update", "WEB-3", "--status", "done"])
        .assert()
        .success();

    ws
}

fn filtered_ids(ws: &TestWorkspace, filters: &[&str]) -> Vec<String> {
    let mut args = vec!["items"];
    args.extend_from_slice(filters);
    args.push("--json");

    let output = ws
        .cmd()
        .args(&args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("json");
    value["data"]["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|item| item["id"].as_str().expect("id").to_string())
        .collect()
}

#[test]
fn no_filters_returns_all_in_order() {
    let ws = seeded_workspace();
    assert_eq!(
        filtered_ids(&ws, &[]),
        vec!["WEB-1", "WEB-2", "WEB-3", "WEB-4"]
    );
}

#[test]
fn priority_filter_selects_exact_subset() {
    let ws = seeded_workspace();
    assert_eq!(
        filtered_ids(&ws, &["--priority", "high"]),
        vec!["WEB-1", "WEB-3"]
    );
}

#[test]
fn filters_compose_with_and() {
    let ws = seeded_workspace();
    assert_eq!(
        filtered_ids(&ws, &["--priority", "high", "--status", "todo"]),
        vec!["WEB-1"]
    );
}

#[test]
fn sprint_filter_is_case_sensitive_exact_match() {
    let ws = seeded_workspace();
    assert_eq!(
        filtered_ids(&ws, &["--sprint", "s1"]),
        vec!["WEB-1", "WEB-2"]
    );
    assert!(filtered_ids(&ws, &["--sprint", "S1"]).is_empty());
    assert!(filtered_ids(&ws, &["--sprint", "s"]).is_empty());
}

#[test]
fn assignee_filter_matches_exactly() {
    let ws = seeded_workspace();
    assert_eq!(filtered_ids(&ws, &["--assignee", "alice"]), vec!["WEB-2"]);
}

#[test]
fn invalid_filter_values_are_rejected() {
    let ws = seeded_workspace();

    ws.cmd()
        .args(["items", "--priority", "urgent"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown priority"));

    ws.cmd()
        .args(["items", "--status", "paused"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown status"));
}
