mod support;

use backlog::item::Item;
use predicates::str::contains;
use serde_json::Value;

use support::TestWorkspace;

fn item_from(value: &Value) -> Item {
    serde_json::from_value(value["data"].clone()).expect("item payload")
}

#[test]
fn add_assigns_id_and_defaults() {
    let ws = TestWorkspace::init();
    ws.create_project("web");

    let value = ws.add_item("Login", "Auth");
    let item = item_from(&value);

    assert_eq!(item.id, "WEB-1");
    assert_eq!(item.title, "Login");
    assert_eq!(item.description, "Auth");
    assert_eq!(item.priority.to_string(), "medium");
    assert_eq!(item.status.to_string(), "todo");
    assert_eq!(item.created_at, item.updated_at);
}

#[test]
fn ids_are_sequential_and_never_reused() {
    let ws = TestWorkspace::init();
    ws.create_project("web");

    for (n, title) in ["a", "b", "c"].iter().enumerate() {
        let value = ws.add_item(title, "");
        assert_eq!(
            value["data"]["id"].as_str(),
            Some(format!("WEB-{}", n + 1).as_str())
        );
    }

    ws.cmd().args(["delete", "WEB-3"]).assert().success();
    ws.cmd().args(["delete", "WEB-1"]).assert().success();

    let value = ws.add_item("d", "");
    assert_eq!(value["data"]["id"].as_str(), Some("WEB-4"));
}

#[test]
fn add_with_flags_round_trips_through_show() {
    let ws = TestWorkspace::init();
    ws.create_project("web");

    ws.cmd()
        .args([
            "add",
            "Payments",
            "Checkout flow",
            "--priority",
            "critical",
            "--sprint",
            "sprint-3",
            "--epic",
            "billing",
            "--assignee",
            "alice",
            "--points",
            "8",
        ])
        .assert()
        .success();

    let output = ws
        .cmd()
        .args(["show", "WEB-1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("json");
    let item = item_from(&value);

    assert_eq!(item.priority.to_string(), "critical");
    assert_eq!(item.sprint.as_deref(), Some("sprint-3"));
    assert_eq!(item.epic.as_deref(), Some("billing"));
    assert_eq!(item.assignee.as_deref(), Some("alice"));
    assert_eq!(item.story_points, Some(8));
}

#[test]
fn update_refreshes_updated_at_but_not_created_at() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    let created = item_from(&ws.add_item("Login", "Auth"));

    let output = ws
        .cmd()
        .args(["update", "WEB-1", "--status", "done", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("json");
    let updated = item_from(&value);

    assert_eq!(updated.status.to_string(), "done");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[test]
fn update_with_unknown_priority_changes_nothing() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    ws.add_item("Login", "Auth");

    ws.cmd()
        .args(["update", "WEB-1", "--priority", "urgent"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown priority"));

    let output = ws
        .cmd()
        .args(["show", "WEB-1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(value["data"]["priority"].as_str(), Some("medium"));
}

#[test]
fn update_clears_optional_field_with_empty_string() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    ws.cmd()
        .args(["add", "Login", "", "--sprint", "sprint-1"])
        .assert()
        .success();

    ws.cmd()
        .args(["update", "WEB-1", "--sprint", ""])
        .assert()
        .success();

    let output = ws
        .cmd()
        .args(["show", "WEB-1", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("json");
    assert!(value["data"]["sprint"].is_null());
}

#[test]
fn update_without_fields_is_rejected() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    ws.add_item("Login", "");

    ws.cmd()
        .args(["update", "WEB-1"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("no changes provided"));
}

#[test]
fn empty_title_add_fails_and_writes_nothing() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    let before = ws.read_project_file("web");

    ws.cmd()
        .args(["add", ""])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("title cannot be empty"));

    assert_eq!(ws.read_project_file("web"), before);
}

#[test]
fn item_commands_require_a_selection() {
    let ws = TestWorkspace::init();

    ws.cmd()
        .args(["add", "Login"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("No project selected"))
        .stderr(contains("backlog use"));

    ws.cmd()
        .args(["items"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("No project selected"));
}

#[test]
fn unknown_item_is_reported_for_show_update_delete() {
    let ws = TestWorkspace::init();
    ws.create_project("web");

    for args in [
        vec!["show", "WEB-9"],
        vec!["update", "WEB-9", "--status", "done"],
        vec!["delete", "WEB-9"],
    ] {
        ws.cmd()
            .args(&args)
            .assert()
            .failure()
            .code(2)
            .stderr(contains("Item not found"));
    }
}

#[test]
fn project_flag_overrides_selection() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    ws.create_project("api");
    // "api" is now selected; write into "web" explicitly.
    ws.cmd()
        .args(["add", "Login", "--project", "web"])
        .assert()
        .success();

    let output = ws
        .cmd()
        .args(["items", "--project", "web", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(value["data"]["total"].as_u64(), Some(1));

    let output = ws
        .cmd()
        .args(["items", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(value["data"]["total"].as_u64(), Some(0));
}

#[test]
fn add_with_project_flag_creates_the_project_implicitly() {
    let ws = TestWorkspace::init();

    ws.cmd()
        .args(["add", "Boot screen", "--project", "mobile", "--json"])
        .assert()
        .success();

    assert!(ws.project_file("mobile").exists());

    let output = ws
        .cmd()
        .args(["items", "--project", "mobile", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(value["data"]["items"][0]["id"].as_str(), Some("MOBILE-1"));
}

#[test]
fn items_preserve_insertion_order_after_deletes() {
    let ws = TestWorkspace::init();
    ws.create_project("web");
    for title in ["first", "second", "third"] {
        ws.add_item(title, "");
    }
    ws.cmd().args(["delete", "WEB-2"]).assert().success();

    let output = ws
        .cmd()
        .args(["items", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("json");
    let ids: Vec<&str> = value["data"]["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|item| item["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, vec!["WEB-1", "WEB-3"]);
}
