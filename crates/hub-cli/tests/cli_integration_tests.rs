/// CLI integration tests for hub
///
/// These tests exercise the CLI commands as a black box: command paths,
/// error handling, and output formatting.
use predicates::prelude::*;

mod helpers;
use helpers::{extract_uuid, CliTestHarness};

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("project hub"))
        .stdout(predicate::str::contains("todo"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("hub"));

    harness
        .run_failure(&["invalid-command"])
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_todo_add_extracts_dates_from_titles() {
    let harness = CliTestHarness::new();

    let output = harness.run_and_read(&["todo", "add", "finish report tomorrow"]);
    assert!(output.contains("Created todo"));
    assert!(output.contains("finish report"));
    assert!(output.contains("Due"));
    assert!(output.contains("Tomorrow"));
    assert!(output.contains("parsed from title"));

    // The stored title no longer carries the date phrase.
    let listing = harness.run_and_read(&["todo", "list"]);
    assert!(listing.contains("finish report"));
    assert!(!listing.contains("finish report tomorrow"));
}

#[test]
fn test_todo_add_with_explicit_flags() {
    let harness = CliTestHarness::new();

    // --no-parse keeps the title verbatim.
    harness
        .run_success(&["todo", "add", "review tuesday retro notes", "--no-parse"])
        .stdout(predicate::str::contains("Created todo"));
    let listing = harness.run_and_read(&["todo", "list"]);
    assert!(listing.contains("review tuesday retro notes"));

    // Explicit --due beats extraction.
    harness
        .run_success(&[
            "todo",
            "add",
            "pay rent",
            "--due",
            "in 2 weeks",
            "--priority",
            "high",
        ])
        .stdout(predicate::str::contains("Created todo"));

    harness
        .run_failure(&["todo", "add", "Bad priority", "--priority", "whenever"])
        .stderr(predicate::str::contains("Invalid input"));

    harness
        .run_failure(&["todo", "add", "Bad due", "--due", "not-a-date"])
        .stderr(predicate::str::contains("Failed to parse due date"));

    // A title that is nothing but a date phrase is rejected.
    harness
        .run_failure(&["todo", "add", "tomorrow"])
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_todo_list_filters() {
    let harness = CliTestHarness::new();

    harness.run_success(&["todo", "add", "Urgent thing", "--priority", "urgent"]);
    harness.run_success(&["todo", "add", "Background thing", "--priority", "low"]);

    let urgent_only = harness.run_and_read(&["todo", "list", "priority:urgent"]);
    assert!(urgent_only.contains("Urgent thing"));
    assert!(!urgent_only.contains("Background thing"));

    let both = harness.run_and_read(&["todo", "list"]);
    assert!(both.contains("Urgent thing"));
    assert!(both.contains("Background thing"));

    harness
        .run_failure(&["todo", "list", "owner:me"])
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_todo_completion_lifecycle() {
    let harness = CliTestHarness::new();

    let output = harness.run_and_read(&["todo", "add", "One-off chore"]);
    let id = extract_uuid(&output);

    harness
        .run_success(&["todo", "done", &id[..8]])
        .stdout(predicate::str::contains("Completed"));

    // Completed todos are hidden by default, shown with --all.
    let open = harness.run_and_read(&["todo", "list"]);
    assert!(!open.contains("One-off chore"));
    let all = harness.run_and_read(&["todo", "list", "--all"]);
    assert!(all.contains("One-off chore"));

    harness
        .run_success(&["todo", "reopen", &id[..8]])
        .stdout(predicate::str::contains("Reopened"));

    harness
        .run_success(&["todo", "delete", &id[..8], "--force"])
        .stdout(predicate::str::contains("Deleted"));

    harness
        .run_failure(&["todo", "done", "ffffffff"])
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_recurring_todo_rolls_forward_on_completion() {
    let harness = CliTestHarness::new();

    let output = harness.run_and_read(&[
        "todo",
        "add",
        "Water the plants",
        "--due",
        "tomorrow",
        "--every",
        "daily",
    ]);
    let id = extract_uuid(&output);

    let done = harness.run_and_read(&["todo", "done", &id[..8]]);
    assert!(done.contains("Completed"));
    assert!(done.contains("Next occurrence"));

    // The next occurrence is open again.
    let listing = harness.run_and_read(&["todo", "list"]);
    assert!(listing.contains("Water the plants"));
}

#[test]
fn test_project_crud_and_archive() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&[
            "project", "add", "Hub", "--status", "active", "--tag", "rust", "--tag", "cli",
        ])
        .stdout(predicate::str::contains("Created project"));

    harness
        .run_failure(&["project", "add", "Hub"])
        .stderr(predicate::str::contains("already exists"));

    let listing = harness.run_and_read(&["project", "list"]);
    assert!(listing.contains("Hub"));
    assert!(listing.contains("active"));
    assert!(listing.contains("rust"));

    let tags = harness.run_and_read(&["project", "tags"]);
    assert!(tags.contains("rust"));
    assert!(tags.contains("cli"));

    harness
        .run_success(&["project", "archive", "Hub"])
        .stdout(predicate::str::contains("Archived"));
    let after_archive = harness.run_and_read(&["project", "list"]);
    assert!(!after_archive.contains("Hub"));
    let with_archived = harness.run_and_read(&["project", "list", "--archived"]);
    assert!(with_archived.contains("Hub"));

    harness.run_success(&["project", "delete", "Hub", "--force"]);
    harness
        .run_failure(&["project", "delete", "Hub", "--force"])
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_todos_link_to_projects() {
    let harness = CliTestHarness::new();

    harness.run_success(&["project", "add", "Hub"]);
    harness.run_success(&["todo", "add", "Wire up CI", "--project", "Hub"]);

    let filtered = harness.run_and_read(&["todo", "list", "project:Hub"]);
    assert!(filtered.contains("Wire up CI"));

    harness
        .run_failure(&["todo", "add", "Orphan", "--project", "Missing"])
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_keychain_masks_secrets() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&[
            "key",
            "add",
            "Stripe",
            "--env",
            "production",
            "--entry",
            "SECRET_KEY=sk_live_abcd1234",
        ])
        .stdout(predicate::str::contains("Created key group"));

    let shown = harness.run_and_read(&["key", "show", "Stripe"]);
    assert!(shown.contains("SECRET_KEY"));
    assert!(!shown.contains("sk_live_abcd1234"));
    assert!(shown.contains("masked"));

    let revealed = harness.run_and_read(&["key", "show", "Stripe", "--reveal"]);
    assert!(revealed.contains("sk_live_abcd1234"));

    harness
        .run_failure(&["key", "add", "Broken", "--entry", "no-equals-sign"])
        .stderr(predicate::str::contains("LABEL=VALUE"));
}

#[test]
fn test_relations_and_map() {
    let harness = CliTestHarness::new();

    harness.run_success(&["project", "add", "Hub"]);
    harness.run_success(&["project", "add", "CoreLib"]);
    harness.run_success(&["project", "add", "Playground"]);

    harness
        .run_success(&["link", "add", "Hub", "CoreLib", "--type", "depends_on"])
        .stdout(predicate::str::contains("depends_on"));

    harness
        .run_failure(&["link", "add", "Hub", "CoreLib", "--type", "depends_on"])
        .stderr(predicate::str::contains("already exists"));
    harness
        .run_failure(&["link", "add", "Hub", "Hub"])
        .stderr(predicate::str::contains("Invalid input"));

    let map = harness.run_and_read(&["map"]);
    assert!(map.contains("Hub"));
    assert!(map.contains("CoreLib"));
    assert!(map.contains("depends_on"));
    assert!(map.contains("Unconnected"));
    assert!(map.contains("Playground"));

    let links = harness.run_and_read(&["link", "list"]);
    let id = extract_uuid_from_table(&links);
    harness
        .run_success(&["link", "delete", &id])
        .stdout(predicate::str::contains("deleted"));
}

// Relation tables only show 7-character short IDs; those resolve as prefixes.
fn extract_uuid_from_table(text: &str) -> String {
    for line in text.lines() {
        for token in line.split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_ascii_hexdigit());
            if token.len() == 7 && token.chars().all(|c| c.is_ascii_hexdigit()) {
                return token.to_string();
            }
        }
    }
    panic!("no short ID found in output: {text}");
}

#[test]
fn test_export_produces_json() {
    let harness = CliTestHarness::new();

    harness.run_success(&["project", "add", "Hub"]);
    harness.run_success(&["todo", "add", "Export me"]);

    let json = harness.run_and_read(&["export"]);
    assert!(json.contains("\"projects\""));
    assert!(json.contains("\"todos\""));
    assert!(json.contains("Export me"));
}

#[test]
fn test_config_shows_documented_defaults() {
    let harness = CliTestHarness::new();

    let config = harness.run_and_read(&["config"]);
    assert!(config.contains("\"theme\": \"system\""));
    assert!(config.contains("\"project_view\": \"grid\""));
}
