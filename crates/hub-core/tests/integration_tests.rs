use chrono::{Duration, Local, Utc};
use hub_core::dates::Urgency;
use hub_core::db::establish_connection;
use hub_core::error::CoreError;
use hub_core::models::*;
use hub_core::query::{Filter, Operator, Query};
use hub_core::repository::{
    ExportRepository, KeychainRepository, NoteRepository, ProjectRepository, RelationRepository,
    SnippetRepository, SqliteRepository, TodoRepository,
};
use tempfile::TempDir;

/// Helper function to create a test database
async fn setup_test_db() -> (SqliteRepository, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");

    let pool = establish_connection(&db_path.to_string_lossy())
        .await
        .expect("Failed to establish test database connection");

    (SqliteRepository::new(pool), temp_dir)
}

/// Helper function to create a test project
async fn create_test_project(repo: &SqliteRepository, name: &str) -> Project {
    repo.add_project(NewProjectData {
        name: name.to_string(),
        description: Some(format!("Test project: {}", name)),
        ..Default::default()
    })
    .await
    .expect("Failed to create test project")
}

#[tokio::test]
async fn test_basic_todo_crud_workflow() {
    let (repo, _temp_dir) = setup_test_db().await;

    let due = Local::now().naive_local() + Duration::hours(24);
    let todo = repo
        .add_todo(NewTodoData {
            title: "Ship the release".to_string(),
            description: Some("Cut and publish v0.1".to_string()),
            priority: Some(TodoPriority::High),
            due_at: Some(due),
            ..Default::default()
        })
        .await
        .expect("Failed to create todo");

    assert_eq!(todo.title, "Ship the release");
    assert_eq!(todo.priority, TodoPriority::High);
    assert!(!todo.is_completed);
    assert_eq!(todo.due_at, Some(due));

    let updated = repo
        .update_todo(
            todo.id,
            UpdateTodoData {
                title: Some("Ship the 0.1 release".to_string()),
                priority: Some(TodoPriority::Urgent),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update todo");
    assert_eq!(updated.title, "Ship the 0.1 release");
    assert_eq!(updated.priority, TodoPriority::Urgent);

    let completion = repo
        .complete_todo(todo.id)
        .await
        .expect("Failed to complete todo");
    match completion {
        CompletionResult::Single(completed) => {
            assert!(completed.is_completed);
            assert!(completed.completed_at.is_some());
        }
        _ => panic!("Expected single todo completion"),
    }

    let reopened = repo.reopen_todo(todo.id).await.expect("Failed to reopen");
    assert!(!reopened.is_completed);
    assert!(reopened.completed_at.is_none());

    repo.delete_todo(todo.id).await.expect("Failed to delete");
    assert!(repo.find_todo_by_id(todo.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_titles_are_rejected() {
    let (repo, _temp_dir) = setup_test_db().await;

    let result = repo
        .add_todo(NewTodoData {
            title: "   ".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(CoreError::InvalidInput(_))));
}

#[tokio::test]
async fn test_short_id_prefix_lookup() {
    let (repo, _temp_dir) = setup_test_db().await;

    let todo = repo
        .add_todo(NewTodoData {
            title: "Find me by prefix".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let found = repo
        .find_todos_by_short_id_prefix(&todo.id.to_string()[..8])
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, todo.id);

    let none = repo
        .find_todos_by_short_id_prefix("zzzzzzzz")
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_todo_project_links_and_filtering() {
    let (repo, _temp_dir) = setup_test_db().await;

    create_test_project(&repo, "Hub").await;
    create_test_project(&repo, "Sidecar").await;
    repo.update_project(
        "Hub",
        UpdateProjectData {
            add_tags: Some(vec!["rust".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    repo.add_todo(NewTodoData {
        title: "Wire up CI".to_string(),
        project_names: vec!["Hub".to_string()],
        ..Default::default()
    })
    .await
    .unwrap();
    repo.add_todo(NewTodoData {
        title: "Draft README".to_string(),
        project_names: vec!["Sidecar".to_string()],
        ..Default::default()
    })
    .await
    .unwrap();
    repo.add_todo(NewTodoData {
        title: "Unlinked chore".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    let hub_todos = repo
        .find_todos_with_details(&Query::Filter(Filter::Project("Hub".to_string())))
        .await
        .unwrap();
    assert_eq!(hub_todos.len(), 1);
    assert_eq!(hub_todos[0].title, "Wire up CI");
    assert_eq!(hub_todos[0].project_names.as_deref(), Some("Hub"));

    let tagged = repo
        .find_todos_with_details(&Query::Filter(Filter::Tag("rust".to_string())))
        .await
        .unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].title, "Wire up CI");

    let not_hub = repo
        .find_todos_with_details(&Query::Not(Box::new(Query::Filter(Filter::Project(
            "Hub".to_string(),
        )))))
        .await
        .unwrap();
    assert_eq!(not_hub.len(), 2);

    // Linking to a missing project is an error, not a silent skip.
    let missing = repo
        .add_todo(NewTodoData {
            title: "Orphan".to_string(),
            project_names: vec!["Nope".to_string()],
            ..Default::default()
        })
        .await;
    assert!(matches!(missing, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_due_urgency_filtering() {
    let (repo, _temp_dir) = setup_test_db().await;
    let now = Local::now().naive_local();

    for (title, due) in [
        ("Overdue item", Some(now - Duration::days(1))),
        ("Today item", Some(now)),
        ("Soon item", Some(now + Duration::days(2))),
        ("Later item", Some(now + Duration::days(10))),
        ("Dateless item", None),
    ] {
        repo.add_todo(NewTodoData {
            title: title.to_string(),
            due_at: due,
            ..Default::default()
        })
        .await
        .unwrap();
    }

    for (tier, expected) in [
        (Urgency::Overdue, "Overdue item"),
        (Urgency::Today, "Today item"),
        (Urgency::Soon, "Soon item"),
        (Urgency::Later, "Later item"),
        (Urgency::None, "Dateless item"),
    ] {
        let found = repo
            .find_todos_with_details(&Query::Filter(Filter::Due(tier)))
            .await
            .unwrap();
        assert_eq!(found.len(), 1, "tier {tier}");
        assert_eq!(found[0].title, expected, "tier {tier}");
    }

    let open_and_pressing = repo
        .find_todos_with_details(&Query::Binary {
            op: Operator::Or,
            left: Box::new(Query::Filter(Filter::Due(Urgency::Overdue))),
            right: Box::new(Query::Filter(Filter::Due(Urgency::Today))),
        })
        .await
        .unwrap();
    assert_eq!(open_and_pressing.len(), 2);
}

#[tokio::test]
async fn test_recurring_completion_schedules_next_occurrence() {
    let (repo, _temp_dir) = setup_test_db().await;
    create_test_project(&repo, "Chores").await;

    let due = Local::now()
        .naive_local()
        .date()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let todo = repo
        .add_todo(NewTodoData {
            title: "Water the plants".to_string(),
            due_at: Some(due),
            recurrence: Some("daily".to_string()),
            project_names: vec!["Chores".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();

    let completion = repo.complete_todo(todo.id).await.unwrap();
    match completion {
        CompletionResult::Recurring { completed, next } => {
            assert!(completed.is_completed);
            assert!(!next.is_completed);
            assert_eq!(next.title, "Water the plants");
            assert_eq!(next.due_at, Some(due + Duration::days(1)));
            assert_eq!(next.recurrence.as_deref(), Some("daily"));

            // Project links carry over to the next occurrence.
            let chores = repo
                .find_todos_with_details(&Query::Binary {
                    op: Operator::And,
                    left: Box::new(Query::Filter(Filter::Project("Chores".to_string()))),
                    right: Box::new(Query::Filter(Filter::Completed(false))),
                })
                .await
                .unwrap();
            assert_eq!(chores.len(), 1);
            assert_eq!(chores[0].id, next.id);
        }
        _ => panic!("Expected recurring completion"),
    }
}

#[tokio::test]
async fn test_project_uniqueness_and_tags() {
    let (repo, _temp_dir) = setup_test_db().await;

    let project = create_test_project(&repo, "Hub").await;
    assert_eq!(project.status, ProjectStatus::Idea);
    assert_eq!(project.color, DEFAULT_PROJECT_COLOR);

    let duplicate = repo
        .add_project(NewProjectData {
            name: "Hub".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(duplicate, Err(CoreError::AlreadyExists(_))));

    repo.update_project(
        "Hub",
        UpdateProjectData {
            status: Some(ProjectStatus::Active),
            add_tags: Some(vec!["rust".to_string(), "cli".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let tags = repo.find_project_tags(project.id).await.unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["cli", "rust"]);

    repo.update_project(
        "Hub",
        UpdateProjectData {
            remove_tags: Some(vec!["cli".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(repo.find_project_tags(project.id).await.unwrap().len(), 1);

    // Tag rows are shared and survive unlinking.
    assert_eq!(repo.find_tags().await.unwrap().len(), 2);

    repo.delete_project("Hub").await.unwrap();
    assert!(repo.find_project_by_name("Hub").await.unwrap().is_none());
    assert!(matches!(
        repo.delete_project("Hub").await,
        Err(CoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_notes_and_snippets() {
    let (repo, _temp_dir) = setup_test_db().await;
    create_test_project(&repo, "Hub").await;

    let note = repo
        .add_note(NewNoteData {
            title: "Design scratchpad".to_string(),
            content: "Schema sketches".to_string(),
            project_names: vec!["Hub".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    let pinned = repo
        .add_note(NewNoteData {
            title: "Read me first".to_string(),
            is_pinned: true,
            ..Default::default()
        })
        .await
        .unwrap();

    let notes = repo.find_notes().await.unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, pinned.id, "pinned notes sort first");

    repo.set_note_pinned(pinned.id, false).await.unwrap();
    repo.delete_note(note.id).await.unwrap();
    assert_eq!(repo.find_notes().await.unwrap().len(), 1);

    let snippet = repo
        .add_snippet(NewSnippetData {
            title: "Connection pool".to_string(),
            language: "Rust".to_string(),
            code: "let pool = SqlitePool::connect(url).await?;".to_string(),
            project_name: Some("Hub".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(snippet.language, "rust", "languages are normalized");

    repo.add_snippet(NewSnippetData {
        title: "Fetch helper".to_string(),
        language: "typescript".to_string(),
        code: "export const get = (url: string) => fetch(url);".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    let rust_only = repo.find_snippets(Some("rust"), false).await.unwrap();
    assert_eq!(rust_only.len(), 1);

    repo.set_snippet_favorite(snippet.id, true).await.unwrap();
    let favorites = repo.find_snippets(None, true).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, snippet.id);
}

#[tokio::test]
async fn test_keychain_groups_keep_entry_order() {
    let (repo, _temp_dir) = setup_test_db().await;

    let group = repo
        .add_keychain_group(NewKeychainGroupData {
            name: "Stripe".to_string(),
            service: Some("stripe.com".to_string()),
            environment: Some(KeyEnvironment::Production),
            entries: vec![
                ("PUBLISHABLE_KEY".to_string(), "pk_live_123".to_string()),
                ("SECRET_KEY".to_string(), "sk_live_456".to_string()),
            ],
            ..Default::default()
        })
        .await
        .unwrap();

    let entries = repo.find_keychain_entries(group.id).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].label, "PUBLISHABLE_KEY");
    assert_eq!(entries[1].label, "SECRET_KEY");

    let duplicate = repo
        .add_keychain_group(NewKeychainGroupData {
            name: "Stripe".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(duplicate, Err(CoreError::AlreadyExists(_))));

    repo.delete_keychain_group("Stripe").await.unwrap();
    assert!(repo.find_keychain_groups().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_relation_guard_rails() {
    let (repo, _temp_dir) = setup_test_db().await;
    create_test_project(&repo, "Hub").await;
    create_test_project(&repo, "CoreLib").await;

    let relation = repo
        .add_relation(NewRelationData {
            source: "Hub".to_string(),
            target: "CoreLib".to_string(),
            relation_type: Some(RelationType::DependsOn),
            label: Some("storage".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(relation.relation_type, RelationType::DependsOn);

    let duplicate = repo
        .add_relation(NewRelationData {
            source: "Hub".to_string(),
            target: "CoreLib".to_string(),
            relation_type: Some(RelationType::DependsOn),
            label: None,
        })
        .await;
    assert!(matches!(duplicate, Err(CoreError::AlreadyExists(_))));

    let self_loop = repo
        .add_relation(NewRelationData {
            source: "Hub".to_string(),
            target: "Hub".to_string(),
            relation_type: None,
            label: None,
        })
        .await;
    assert!(matches!(self_loop, Err(CoreError::InvalidInput(_))));

    repo.delete_relation(relation.id).await.unwrap();
    assert!(repo.find_relations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_export_snapshot_covers_every_store() {
    let (repo, _temp_dir) = setup_test_db().await;

    create_test_project(&repo, "Hub").await;
    create_test_project(&repo, "CoreLib").await;
    repo.add_todo(NewTodoData {
        title: "Export me".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();
    repo.add_note(NewNoteData {
        title: "A note".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();
    repo.add_snippet(NewSnippetData {
        title: "A snippet".to_string(),
        language: "rust".to_string(),
        code: "fn main() {}".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();
    repo.add_keychain_group(NewKeychainGroupData {
        name: "Stripe".to_string(),
        entries: vec![("KEY".to_string(), "value".to_string())],
        ..Default::default()
    })
    .await
    .unwrap();
    repo.add_relation(NewRelationData {
        source: "Hub".to_string(),
        target: "CoreLib".to_string(),
        relation_type: None,
        label: None,
    })
    .await
    .unwrap();

    let snapshot = repo.export_all().await.unwrap();
    assert_eq!(snapshot.projects.len(), 2);
    assert_eq!(snapshot.todos.len(), 1);
    assert_eq!(snapshot.notes.len(), 1);
    assert_eq!(snapshot.snippets.len(), 1);
    assert_eq!(snapshot.keychain.len(), 1);
    assert_eq!(snapshot.keychain[0].entries.len(), 1);
    assert_eq!(snapshot.relations.len(), 1);
    assert!(snapshot.exported_at <= Utc::now());

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"projects\""));
}
