use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    CompletionResult, ExportSnapshot, KeychainEntry, KeychainGroup, NewKeychainGroupData,
    NewNoteData, NewProjectData, NewRelationData, NewSnippetData, NewTodoData, Note, Project,
    ProjectRelation, Snippet, Tag, Todo, TodoPriority, UpdateProjectData, UpdateTodoData,
};
use crate::query::Query;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export domain modules
pub mod export;
pub mod keychain;
pub mod notes;
pub mod projects;
pub mod query_builder;
pub mod relations;
pub mod snippets;
pub mod todos;

// Traits are defined in this module and implemented in respective domain modules

/// A todo row joined with the names of its linked projects.
#[derive(Debug, Clone, FromRow)]
pub struct TodoQueryResult {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<NaiveDateTime>,
    pub priority: TodoPriority,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub recurrence: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Comma-joined project names, if any.
    pub project_names: Option<String>,
}

/// Domain-specific trait for todo operations
#[async_trait]
pub trait TodoRepository {
    async fn add_todo(&self, data: NewTodoData) -> Result<Todo, CoreError>;
    async fn find_todo_by_id(&self, id: Uuid) -> Result<Option<Todo>, CoreError>;
    async fn find_todos_by_short_id_prefix(&self, prefix: &str) -> Result<Vec<Todo>, CoreError>;
    async fn find_todos_with_details(&self, query: &Query)
        -> Result<Vec<TodoQueryResult>, CoreError>;
    async fn update_todo(&self, id: Uuid, data: UpdateTodoData) -> Result<Todo, CoreError>;
    async fn complete_todo(&self, id: Uuid) -> Result<CompletionResult, CoreError>;
    async fn reopen_todo(&self, id: Uuid) -> Result<Todo, CoreError>;
    async fn delete_todo(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for project and tag operations
#[async_trait]
pub trait ProjectRepository {
    async fn add_project(&self, data: NewProjectData) -> Result<Project, CoreError>;
    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, CoreError>;
    async fn find_projects(&self) -> Result<Vec<Project>, CoreError>;
    async fn update_project(&self, name: &str, data: UpdateProjectData)
        -> Result<Project, CoreError>;
    async fn delete_project(&self, name: &str) -> Result<(), CoreError>;
    async fn find_project_tags(&self, project_id: Uuid) -> Result<Vec<Tag>, CoreError>;
    async fn find_tags(&self) -> Result<Vec<Tag>, CoreError>;
}

/// Domain-specific trait for note operations
#[async_trait]
pub trait NoteRepository {
    async fn add_note(&self, data: NewNoteData) -> Result<Note, CoreError>;
    async fn find_notes(&self) -> Result<Vec<Note>, CoreError>;
    async fn find_notes_by_short_id_prefix(&self, prefix: &str) -> Result<Vec<Note>, CoreError>;
    async fn set_note_pinned(&self, id: Uuid, pinned: bool) -> Result<Note, CoreError>;
    async fn delete_note(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for snippet operations
#[async_trait]
pub trait SnippetRepository {
    async fn add_snippet(&self, data: NewSnippetData) -> Result<Snippet, CoreError>;
    async fn find_snippets(
        &self,
        language: Option<&str>,
        favorites_only: bool,
    ) -> Result<Vec<Snippet>, CoreError>;
    async fn find_snippets_by_short_id_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<Snippet>, CoreError>;
    async fn set_snippet_favorite(&self, id: Uuid, favorite: bool) -> Result<Snippet, CoreError>;
    async fn delete_snippet(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for keychain operations
#[async_trait]
pub trait KeychainRepository {
    async fn add_keychain_group(
        &self,
        data: NewKeychainGroupData,
    ) -> Result<KeychainGroup, CoreError>;
    async fn find_keychain_groups(&self) -> Result<Vec<KeychainGroup>, CoreError>;
    async fn find_keychain_group_by_name(
        &self,
        name: &str,
    ) -> Result<Option<KeychainGroup>, CoreError>;
    async fn find_keychain_entries(&self, group_id: Uuid)
        -> Result<Vec<KeychainEntry>, CoreError>;
    async fn delete_keychain_group(&self, name: &str) -> Result<(), CoreError>;
}

/// Domain-specific trait for project-relation operations
#[async_trait]
pub trait RelationRepository {
    async fn add_relation(&self, data: NewRelationData) -> Result<ProjectRelation, CoreError>;
    async fn find_relations(&self) -> Result<Vec<ProjectRelation>, CoreError>;
    async fn find_relations_by_short_id_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<ProjectRelation>, CoreError>;
    async fn delete_relation(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for backup/export operations
#[async_trait]
pub trait ExportRepository {
    async fn export_all(&self) -> Result<ExportSnapshot, CoreError>;
}

/// Main repository trait that composes all domain traits
#[async_trait]
pub trait Repository:
    TodoRepository
    + ProjectRepository
    + NoteRepository
    + SnippetRepository
    + KeychainRepository
    + RelationRepository
    + ExportRepository
{
    // This trait automatically composes all domain-specific repositories
    // Individual domain operations are defined in their respective traits
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}

/// Uuids are stored as 16-byte blobs; short-ID lookups compare against the
/// `hex()` expansion, so the pattern must be dash-free uppercase hex.
pub(crate) fn short_id_pattern(prefix: &str) -> String {
    let mut pattern: String = prefix
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    pattern.push('%');
    pattern
}
