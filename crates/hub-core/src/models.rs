use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Idea,
    Active,
    Paused,
    Completed,
    Archived,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid project status: {0}")]
pub struct ParseProjectStatusError(String);

impl FromStr for ProjectStatus {
    type Err = ParseProjectStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idea" => Ok(ProjectStatus::Idea),
            "active" => Ok(ProjectStatus::Active),
            "paused" => Ok(ProjectStatus::Paused),
            "completed" => Ok(ProjectStatus::Completed),
            "archived" => Ok(ProjectStatus::Archived),
            _ => Err(ParseProjectStatusError(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Idea => write!(f, "idea"),
            ProjectStatus::Active => write!(f, "active"),
            ProjectStatus::Paused => write!(f, "paused"),
            ProjectStatus::Completed => write!(f, "completed"),
            ProjectStatus::Archived => write!(f, "archived"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    /// Hex color used to tint the project wherever it is displayed.
    pub color: String,
    pub icon: Option<String>,
    pub github_url: Option<String>,
    pub notes_url: Option<String>,
    pub local_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_PROJECT_COLOR: &str = "#6366f1";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub is_tech_stack: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TodoPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid todo priority: {0}")]
pub struct ParseTodoPriorityError(String);

impl FromStr for TodoPriority {
    type Err = ParseTodoPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TodoPriority::Low),
            "medium" => Ok(TodoPriority::Medium),
            "high" => Ok(TodoPriority::High),
            "urgent" => Ok(TodoPriority::Urgent),
            _ => Err(ParseTodoPriorityError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TodoPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TodoPriority::Low => write!(f, "low"),
            TodoPriority::Medium => write!(f, "medium"),
            TodoPriority::High => write!(f, "high"),
            TodoPriority::Urgent => write!(f, "urgent"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Local wall-clock due date, stored as an ISO-8601 string. Midnight
    /// means no specific time of day was set.
    pub due_at: Option<NaiveDateTime>,
    pub priority: TodoPriority,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    /// Recurrence rule name (daily, weekly, ...); completing a todo that
    /// carries one schedules the next occurrence.
    pub recurrence: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Todo {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            title: "".to_string(),
            description: None,
            due_at: None,
            priority: TodoPriority::Medium,
            is_completed: false,
            completed_at: None,
            recurrence: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Snippet {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    pub is_favorite: bool,
    pub project_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum KeyEnvironment {
    Development,
    Staging,
    Production,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid key environment: {0}")]
pub struct ParseKeyEnvironmentError(String);

impl FromStr for KeyEnvironment {
    type Err = ParseKeyEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(KeyEnvironment::Development),
            "staging" | "stage" => Ok(KeyEnvironment::Staging),
            "production" | "prod" => Ok(KeyEnvironment::Production),
            _ => Err(ParseKeyEnvironmentError(s.to_string())),
        }
    }
}

impl std::fmt::Display for KeyEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyEnvironment::Development => write!(f, "development"),
            KeyEnvironment::Staging => write!(f, "staging"),
            KeyEnvironment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KeychainGroup {
    pub id: Uuid,
    pub name: String,
    pub service: Option<String>,
    pub environment: KeyEnvironment,
    pub notes: Option<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KeychainEntry {
    pub id: Uuid,
    pub group_id: Uuid,
    pub label: String,
    pub value: String,
    pub position: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    DependsOn,
    RelatedTo,
    Extends,
    Uses,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid relation type: {0}")]
pub struct ParseRelationTypeError(String);

impl FromStr for RelationType {
    type Err = ParseRelationTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "depends_on" | "dependson" => Ok(RelationType::DependsOn),
            "related_to" | "relatedto" | "related" => Ok(RelationType::RelatedTo),
            "extends" => Ok(RelationType::Extends),
            "uses" => Ok(RelationType::Uses),
            _ => Err(ParseRelationTypeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationType::DependsOn => write!(f, "depends_on"),
            RelationType::RelatedTo => write!(f, "related_to"),
            RelationType::Extends => write!(f, "extends"),
            RelationType::Uses => write!(f, "uses"),
        }
    }
}

/// An edge in the project relationship map.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRelation {
    pub id: Uuid,
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub relation_type: RelationType,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Data Transfer Objects
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct NewTodoData {
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<NaiveDateTime>,
    pub priority: Option<TodoPriority>,
    pub recurrence: Option<String>,
    /// Names of projects to link; each must already exist.
    pub project_names: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTodoData {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_at: Option<Option<NaiveDateTime>>,
    pub priority: Option<TodoPriority>,
    pub recurrence: Option<Option<String>>,
    /// Replaces the full set of project links when present.
    pub project_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct NewProjectData {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub github_url: Option<String>,
    pub notes_url: Option<String>,
    pub local_path: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProjectData {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    pub color: Option<String>,
    pub icon: Option<Option<String>>,
    pub github_url: Option<Option<String>>,
    pub notes_url: Option<Option<String>>,
    pub local_path: Option<Option<String>>,
    pub add_tags: Option<Vec<String>>,
    pub remove_tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct NewNoteData {
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub project_names: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSnippetData {
    pub title: String,
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    pub project_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewKeychainGroupData {
    pub name: String,
    pub service: Option<String>,
    pub environment: Option<KeyEnvironment>,
    pub notes: Option<String>,
    /// (label, value) pairs, stored in order.
    pub entries: Vec<(String, String)>,
    pub project_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewRelationData {
    pub source: String,
    pub target: String,
    pub relation_type: Option<RelationType>,
    pub label: Option<String>,
}

#[derive(Debug)]
pub enum CompletionResult {
    Single(Todo),
    /// The completed todo carried a recurrence rule; `next` is the freshly
    /// scheduled occurrence.
    Recurring { completed: Todo, next: Todo },
}

/// A keychain group together with its ordered entries.
#[derive(Debug, Clone, Serialize)]
pub struct KeychainGroupDetail {
    #[serde(flatten)]
    pub group: KeychainGroup,
    pub entries: Vec<KeychainEntry>,
}

/// Full-database snapshot for JSON export.
#[derive(Debug, Serialize)]
pub struct ExportSnapshot {
    pub exported_at: DateTime<Utc>,
    pub projects: Vec<Project>,
    pub tags: Vec<Tag>,
    pub todos: Vec<Todo>,
    pub notes: Vec<Note>,
    pub snippets: Vec<Snippet>,
    pub keychain: Vec<KeychainGroupDetail>,
    pub relations: Vec<ProjectRelation>,
}
