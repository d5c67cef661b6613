use crate::error::CoreError;
use crate::models::{
    ExportSnapshot, KeychainGroupDetail, Note, ProjectRelation, Snippet, Todo,
};
use crate::repository::{
    KeychainRepository, ProjectRepository, RelationRepository, SqliteRepository,
};
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl super::ExportRepository for SqliteRepository {
    async fn export_all(&self) -> Result<ExportSnapshot, CoreError> {
        let projects = self.find_projects().await?;
        let tags = self.find_tags().await?;

        let todos: Vec<Todo> = sqlx::query_as("SELECT * FROM todos ORDER BY created_at")
            .fetch_all(self.pool())
            .await?;
        let notes: Vec<Note> = sqlx::query_as("SELECT * FROM notes ORDER BY created_at")
            .fetch_all(self.pool())
            .await?;
        let snippets: Vec<Snippet> = sqlx::query_as("SELECT * FROM snippets ORDER BY created_at")
            .fetch_all(self.pool())
            .await?;
        let relations: Vec<ProjectRelation> = self.find_relations().await?;

        let mut keychain = Vec::new();
        for group in self.find_keychain_groups().await? {
            let entries = self.find_keychain_entries(group.id).await?;
            keychain.push(KeychainGroupDetail { group, entries });
        }

        Ok(ExportSnapshot {
            exported_at: Utc::now(),
            projects,
            tags,
            todos,
            notes,
            snippets,
            keychain,
            relations,
        })
    }
}
