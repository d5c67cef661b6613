use crate::error::CoreError;
use crate::models::{NewSnippetData, Snippet};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

#[async_trait]
impl super::SnippetRepository for SqliteRepository {
    async fn add_snippet(&self, data: NewSnippetData) -> Result<Snippet, CoreError> {
        let title = data.title.trim();
        if title.is_empty() {
            return Err(CoreError::InvalidInput(
                "snippet title cannot be empty".to_string(),
            ));
        }
        if data.language.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "snippet language cannot be empty".to_string(),
            ));
        }

        let project_id = match &data.project_name {
            Some(name) => {
                let row: Option<(Uuid,)> =
                    sqlx::query_as("SELECT id FROM projects WHERE name = $1")
                        .bind(name)
                        .fetch_optional(self.pool())
                        .await?;
                Some(
                    row.ok_or_else(|| CoreError::NotFound(format!("Project '{}'", name)))?
                        .0,
                )
            }
            None => None,
        };

        let snippet: Snippet = sqlx::query_as(
            r#"INSERT INTO snippets (id, title, language, code, description, is_favorite, project_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 0, $6, $7, $7)
            RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(title)
        .bind(data.language.trim().to_lowercase())
        .bind(&data.code)
        .bind(&data.description)
        .bind(project_id)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;
        Ok(snippet)
    }

    async fn find_snippets(
        &self,
        language: Option<&str>,
        favorites_only: bool,
    ) -> Result<Vec<Snippet>, CoreError> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM snippets WHERE 1 = 1");
        if let Some(language) = language {
            builder.push(" AND language = ");
            builder.push_bind(language.to_lowercase());
        }
        if favorites_only {
            builder.push(" AND is_favorite = 1");
        }
        builder.push(" ORDER BY is_favorite DESC, updated_at DESC");

        let snippets = builder.build_query_as().fetch_all(self.pool()).await?;
        Ok(snippets)
    }

    async fn find_snippets_by_short_id_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<Snippet>, CoreError> {
        let snippets: Vec<Snippet> = sqlx::query_as("SELECT * FROM snippets WHERE hex(id) LIKE ?")
            .bind(super::short_id_pattern(prefix))
            .fetch_all(self.pool())
            .await?;
        Ok(snippets)
    }

    async fn set_snippet_favorite(&self, id: Uuid, favorite: bool) -> Result<Snippet, CoreError> {
        let snippet: Snippet = sqlx::query_as(
            r#"UPDATE snippets SET is_favorite = $1, updated_at = $2 WHERE id = $3 RETURNING *"#,
        )
        .bind(favorite)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Snippet '{}'", id)))?;
        Ok(snippet)
    }

    async fn delete_snippet(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Snippet '{}'", id)));
        }
        Ok(())
    }
}
