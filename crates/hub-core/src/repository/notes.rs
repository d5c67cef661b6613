use crate::error::CoreError;
use crate::models::{NewNoteData, Note};
use crate::repository::{projects, SqliteRepository};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::NoteRepository for SqliteRepository {
    async fn add_note(&self, data: NewNoteData) -> Result<Note, CoreError> {
        let title = data.title.trim();
        if title.is_empty() {
            return Err(CoreError::InvalidInput(
                "note title cannot be empty".to_string(),
            ));
        }

        let mut tx = self.pool().begin().await?;

        let note: Note = sqlx::query_as(
            r#"INSERT INTO notes (id, title, content, is_pinned, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(title)
        .bind(&data.content)
        .bind(data.is_pinned)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let project_ids = projects::project_ids_by_names(&mut tx, &data.project_names).await?;
        for project_id in project_ids {
            sqlx::query("INSERT OR IGNORE INTO note_projects (note_id, project_id) VALUES ($1, $2)")
                .bind(note.id)
                .bind(project_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(note)
    }

    async fn find_notes(&self) -> Result<Vec<Note>, CoreError> {
        let notes: Vec<Note> =
            sqlx::query_as("SELECT * FROM notes ORDER BY is_pinned DESC, updated_at DESC")
                .fetch_all(self.pool())
                .await?;
        Ok(notes)
    }

    async fn find_notes_by_short_id_prefix(&self, prefix: &str) -> Result<Vec<Note>, CoreError> {
        let notes: Vec<Note> = sqlx::query_as("SELECT * FROM notes WHERE hex(id) LIKE ?")
            .bind(super::short_id_pattern(prefix))
            .fetch_all(self.pool())
            .await?;
        Ok(notes)
    }

    async fn set_note_pinned(&self, id: Uuid, pinned: bool) -> Result<Note, CoreError> {
        let note: Note = sqlx::query_as(
            r#"UPDATE notes SET is_pinned = $1, updated_at = $2 WHERE id = $3 RETURNING *"#,
        )
        .bind(pinned)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Note '{}'", id)))?;
        Ok(note)
    }

    async fn delete_note(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Note '{}'", id)));
        }
        Ok(())
    }
}
