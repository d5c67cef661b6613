use crate::error::CoreError;
use crate::models::{
    NewProjectData, Project, ProjectStatus, Tag, UpdateProjectData, DEFAULT_PROJECT_COLOR,
};
use crate::repository::{ProjectRepository, SqliteRepository};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Sqlite, Transaction};
use uuid::Uuid;

#[async_trait]
impl super::ProjectRepository for SqliteRepository {
    async fn add_project(&self, data: NewProjectData) -> Result<Project, CoreError> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidInput(
                "project name cannot be empty".to_string(),
            ));
        }
        if self.find_project_by_name(name).await?.is_some() {
            return Err(CoreError::AlreadyExists(format!("Project '{}'", name)));
        }

        let mut tx = self.pool().begin().await?;

        let project: Project = sqlx::query_as(
            r#"INSERT INTO projects (id, name, description, status, color, icon, github_url, notes_url, local_path, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(&data.description)
        .bind(data.status.unwrap_or(ProjectStatus::Idea))
        .bind(data.color.as_deref().unwrap_or(DEFAULT_PROJECT_COLOR))
        .bind(&data.icon)
        .bind(&data.github_url)
        .bind(&data.notes_url)
        .bind(&data.local_path)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for tag in &data.tags {
            let tag_id = ensure_tag(&mut tx, tag).await?;
            sqlx::query("INSERT OR IGNORE INTO project_tags (project_id, tag_id) VALUES ($1, $2)")
                .bind(project.id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(project)
    }

    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, CoreError> {
        let project = sqlx::query_as("SELECT * FROM projects WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(project)
    }

    async fn find_projects(&self) -> Result<Vec<Project>, CoreError> {
        let projects: Vec<Project> =
            sqlx::query_as("SELECT * FROM projects ORDER BY updated_at DESC")
                .fetch_all(self.pool())
                .await?;
        Ok(projects)
    }

    async fn update_project(
        &self,
        name: &str,
        data: UpdateProjectData,
    ) -> Result<Project, CoreError> {
        let mut tx = self.pool().begin().await?;

        let existing: Project = sqlx::query_as("SELECT * FROM projects WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Project '{}'", name)))?;

        let new_name = data.name.unwrap_or(existing.name);
        let description = data.description.unwrap_or(existing.description);
        let status = data.status.unwrap_or(existing.status);
        let color = data.color.unwrap_or(existing.color);
        let icon = data.icon.unwrap_or(existing.icon);
        let github_url = data.github_url.unwrap_or(existing.github_url);
        let notes_url = data.notes_url.unwrap_or(existing.notes_url);
        let local_path = data.local_path.unwrap_or(existing.local_path);

        let project: Project = sqlx::query_as(
            r#"UPDATE projects
            SET name = $1, description = $2, status = $3, color = $4, icon = $5,
                github_url = $6, notes_url = $7, local_path = $8, updated_at = $9
            WHERE id = $10
            RETURNING *"#,
        )
        .bind(new_name)
        .bind(description)
        .bind(status)
        .bind(color)
        .bind(icon)
        .bind(github_url)
        .bind(notes_url)
        .bind(local_path)
        .bind(Utc::now())
        .bind(existing.id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(tags) = data.add_tags {
            for tag in &tags {
                let tag_id = ensure_tag(&mut tx, tag).await?;
                sqlx::query(
                    "INSERT OR IGNORE INTO project_tags (project_id, tag_id) VALUES ($1, $2)",
                )
                .bind(project.id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
            }
        }
        if let Some(tags) = data.remove_tags {
            for tag in &tags {
                sqlx::query(
                    r#"DELETE FROM project_tags
                    WHERE project_id = $1
                    AND tag_id IN (SELECT id FROM tags WHERE name = $2)"#,
                )
                .bind(project.id)
                .bind(tag)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(project)
    }

    async fn delete_project(&self, name: &str) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE name = $1")
            .bind(name)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Project '{}'", name)));
        }
        Ok(())
    }

    async fn find_project_tags(&self, project_id: Uuid) -> Result<Vec<Tag>, CoreError> {
        let tags: Vec<Tag> = sqlx::query_as(
            r#"SELECT tg.* FROM tags tg
            JOIN project_tags pt ON pt.tag_id = tg.id
            WHERE pt.project_id = $1
            ORDER BY tg.name"#,
        )
        .bind(project_id)
        .fetch_all(self.pool())
        .await?;
        Ok(tags)
    }

    async fn find_tags(&self) -> Result<Vec<Tag>, CoreError> {
        let tags: Vec<Tag> = sqlx::query_as("SELECT * FROM tags ORDER BY name")
            .fetch_all(self.pool())
            .await?;
        Ok(tags)
    }
}

/// Resolves project names to ids inside a transaction, failing on the
/// first name with no matching project.
pub(crate) async fn project_ids_by_names(
    tx: &mut Transaction<'_, Sqlite>,
    names: &[String],
) -> Result<Vec<Uuid>, CoreError> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM projects WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut **tx)
            .await?;
        let (id,) = row.ok_or_else(|| CoreError::NotFound(format!("Project '{}'", name)))?;
        ids.push(id);
    }
    Ok(ids)
}

/// Finds a tag by name, creating it with the default color when missing.
async fn ensure_tag(tx: &mut Transaction<'_, Sqlite>, name: &str) -> Result<Uuid, CoreError> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM tags WHERE name = $1")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO tags (id, name, color, is_tech_stack, created_at) VALUES ($1, $2, '#64748b', 0, $3)",
    )
    .bind(id)
    .bind(name)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;
    Ok(id)
}
