use crate::error::CoreError;
use crate::models::{NewRelationData, ProjectRelation, RelationType};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::RelationRepository for SqliteRepository {
    async fn add_relation(&self, data: NewRelationData) -> Result<ProjectRelation, CoreError> {
        let source: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM projects WHERE name = $1")
            .bind(&data.source)
            .fetch_optional(self.pool())
            .await?;
        let (source_id,) =
            source.ok_or_else(|| CoreError::NotFound(format!("Project '{}'", data.source)))?;

        let target: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM projects WHERE name = $1")
            .bind(&data.target)
            .fetch_optional(self.pool())
            .await?;
        let (target_id,) =
            target.ok_or_else(|| CoreError::NotFound(format!("Project '{}'", data.target)))?;

        if source_id == target_id {
            return Err(CoreError::InvalidInput(
                "a project cannot relate to itself".to_string(),
            ));
        }

        let relation_type = data.relation_type.unwrap_or(RelationType::RelatedTo);

        let existing: Option<(Uuid,)> = sqlx::query_as(
            r#"SELECT id FROM project_relations
            WHERE source_id = $1 AND target_id = $2 AND relation_type = $3"#,
        )
        .bind(source_id)
        .bind(target_id)
        .bind(relation_type)
        .fetch_optional(self.pool())
        .await?;
        if existing.is_some() {
            return Err(CoreError::AlreadyExists(format!(
                "Relation '{} {} {}'",
                data.source, relation_type, data.target
            )));
        }

        let relation: ProjectRelation = sqlx::query_as(
            r#"INSERT INTO project_relations (id, source_id, target_id, relation_type, label, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(source_id)
        .bind(target_id)
        .bind(relation_type)
        .bind(&data.label)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;
        Ok(relation)
    }

    async fn find_relations(&self) -> Result<Vec<ProjectRelation>, CoreError> {
        let relations: Vec<ProjectRelation> =
            sqlx::query_as("SELECT * FROM project_relations ORDER BY created_at DESC")
                .fetch_all(self.pool())
                .await?;
        Ok(relations)
    }

    async fn find_relations_by_short_id_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<ProjectRelation>, CoreError> {
        let relations: Vec<ProjectRelation> =
            sqlx::query_as("SELECT * FROM project_relations WHERE hex(id) LIKE ?")
                .bind(super::short_id_pattern(prefix))
                .fetch_all(self.pool())
                .await?;
        Ok(relations)
    }

    async fn delete_relation(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM project_relations WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Relation '{}'", id)));
        }
        Ok(())
    }
}
