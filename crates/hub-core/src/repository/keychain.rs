use crate::error::CoreError;
use crate::models::{KeyEnvironment, KeychainEntry, KeychainGroup, NewKeychainGroupData};
use crate::repository::{projects, KeychainRepository, SqliteRepository};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::KeychainRepository for SqliteRepository {
    async fn add_keychain_group(
        &self,
        data: NewKeychainGroupData,
    ) -> Result<KeychainGroup, CoreError> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidInput(
                "keychain group name cannot be empty".to_string(),
            ));
        }
        if self.find_keychain_group_by_name(name).await?.is_some() {
            return Err(CoreError::AlreadyExists(format!(
                "Keychain group '{}'",
                name
            )));
        }

        let mut tx = self.pool().begin().await?;

        let group: KeychainGroup = sqlx::query_as(
            r#"INSERT INTO keychain_groups (id, name, service, environment, notes, is_favorite, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 0, $6, $6)
            RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(&data.service)
        .bind(data.environment.unwrap_or(KeyEnvironment::Development))
        .bind(&data.notes)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for (position, (label, value)) in data.entries.iter().enumerate() {
            sqlx::query(
                r#"INSERT INTO keychain_entries (id, group_id, label, value, position)
                VALUES ($1, $2, $3, $4, $5)"#,
            )
            .bind(Uuid::now_v7())
            .bind(group.id)
            .bind(label)
            .bind(value)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        let project_ids = projects::project_ids_by_names(&mut tx, &data.project_names).await?;
        for project_id in project_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO keychain_group_projects (group_id, project_id) VALUES ($1, $2)",
            )
            .bind(group.id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(group)
    }

    async fn find_keychain_groups(&self) -> Result<Vec<KeychainGroup>, CoreError> {
        let groups: Vec<KeychainGroup> = sqlx::query_as(
            "SELECT * FROM keychain_groups ORDER BY is_favorite DESC, updated_at DESC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(groups)
    }

    async fn find_keychain_group_by_name(
        &self,
        name: &str,
    ) -> Result<Option<KeychainGroup>, CoreError> {
        let group = sqlx::query_as("SELECT * FROM keychain_groups WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(group)
    }

    async fn find_keychain_entries(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<KeychainEntry>, CoreError> {
        let entries: Vec<KeychainEntry> =
            sqlx::query_as("SELECT * FROM keychain_entries WHERE group_id = $1 ORDER BY position")
                .bind(group_id)
                .fetch_all(self.pool())
                .await?;
        Ok(entries)
    }

    async fn delete_keychain_group(&self, name: &str) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM keychain_groups WHERE name = $1")
            .bind(name)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Keychain group '{}'", name)));
        }
        Ok(())
    }
}
