use crate::error::CoreError;
use crate::models::{CompletionResult, NewTodoData, Todo, TodoPriority, UpdateTodoData};
use crate::query::Query;
use crate::recurrence::Recurrence;
use crate::repository::query_builder::SqlQueryBuilder;
use crate::repository::{projects, SqliteRepository, TodoQueryResult};
use async_trait::async_trait;
use chrono::{Local, Utc};
use sqlx::{QueryBuilder, Sqlite, Transaction};
use uuid::Uuid;

#[async_trait]
impl super::TodoRepository for SqliteRepository {
    async fn add_todo(&self, data: NewTodoData) -> Result<Todo, CoreError> {
        let title = data.title.trim();
        if title.is_empty() {
            return Err(CoreError::InvalidInput(
                "todo title cannot be empty".to_string(),
            ));
        }

        let mut tx = self.pool().begin().await?;

        let now = Utc::now();
        let todo: Todo = sqlx::query_as(
            r#"INSERT INTO todos (id, title, description, due_at, priority, is_completed, completed_at, recurrence, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 0, NULL, $6, $7, $7)
            RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(title)
        .bind(&data.description)
        .bind(data.due_at)
        .bind(data.priority.unwrap_or(TodoPriority::Medium))
        .bind(&data.recurrence)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let project_ids = projects::project_ids_by_names(&mut tx, &data.project_names).await?;
        link_projects(&mut tx, todo.id, &project_ids).await?;

        tx.commit().await?;
        Ok(todo)
    }

    async fn find_todo_by_id(&self, id: Uuid) -> Result<Option<Todo>, CoreError> {
        let todo = sqlx::query_as("SELECT * FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(todo)
    }

    async fn find_todos_by_short_id_prefix(&self, prefix: &str) -> Result<Vec<Todo>, CoreError> {
        let todos: Vec<Todo> = sqlx::query_as("SELECT * FROM todos WHERE hex(id) LIKE ?")
            .bind(super::short_id_pattern(prefix))
            .fetch_all(self.pool())
            .await?;
        Ok(todos)
    }

    async fn find_todos_with_details(
        &self,
        query: &Query,
    ) -> Result<Vec<TodoQueryResult>, CoreError> {
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"SELECT
                t.id, t.title, t.description, t.due_at, t.priority, t.is_completed,
                t.completed_at, t.recurrence, t.created_at, t.updated_at,
                GROUP_CONCAT(p.name) AS project_names
            FROM todos t
            LEFT JOIN todo_projects tp ON tp.todo_id = t.id
            LEFT JOIN projects p ON p.id = tp.project_id
            WHERE "#,
        );

        SqlQueryBuilder::build_where_clause(query, &mut query_builder, Local::now().naive_local());

        query_builder.push(
            " GROUP BY t.id, t.title, t.description, t.due_at, t.priority, t.is_completed, \
             t.completed_at, t.recurrence, t.created_at, t.updated_at \
             ORDER BY t.due_at IS NULL, t.due_at, t.created_at DESC",
        );

        let todos = query_builder
            .build_query_as()
            .fetch_all(self.pool())
            .await?;
        Ok(todos)
    }

    async fn update_todo(&self, id: Uuid, data: UpdateTodoData) -> Result<Todo, CoreError> {
        let mut tx = self.pool().begin().await?;

        let existing: Todo = sqlx::query_as("SELECT * FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Todo '{}'", id)))?;

        let title = match data.title {
            Some(t) => {
                let t = t.trim().to_string();
                if t.is_empty() {
                    return Err(CoreError::InvalidInput(
                        "todo title cannot be empty".to_string(),
                    ));
                }
                t
            }
            None => existing.title,
        };
        let description = data.description.unwrap_or(existing.description);
        let due_at = data.due_at.unwrap_or(existing.due_at);
        let priority = data.priority.unwrap_or(existing.priority);
        let recurrence = data.recurrence.unwrap_or(existing.recurrence);

        let todo: Todo = sqlx::query_as(
            r#"UPDATE todos
            SET title = $1, description = $2, due_at = $3, priority = $4, recurrence = $5, updated_at = $6
            WHERE id = $7
            RETURNING *"#,
        )
        .bind(title)
        .bind(description)
        .bind(due_at)
        .bind(priority)
        .bind(recurrence)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(names) = data.project_names {
            let project_ids = projects::project_ids_by_names(&mut tx, &names).await?;
            sqlx::query("DELETE FROM todo_projects WHERE todo_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            link_projects(&mut tx, id, &project_ids).await?;
        }

        tx.commit().await?;
        Ok(todo)
    }

    async fn complete_todo(&self, id: Uuid) -> Result<CompletionResult, CoreError> {
        let mut tx = self.pool().begin().await?;

        let todo: Todo = sqlx::query_as("SELECT * FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Todo '{}'", id)))?;

        let completed: Todo = sqlx::query_as(
            r#"UPDATE todos
            SET is_completed = 1, completed_at = $1, updated_at = $1
            WHERE id = $2
            RETURNING *"#,
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        // A parseable recurrence rule rolls the due date forward and opens
        // the next occurrence with the same links.
        let rule = todo
            .recurrence
            .as_deref()
            .and_then(|r| r.parse::<Recurrence>().ok());

        let result = if let Some(rule) = rule {
            let base = todo.due_at.unwrap_or_else(|| Local::now().naive_local());
            let next_due = rule.next_due(base);

            let next: Todo = sqlx::query_as(
                r#"INSERT INTO todos (id, title, description, due_at, priority, is_completed, completed_at, recurrence, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, 0, NULL, $6, $7, $7)
                RETURNING *"#,
            )
            .bind(Uuid::now_v7())
            .bind(&completed.title)
            .bind(&completed.description)
            .bind(next_due)
            .bind(completed.priority.clone())
            .bind(&completed.recurrence)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                r#"INSERT INTO todo_projects (todo_id, project_id)
                SELECT $1, project_id FROM todo_projects WHERE todo_id = $2"#,
            )
            .bind(next.id)
            .bind(completed.id)
            .execute(&mut *tx)
            .await?;

            CompletionResult::Recurring { completed, next }
        } else {
            CompletionResult::Single(completed)
        };

        tx.commit().await?;
        Ok(result)
    }

    async fn reopen_todo(&self, id: Uuid) -> Result<Todo, CoreError> {
        let todo: Todo = sqlx::query_as(
            r#"UPDATE todos
            SET is_completed = 0, completed_at = NULL, updated_at = $1
            WHERE id = $2
            RETURNING *"#,
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Todo '{}'", id)))?;
        Ok(todo)
    }

    async fn delete_todo(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Todo '{}'", id)));
        }
        Ok(())
    }
}

async fn link_projects(
    tx: &mut Transaction<'_, Sqlite>,
    todo_id: Uuid,
    project_ids: &[Uuid],
) -> Result<(), CoreError> {
    for project_id in project_ids {
        sqlx::query("INSERT OR IGNORE INTO todo_projects (todo_id, project_id) VALUES ($1, $2)")
            .bind(todo_id)
            .bind(project_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
