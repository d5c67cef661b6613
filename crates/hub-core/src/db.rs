use crate::error::CoreError;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;

// Re-export the pool for use in other parts of the core crate
pub use sqlx::SqlitePool as DbPool;

/// Establishes a connection pool to the SQLite database and runs migrations.
///
/// The database file and its parent directory are created when missing.
pub async fn establish_connection(db_path: &str) -> Result<SqlitePool, CoreError> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    if !Path::new(db_path).exists() {
        tokio::fs::File::create(db_path).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_path)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
