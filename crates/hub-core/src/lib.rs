//! # Hub Core Library
//!
//! Core library for the hub project tracker: side-projects, todos, notes,
//! code snippets, grouped API keys, and a relationship map between
//! projects, persisted in SQLite.
//!
//! ## Features
//!
//! - **Natural-Language Due Dates**: todo titles like "finish report next
//!   tuesday" are split into a clean title and a resolved date
//! - **Urgency Classification**: due dates bucket into display tiers
//!   (overdue/today/soon/later) that drive color coding and sort order
//! - **Advanced Filtering**: query system with logical operators over
//!   status, project, tag, priority, and due-date urgency
//! - **Repository Pattern**: per-domain data access traits with a single
//!   SQLite implementation
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`dates`]: Due-date extraction, smart formatting, and urgency
//! - [`recurrence`]: Simple recurrence rules for repeating todos
//! - [`query`]: Filtering and query AST
//! - [`error`]: Error types with context
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use hub_core::{
//!     db, dates, error::CoreError,
//!     models::NewTodoData,
//!     repository::{SqliteRepository, TodoRepository},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), CoreError> {
//!     let pool = db::establish_connection("hub.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let extraction = dates::extract("finish report next tuesday");
//!     let todo = repo
//!         .add_todo(NewTodoData {
//!             title: extraction.clean_title,
//!             due_at: extraction.date,
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created todo: {}", todo.title);
//!
//!     Ok(())
//! }
//! ```

pub mod dates;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod recurrence;
pub mod repository;
