use crate::error::AppResult;
use crate::models::{CreateTodoRequest, Todo};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Repository Trait
///
/// The abstract contract for the to-do store. Handlers only see `Arc<dyn Repository>`, so the
/// Postgres implementation and the in-memory one are interchangeable.
#[async_trait]
pub trait Repository: Send + Sync {
    // All to-dos, ordered by id.
    async fn list_todos(&self) -> AppResult<Vec<Todo>>;
    async fn get_todo(&self, id: i64) -> AppResult<Option<Todo>>;
    // Inserts a new, not-done to-do stamped with the current time.
    async fn create_todo(&self, req: CreateTodoRequest) -> AppResult<Todo>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The `Repository` implementation backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// ensure_schema
    ///
    /// Creates the `todos` table when it does not exist yet. Local development convenience;
    /// production schemas are managed outside the service.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                done BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn list_todos(&self) -> AppResult<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, done, created_at FROM todos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn get_todo(&self, id: i64) -> AppResult<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, done, created_at FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn create_todo(&self, req: CreateTodoRequest) -> AppResult<Todo> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, done, created_at
            "#,
        )
        .bind(req.title)
        .bind(req.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }
}

/// InMemoryRepository
///
/// A process-local store used when no database is configured, and by the test suite.
/// Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryRepository {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn list_todos(&self) -> AppResult<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    async fn get_todo(&self, id: i64) -> AppResult<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|todo| todo.id == id).cloned())
    }

    async fn create_todo(&self, req: CreateTodoRequest) -> AppResult<Todo> {
        let mut todos = self.todos.write().await;
        // Rows are only appended, so the last id is the highest.
        let id = todos.last().map_or(1, |last| last.id + 1);
        let todo = Todo {
            id,
            title: req.title,
            description: req.description,
            done: false,
            created_at: Utc::now(),
        };
        todos.push(todo.clone());
        Ok(todo)
    }
}
