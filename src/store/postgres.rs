use async_trait::async_trait;
use sqlx::PgPool;

use super::{TaskStore, UserStore, DUPLICATE_EMAIL};
use crate::error::AppError;
use crate::models::{Task, TaskChanges, User, UserProfile};

const SELECT_TASKS: &str =
    "SELECT id, text, completed, created_at FROM tasks ORDER BY created_at DESC, id DESC";

const SELECT_TASK: &str = "SELECT id, text, completed, created_at FROM tasks WHERE id = $1";

const INSERT_TASK: &str = "INSERT INTO tasks (text, completed) VALUES ($1, FALSE)
     RETURNING id, text, completed, created_at";

const UPDATE_TEXT: &str = "UPDATE tasks SET text = $1 WHERE id = $2
     RETURNING id, text, completed, created_at";

const UPDATE_COMPLETED: &str = "UPDATE tasks SET completed = $1 WHERE id = $2
     RETURNING id, text, completed, created_at";

const UPDATE_TEXT_AND_COMPLETED: &str = "UPDATE tasks SET text = $1, completed = $2 WHERE id = $3
     RETURNING id, text, completed, created_at";

const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = $1
     RETURNING id, text, completed, created_at";

/// The fixed statement for a set of changes. Parameters are the changed values in
/// declaration order followed by the task id.
pub fn update_statement(changes: &TaskChanges) -> &'static str {
    match changes {
        TaskChanges::Text(_) => UPDATE_TEXT,
        TaskChanges::Completed(_) => UPDATE_COMPLETED,
        TaskChanges::TextAndCompleted { .. } => UPDATE_TEXT_AND_COMPLETED,
    }
}

#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(SELECT_TASKS)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn get_task(&self, id: i32) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(SELECT_TASK)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn create_task(&self, text: &str) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(INSERT_TASK)
            .bind(text)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn update_task(&self, id: i32, changes: &TaskChanges) -> Result<Option<Task>, AppError> {
        let query = sqlx::query_as::<_, Task>(update_statement(changes));
        let query = match changes {
            TaskChanges::Text(text) => query.bind(text.as_str()),
            TaskChanges::Completed(completed) => query.bind(*completed),
            TaskChanges::TextAndCompleted { text, completed } => {
                query.bind(text.as_str()).bind(*completed)
            }
        };

        let task = query.bind(id).fetch_optional(&self.pool).await?;
        Ok(task)
    }

    async fn delete_task(&self, id: i32) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(DELETE_TASK)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserProfile, AppError> {
        sqlx::query_as::<_, UserProfile>(
            "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id, email",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(duplicate_email)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>("SELECT id, email, password FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }
}

/// Reports a unique violation on `users.email` with the client-facing message.
fn duplicate_email(error: sqlx::Error) -> AppError {
    match AppError::from(error) {
        AppError::Conflict(_) => AppError::Conflict(DUPLICATE_EMAIL.into()),
        other => other,
    }
}
