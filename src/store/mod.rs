//! Storage seams for the two services.
//!
//! Handlers depend on these traits through `web::Data<dyn ...>`; `postgres` is the
//! production backend and `memory` has the same observable behavior without a database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Task, TaskChanges, User, UserProfile};

pub use memory::{MemoryTaskStore, MemoryUserStore};
pub use postgres::{PgTaskStore, PgUserStore};

pub const DUPLICATE_EMAIL: &str = "Email already exists";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. A duplicate email is `AppError::Conflict`.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserProfile, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks, newest first.
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError>;

    async fn get_task(&self, id: i32) -> Result<Option<Task>, AppError>;

    /// Inserts an incomplete task with already-trimmed `text`.
    async fn create_task(&self, text: &str) -> Result<Task, AppError>;

    /// Returns `None` when no row has `id`.
    async fn update_task(&self, id: i32, changes: &TaskChanges) -> Result<Option<Task>, AppError>;

    /// Returns the removed row, or `None` when no row has `id`.
    async fn delete_task(&self, id: i32) -> Result<Option<Task>, AppError>;
}
