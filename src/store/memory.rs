use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{TaskStore, UserStore, DUPLICATE_EMAIL};
use crate::error::AppError;
use crate::models::{Task, TaskChanges, User, UserProfile};

/// Rows plus the next SERIAL value, mirroring a table with a generated id.
#[derive(Debug)]
struct Table<T> {
    next_id: i32,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Task storage held in process memory. Each operation is atomic under one lock.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    table: RwLock<Table<Task>>,
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let table = self.table.read().await;
        let mut tasks = table.rows.clone();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tasks)
    }

    async fn get_task(&self, id: i32) -> Result<Option<Task>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|task| task.id == id).cloned())
    }

    async fn create_task(&self, text: &str) -> Result<Task, AppError> {
        let mut table = self.table.write().await;
        let task = Task {
            id: table.allocate_id(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now(),
        };
        table.rows.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: i32, changes: &TaskChanges) -> Result<Option<Task>, AppError> {
        let mut table = self.table.write().await;
        Ok(table.rows.iter_mut().find(|task| task.id == id).map(|task| {
            changes.apply(task);
            task.clone()
        }))
    }

    async fn delete_task(&self, id: i32) -> Result<Option<Task>, AppError> {
        let mut table = self.table.write().await;
        Ok(table
            .rows
            .iter()
            .position(|task| task.id == id)
            .map(|index| table.rows.remove(index)))
    }
}

/// User storage held in process memory, with the same email uniqueness as the
/// `users_email_key` constraint.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: RwLock<Table<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserProfile, AppError> {
        let mut table = self.table.write().await;
        if table.rows.iter().any(|user| user.email == email) {
            return Err(AppError::Conflict(DUPLICATE_EMAIL.into()));
        }

        let user = User {
            id: table.allocate_id(),
            email: email.to_string(),
            password: password_hash.to_string(),
        };
        table.rows.push(user.clone());
        Ok(user.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|user| user.email == email).cloned())
    }
}
