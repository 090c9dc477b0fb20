use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    /// Never empty or whitespace-only.
    pub text: String,
    pub completed: bool,
    /// Sole sort key, newest first.
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct NewTask {
    pub text: Option<String>,
}

impl NewTask {
    /// Returns the trimmed text, rejecting a missing or blank value.
    pub fn into_text(self) -> Result<String, AppError> {
        self.text
            .as_deref()
            .and_then(normalize_text)
            .ok_or_else(|| AppError::BadRequest("Task text is required".into()))
    }
}

/// Body of `PUT /api/tasks/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// A non-empty set of column changes for one task.
///
/// Each variant corresponds to exactly one fixed update statement, so an update
/// touching zero columns cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskChanges {
    Text(String),
    Completed(bool),
    TextAndCompleted { text: String, completed: bool },
}

impl TaskPatch {
    pub fn into_changes(self) -> Result<TaskChanges, AppError> {
        let text = match self.text {
            Some(raw) => Some(
                normalize_text(&raw)
                    .ok_or_else(|| AppError::BadRequest("Task text cannot be empty".into()))?,
            ),
            None => None,
        };

        match (text, self.completed) {
            (Some(text), Some(completed)) => Ok(TaskChanges::TextAndCompleted { text, completed }),
            (Some(text), None) => Ok(TaskChanges::Text(text)),
            (None, Some(completed)) => Ok(TaskChanges::Completed(completed)),
            (None, None) => Err(AppError::BadRequest("Nothing to update".into())),
        }
    }
}

impl TaskChanges {
    pub fn text(&self) -> Option<&str> {
        match self {
            TaskChanges::Text(text) | TaskChanges::TextAndCompleted { text, .. } => Some(text.as_str()),
            TaskChanges::Completed(_) => None,
        }
    }

    pub fn completed(&self) -> Option<bool> {
        match self {
            TaskChanges::Completed(completed)
            | TaskChanges::TextAndCompleted { completed, .. } => Some(*completed),
            TaskChanges::Text(_) => None,
        }
    }

    /// Applies the changes to an in-memory row.
    pub fn apply(&self, task: &mut Task) {
        if let Some(text) = self.text() {
            task.text = text.to_string();
        }
        if let Some(completed) = self.completed() {
            task.completed = completed;
        }
    }
}

fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
