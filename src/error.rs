//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used by every handler and store.
//! Each variant maps to exactly one HTTP status code, and every error response carries
//! the same JSON shape: `{"success": false, "error": "<message>"}`.
//!
//! Server-side failures (`InternalServerError`, `DatabaseError`) are logged when they are
//! turned into a response and the client only ever sees a generic message.
//! `From` implementations for `sqlx::Error`, `bcrypt::BcryptError`,
//! `jsonwebtoken::errors::Error` and `BlockingError` allow easy conversion with `?`.

use actix_web::{
    error::{BlockingError, ResponseError},
    http::StatusCode,
    HttpResponse,
};
use serde_json::json;
use thiserror::Error;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Message returned to clients in place of any server-side failure detail.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field was missing, empty, or the request body could not be parsed (HTTP 400).
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// Credentials or token were rejected (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The addressed row does not exist (HTTP 404).
    #[error("Not Found: {0}")]
    NotFound(String),
    /// A unique key already exists in storage (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),
    /// An unexpected server-side error (HTTP 500).
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
    /// An error originating from database operations (HTTP 500).
    #[error("Database Error: {0}")]
    DatabaseError(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.as_str(),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                INTERNAL_ERROR_MESSAGE
            }
        };

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": message
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`, a unique violation becomes `Conflict`,
/// and everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db_error)
                if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                AppError::Conflict(db_error.message().to_string())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Token decoding or validation failures are authentication failures.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// The blocking thread pool was shut down or the closure panicked.
impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// Driver-level errors for unit tests that cannot reach PostgreSQL.
#[cfg(test)]
pub(crate) mod testing {
    use std::borrow::Cow;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug)]
    pub struct StubDbError {
        code: &'static str,
        message: &'static str,
    }

    impl fmt::Display for StubDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl std::error::Error for StubDbError {}

    impl DatabaseError for StubDbError {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                super::UNIQUE_VIOLATION => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    pub fn db_error(code: &'static str, message: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(StubDbError { code, message }))
    }

    /// What PostgreSQL reports when `users.email` already holds the value.
    pub fn unique_violation() -> sqlx::Error {
        db_error(
            super::UNIQUE_VIOLATION,
            "duplicate key value violates unique constraint \"users_email_key\"",
        )
    }
}
