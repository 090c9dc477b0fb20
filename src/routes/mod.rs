//! HTTP surface of both services.
//!
//! Each service is described by a small struct holding its injected dependencies;
//! `configure` registers them as app data and mounts every route under `/api`.

pub mod admin;
pub mod health;
pub mod identity;
pub mod tasks;

use std::sync::Arc;

use actix_web::web;

use crate::{
    auth::{AdminCredentials, AuthMiddleware, PasswordHasher, TokenKeys},
    error::AppError,
    store::{TaskStore, UserStore},
};

/// Malformed or non-JSON bodies become a JSON `400` instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected request body: {}", err);
        AppError::BadRequest("Invalid request body".into()).into()
    })
}

/// A task id that does not parse cannot name an existing task.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Task not found".into()).into())
}

/// Signup/login backed by per-user hashed credentials.
#[derive(Clone)]
pub struct IdentityService {
    pub users: Arc<dyn UserStore>,
    pub hasher: PasswordHasher,
}

impl IdentityService {
    pub fn configure(self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.users))
            .app_data(web::Data::new(self.hasher))
            .app_data(json_config())
            .service(
                web::scope("/api")
                    .service(health::health)
                    .service(identity::signup)
                    .service(identity::login),
            );
    }
}

/// Admin login plus CRUD over the shared task list.
#[derive(Clone)]
pub struct TaskService {
    pub tasks: Arc<dyn TaskStore>,
    pub admin: AdminCredentials,
    pub keys: TokenKeys,
    /// When set, `/api/tasks` requires a bearer token from `/api/login`.
    pub require_token: bool,
}

impl TaskService {
    pub fn configure(self, cfg: &mut web::ServiceConfig) {
        let api = web::scope("/api")
            .service(health::health)
            .service(admin::login);

        let api = if self.require_token {
            api.service(tasks::scope().wrap(AuthMiddleware::new(self.keys.clone())))
        } else {
            api.service(tasks::scope())
        };

        cfg.app_data(web::Data::from(self.tasks))
            .app_data(web::Data::new(self.admin))
            .app_data(web::Data::new(self.keys))
            .app_data(json_config())
            .app_data(path_config())
            .service(api);
    }
}
