#![doc = "The `todoforge` library crate."]
#![doc = ""]
#![doc = "Shared code for the two todoforge services: configuration, the PostgreSQL pool,"]
#![doc = "storage backends, credential handling, routes and error handling. The binaries in"]
#![doc = "`src/bin` only read configuration and start an `HttpServer` around a service struct."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod startup;
pub mod store;

pub use crate::error::AppError;
pub use crate::routes::{IdentityService, TaskService};
