#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, test};
use serde_json::Value;
use todoforge::{
    auth::{password::MIN_COST, AdminCredentials, PasswordHasher, TokenKeys},
    store::{MemoryTaskStore, MemoryUserStore},
    IdentityService, TaskService,
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const JWT_SECRET: &str = "integration-test-secret";

pub fn identity_service() -> IdentityService {
    identity_service_with_cost(MIN_COST)
}

pub fn identity_service_with_cost(cost: u32) -> IdentityService {
    IdentityService {
        users: Arc::new(MemoryUserStore::default()),
        hasher: PasswordHasher::new(cost).expect("valid bcrypt cost"),
    }
}

pub fn task_service(require_token: bool) -> TaskService {
    TaskService {
        tasks: Arc::new(MemoryTaskStore::default()),
        admin: AdminCredentials::new(ADMIN_USERNAME, ADMIN_PASSWORD),
        keys: TokenKeys::new(JWT_SECRET),
        require_token,
    }
}

/// Reads the status and JSON body, keeping the raw body in assertion messages.
pub async fn status_and_json<B: MessageBody>(resp: ServiceResponse<B>) -> (u16, Value) {
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Response was not JSON ({}): {:?}",
            e,
            String::from_utf8_lossy(&body)
        )
    });
    (status, json)
}
