use actix_web::{get, web, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Liveness body shared by both services.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// `GET /health`: `{"status": "OK", "timestamp": <RFC 3339>}`. Never touches storage.
#[get("/health")]
pub async fn health() -> impl Responder {
    web::Json(HealthStatus {
        status: "OK",
        timestamp: Utc::now(),
    })
}
