use crate::{
    auth::{AdminCredentials, LoginRequest, TokenKeys, TokenResponse},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Admin login
///
/// Compares the body against the configured admin pair and returns a token valid for
/// one day. Missing fields are treated like wrong ones.
#[post("/login")]
pub async fn login(
    admin: web::Data<AdminCredentials>,
    keys: web::Data<TokenKeys>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (username, password) = body.into_inner().into_parts().unwrap_or_default();

    if !admin.matches(&username, &password) {
        log::debug!("Rejected admin login");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = keys.issue(&username)?;
    Ok(HttpResponse::Ok().json(TokenResponse {
        success: true,
        token,
    }))
}
