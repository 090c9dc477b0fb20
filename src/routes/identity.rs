use crate::{
    auth::{LoginRequest, LoginResponse, PasswordHasher, SignupRequest, SignupResponse},
    error::AppError,
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}

/// Register a new user
///
/// Hashes the password and stores the account. Responds `201` with the new user's
/// id and email, `400` when a field is missing or empty, `409` when the email is taken.
#[post("/signup")]
pub async fn signup(
    users: web::Data<dyn UserStore>,
    hasher: web::Data<PasswordHasher>,
    body: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    let missing = || AppError::BadRequest("Email and password are required".into());
    body.validate().map_err(|_| missing())?;
    let (email, password) = body.into_inner().into_parts().ok_or_else(missing)?;

    let password_hash = hasher.hash(password).await?;
    let user = users.create_user(&email, &password_hash).await?;
    log::info!("Registered user {}", user.id);

    Ok(HttpResponse::Created().json(SignupResponse {
        success: true,
        user,
    }))
}

/// Login user
///
/// Checks the password against the stored hash. An unknown email and a wrong password
/// produce the same `401` response. No session artifact is issued.
#[post("/login")]
pub async fn login(
    users: web::Data<dyn UserStore>,
    hasher: web::Data<PasswordHasher>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let missing = || AppError::BadRequest("Username and password required".into());
    body.validate().map_err(|_| missing())?;
    let (username, password) = body.into_inner().into_parts().ok_or_else(missing)?;

    let user = match users.find_by_email(&username).await? {
        Some(user) => user,
        None => {
            log::debug!("Login attempt for unknown account");
            hasher.verify_decoy(password).await?;
            return Err(invalid_credentials());
        }
    };

    if !hasher.verify(password, user.password.clone()).await? {
        log::debug!("Wrong password for user {}", user.id);
        return Err(invalid_credentials());
    }

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        user_id: user.id,
        email: user.email,
    }))
}
