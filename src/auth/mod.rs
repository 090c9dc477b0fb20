pub mod admin;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserProfile;

// Re-export necessary items
pub use admin::AdminCredentials;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, TokenKeys};

/// Payload for `POST /api/signup`.
///
/// Both fields are optional at the serde level so that a missing field is reported
/// with the same 400 message as an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

impl SignupRequest {
    pub fn into_parts(self) -> Option<(String, String)> {
        Some((self.email?, self.password?))
    }
}

/// Payload for `POST /api/login` on both services.
///
/// On the identity service `username` holds the account email.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required, length(min = 1))]
    pub username: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn into_parts(self) -> Option<(String, String)> {
        Some((self.username?, self.password?))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub success: bool,
    pub user: UserProfile,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub user_id: i32,
    pub email: String,
}

/// Returned by the task service's admin login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_presence() {
        let valid: SignupRequest =
            serde_json::from_str(r#"{"email": "a@example.com", "password": "pw"}"#).unwrap();
        assert!(valid.validate().is_ok());
        assert_eq!(
            valid.into_parts(),
            Some(("a@example.com".to_string(), "pw".to_string()))
        );

        let missing: SignupRequest = serde_json::from_str(r#"{"email": "a@example.com"}"#).unwrap();
        assert!(missing.validate().is_err());

        let empty: SignupRequest =
            serde_json::from_str(r#"{"email": "", "password": "pw"}"#).unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_login_request_presence() {
        let missing: LoginRequest = serde_json::from_str(r#"{"password": "pw"}"#).unwrap();
        assert!(missing.validate().is_err());
        assert!(missing.into_parts().is_none());
    }

    #[test]
    fn test_login_response_uses_camel_case() {
        let json = serde_json::to_value(LoginResponse {
            success: true,
            user_id: 7,
            email: "a@example.com".into(),
        })
        .unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["email"], "a@example.com");
    }
}
