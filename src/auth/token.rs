use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Lifetime of an issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject of the token: the admin username.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// HS256 signing and verification keys derived from `JWT_SECRET`.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Signs a token for `subject` that expires one day after issuance.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry, returning the decoded claims.
    ///
    /// Any failure (malformed, wrong signature, expired) is `AppError::Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation_and_verification() {
        let keys = TokenKeys::new("test_secret_for_gen_verify");
        let token = keys.issue("admin").unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_token_expiration() {
        let keys = TokenKeys::new("test_secret_for_expiration");
        let issued = Utc::now() - Duration::hours(26);
        let claims_expired = Claims {
            sub: "admin".into(),
            iat: issued.timestamp() as usize,
            exp: (issued + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
        };
        let expired_token = encode(&Header::default(), &claims_expired, &keys.encoding).unwrap();

        match keys.verify(&expired_token) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("ExpiredSignature")),
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_invalid_token_signature() {
        let token = TokenKeys::new("one_secret").issue("admin").unwrap();

        match TokenKeys::new("a_completely_different_secret").verify(&token) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("InvalidSignature")),
            Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
            Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
        }
    }

    #[test]
    fn test_garbage_token_is_unauthorized() {
        let keys = TokenKeys::new("secret");
        assert!(matches!(
            keys.verify("not.a.token"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
