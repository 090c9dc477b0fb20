use std::sync::Arc;

use actix_web::web;

use crate::error::AppError;

/// bcrypt cost used when `BCRYPT_COST` is not configured.
pub const DEFAULT_COST: u32 = 10;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Salted bcrypt hashing with a fixed cost.
///
/// Hashing and verification run on actix's blocking thread pool so a slow hash
/// never stalls the worker that is serving other requests.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Hash of a throwaway password at `cost`, verified against when no stored hash exists.
    decoy_hash: Arc<str>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, AppError> {
        let decoy_hash = hash_password("decoy-password", cost)?;
        Ok(Self {
            cost,
            decoy_hash: decoy_hash.into(),
        })
    }

    pub async fn hash(&self, password: String) -> Result<String, AppError> {
        let cost = self.cost;
        web::block(move || hash_password(&password, cost)).await?
    }

    /// Compares `password` against a stored bcrypt hash.
    pub async fn verify(&self, password: String, hashed_password: String) -> Result<bool, AppError> {
        web::block(move || verify_password(&password, &hashed_password)).await?
    }

    /// Spends the same bcrypt work as `verify` for an account that does not exist,
    /// so the response time does not reveal whether the email is registered.
    pub async fn verify_decoy(&self, password: String) -> Result<(), AppError> {
        let decoy_hash = self.decoy_hash.clone();
        web::block(move || verify_password(&password, &decoy_hash)).await??;
        Ok(())
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(password, cost)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password, MIN_COST).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same", MIN_COST).unwrap();
        let second = hash_password("same", MIN_COST).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_default_cost_is_ten() {
        let hashed = hash_password("pw", DEFAULT_COST).unwrap();
        assert!(hashed.starts_with("$2b$10$"));
    }

    #[test]
    fn test_invalid_cost_is_rejected() {
        assert!(PasswordHasher::new(MAX_COST + 1).is_err());
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        match verify_password("test_password123", "invalidhashformat") {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to verify password"));
            }
            Ok(false) => {}
            Ok(true) => panic!("Password verification should fail for invalid hash format"),
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[actix_rt::test]
    async fn test_hasher_runs_on_blocking_pool() {
        let hasher = PasswordHasher::new(MIN_COST).unwrap();
        let hashed = hasher.hash("pool_password".to_string()).await.unwrap();
        assert!(hashed.starts_with("$2b$04$"));

        assert!(hasher
            .verify("pool_password".to_string(), hashed.clone())
            .await
            .unwrap());
        assert!(!hasher.verify("other".to_string(), hashed).await.unwrap());
    }

    #[actix_rt::test]
    async fn test_decoy_uses_configured_cost() {
        let hasher = PasswordHasher::new(MIN_COST).unwrap();
        assert!(hasher.decoy_hash.starts_with("$2b$04$"));
        assert!(hasher.verify_decoy("anything".to_string()).await.is_ok());
    }
}
