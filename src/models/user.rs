use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `users` table. `password` is the bcrypt hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password: String,
}

/// The public view of a user; never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: i32,
    pub email: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_drops_password_hash() {
        let user = User {
            id: 3,
            email: "test@example.com".to_string(),
            password: "$2b$10$hash".to_string(),
        };

        let json = serde_json::to_value(UserProfile::from(user)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "email": "test@example.com" }));
    }
}
