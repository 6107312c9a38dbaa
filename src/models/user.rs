use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    // 10 to 15 digits, no separators
    pub static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^\d{10,15}$").unwrap();
}

/// A user row as stored in the database. Never serialized to the API directly;
/// responses use [`UserView`] so the password hash stays server-side.
#[derive(Debug, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user projection returned by the API and held in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `PUT /users/{id}`. The password is changed through no endpoint,
/// so it is absent here.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(regex(path = "PHONE_REGEX", message = "Invalid phone number"))]
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_update_user_validation() {
        let valid = UpdateUserInput {
            name: "Jordan".to_string(),
            email: "jordan@example.com".to_string(),
            phone: "0501234567".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_name = UpdateUserInput {
            name: "Jo".to_string(),
            email: "jordan@example.com".to_string(),
            phone: "0501234567".to_string(),
        };
        assert!(short_name.validate().is_err());

        let bad_email = UpdateUserInput {
            name: "Jordan".to_string(),
            email: "jordan-example.com".to_string(),
            phone: "0501234567".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let bad_phone = UpdateUserInput {
            name: "Jordan".to_string(),
            email: "jordan@example.com".to_string(),
            phone: "05-0123".to_string(),
        };
        assert!(bad_phone.validate().is_err());
    }
}
