pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::PHONE_REGEX;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Name of the httpOnly cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address. Must be a valid email format.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// User's password. Must be at least 6 characters long.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account.
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    pub name: String,
    /// Email address for the new account. Must be a valid email format.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password for the new account. Must be at least 6 characters long.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Phone number, digits only.
    #[validate(regex(path = "PHONE_REGEX", message = "Invalid phone number"))]
    pub phone: String,
}

/// Response body after successful registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: Uuid,
}
