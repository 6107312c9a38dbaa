use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a JWT (JSON Web Token).
///
/// Beyond the subject, the claims carry the full authenticated principal
/// (email, name, phone) so `GET /auth/profile` needs no store round trip.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: Uuid,
    /// The user's email address.
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// The user's phone number.
    pub phone: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Generates a JWT for the given user identity.
///
/// The token is set to expire in 24 hours. It requires the `JWT_SECRET`
/// environment variable to be set for signing.
///
/// # Returns
/// A `Result` containing the JWT string if successful.
/// Returns `AppError::InternalServerError` if `JWT_SECRET` is not set or if
/// token encoding fails.
pub fn generate_token(
    user_id: Uuid,
    email: &str,
    name: &str,
    phone: &str,
) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        exp: expiration,
    };

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string and decodes its claims.
///
/// It requires the `JWT_SECRET` environment variable to be set for verifying
/// the token signature. Default validation checks are applied (signature,
/// expiration).
///
/// # Returns
/// A `Result` containing the decoded `Claims` if the token is valid.
/// Returns `AppError::InternalServerError` if `JWT_SECRET` is not set.
/// Returns `AppError::Unauthorized` if the token is malformed, its signature is
/// invalid, or it has expired.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}
