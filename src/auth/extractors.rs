use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::Claims;
use crate::error::AppError;

/// The authenticated principal attached to a request after token verification.
///
/// This extractor is intended for routes protected by `AuthMiddleware`, which
/// validates the JWT and inserts the decoded `Claims` into request extensions.
///
/// If no claims are present (e.g. `AuthMiddleware` did not run), this extractor
/// returns an `AppError::Unauthorized` error.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        AuthenticatedUser {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            phone: claims.phone,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedUser::from(claims))),
            None => {
                // Reached only when the middleware is missing from the route.
                let err = AppError::Unauthorized(
                    "User not found in request. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    fn sample_claims(user_id: Uuid) -> Claims {
        Claims {
            sub: user_id,
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
            phone: "0501234567".to_string(),
            exp: 2_000_000_000,
        }
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_success() {
        let user_id = Uuid::new_v4();
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(sample_claims(user_id));

        let mut payload = Payload::None;
        let extracted = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(extracted.is_ok());

        let principal = extracted.unwrap();
        assert_eq!(principal.id, user_id);
        assert_eq!(principal.email, "test@example.com");
        assert_eq!(principal.name, "Test User");
        assert_eq!(principal.phone, "0501234567");
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();
        // No claims inserted into extensions

        let mut payload = Payload::None;
        let extracted_result = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(extracted_result.is_err());

        let err = extracted_result.unwrap_err();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
