use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::verify_token;
use crate::auth::TOKEN_COOKIE;

/// Authentication middleware.
///
/// Resolves the session token from the httpOnly `token` cookie, falling back to
/// an `Authorization: Bearer` header, verifies it, and inserts the decoded
/// `Claims` into request extensions for the `AuthenticatedUser` extractor.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Skip authentication for health check and the public auth endpoints
        let path = req.path();
        if path == "/health"
            || path.starts_with("/auth/login")
            || path.starts_with("/auth/register")
        {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token = req
            .cookie(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| {
                req.headers()
                    .get("Authorization")
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.strip_prefix("Bearer "))
                    .map(|value| value.to_string())
            });

        match token {
            Some(token) => match verify_token(&token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(_) => {
                    let app_err = crate::error::AppError::Unauthorized("Unauthorized".into());
                    Box::pin(async move { Err(app_err.into()) })
                }
            },
            None => {
                let app_err = crate::error::AppError::Unauthorized("Unauthorized".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
