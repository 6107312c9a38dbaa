//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! various error conditions, from database issues to validation failures and ownership
//! violations.
//!
//! `AppError` implements `actix_web::error::ResponseError` so that handler errors are
//! converted into uniform `{statusCode, message}` JSON responses. `From` implementations
//! for `sqlx::Error`, `validator::ValidationErrors`, `jsonwebtoken::errors::Error`, and
//! `bcrypt::BcryptError` allow conversion with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// A malformed or conflicting request (HTTP 400), e.g. a duplicate email.
    BadRequest(String),
    /// Missing or invalid session token (HTTP 401).
    Unauthorized(String),
    /// Authenticated, but not the owner of the targeted entity (HTTP 403).
    Forbidden(String),
    /// A requested entity does not exist (HTTP 404).
    NotFound(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error originating from database operations (HTTP 500).
    /// The underlying cause is logged, never sent to the client.
    DatabaseError(String),
    /// Failed request-body validation (HTTP 400).
    /// Carries a map of field name to joined error messages.
    ValidationError(BTreeMap<String, String>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(fields) => {
                let joined = fields
                    .iter()
                    .map(|(field, msg)| format!("{}: {}", field, msg))
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "Validation Error: {}", joined)
            }
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Every classified error answers a `{statusCode, message}` body. Database and
/// unclassified internal errors are logged and answer a generic 500 body so that
/// internals never leak to the client.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "statusCode": 400,
                "message": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "statusCode": 401,
                "message": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "statusCode": 403,
                "message": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "statusCode": 404,
                "message": msg
            })),
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "statusCode": 500,
                    "message": "Internal Server Error"
                }))
            }
            AppError::DatabaseError(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "statusCode": 500,
                    "message": "Internal Server Error"
                }))
            }
            AppError::ValidationError(fields) => HttpResponse::BadRequest().json(json!({
                "statusCode": 400,
                "message": "Validation failed",
                "errors": fields
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` maps to `AppError::NotFound`; everything else becomes
/// `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`,
/// joining each field's messages into a single string.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut fields = BTreeMap::new();
        for (field, field_errors) in errors.field_errors() {
            let joined = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect::<Vec<_>>()
                .join(", ");
            fields.insert(field.to_string(), joined);
        }
        AppError::ValidationError(fields)
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
