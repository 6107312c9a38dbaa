use crate::{
    auth::AuthenticatedUser,
    cache::Cache,
    error::AppError,
    models::UpdateUserInput,
    services::users,
};
use actix_web::{get, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves a user's profile projection.
///
/// The path id must equal the authenticated caller's id; reads go through the
/// `user:<id>` cache entry.
///
/// ## Responses:
/// - `200 OK`: The cached `UserView` as JSON.
/// - `403 Forbidden`: When requesting a different user's profile.
/// - `404 Not Found`: If the user does not exist.
#[get("/{id}")]
pub async fn get_user(
    pool: web::Data<PgPool>,
    cache: web::Data<dyn Cache>,
    user_id: web::Path<Uuid>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let user_id = user_id.into_inner();
    if user_id != principal.id {
        return Err(AppError::Forbidden(
            "You don't have access to do this action.".into(),
        ));
    }

    let user = users::get_user(&pool, &**cache, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(user))
}

/// Updates the caller's name, email, and phone.
///
/// Rejects an email already associated with another user, and evicts the
/// cached projection on success.
///
/// ## Responses:
/// - `200 OK`: `{message, id}`.
/// - `400 Bad Request`: Validation failure or email taken by another user.
/// - `403 Forbidden`: When targeting a different user.
/// - `404 Not Found`: If the user does not exist.
#[put("/{id}")]
pub async fn update_user(
    pool: web::Data<PgPool>,
    cache: web::Data<dyn Cache>,
    user_id: web::Path<Uuid>,
    user_data: web::Json<UpdateUserInput>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;

    let user_id = user_id.into_inner();
    if user_id != principal.id {
        return Err(AppError::Forbidden(
            "You don't have access to do this action.".into(),
        ));
    }

    users::get_user(&pool, &**cache, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if users::email_taken_by_other(&pool, user_id, &user_data.email).await? {
        return Err(AppError::BadRequest("Cannot use this email.".into()));
    }

    users::update_user(&pool, &**cache, user_id, &user_data).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "User updated successfully",
        "id": user_id
    })))
}
