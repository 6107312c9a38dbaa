use crate::{
    auth::AuthenticatedUser,
    cache::Cache,
    error::AppError,
    models::ListInput,
    services::lists,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's lists, each with its task count.
#[get("")]
pub async fn get_lists(
    pool: web::Data<PgPool>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let lists = lists::get_all_lists(&pool, principal.id).await?;
    Ok(HttpResponse::Ok().json(lists))
}

/// Creates a new list for the authenticated user.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `List` object as JSON.
/// - `400 Bad Request`: If input validation fails.
#[post("")]
pub async fn create_list(
    pool: web::Data<PgPool>,
    list_data: web::Json<ListInput>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    list_data.validate()?;

    let list = lists::create_list(&pool, principal.id, &list_data).await?;

    Ok(HttpResponse::Created().json(list))
}

/// Retrieves a list composed with its tasks.
///
/// Served through the `listWithTasks:<userId>:<listId>` cache entry with a
/// ten-minute expiry.
///
/// ## Responses:
/// - `200 OK`: The list with a `tasks` array.
/// - `404 Not Found`: If the list is absent or owned by another user.
#[get("/{id}/tasks")]
pub async fn get_list_tasks(
    pool: web::Data<PgPool>,
    cache: web::Data<dyn Cache>,
    list_id: web::Path<Uuid>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let composed = lists::get_list_with_tasks(&pool, &**cache, principal.id, list_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("List not found.".into()))?;

    Ok(HttpResponse::Ok().json(composed))
}
