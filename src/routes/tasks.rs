use crate::{
    auth::AuthenticatedUser,
    cache::Cache,
    error::AppError,
    models::{StatusUpdate, TaskInput, TaskQuery},
    services::tasks,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's tasks, newest first.
///
/// ## Query Parameters:
/// - `status` (optional): "PENDING" or "COMPLETED".
/// - `priority` (optional): "HIGH", "MEDIUM", or "LOW".
/// - `listId` (optional): Only tasks belonging to this list.
/// - `search` (optional): Case-insensitive match against task titles.
/// - `due` (optional): "today", "tomorrow", or "upcoming" calendar-day bucket.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid session token.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    query_params: web::Query<TaskQuery>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = tasks::get_user_tasks(&pool, principal.id, &query_params).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// When the payload references a list, that list must exist and belong to the
/// caller; otherwise the request fails with 404 "List does not exist.".
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `400 Bad Request`: If input validation fails.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `404 Not Found`: If the referenced list is absent or foreign-owned.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    cache: web::Data<dyn Cache>,
    task_data: web::Json<TaskInput>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks::create_task(&pool, &**cache, principal.id, &task_data).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Updates an existing task owned by the caller.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `400 Bad Request`: If input validation fails.
/// - `403 Forbidden`: If the task belongs to another user.
/// - `404 Not Found`: If the task (or a referenced list) does not exist.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    cache: web::Data<dyn Cache>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks::update_task(
        &pool,
        &**cache,
        principal.id,
        task_id.into_inner(),
        &task_data,
    )
    .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Sets the completion status of a task owned by the caller.
///
/// ## Request Body:
/// `{"status": "PENDING" | "COMPLETED"}`
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `403 Forbidden`: If the task belongs to another user.
/// - `404 Not Found`: If the task does not exist.
#[patch("/{id}/status")]
pub async fn update_task_status(
    pool: web::Data<PgPool>,
    cache: web::Data<dyn Cache>,
    task_id: web::Path<Uuid>,
    status_data: web::Json<StatusUpdate>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks::update_task_status(
        &pool,
        &**cache,
        principal.id,
        task_id.into_inner(),
        &status_data,
    )
    .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task owned by the caller.
///
/// ## Responses:
/// - `200 OK`: `{message}` on successful deletion.
/// - `403 Forbidden`: If the task belongs to another user.
/// - `404 Not Found`: If the task does not exist.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    cache: web::Data<dyn Cache>,
    task_id: web::Path<Uuid>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    tasks::delete_task(&pool, &**cache, principal.id, task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" })))
}
