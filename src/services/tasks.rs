use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::Cache;
use crate::error::AppError;
use crate::models::{StatusUpdate, Task, TaskInput, TaskQuery};
use crate::services::lists;

const TASK_COLUMNS: &str =
    "id, user_id, title, description, status, due_date, list_id, priority, created_at, updated_at";

/// Fetches a task and verifies the caller owns it.
///
/// An absent task is a `NotFound`; a task owned by someone else is a
/// `Forbidden`, never a `NotFound`.
async fn owned_task(pool: &PgPool, user_id: Uuid, task_id: Uuid) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1",
        TASK_COLUMNS
    ))
    .bind(task_id)
    .fetch_optional(pool)
    .await?;

    match task {
        None => Err(AppError::NotFound("Task not found".into())),
        Some(task) if task.user_id != user_id => Err(AppError::Forbidden(
            "You are not authorized to perform this action".into(),
        )),
        Some(task) => Ok(task),
    }
}

/// Ensures the referenced list exists and belongs to the caller.
async fn check_list_reference(
    pool: &PgPool,
    user_id: Uuid,
    list_id: Option<Uuid>,
) -> Result<(), AppError> {
    if let Some(list_id) = list_id {
        if !lists::list_exists(pool, user_id, list_id).await? {
            return Err(AppError::NotFound("List does not exist.".into()));
        }
    }
    Ok(())
}

pub async fn create_task(
    pool: &PgPool,
    cache: &dyn Cache,
    user_id: Uuid,
    input: &TaskInput,
) -> Result<Task, AppError> {
    check_list_reference(pool, user_id, input.list_id).await?;

    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, user_id, title, description, status, due_date, list_id, priority) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.status)
    .bind(input.due_date)
    .bind(input.list_id)
    .bind(input.priority)
    .fetch_one(pool)
    .await?;

    if let Some(list_id) = task.list_id {
        lists::invalidate_list_cache(cache, user_id, list_id).await;
    }

    Ok(task)
}

/// Lists the caller's tasks, newest first, honoring the optional filters.
///
/// Status, priority, list, and title-search filters are pushed into SQL the
/// same way across all of them; the due-date bucket is computed against the
/// current calendar day after the fetch.
pub async fn get_user_tasks(
    pool: &PgPool,
    user_id: Uuid,
    query: &TaskQuery,
) -> Result<Vec<Task>, AppError> {
    let mut sql = format!("SELECT {} FROM tasks WHERE user_id = $1", TASK_COLUMNS);
    let mut param_count = 2;

    if query.status.is_some() {
        sql.push_str(&format!(" AND status = ${}", param_count));
        param_count += 1;
    }
    if query.priority.is_some() {
        sql.push_str(&format!(" AND priority = ${}", param_count));
        param_count += 1;
    }
    if query.list_id.is_some() {
        sql.push_str(&format!(" AND list_id = ${}", param_count));
        param_count += 1;
    }
    if query.search.is_some() {
        sql.push_str(&format!(" AND title ILIKE ${}", param_count));
    }

    sql.push_str(" ORDER BY created_at DESC");

    let mut query_builder = sqlx::query_as::<_, Task>(&sql).bind(user_id);

    if let Some(status) = query.status {
        query_builder = query_builder.bind(status);
    }
    if let Some(priority) = query.priority {
        query_builder = query_builder.bind(priority);
    }
    if let Some(list_id) = query.list_id {
        query_builder = query_builder.bind(list_id);
    }
    if let Some(search) = &query.search {
        query_builder = query_builder.bind(format!("%{}%", search));
    }

    let mut tasks = query_builder.fetch_all(pool).await?;

    if let Some(due) = query.due {
        let today = Utc::now().date_naive();
        tasks.retain(|task| due.matches(task.due_date, today));
    }

    Ok(tasks)
}

pub async fn update_task(
    pool: &PgPool,
    cache: &dyn Cache,
    user_id: Uuid,
    task_id: Uuid,
    input: &TaskInput,
) -> Result<Task, AppError> {
    let existing = owned_task(pool, user_id, task_id).await?;
    check_list_reference(pool, user_id, input.list_id).await?;

    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks \
         SET title = $1, description = $2, status = $3, due_date = $4, list_id = $5, \
             priority = $6, updated_at = now() \
         WHERE id = $7 \
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.status)
    .bind(input.due_date)
    .bind(input.list_id)
    .bind(input.priority)
    .bind(task_id)
    .fetch_one(pool)
    .await?;

    // Both the previous and the new list composition are now stale.
    if let Some(list_id) = existing.list_id {
        lists::invalidate_list_cache(cache, user_id, list_id).await;
    }
    if task.list_id != existing.list_id {
        if let Some(list_id) = task.list_id {
            lists::invalidate_list_cache(cache, user_id, list_id).await;
        }
    }

    Ok(task)
}

pub async fn update_task_status(
    pool: &PgPool,
    cache: &dyn Cache,
    user_id: Uuid,
    task_id: Uuid,
    update: &StatusUpdate,
) -> Result<Task, AppError> {
    owned_task(pool, user_id, task_id).await?;

    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET status = $1, updated_at = now() WHERE id = $2 RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(update.status)
    .bind(task_id)
    .fetch_one(pool)
    .await?;

    if let Some(list_id) = task.list_id {
        lists::invalidate_list_cache(cache, user_id, list_id).await;
    }

    Ok(task)
}

pub async fn delete_task(
    pool: &PgPool,
    cache: &dyn Cache,
    user_id: Uuid,
    task_id: Uuid,
) -> Result<(), AppError> {
    let existing = owned_task(pool, user_id, task_id).await?;

    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_id)
        .execute(pool)
        .await?;

    if let Some(list_id) = existing.list_id {
        lists::invalidate_list_cache(cache, user_id, list_id).await;
    }

    Ok(())
}
