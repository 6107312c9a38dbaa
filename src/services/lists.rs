use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{self, Cache};
use crate::error::AppError;
use crate::models::{List, ListInput, ListWithCount, ListWithTasks, Task};

const LIST_COLUMNS: &str = "id, user_id, name, color, created_at, updated_at";

pub async fn create_list(
    pool: &PgPool,
    user_id: Uuid,
    input: &ListInput,
) -> Result<List, AppError> {
    let list = sqlx::query_as::<_, List>(
        "INSERT INTO lists (id, user_id, name, color) VALUES ($1, $2, $3, $4) \
         RETURNING id, user_id, name, color, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&input.name)
    .bind(&input.color)
    .fetch_one(pool)
    .await?;
    Ok(list)
}

/// All lists owned by `user_id`, each with the number of tasks it holds.
pub async fn get_all_lists(pool: &PgPool, user_id: Uuid) -> Result<Vec<ListWithCount>, AppError> {
    let lists = sqlx::query_as::<_, ListWithCount>(
        "SELECT l.id, l.user_id, l.name, l.color, l.created_at, l.updated_at, \
                COUNT(t.id) AS task_count \
         FROM lists l LEFT JOIN tasks t ON t.list_id = l.id \
         WHERE l.user_id = $1 \
         GROUP BY l.id \
         ORDER BY l.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(lists)
}

/// Fetches a list composed with its tasks, read-through cached under
/// `listWithTasks:<userId>:<listId>` for ten minutes.
///
/// Returns `None` when the list does not exist or belongs to another user;
/// absent lists are never cached.
pub async fn get_list_with_tasks(
    pool: &PgPool,
    cache: &dyn Cache,
    user_id: Uuid,
    list_id: Uuid,
) -> Result<Option<ListWithTasks>, AppError> {
    let key = cache::list_with_tasks_key(&user_id, &list_id);
    cache::read_through(cache, &key, cache::LIST_WITH_TASKS_TTL, || async move {
        let list = sqlx::query_as::<_, List>(&format!(
            "SELECT {} FROM lists WHERE id = $1 AND user_id = $2",
            LIST_COLUMNS
        ))
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        let list = match list {
            Some(list) => list,
            None => return Ok(None),
        };

        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, description, status, due_date, list_id, priority, \
                    created_at, updated_at \
             FROM tasks WHERE list_id = $1 ORDER BY created_at DESC",
        )
        .bind(list_id)
        .fetch_all(pool)
        .await?;

        Ok(Some(ListWithTasks { list, tasks }))
    })
    .await
}

/// Whether `list_id` exists and is owned by `user_id`.
pub async fn list_exists(pool: &PgPool, user_id: Uuid, list_id: Uuid) -> Result<bool, AppError> {
    let list =
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM lists WHERE id = $1 AND user_id = $2")
            .bind(list_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    Ok(list.is_some())
}

/// Evicts the cached list-with-tasks composition after a task mutation touched
/// the list.
pub async fn invalidate_list_cache(cache: &dyn Cache, user_id: Uuid, list_id: Uuid) {
    cache::invalidate(cache, &cache::list_with_tasks_key(&user_id, &list_id)).await;
}
