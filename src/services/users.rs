use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{self, Cache};
use crate::error::AppError;
use crate::models::{UpdateUserInput, User, UserView};

/// Fetches the user projection, read-through cached under `user:<id>` for five
/// minutes.
pub async fn get_user(
    pool: &PgPool,
    cache: &dyn Cache,
    id: Uuid,
) -> Result<Option<UserView>, AppError> {
    let key = cache::user_key(&id);
    cache::read_through(cache, &key, cache::USER_TTL, || async move {
        let user = sqlx::query_as::<_, UserView>(
            "SELECT id, name, email, phone, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    })
    .await
}

/// Fetches the full user row (including the password hash) for login.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, phone, created_at, updated_at \
         FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AppError> {
    let existing = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(existing.is_some())
}

/// Whether `email` already belongs to a user other than `id`.
pub async fn email_taken_by_other(
    pool: &PgPool,
    id: Uuid,
    email: &str,
) -> Result<bool, AppError> {
    let existing =
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM users WHERE email = $1 AND id <> $2")
            .bind(email)
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(existing.is_some())
}

pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
    phone: &str,
) -> Result<Uuid, AppError> {
    let (id,) = sqlx::query_as::<_, (Uuid,)>(
        "INSERT INTO users (id, name, email, password_hash, phone) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(phone)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Updates name/email/phone and evicts the cached projection so the next read
/// returns fresh data.
pub async fn update_user(
    pool: &PgPool,
    cache: &dyn Cache,
    id: Uuid,
    input: &UpdateUserInput,
) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE users SET name = $1, email = $2, phone = $3, updated_at = now() WHERE id = $4",
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(id)
    .execute(pool)
    .await?;

    cache::invalidate(cache, &cache::user_key(&id)).await;
    Ok(())
}
