//!
//! # Read-Through Cache
//!
//! Redis-backed cache for the two hot read paths: "user by id" and
//! "list-with-its-tasks by id". Entries are stored as serialized JSON under
//! deterministic keys with a fixed expiry, and explicitly evicted on mutation.
//!
//! The cache is strictly an accelerator: any cache failure degrades to a direct
//! store read (fail open) and is logged, never surfaced to the client.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

/// Expiry for cached user projections.
pub const USER_TTL: Duration = Duration::from_secs(60 * 5);
/// Expiry for cached list-with-tasks compositions.
pub const LIST_WITH_TASKS_TTL: Duration = Duration::from_secs(60 * 10);

/// Cache key for a user projection.
pub fn user_key(id: &Uuid) -> String {
    format!("user:{}", id)
}

/// Cache key for a list composed with its tasks, scoped by owner.
pub fn list_with_tasks_key(user_id: &Uuid, list_id: &Uuid) -> String {
    format!("listWithTasks:{}:{}", user_id, list_id)
}

/// Error produced by cache operations. Callers treat it as a degraded read,
/// never as a request failure.
#[derive(Debug)]
pub struct CacheError(String);

impl CacheError {
    pub fn new(msg: impl Into<String>) -> Self {
        CacheError(msg.into())
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cache error: {}", self.0)
    }
}

impl std::error::Error for CacheError {}

impl From<redis::RedisError> for CacheError {
    fn from(error: redis::RedisError) -> CacheError {
        CacheError(error.to_string())
    }
}

/// Key-value cache contract used by the service layer.
///
/// Implementations must be thread-safe (`Send + Sync`); the application shares a
/// single instance across workers as `Arc<dyn Cache>`.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Fetches the raw serialized value under `key`, if present.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key` with the given time-to-live.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Evicts `key`. Evicting an absent key is not an error.
    async fn del(&self, key: &str) -> Result<(), CacheError>;
}

/// Redis-backed `Cache` implementation over a multiplexed connection manager.
///
/// `ConnectionManager` reconnects on its own; cloning it is cheap and each
/// operation works on its own clone.
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_connection_manager().await?;

        Ok(RedisCache { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs()).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}

/// Evicts `key`, logging instead of failing when the cache is unavailable.
pub async fn invalidate(cache: &dyn Cache, key: &str) {
    if let Err(err) = cache.del(key).await {
        log::warn!("cache invalidation failed for {}: {}", key, err);
    }
}

/// Probes the cache under `key`; on a miss runs `load` against the authoritative
/// store and populates the cache with a `Some` result.
///
/// A malformed cached value is treated as a miss: the entry is evicted and the
/// store is queried. Cache errors on either side degrade to the loader result.
/// Absent values (`Ok(None)`) are never cached.
pub async fn read_through<T, F, Fut>(
    cache: &dyn Cache,
    key: &str,
    ttl: Duration,
    load: F,
) -> Result<Option<T>, AppError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<T>, AppError>>,
{
    match cache.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
            Ok(value) => return Ok(Some(value)),
            Err(err) => {
                log::warn!("evicting malformed cache entry {}: {}", key, err);
                invalidate(cache, key).await;
            }
        },
        Ok(None) => {}
        Err(err) => log::warn!("cache read failed for {}: {}", key, err),
    }

    let loaded = load().await?;

    if let Some(value) = &loaded {
        match serde_json::to_string(value) {
            Ok(raw) => {
                if let Err(err) = cache.set_ex(key, &raw, ttl).await {
                    log::warn!("cache write failed for {}: {}", key, err);
                }
            }
            Err(err) => log::warn!("failed to serialize cache entry {}: {}", key, err),
        }
    }

    Ok(loaded)
}
