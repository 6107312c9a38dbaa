use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::Task;

/// Represents a list entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input structure for creating a list.
#[derive(Debug, Deserialize, Validate)]
pub struct ListInput {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 32, message = "Color must be between 1 and 32 characters"))]
    pub color: String,
}

/// A list joined with the number of tasks it holds, for `GET /lists`.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ListWithCount {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub task_count: i64,
}

/// A list composed with its tasks. This is the shape held in the cache under
/// `listWithTasks:<userId>:<listId>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListWithTasks {
    #[serde(flatten)]
    pub list: List,
    pub tasks: Vec<Task>,
}
