use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

/// Represents the completion status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Pending,
    Completed,
}

/// Input structure for creating or updating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// The title of the task. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    /// An optional description. Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    /// The completion status of the task.
    pub status: TaskStatus,

    /// When the task is due.
    pub due_date: DateTime<Utc>,

    /// Optional reference to a list owned by the same user.
    pub list_id: Option<Uuid>,

    /// The priority of the task.
    pub priority: TaskPriority,
}

/// Payload for `PATCH /tasks/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// Identifier of the user who owns the task.
    pub user_id: Uuid,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// The completion status of the task.
    pub status: TaskStatus,
    /// When the task is due.
    pub due_date: DateTime<Utc>,
    /// Identifier of the list the task belongs to, if any.
    pub list_id: Option<Uuid>,
    /// The priority of the task.
    pub priority: TaskPriority,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Calendar-day bucket for a task's due date, relative to "today".
///
/// Buckets are mutually exclusive: a due date matches exactly one of them
/// unless it lies in the past.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DueFilter {
    /// Due on the same calendar day as today.
    Today,
    /// Due on the calendar day after today.
    Tomorrow,
    /// Due strictly after tomorrow.
    Upcoming,
}

impl DueFilter {
    /// Whether `due_date` falls into this bucket relative to `today`.
    /// Comparison is by calendar day, not by instant.
    pub fn matches(&self, due_date: DateTime<Utc>, today: NaiveDate) -> bool {
        let due_day = due_date.date_naive();
        let tomorrow = today + Days::new(1);
        match self {
            DueFilter::Today => due_day == today,
            DueFilter::Tomorrow => due_day == tomorrow,
            DueFilter::Upcoming => due_day > tomorrow,
        }
    }
}

/// Represents query parameters for filtering tasks when listing them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    /// Filter tasks by status.
    pub status: Option<TaskStatus>,
    /// Filter tasks by priority.
    pub priority: Option<TaskPriority>,
    /// Filter tasks by the list they belong to.
    pub list_id: Option<Uuid>,
    /// Search term matched against task titles (case-insensitive).
    pub search: Option<String>,
    /// Due-date bucket relative to the current calendar day.
    pub due: Option<DueFilter>,
}
