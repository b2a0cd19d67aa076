/// Task model and database operations
///
/// This module provides the Task model representing a to-do item, plus the
/// owner-scoped operations behind the task routes.
///
/// Every operation that touches an existing task filters on
/// `id AND owner_id` in a single statement. A task belonging to someone else
/// is indistinguishable from a missing one: both come back as no row, which
/// the API reports as 404. There is deliberately no fetch-then-check split.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'in-progress', 'completed');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'pending',
///     due_date DATE NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
/// use ticklist_shared::models::task::{CreateTask, Task};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     owner_id: Uuid::new_v4(),
///     title: "Buy milk".to_string(),
///     description: None,
///     status: None, // defaults to pending
///     due_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
/// }).await?;
///
/// println!("Created task: {}", task.id);
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task progress status
///
/// Statuses are freely assignable by the owner; there is no enforced
/// ordering between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started yet (the default for new tasks)
    #[default]
    Pending,

    /// Work has begun
    InProgress,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

/// Task model representing a single to-do item
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// User who owns this task; immutable after creation
    pub owner_id: Uuid,

    /// Short title (required, non-empty)
    pub title: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Current progress status
    pub status: TaskStatus,

    /// Calendar date the task is due
    pub due_date: NaiveDate,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Owner of the new task
    pub owner_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status; pending when omitted
    pub status: Option<TaskStatus>,

    /// Due date
    pub due_date: NaiveDate,
}

/// Input for updating an existing task
///
/// Title and due date are always written; description and status fall back
/// to the stored values when None.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    /// New title (required)
    pub title: String,

    /// New description, or None to keep the stored one
    pub description: Option<String>,

    /// New status, or None to keep the stored one
    pub status: Option<TaskStatus>,

    /// New due date (always overwritten, no fallback)
    pub due_date: NaiveDate,
}

impl Task {
    /// Creates a new task
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - Task creation data
    ///
    /// # Returns
    ///
    /// The newly created task with generated ID and timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description, status, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, title, description, status, due_date,
                      created_at, updated_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status.unwrap_or_default())
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks belonging to an owner, newest first
    ///
    /// Returns the owner's full task set; pagination and filtering are a
    /// client concern.
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, status, due_date,
                   created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task, scoped to its owner
    ///
    /// Title and due date are overwritten unconditionally; description and
    /// status keep their stored values when the corresponding input is None
    /// (COALESCE in the statement itself).
    ///
    /// # Returns
    ///
    /// The updated task, or None if no task with that id belongs to
    /// `owner_id` — missing and not-owned are indistinguishable here.
    pub async fn update_owned(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $3,
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                due_date = $6,
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, description, status, due_date,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.due_date)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, scoped to its owner
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if no task with that id belongs to
    /// `owner_id`
    pub async fn delete_owned(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
