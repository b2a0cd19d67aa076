/// Task CRUD endpoints
///
/// All endpoints require an access token and operate only on tasks owned
/// by the authenticated user. Ownership is enforced inside the queries
/// themselves, so a task belonging to someone else is indistinguishable
/// from one that does not exist.
///
/// # Endpoints
///
/// - `GET /tasks` - List the caller's tasks
/// - `POST /tasks` - Create a task
/// - `PUT /tasks/:id` - Update a task
/// - `DELETE /tasks/:id` - Delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::AppJson,
    routes::MessageResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ticklist_shared::{
    auth::middleware::CurrentUser,
    models::task::{CreateTask, Task, TaskStatus, UpdateTask},
};
use uuid::Uuid;

/// Request body for creating or updating a task
///
/// Title and due date are required by both operations but declared
/// optional here so their absence produces the documented 400 messages
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    /// Task title
    pub title: Option<String>,

    /// Optional free-form description
    pub description: Option<String>,

    /// Task status; defaults to pending on create, keeps the stored
    /// value on update
    pub status: Option<TaskStatus>,

    /// Due date as a calendar date, e.g. "2025-06-01"
    pub due_date: Option<NaiveDate>,
}

impl TaskRequest {
    /// Checks the two required fields, reporting the first one missing.
    /// A whitespace-only title counts as missing.
    fn required_fields(&self) -> ApiResult<(String, NaiveDate)> {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Validation("Title is required".to_string()))?;

        let due_date = self
            .due_date
            .ok_or_else(|| ApiError::Validation("Due date is mandatory".to_string()))?;

        Ok((title.to_string(), due_date))
    }
}

/// List tasks response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// The caller's tasks, newest first
    pub tasks: Vec<Task>,
}

/// List the caller's tasks
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// Authorization: Bearer <access_token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid access token
/// - `500 Internal Server Error`: Server error
pub async fn list_tasks(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = Task::list_by_owner(&state.db, user.id).await?;

    Ok(Json(TaskListResponse { tasks }))
}

/// Create a task
///
/// The authenticated user becomes the owner. Status defaults to pending
/// when omitted.
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Authorization: Bearer <access_token>
/// Content-Type: application/json
///
/// {
///   "title": "Water the plants",
///   "description": "Only the ones on the balcony",
///   "dueDate": "2025-06-01"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing title or due date
/// - `401 Unauthorized`: Missing or invalid access token
/// - `500 Internal Server Error`: Server error
pub async fn create_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(req): AppJson<TaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let (title, due_date) = req.required_fields()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            owner_id: user.id,
            title,
            description: req.description.map(|d| d.trim().to_string()),
            status: req.status,
            due_date,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task
///
/// Title and due date are always overwritten; description and status keep
/// their stored values when omitted. Validation runs before the ownership
/// lookup, so an invalid body never touches the stored task.
///
/// # Endpoint
///
/// ```text
/// PUT /tasks/:id
/// Authorization: Bearer <access_token>
/// Content-Type: application/json
///
/// {
///   "title": "Water the plants",
///   "status": "completed",
///   "dueDate": "2025-06-02"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing title or due date
/// - `401 Unauthorized`: Missing or invalid access token
/// - `404 Not Found`: No such task owned by the caller
/// - `500 Internal Server Error`: Server error
pub async fn update_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<TaskRequest>,
) -> ApiResult<Json<Task>> {
    let (title, due_date) = req.required_fields()?;

    let task = Task::update_owned(
        &state.db,
        id,
        user.id,
        UpdateTask {
            title,
            description: req.description.map(|d| d.trim().to_string()),
            status: req.status,
            due_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Delete a task
///
/// # Endpoint
///
/// ```text
/// DELETE /tasks/:id
/// Authorization: Bearer <access_token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid access token
/// - `404 Not Found`: No such task owned by the caller
/// - `500 Internal Server Error`: Server error
pub async fn delete_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Task::delete_owned(&state.db, id, user.id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
