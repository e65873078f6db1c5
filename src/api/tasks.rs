//! Task endpoints.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;

use super::error::{ApiError, ErrorResponse};
use super::extractors::{ApiJson, ResourceId};
use crate::db::{Task, TaskRepo, TaskRequest};
use crate::utils::short_id;
use crate::AppState;

/// List all tasks
///
/// GET /tasks
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "The list of the tasks", body = Vec<Task>),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = TaskRepo::new(&state.db).list_all().await?;
    Ok(Json(tasks))
}

/// Get a task by id
///
/// GET /tasks/:id
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "The task id")),
    responses(
        (status = 200, description = "The task description by id", body = Task),
        (status = 404, description = "The task was not found", body = ErrorResponse),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<Task>, ApiError> {
    let task = TaskRepo::new(&state.db).get_by_id(&id).await?;
    Ok(Json(task))
}

/// Create a new task; the id is generated server-side
///
/// POST /tasks
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "Tasks",
    request_body = TaskRequest,
    responses(
        (status = 200, description = "The task was successfully created", body = Task),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<TaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = req.into_task(short_id());
    let created = TaskRepo::new(&state.db).create(&task).await?;

    info!(task_id = %created.id, "Task created");
    Ok(Json(created))
}

/// Overwrite a task
///
/// PUT /tasks/:id
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "The task id")),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "The task was updated", body = Task),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 404, description = "The task was not found", body = ErrorResponse),
        (status = 500, description = "Some error happened", body = ErrorResponse)
    )
)]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
    ApiJson(req): ApiJson<TaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = req.into_task(id);
    let updated = TaskRepo::new(&state.db).update(&task).await?;

    info!(task_id = %updated.id, "Task updated");
    Ok(Json(updated))
}

/// Delete a task
///
/// DELETE /tasks/:id
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "Tasks",
    params(("id" = String, Path, description = "The task id")),
    responses(
        (status = 200, description = "The task was deleted"),
        (status = 404, description = "The task was not found", body = ErrorResponse),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, ApiError> {
    TaskRepo::new(&state.db).delete(&id).await?;

    info!(task_id = %id, "Task deleted");
    Ok(StatusCode::OK)
}
