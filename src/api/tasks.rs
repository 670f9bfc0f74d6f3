//! Maintenance task endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::task::{CreateTask, TaskDetails, TaskQuery, TaskStats},
    AppState,
};

use super::AuthenticatedUser;

/// List tasks, newest first
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(TaskQuery),
    responses(
        (status = 200, description = "Matching tasks", body = Vec<TaskDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<TaskQuery>,
) -> AppResult<Json<Vec<TaskDetails>>> {
    let tasks = state.services.tasks.list(&query).await?;
    Ok(Json(tasks))
}

/// Task counters (total, in progress, completed, overdue)
#[utoipa::path(
    get,
    path = "/tasks/stats",
    tag = "tasks",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Task counters", body = TaskStats)
    )
)]
pub async fn get_task_stats(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<TaskStats>> {
    let stats = state.services.tasks.stats().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task details", body = TaskDetails),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<TaskDetails>> {
    let task = state.services.tasks.get_by_id(id).await?;
    Ok(Json(task))
}

/// Create a task; it starts in the Created status
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    security(("bearer_auth" = [])),
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = TaskDetails),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<TaskDetails>)> {
    data.validate()?;

    let created = state.services.tasks.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Move a task to its next status
#[utoipa::path(
    post,
    path = "/tasks/{id}/advance",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task advanced", body = TaskDetails),
        (status = 404, description = "Task not found"),
        (status = 422, description = "Task is already verified")
    )
)]
pub async fn advance_task(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<TaskDetails>> {
    let task = state.services.tasks.advance(id).await?;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.tasks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
