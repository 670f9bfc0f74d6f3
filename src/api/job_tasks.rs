//! Job task endpoints: the signed-in staff member's own schedules

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::schedule::{CompleteJobTask, ScheduleDetails},
    AppState,
};

use super::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/job-tasks",
    tag = "job-tasks",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Schedules assigned to the caller", body = Vec<ScheduleDetails>),
        (status = 403, description = "Staff or admin role required")
    )
)]
pub async fn list_job_tasks(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ScheduleDetails>>> {
    claims.require_staff()?;

    let jobs = state.services.schedules.job_tasks(claims.user_id).await?;
    Ok(Json(jobs))
}

/// Start a pending job task
#[utoipa::path(
    post,
    path = "/job-tasks/{id}/start",
    tag = "job-tasks",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Job task started", body = ScheduleDetails),
        (status = 403, description = "Not assigned to the caller"),
        (status = 422, description = "Job task is not pending")
    )
)]
pub async fn start_job_task(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ScheduleDetails>> {
    claims.require_staff()?;

    let job = state.services.schedules.start_job(id, claims.user_id).await?;
    Ok(Json(job))
}

/// Complete an in-progress job task
#[utoipa::path(
    post,
    path = "/job-tasks/{id}/complete",
    tag = "job-tasks",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Schedule ID")
    ),
    request_body = CompleteJobTask,
    responses(
        (status = 200, description = "Job task completed", body = ScheduleDetails),
        (status = 403, description = "Not assigned to the caller"),
        (status = 422, description = "Job task is not in progress")
    )
)]
pub async fn complete_job_task(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CompleteJobTask>,
) -> AppResult<Json<ScheduleDetails>> {
    claims.require_staff()?;

    let job = state
        .services
        .schedules
        .complete_job(id, claims.user_id, request.notes)
        .await?;
    Ok(Json(job))
}
