//! Maintenance schedule (calendar) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::schedule::{CreateSchedule, ScheduleDetails, ScheduleQuery, UpdateScheduleStatus},
    AppState,
};

use super::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/schedules",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Matching schedules", body = Vec<ScheduleDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<Vec<ScheduleDetails>>> {
    let schedules = state.services.schedules.list(&query).await?;
    Ok(Json(schedules))
}

#[utoipa::path(
    get,
    path = "/schedules/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule details", body = ScheduleDetails),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ScheduleDetails>> {
    let schedule = state.services.schedules.get_by_id(id).await?;
    Ok(Json(schedule))
}

/// Schedule maintenance on an asset
#[utoipa::path(
    post,
    path = "/schedules",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = CreateSchedule,
    responses(
        (status = 201, description = "Schedule created", body = ScheduleDetails),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<ScheduleDetails>)> {
    data.validate()?;

    let created = state.services.schedules.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Set a schedule's status
#[utoipa::path(
    put,
    path = "/schedules/{id}/status",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Schedule ID")
    ),
    request_body = UpdateScheduleStatus,
    responses(
        (status = 200, description = "Status updated", body = ScheduleDetails),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn update_schedule_status(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateScheduleStatus>,
) -> AppResult<Json<ScheduleDetails>> {
    let updated = state.services.schedules.set_status(id, request.status).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Schedule ID")
    ),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.schedules.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
