//! Hotel settings endpoints

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::settings::{HotelSettings, UpdateSettings},
    AppState,
};

use super::AuthenticatedUser;

/// Get hotel settings
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current settings", body = HotelSettings),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn get_settings(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<HotelSettings>> {
    claims.require_admin()?;

    let settings = state.services.settings.get_settings().await?;
    Ok(Json(settings))
}

/// Update hotel settings
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = UpdateSettings,
    responses(
        (status = 200, description = "Settings updated", body = HotelSettings),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateSettings>,
) -> AppResult<Json<HotelSettings>> {
    claims.require_admin()?;
    request.validate()?;

    let settings = state.services.settings.update_settings(&request).await?;
    Ok(Json(settings))
}
