//! Dashboard statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::task::TaskStats, AppState};

use super::AuthenticatedUser;

/// Dashboard statistics response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_assets: i64,
    /// Assets whose status is `maintenance`
    pub assets_in_maintenance: i64,
    /// Open schedules starting within the next week
    pub upcoming_schedules: i64,
    pub reports_generated: i64,
    /// Largest category first
    pub assets_by_category: Vec<CategoryCount>,
    /// Scheduled vs completed maintenance per month, oldest first
    pub maintenance_over_time: Vec<MonthlyMaintenance>,
    pub tasks: TaskStats,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryCount {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyMaintenance {
    /// YYYY-MM
    pub month: String,
    pub scheduled: i64,
    pub completed: i64,
}

/// Get dashboard statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_stats(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
