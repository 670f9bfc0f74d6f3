//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    assets, auth, health, job_tasks, pages, reports, schedules, settings, stats, tasks, users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ramayana Hotel AMS API",
        version = "1.0.0",
        description = "Hotel asset and maintenance management REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&SecurityAddon),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::register,
        auth::logout,
        auth::me,
        auth::update_profile,
        auth::change_password,
        // Pages
        pages::open_page,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::get_asset_by_tag,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        // Tasks
        tasks::list_tasks,
        tasks::get_task_stats,
        tasks::get_task,
        tasks::create_task,
        tasks::advance_task,
        tasks::delete_task,
        // Schedules
        schedules::list_schedules,
        schedules::get_schedule,
        schedules::create_schedule,
        schedules::update_schedule_status,
        schedules::delete_schedule,
        // Job tasks
        job_tasks::list_job_tasks,
        job_tasks::start_job_task,
        job_tasks::complete_job_task,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        users::reset_password,
        // Reports
        reports::generate_report,
        reports::list_reports,
        reports::get_report,
        reports::export_report,
        // Stats
        stats::get_stats,
        // Settings
        settings::get_settings,
        settings::update_settings,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::RegisterRequest,
            auth::LoginResponse,
            pages::PageDescriptor,
            // Users
            crate::models::user::Role,
            crate::models::user::User,
            crate::models::user::UserQuery,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::user::UpdateProfile,
            crate::models::user::ChangePassword,
            users::CreateUserResponse,
            users::ResetPasswordResponse,
            // Assets
            crate::models::asset::AssetStatus,
            crate::models::asset::Asset,
            crate::models::asset::AssetDetails,
            crate::models::asset::AssetQuery,
            crate::models::asset::CreateAsset,
            crate::models::asset::UpdateAsset,
            // Tasks
            crate::models::task::TaskStatus,
            crate::models::task::TaskPriority,
            crate::models::task::MaintenanceTask,
            crate::models::task::TaskDetails,
            crate::models::task::TaskQuery,
            crate::models::task::CreateTask,
            crate::models::task::TaskStats,
            // Schedules
            crate::models::schedule::ScheduleStatus,
            crate::models::schedule::SchedulePriority,
            crate::models::schedule::MaintenanceSchedule,
            crate::models::schedule::ScheduleDetails,
            crate::models::schedule::ScheduleQuery,
            crate::models::schedule::CreateSchedule,
            crate::models::schedule::UpdateScheduleStatus,
            crate::models::schedule::CompleteJobTask,
            // Reports
            crate::models::report::ReportType,
            crate::models::report::AssetHistoryRecord,
            crate::models::report::MaintenanceLogRecord,
            crate::models::report::ReportRecords,
            crate::models::report::DateRange,
            crate::models::report::ReportEntry,
            crate::models::report::ReportSummary,
            crate::models::report::GenerateReport,
            crate::models::report::ExportFormat,
            // Stats
            stats::DashboardStats,
            stats::CategoryCount,
            stats::MonthlyMaintenance,
            // Settings
            crate::models::settings::HotelSettings,
            crate::models::settings::UpdateSettings,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Sign-in, sessions and own profile"),
        (name = "pages", description = "Role-based page access"),
        (name = "assets", description = "Asset inventory"),
        (name = "tasks", description = "Maintenance tasks"),
        (name = "schedules", description = "Maintenance calendar"),
        (name = "job-tasks", description = "Schedules assigned to the signed-in staff member"),
        (name = "users", description = "User management"),
        (name = "reports", description = "Report generation and export"),
        (name = "stats", description = "Dashboard statistics"),
        (name = "settings", description = "Hotel settings")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_paths_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/reports/{id}/export"));
        assert!(doc.paths.paths.contains_key("/job-tasks/{id}/complete"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
