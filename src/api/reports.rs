//! Report endpoints: generation, history and CSV/PDF export

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppResult,
    models::report::{ExportQuery, GenerateReport, ReportEntry, ReportSummary},
    AppState,
};

use super::AuthenticatedUser;

/// Generate a report over a date range and category
#[utoipa::path(
    post,
    path = "/reports",
    tag = "reports",
    security(("bearer_auth" = [])),
    request_body = GenerateReport,
    responses(
        (status = 201, description = "Report generated", body = ReportEntry),
        (status = 400, description = "Start or end date missing"),
        (status = 403, description = "Staff or admin role required")
    )
)]
pub async fn generate_report(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<GenerateReport>,
) -> AppResult<(StatusCode, Json<ReportEntry>)> {
    claims.require_staff()?;

    let report = state.services.reports.generate(&request).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Report history, newest first
#[utoipa::path(
    get,
    path = "/reports",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Generated reports", body = Vec<ReportSummary>)
    )
)]
pub async fn list_reports(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ReportSummary>>> {
    claims.require_staff()?;

    let reports = state.services.reports.list().await?;
    Ok(Json(reports))
}

#[utoipa::path(
    get,
    path = "/reports/{id}",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report with its rows", body = ReportEntry),
        (status = 404, description = "Report not found")
    )
)]
pub async fn get_report(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ReportEntry>> {
    claims.require_staff()?;

    let report = state.services.reports.get_by_id(id).await?;
    Ok(Json(report))
}

/// Download a generated report as CSV or PDF
#[utoipa::path(
    get,
    path = "/reports/{id}/export",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Report ID"),
        ExportQuery
    ),
    responses(
        (status = 200, description = "Report file (text/csv or application/pdf)"),
        (status = 404, description = "Report not found"),
        (status = 500, description = "Export failed")
    )
)]
pub async fn export_report(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    claims.require_staff()?;

    let exported = state.services.reports.export(id, query.format).await?;
    let disposition = format!("attachment; filename=\"{}\"", exported.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, exported.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.bytes,
    )
        .into_response())
}
