//! Page access: which roles may open which dashboard page

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User, ADMIN_ONLY, ANY_ROLE, STAFF_ROLES},
    AppState,
};

use super::AuthenticatedUser;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// A dashboard page and the roles allowed to open it
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub slug: &'static str,
    pub title: &'static str,
    pub roles: &'static [Role],
}

pub const PAGES: &[Page] = &[
    Page { slug: "dashboard", title: "Dashboard", roles: ANY_ROLE },
    Page { slug: "assets", title: "Assets", roles: ANY_ROLE },
    Page { slug: "asset-management", title: "Asset Management", roles: ANY_ROLE },
    Page { slug: "maintenance", title: "Maintenance Schedule", roles: ANY_ROLE },
    Page { slug: "maintenance-tasks", title: "Maintenance Tasks", roles: ANY_ROLE },
    Page { slug: "job-tasks", title: "Job Tasks", roles: STAFF_ROLES },
    Page { slug: "reports", title: "Reports", roles: STAFF_ROLES },
    Page { slug: "reports-dashboard", title: "Reports Dashboard", roles: STAFF_ROLES },
    Page { slug: "users", title: "User Management", roles: ADMIN_ONLY },
    Page { slug: "settings", title: "Settings", roles: ADMIN_ONLY },
];

pub fn find_page(slug: &str) -> Option<&'static Page> {
    PAGES.iter().find(|p| p.slug == slug)
}

/// Page the caller may open
#[derive(Serialize, ToSchema)]
pub struct PageDescriptor {
    pub page: String,
    pub title: String,
    pub roles: Vec<Role>,
    pub user: User,
}

/// Open a page: redirects to the login page when signed out and to the
/// unauthorized page when the role is not allowed
#[utoipa::path(
    get,
    path = "/pages/{page}",
    tag = "pages",
    params(
        ("page" = String, Path, description = "Page slug, e.g. reports")
    ),
    responses(
        (status = 200, description = "Page may be opened", body = PageDescriptor),
        (status = 303, description = "Redirect to /login or /unauthorized"),
        (status = 404, description = "Unknown page")
    )
)]
pub async fn open_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: Option<AuthenticatedUser>,
) -> AppResult<Response> {
    let page = find_page(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown page {}", slug)))?;

    let Some(AuthenticatedUser(claims)) = user else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    if !claims.has_any_role(page.roles) {
        tracing::debug!(user_id = claims.user_id, page = page.slug, "Page access denied");
        return Ok(Redirect::to(UNAUTHORIZED_PATH).into_response());
    }

    let user = state.services.auth.me(&claims).await?;
    Ok(Json(PageDescriptor {
        page: page.slug.to_string(),
        title: page.title.to_string(),
        roles: page.roles.to_vec(),
        user,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_roles() {
        let reports = find_page("reports").unwrap();
        assert!(reports.roles.contains(&Role::Staff));
        assert!(!reports.roles.contains(&Role::Viewer));

        let users = find_page("users").unwrap();
        assert_eq!(users.roles, &[Role::Admin]);

        assert!(find_page("assets").unwrap().roles.contains(&Role::Viewer));
        assert!(find_page("nope").is_none());
    }
}
