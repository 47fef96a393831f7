//! Pre-handler authorization guards.
//!
//! Each guard is an explicit, independently testable predicate that a handler
//! runs before touching any collaborator. A guard failure short-circuits the
//! request with the denial response; the handler body is never reached in
//! spirit — no service call happens after a denial.

use axum::http::StatusCode;

use pageforge_auth::{AuthzError, Permission, Principal, authorize};
use pageforge_core::ProjectId;

use crate::app::errors::json_error;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// Project visibility: the project must exist and be visible to the caller.
///
/// Invisible and missing projects are indistinguishable on purpose: both are
/// a plain 404.
pub fn require_visible(
    services: &AppServices,
    principal: Option<&PrincipalContext>,
    author: &str,
    slug: &str,
) -> Result<(), axum::response::Response> {
    let viewer = principal.map(|ctx| ctx.principal().user_id);

    let visible = services
        .pages
        .find_project(author, slug)
        .map(|project| project.visible_to(viewer))
        .unwrap_or(false);

    if visible {
        Ok(())
    } else {
        Err(json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "project not found",
        ))
    }
}

/// The caller must be authenticated and not administratively locked.
pub fn require_unlocked(
    principal: Option<&PrincipalContext>,
) -> Result<&Principal, axum::response::Response> {
    let Some(ctx) = principal else {
        return Err(json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "authentication required",
        ));
    };

    let principal = ctx.principal();
    if principal.locked {
        return Err(json_error(
            StatusCode::FORBIDDEN,
            "account_locked",
            "account is locked",
        ));
    }

    Ok(principal)
}

/// The caller must hold `required` scoped to the project.
///
/// Grants come from project ownership/membership; the global "admin" role
/// implies the wildcard.
pub fn require_project_permission(
    services: &AppServices,
    principal: &Principal,
    project_id: ProjectId,
    required: &Permission,
) -> Result<(), axum::response::Response> {
    let Some(project) = services.pages.find_project_by_id(project_id) else {
        return Err(json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "project not found",
        ));
    };

    let mut granted = project.permissions_for(principal.user_id);
    if principal.is_admin() {
        granted.push(Permission::new("*"));
    }

    match authorize(principal, &granted, required) {
        Ok(()) => Ok(()),
        Err(AuthzError::Locked) => Err(json_error(
            StatusCode::FORBIDDEN,
            "account_locked",
            "account is locked",
        )),
        Err(e @ AuthzError::Forbidden(_)) => {
            Err(json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()))
        }
    }
}
