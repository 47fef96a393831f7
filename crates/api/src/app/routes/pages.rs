//! Project documentation pages: render preview, fetch, create, save, delete.
//!
//! Handlers hold no logic of their own: each one runs its guards, then
//! delegates to the injected page service or markdown renderer and shapes the
//! result into a response.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use pageforge_auth::Permission;
use pageforge_core::{PageId, ProjectId};
use pageforge_pages::PagePath;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;
use crate::guards;

pub fn router() -> Router {
    Router::new()
        .route("/render", post(render_markdown))
        .route("/page/:author/:slug", get(get_project_page_root))
        .route("/page/:author/:slug/*path", get(get_project_page))
        .route("/create/:project_id", post(create_project_page))
        .route("/save/:project_id/:page_id", post(save_project_page))
        .route("/delete/:project_id/:page_id", post(delete_project_page))
}

/// `POST /render` — markdown preview. Open to anonymous callers; pure.
pub async fn render_markdown(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::StringContent>,
) -> axum::response::Response {
    let content = match body.validated() {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let rendered = services.markdown.render(&content);
    (StatusCode::OK, Json(rendered)).into_response()
}

/// `GET /page/{author}/{slug}` — the project's home page.
pub async fn get_project_page_root(
    Extension(services): Extension<Arc<AppServices>>,
    principal: Option<Extension<PrincipalContext>>,
    Path((author, slug)): Path<(String, String)>,
) -> axum::response::Response {
    resolve_page(&services, principal.as_deref(), &author, &slug, PagePath::root())
}

/// `GET /page/{author}/{slug}/*path` — a nested page addressed by the
/// wildcard suffix.
pub async fn get_project_page(
    Extension(services): Extension<Arc<AppServices>>,
    principal: Option<Extension<PrincipalContext>>,
    Path((author, slug, path)): Path<(String, String, String)>,
) -> axum::response::Response {
    let page_path = PagePath::from_request_suffix(&path);
    resolve_page(&services, principal.as_deref(), &author, &slug, page_path)
}

fn resolve_page(
    services: &AppServices,
    principal: Option<&PrincipalContext>,
    author: &str,
    slug: &str,
    path: PagePath,
) -> axum::response::Response {
    if let Err(resp) = guards::require_visible(services, principal, author, slug) {
        return resp;
    }

    match services.pages.get_project_page(author, slug, &path) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::page_error_to_response(e),
    }
}

/// `POST /create/{project_id}` — create a page; responds with the generated
/// slug as an opaque JSON string.
pub async fn create_project_page(
    Extension(services): Extension<Arc<AppServices>>,
    principal: Option<Extension<PrincipalContext>>,
    Path(project_id): Path<String>,
    Json(body): Json<dto::NewProjectPageRequest>,
) -> axum::response::Response {
    let project_id: ProjectId = match project_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid project id");
        }
    };

    let principal = match guards::require_unlocked(principal.as_deref()) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    if let Err(resp) = guards::require_project_permission(
        &services,
        principal,
        project_id,
        &Permission::edit_page(),
    ) {
        return resp;
    }

    match services.pages.create_project_page(project_id, body.into()) {
        Ok(slug) => (StatusCode::OK, Json(slug)).into_response(),
        Err(e) => errors::page_error_to_response(e),
    }
}

/// `POST /save/{project_id}/{page_id}` — overwrite a page's contents.
pub async fn save_project_page(
    Extension(services): Extension<Arc<AppServices>>,
    principal: Option<Extension<PrincipalContext>>,
    Path((project_id, page_id)): Path<(String, String)>,
    Json(body): Json<dto::StringContent>,
) -> axum::response::Response {
    let Some((project_id, page_id)) = parse_page_address(&project_id, &page_id) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid id");
    };

    let principal = match guards::require_unlocked(principal.as_deref()) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    if let Err(resp) = guards::require_project_permission(
        &services,
        principal,
        project_id,
        &Permission::edit_page(),
    ) {
        return resp;
    }

    let content = match body.validated() {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match services.pages.save_project_page(project_id, page_id, &content) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => errors::page_error_to_response(e),
    }
}

/// `POST /delete/{project_id}/{page_id}` — delete a page (and descendants).
pub async fn delete_project_page(
    Extension(services): Extension<Arc<AppServices>>,
    principal: Option<Extension<PrincipalContext>>,
    Path((project_id, page_id)): Path<(String, String)>,
) -> axum::response::Response {
    let Some((project_id, page_id)) = parse_page_address(&project_id, &page_id) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid id");
    };

    let principal = match guards::require_unlocked(principal.as_deref()) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    if let Err(resp) = guards::require_project_permission(
        &services,
        principal,
        project_id,
        &Permission::edit_page(),
    ) {
        return resp;
    }

    match services.pages.delete_project_page(project_id, page_id) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => errors::page_error_to_response(e),
    }
}

fn parse_page_address(project_id: &str, page_id: &str) -> Option<(ProjectId, PageId)> {
    Some((project_id.parse().ok()?, page_id.parse().ok()?))
}
