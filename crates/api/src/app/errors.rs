use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pageforge_pages::PageError;

/// Central translation of page-service failures into HTTP responses.
///
/// Handlers never map errors themselves; they delegate here.
pub fn page_error_to_response(err: PageError) -> axum::response::Response {
    match err {
        PageError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        PageError::ProjectNotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "project not found")
        }
        PageError::PageNotFound => json_error(StatusCode::NOT_FOUND, "not_found", "page not found"),
        PageError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        PageError::HomePage => json_error(
            StatusCode::BAD_REQUEST,
            "home_page",
            "the home page cannot be deleted",
        ),
        PageError::MaxPages(limit) => json_error(
            StatusCode::BAD_REQUEST,
            "max_pages",
            format!("project has reached the maximum number of pages ({limit})"),
        ),
        PageError::MaxDepth(limit) => json_error(
            StatusCode::BAD_REQUEST,
            "max_depth",
            format!("page nesting exceeds the maximum depth ({limit})"),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
