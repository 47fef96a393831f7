//! HTTP API application wiring (axum router + service wiring).
//!
//! - `services.rs`: the injected collaborators (page service, markdown renderer)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use pageforge_pages::{CommonMarkRenderer, InMemoryPageStore};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with explicitly injected collaborators.
///
/// Tests substitute `services` with doubles; `build_app` wires the defaults.
pub fn build_app_with(services: Arc<services::AppServices>, jwt_secret: String) -> Router {
    let jwt = Arc::new(pageforge_auth::Hs256JwtValidator::new(jwt_secret));
    let auth_state = middleware::AuthState { jwt };

    let pages = routes::pages::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/internal/pages", pages)
        .layer(ServiceBuilder::new())
}

/// Build the production router (in-memory page store + CommonMark renderer).
pub fn build_app(jwt_secret: String) -> Router {
    let services = Arc::new(services::AppServices::new(
        Arc::new(InMemoryPageStore::new()),
        Arc::new(CommonMarkRenderer),
    ));
    build_app_with(services, jwt_secret)
}
