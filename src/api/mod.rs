//! REST API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.
//!
//! Resource endpoints are mounted under `/api`.

pub mod dto;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::Router;
use axum::extract::OriginalUri;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::AppConfig;
use crate::error::ApiError;

/// Builds the complete API router with all REST endpoints.
///
/// Unmatched paths under `/api` get a JSON 404 rather than falling
/// through to whatever serves the rest of the site.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes().fallback(api_not_found))
        .merge(handlers::system::routes())
        .merge(openapi::routes())
}

/// Builds the served application: routes, optional frontend, and the
/// HTTP middleware stack.
///
/// When `config.static_dir` is set, paths outside the API are served
/// from that directory (`/` maps to `index.html`) and missing files
/// return 404. Requests exceeding `config.request_timeout_secs` are
/// answered with 503.
pub fn build_app(state: AppState, config: &AppConfig) -> Router {
    let mut app = build_router().with_state(state);

    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "serving frontend");
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TimeoutLayer::with_status_code(
        StatusCode::SERVICE_UNAVAILABLE,
        Duration::from_secs(config.request_timeout_secs),
    ))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
