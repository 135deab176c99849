//! Concert catalog handlers: list and get.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::ConcertResponse;
use crate::app_state::AppState;
use crate::domain::ConcertId;
use crate::error::{ApiError, ErrorResponse};

/// `GET /concerts` — List every concert.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/concerts",
    tag = "Concerts",
    summary = "List concerts",
    description = "Returns every concert in the catalog, ordered by id.",
    responses(
        (status = 200, description = "Concert catalog", body = Vec<ConcertResponse>),
        (status = 503, description = "Storage unavailable", body = ErrorResponse),
    )
)]
pub async fn list_concerts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let concerts = state.concert_service.list_concerts().await?;
    let body: Vec<ConcertResponse> = concerts.into_iter().map(ConcertResponse::from).collect();
    Ok(Json(body))
}

/// `GET /concerts/{id}` — Get one concert.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] for a non-numeric or
/// non-positive id and [`ApiError::ConcertNotFound`] for an unknown one.
#[utoipa::path(
    get,
    path = "/api/concerts/{id}",
    tag = "Concerts",
    summary = "Get concert",
    description = "Returns a single concert by id.",
    params(
        ("id" = i64, Path, description = "Concert id (positive integer)"),
    ),
    responses(
        (status = 200, description = "Concert details", body = ConcertResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Concert not found", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse),
    )
)]
pub async fn get_concert(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ConcertId = raw_id.parse()?;
    let concert = state.concert_service.get_concert(id).await?;
    Ok(Json(ConcertResponse::from(concert)))
}

/// Concert catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/concerts", get(list_concerts))
        .route("/concerts/{id}", get(get_concert))
}
