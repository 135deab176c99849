//! Ranking handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::RankedConcertResponse;
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// `GET /rankings` — Concerts ordered by weighted vote score.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure; never an empty fallback.
#[utoipa::path(
    get,
    path = "/api/rankings",
    tag = "Rankings",
    summary = "Concert rankings",
    description = "Ranks every concert by `2 * excited + interested`, highest first. Ties go to the lower concert id. Concerts without votes are included with a score of 0.",
    responses(
        (status = 200, description = "Ranked concerts, rank ascending", body = Vec<RankedConcertResponse>),
        (status = 503, description = "Storage unavailable", body = ErrorResponse),
    )
)]
pub async fn get_rankings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let ranked = state.ranking_service.compute_rankings().await?;
    let body: Vec<RankedConcertResponse> = ranked
        .into_iter()
        .map(RankedConcertResponse::from)
        .collect();
    Ok(Json(body))
}

/// Ranking routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/rankings", get(get_rankings))
}
